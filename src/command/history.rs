use super::{Command, CommandContext, CommandError, CommandResult};
use crate::surface::SurfaceBackup;

/// Oldest entries are dropped past this depth.
const MAX_UNDO_DEPTH: usize = 100;

#[derive(Debug, Clone)]
struct Entry {
    command: Command,
    backups: Vec<(usize, SurfaceBackup)>,
}

/// Manages the history of executed commands for undo/redo functionality.
///
/// Before a command runs, the surfaces it touches are backed up; undo puts
/// the backups back. The outline is never part of what undo can remove.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Entry>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and add it to the history if successful
    pub fn execute(&mut self, command: Command, ctx: &mut CommandContext<'_>) -> CommandResult {
        let entry = Self::apply(command, ctx)?;
        self.push(entry);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the last executed command
    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let entry = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        for (nail, backup) in entry.backups {
            ctx.surface_mut(nail)?.restore(backup);
        }
        log::debug!("Undid {}", entry.command.name());
        self.redo_stack.push(entry.command);
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        let entry = Self::apply(command, ctx)?;
        log::debug!("Redid {}", entry.command.name());
        self.push(entry);
        Ok(())
    }

    fn apply(command: Command, ctx: &mut CommandContext<'_>) -> Result<Entry, CommandError> {
        let backups = command
            .affected_nails()
            .into_iter()
            .map(|nail| ctx.surface(nail).map(|surface| (nail, surface.backup())))
            .collect::<Result<Vec<_>, _>>()?;
        command.execute(ctx)?;
        Ok(Entry { command, backups })
    }

    fn push(&mut self, entry: Entry) {
        self.undo_stack.push(entry);
        if self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
