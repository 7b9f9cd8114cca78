use super::CommandError;
use crate::surface::{DrawingSurface, NAIL_COUNT};

/// What a command is allowed to touch: the five drawing surfaces.
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub surfaces: &'a mut [DrawingSurface; NAIL_COUNT],
}

impl<'a> CommandContext<'a> {
    pub fn new(surfaces: &'a mut [DrawingSurface; NAIL_COUNT]) -> Self {
        Self { surfaces }
    }

    pub fn surface(&self, nail: usize) -> Result<&DrawingSurface, CommandError> {
        self.surfaces.get(nail).ok_or(CommandError::NoSuchNail(nail))
    }

    pub fn surface_mut(&mut self, nail: usize) -> Result<&mut DrawingSurface, CommandError> {
        self.surfaces.get_mut(nail).ok_or(CommandError::NoSuchNail(nail))
    }
}
