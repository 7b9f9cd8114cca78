//! The editing session: one shared configuration, five nails and a hand.
//!
//! Every configuration change goes through here and fans out in one
//! direction: config, then each surface, then the 3D preview, then an
//! [`EditorEvent`] for whoever listens. Surfaces never talk to each other.

use egui::{Color32, Pos2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::color;
use crate::command::{Command, CommandContext, CommandError, CommandHistory, CommandResult};
use crate::config::EditorConfig;
use crate::environment::EnvironmentSource;
use crate::event::{EditorEvent, EventBus};
use crate::patterns::Pattern;
use crate::preview::HandPreview;
use crate::primitive::RasterImage;
use crate::scheduler::{FrameScheduler, FrameTask, TaskKind};
use crate::shape::NailShape;
use crate::snapshot::{self, SnapshotError};
use crate::store::{DesignDraft, LoadedDesign, StoreError};
use crate::surface::{DrawingSurface, NAIL_COUNT};
use crate::texture::NailTexture;
use crate::tools::{Tool, ToolContext, ToolKind, ToolPreview, ToolType, new_tool};
use crate::tutorial::StepTarget;
use crate::util::time::clock_seed;

#[derive(Debug)]
pub struct Workbench {
    config: EditorConfig,
    surfaces: [DrawingSurface; NAIL_COUNT],
    tool: ToolType,
    history: CommandHistory,
    events: EventBus,
    rng: StdRng,
    scheduler: FrameScheduler,
    /// Held while the texture is glitter.
    shimmer: Option<FrameTask>,
    preview: HandPreview,
}

impl Workbench {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_seed(config, clock_seed())
    }

    /// Same as [`Self::new`] with a fixed random seed.
    pub fn with_seed(config: EditorConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let surfaces = std::array::from_fn(|index| DrawingSurface::new(index, &config));
        let preview = HandPreview::new(
            config.shape,
            config.texture,
            [config.color; NAIL_COUNT],
            config.skin_tone,
            EnvironmentSource::default(),
        );
        let mut workbench = Self {
            tool: new_tool(config.tool),
            config,
            surfaces,
            history: CommandHistory::new(),
            events: EventBus::new(),
            rng: StdRng::seed_from_u64(seed),
            scheduler: FrameScheduler::new(),
            shimmer: None,
            preview,
        };
        workbench.refresh_glitter();
        workbench
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surfaces(&self) -> &[DrawingSurface; NAIL_COUNT] {
        &self.surfaces
    }

    pub fn surface(&self, nail: usize) -> Option<&DrawingSurface> {
        self.surfaces.get(nail)
    }

    pub fn nail_colors(&self) -> [Color32; NAIL_COUNT] {
        std::array::from_fn(|nail| self.surfaces[nail].color())
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn preview(&self) -> &HandPreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut HandPreview {
        &mut self.preview
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_shimmering(&self) -> bool {
        self.shimmer.is_some()
    }

    // Configuration

    /// Select a tool by name. Unknown names select the brush.
    pub fn select_tool(&mut self, name: &str) {
        self.set_tool(ToolKind::from_name(name));
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        let old = self.tool.kind();
        if old == kind {
            return;
        }
        self.tool = new_tool(kind);
        self.config.tool = kind;
        self.events.emit(EditorEvent::ToolChanged { old, new: kind });
    }

    /// Select the polish color for all five nails.
    pub fn set_color(&mut self, color: Color32) {
        self.config.color = color;
        for surface in &mut self.surfaces {
            surface.set_color(color);
        }
        self.refresh_glitter();
        self.rebuild_preview();
        self.events.emit(EditorEvent::ColorChanged(color));
    }

    /// Override the polish color of one nail.
    pub fn set_nail_color(&mut self, nail: usize, color: Color32) -> CommandResult {
        let surface = self
            .surfaces
            .get_mut(nail)
            .ok_or(CommandError::NoSuchNail(nail))?;
        surface.set_color(color);
        surface.regenerate_overlay(self.config.glitter_density, &mut self.rng);
        self.rebuild_preview();
        self.events
            .emit(EditorEvent::NailColorChanged { nail, color });
        Ok(())
    }

    pub fn set_shape(&mut self, shape: NailShape) {
        self.config.shape = shape;
        self.reskin_all();
        self.events.emit(EditorEvent::ShapeChanged(shape));
    }

    /// Change the finish. Glitter starts the shimmer animation; any other
    /// finish stops it.
    pub fn set_texture(&mut self, texture: NailTexture) {
        self.config.texture = texture;
        self.reskin_all();
        self.events.emit(EditorEvent::TextureChanged(texture));
    }

    /// Skin changes never touch the nails.
    pub fn set_skin_tone(&mut self, tone: Color32) {
        self.config.skin_tone = tone;
        self.preview.set_skin_tone(tone);
        self.events.emit(EditorEvent::SkinToneChanged(tone));
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.config.set_brush_size(size);
        self.events
            .emit(EditorEvent::BrushSizeChanged(self.config.brush_size));
    }

    pub fn set_glitter_density(&mut self, density: u32) {
        let before = self.config.glitter_density;
        self.config.set_glitter_density(density);
        if self.config.glitter_density != before {
            self.refresh_glitter();
            self.events
                .emit(EditorEvent::GlitterDensityChanged(self.config.glitter_density));
        }
    }

    fn reskin_all(&mut self) {
        let (shape, texture) = (self.config.shape, self.config.texture);
        for surface in &mut self.surfaces {
            let color = surface.color();
            surface.reskin(shape, texture, color);
        }
        self.refresh_glitter();
        self.rebuild_preview();
    }

    /// Regenerate the glitter decoration and start or stop the shimmer to
    /// match the current texture.
    fn refresh_glitter(&mut self) {
        for surface in &mut self.surfaces {
            surface.regenerate_overlay(self.config.glitter_density, &mut self.rng);
        }
        if self.config.texture == NailTexture::Glitter {
            if self.shimmer.is_none() {
                self.shimmer = self.scheduler.schedule(TaskKind::Shimmer);
            }
        } else if let Some(task) = self.shimmer.take() {
            task.cancel();
        }
    }

    fn rebuild_preview(&mut self) {
        let colors = self.nail_colors();
        self.preview
            .rebuild_nails(self.config.shape, self.config.texture, colors);
    }

    // Drawing

    pub fn pointer_down(&mut self, nail: usize, pos: Pos2) -> CommandResult {
        self.dispatch(nail, |tool, ctx| tool.on_pointer_down(pos, ctx))
    }

    pub fn pointer_move(&mut self, nail: usize, pos: Pos2) -> CommandResult {
        self.dispatch(nail, |tool, ctx| tool.on_pointer_move(pos, ctx))
    }

    pub fn pointer_up(&mut self, nail: usize, pos: Pos2) -> CommandResult {
        self.dispatch(nail, |tool, ctx| tool.on_pointer_up(pos, ctx))
    }

    /// In-progress gesture to draw on top of the surfaces.
    pub fn tool_preview(&self) -> Option<ToolPreview> {
        self.tool.preview()
    }

    fn dispatch(
        &mut self,
        nail: usize,
        handle: impl FnOnce(&mut ToolType, &mut ToolContext<'_>) -> Option<Command>,
    ) -> CommandResult {
        let surface = self.surfaces.get(nail).ok_or(CommandError::NoSuchNail(nail))?;
        let mut ctx = ToolContext {
            nail,
            surface,
            config: &self.config,
            rng: &mut self.rng,
        };
        match handle(&mut self.tool, &mut ctx) {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    /// Run an undoable command against the surfaces.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        let nails = command.affected_nails();
        let name = command.name();
        let mut ctx = CommandContext::new(&mut self.surfaces);
        self.history.execute(command, &mut ctx)?;
        log::debug!("Executed {name} on nails {nails:?}");
        self.events.emit(EditorEvent::SurfacesChanged { nails });
        Ok(())
    }

    pub fn clear(&mut self, nail: usize) -> CommandResult {
        self.execute(Command::Clear { nail })
    }

    pub fn clear_all(&mut self) -> CommandResult {
        self.execute(Command::ClearAll)
    }

    /// French manicure on every nail, tipped in the selected color.
    pub fn apply_french_all(&mut self) -> CommandResult {
        self.execute(Command::FrenchAll {
            color: self.config.color,
        })
    }

    pub fn apply_pattern(&mut self, nail: usize, pattern: Pattern) -> CommandResult {
        let size = self
            .surfaces
            .get(nail)
            .ok_or(CommandError::NoSuchNail(nail))?
            .size();
        let primitives = pattern.primitives(size, &mut self.rng);
        log::info!("Applying pattern {} to nail {}", pattern.id(), nail + 1);
        self.execute(Command::AddPrimitives { nail, primitives })
    }

    pub fn undo(&mut self) -> CommandResult {
        self.tool.reset();
        let mut ctx = CommandContext::new(&mut self.surfaces);
        self.history.undo(&mut ctx)?;
        self.events.emit(EditorEvent::SurfacesChanged {
            nails: (0..NAIL_COUNT).collect(),
        });
        Ok(())
    }

    pub fn redo(&mut self) -> CommandResult {
        self.tool.reset();
        let mut ctx = CommandContext::new(&mut self.surfaces);
        self.history.redo(&mut ctx)?;
        self.events.emit(EditorEvent::SurfacesChanged {
            nails: (0..NAIL_COUNT).collect(),
        });
        Ok(())
    }

    /// One animation frame. Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        if self.shimmer.is_none() {
            return false;
        }
        for surface in &mut self.surfaces {
            surface.shimmer(&mut self.rng);
        }
        true
    }

    pub fn show_preview(&mut self) {
        self.preview.show(&self.scheduler);
    }

    pub fn hide_preview(&mut self) {
        self.preview.hide();
    }

    // Designs

    /// Everything a saved design keeps, with each nail flattened to pixels.
    pub fn capture(&self) -> Result<DesignDraft, SnapshotError> {
        let snapshots = self
            .surfaces
            .iter()
            .map(snapshot::rasterize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DesignDraft {
            nail_colors: self.nail_colors(),
            shape: self.config.shape,
            texture: self.config.texture,
            snapshots,
        })
    }

    /// Replace the session with a saved design. Each nail gets the saved
    /// picture as a single raster layer; strokes cannot be edited afterwards
    /// and undo history is dropped.
    pub fn apply_design(&mut self, design: LoadedDesign) -> Result<(), StoreError> {
        if design.rasters.len() != NAIL_COUNT {
            return Err(StoreError::MissingThumbnails {
                found: design.rasters.len(),
            });
        }
        self.tool.reset();
        self.history.clear();
        self.config.shape = design.shape;
        self.config.texture = design.texture;

        for ((surface, raster), color) in self
            .surfaces
            .iter_mut()
            .zip(design.rasters)
            .zip(design.nail_colors)
        {
            surface.reskin(design.shape, design.texture, color);
            surface.load_raster(RasterImage::new(raster));
        }
        self.refresh_glitter();
        self.rebuild_preview();

        self.events.emit(EditorEvent::ShapeChanged(design.shape));
        self.events.emit(EditorEvent::TextureChanged(design.texture));
        self.events.emit(EditorEvent::SurfacesChanged {
            nails: (0..NAIL_COUNT).collect(),
        });
        self.events.emit(EditorEvent::DesignLoaded { id: design.id });
        Ok(())
    }
}

impl StepTarget for Workbench {
    fn select_tool(&mut self, name: &str) {
        Workbench::select_tool(self, name);
    }

    fn select_color(&mut self, hex: &str) {
        match color::parse_hex(hex) {
            Some(color) => self.set_color(color),
            None => log::warn!("Tutorial asked for invalid color {hex:?}"),
        }
    }

    fn select_shape(&mut self, name: &str) {
        self.set_shape(NailShape::from_name(name));
    }

    fn select_texture(&mut self, name: &str) {
        self.set_texture(NailTexture::from_name(name));
    }
}
