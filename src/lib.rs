#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod environment;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod palette;
pub mod panels;
pub mod patterns;
pub mod preview;
pub mod primitive;
pub mod renderer;
pub mod scheduler;
pub mod shape;
pub mod snapshot;
pub mod store;
pub mod surface;
pub mod texture;
pub mod tools;
pub mod tutorial;
pub mod util;
pub mod workbench;

pub use app::NailStudioApp;
pub use command::{Command, CommandHistory};
pub use config::EditorConfig;
pub use event::{EditorEvent, EventBus};
pub use preview::HandPreview;
pub use renderer::SurfaceRenderer;
pub use shape::NailShape;
pub use store::{DesignRecord, DesignStore};
pub use surface::DrawingSurface;
pub use texture::NailTexture;
pub use tools::{Tool, ToolKind};
pub use tutorial::{Tutorial, TutorialPlayer};
pub use workbench::Workbench;
