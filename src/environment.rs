//! Best-effort environment map for reflective finishes.
//!
//! The cube map is decoded off the UI thread. Until it arrives, or if it never
//! does, reflective materials simply render flatter.

use std::path::PathBuf;

use futures::channel::oneshot;
use glam::Vec3;
use image::ImageFormat;

/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order.
pub const FACE_FILES: [&str; 6] = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

/// Soft studio cube map built into the binary, in [`FACE_FILES`] order.
const STUDIO_FACES: [&[u8]; 6] = [
    include_bytes!("../assets/envmap/px.png"),
    include_bytes!("../assets/envmap/nx.png"),
    include_bytes!("../assets/envmap/py.png"),
    include_bytes!("../assets/envmap/ny.png"),
    include_bytes!("../assets/envmap/pz.png"),
    include_bytes!("../assets/envmap/nz.png"),
];

/// Where the cube map faces come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvironmentSource {
    /// The studio cube map shipped with the app.
    #[default]
    Studio,
    /// Six files named as in [`FACE_FILES`]. Not readable on the web.
    Directory(PathBuf),
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentSource::Studio => f.write_str("built-in studio map"),
            EnvironmentSource::Directory(directory) => write!(f, "{}", directory.display()),
        }
    }
}

impl EnvironmentSource {
    /// Decode all six faces. Blocking; [`EnvironmentLoader`] calls this off
    /// the UI thread.
    pub fn load(&self) -> Result<EnvironmentMap, image::ImageError> {
        let mut faces = [[0.0; 3]; 6];
        for (index, face) in faces.iter_mut().enumerate() {
            let picture = match self {
                EnvironmentSource::Studio => {
                    image::load_from_memory_with_format(STUDIO_FACES[index], ImageFormat::Png)?
                }
                EnvironmentSource::Directory(directory) => {
                    image::open(directory.join(FACE_FILES[index]))?
                }
            };
            *face = average_rgb(&picture.to_rgb8());
        }
        Ok(EnvironmentMap::from_face_colors(faces))
    }
}

/// Cube map reduced to one average color per face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentMap {
    faces: [[f32; 3]; 6],
}

impl EnvironmentMap {
    pub fn from_face_colors(faces: [[f32; 3]; 6]) -> Self {
        Self { faces }
    }

    /// Color seen along `direction`.
    pub fn sample(&self, direction: Vec3) -> [f32; 3] {
        let abs = direction.abs();
        let face = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x >= 0.0 { 0 } else { 1 }
        } else if abs.y >= abs.z {
            if direction.y >= 0.0 { 2 } else { 3 }
        } else if direction.z >= 0.0 {
            4
        } else {
            5
        };
        self.faces[face]
    }
}

enum LoadState {
    Idle,
    Pending(oneshot::Receiver<Option<EnvironmentMap>>),
    Ready(EnvironmentMap),
    Unavailable,
}

pub struct EnvironmentLoader {
    source: EnvironmentSource,
    state: LoadState,
}

impl std::fmt::Debug for EnvironmentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            LoadState::Idle => "idle",
            LoadState::Pending(_) => "pending",
            LoadState::Ready(_) => "ready",
            LoadState::Unavailable => "unavailable",
        };
        f.debug_struct("EnvironmentLoader")
            .field("source", &self.source)
            .field("state", &state)
            .finish()
    }
}

impl EnvironmentLoader {
    pub fn new(source: EnvironmentSource) -> Self {
        Self {
            source,
            state: LoadState::Idle,
        }
    }

    /// Start loading if nothing was requested yet. Later calls are no-ops.
    pub fn request(&mut self) {
        if !matches!(self.state, LoadState::Idle) {
            return;
        }
        self.state = spawn_load(self.source.clone());
    }

    /// The map, once it has arrived.
    pub fn poll(&mut self) -> Option<&EnvironmentMap> {
        if let LoadState::Pending(receiver) = &mut self.state {
            match receiver.try_recv() {
                Ok(None) => {}
                Ok(Some(Some(map))) => self.state = LoadState::Ready(map),
                Ok(Some(None)) | Err(oneshot::Canceled) => self.state = LoadState::Unavailable,
            }
        }
        match &self.state {
            LoadState::Ready(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.state, LoadState::Unavailable)
    }
}

fn load_logged(source: &EnvironmentSource) -> Option<EnvironmentMap> {
    match source.load() {
        Ok(map) => {
            log::info!("Loaded environment map from {source}");
            Some(map)
        }
        Err(err) => {
            log::warn!("Environment map unavailable ({source}): {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_load(source: EnvironmentSource) -> LoadState {
    let (sender, receiver) = oneshot::channel();
    let spawned = std::thread::Builder::new()
        .name("environment-map".to_owned())
        .spawn(move || {
            let _ = sender.send(load_logged(&source));
        });

    match spawned {
        Ok(_) => LoadState::Pending(receiver),
        Err(err) => {
            log::warn!("Could not start environment map loader: {err}");
            LoadState::Unavailable
        }
    }
}

/// No threads on the web: decode on the event loop after the current frame.
#[cfg(target_arch = "wasm32")]
fn spawn_load(source: EnvironmentSource) -> LoadState {
    let (sender, receiver) = oneshot::channel();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = sender.send(load_logged(&source));
    });
    LoadState::Pending(receiver)
}

fn average_rgb(rgb: &image::RgbImage) -> [f32; 3] {
    let count = (rgb.width() as f32 * rgb.height() as f32).max(1.0);
    let mut sum = [0.0f32; 3];
    for pixel in rgb.pixels() {
        for (acc, channel) in sum.iter_mut().zip(pixel.0) {
            *acc += channel as f32 / 255.0;
        }
    }
    [sum[0] / count, sum[1] / count, sum[2] / count]
}
