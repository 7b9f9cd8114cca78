//! PNG export of the five nails.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::snapshot::{self, SnapshotError};
use crate::surface::DrawingSurface;

/// `nail-1.png` for the first nail, and so on.
pub fn file_name(index: usize) -> String {
    format!("nail-{}.png", index + 1)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("browser refused the download: {0}")]
    Browser(String),
}

/// One named PNG per surface, in order.
pub fn export_pngs(surfaces: &[DrawingSurface]) -> Result<Vec<(String, Vec<u8>)>, SnapshotError> {
    surfaces
        .iter()
        .enumerate()
        .map(|(index, surface)| {
            let png = snapshot::encode_png(&snapshot::rasterize(surface)?)?;
            Ok((file_name(index), png))
        })
        .collect()
}

/// Write the export into `directory`, creating it if needed. Returns the
/// number of files written.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_to_dir(surfaces: &[DrawingSurface], directory: &Path) -> Result<usize, ExportError> {
    let io_error = |path: &Path| {
        let path = path.display().to_string();
        move |source| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(directory).map_err(io_error(directory))?;
    let files = export_pngs(surfaces)?;
    for (name, bytes) in &files {
        let path = directory.join(name);
        std::fs::write(&path, bytes).map_err(io_error(&path))?;
    }
    log::info!("Exported {} nails to {}", files.len(), directory.display());
    Ok(files.len())
}

/// Hand the export to the browser as five file downloads. Returns the
/// number of files offered.
#[cfg(target_arch = "wasm32")]
pub fn download_pngs(surfaces: &[DrawingSurface]) -> Result<usize, ExportError> {
    use eframe::wasm_bindgen::JsCast as _;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
    let files = export_pngs(surfaces)?;
    for (name, bytes) in &files {
        let anchor = document
            .create_element("a")
            .map_err(|err| ExportError::Browser(format!("{err:?}")))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Browser("link element unavailable".to_owned()))?;
        anchor.set_href(&snapshot::png_data_uri(bytes));
        anchor.set_download(name);
        anchor.click();
    }
    log::info!("Offered {} nails for download", files.len());
    Ok(files.len())
}
