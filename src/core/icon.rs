use std::path::{Component, Path, PathBuf};

use super::error::{IconError, PresenterError, Result};

/// Decoded window icon, tightly packed RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Resolve an icon path either against the running executable's directory
/// or as given.
///
/// When `is_relative`, a root or drive prefix on `path` is dropped, so the
/// result always stays under the executable's directory.
pub fn resolve_icon_path(path: &Path, is_relative: bool) -> Result<PathBuf> {
    if !is_relative {
        return Ok(path.to_path_buf());
    }

    let exe = std::env::current_exe().map_err(|e| icon_error(path, e.into()))?;
    let base = exe.parent().unwrap_or_else(|| Path::new("."));
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    Ok(base.join(relative))
}

/// Decode an image file into RGBA8
pub fn load_icon(path: &Path) -> Result<IconImage> {
    let image = image::open(path).map_err(|e| icon_error(path, e.into()))?;
    let rgba = image.to_rgba8();

    Ok(IconImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

fn icon_error(path: &Path, source: IconError) -> PresenterError {
    PresenterError::Icon {
        path: path.to_path_buf(),
        source,
    }
}
