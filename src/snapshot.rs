//! PNG export of rendered frames

use crate::error::Result;
use crate::render::FrameImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Ensures the output directory exists
fn ensure_output_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Save `frame` as `<dir>/<name>.png` and return the written path
pub fn save_frame<P: AsRef<Path>>(frame: &FrameImage, dir: P, name: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;

    let path = dir.join(format!("{}.png", name));
    info!(
        "[SNAPSHOT] Saving frame to {} ({}x{})",
        path.display(),
        frame.width(),
        frame.height()
    );

    if let Err(e) = frame.save(&path) {
        error!("[SNAPSHOT] Failed to save '{}': {}", path.display(), e);
        return Err(e.into());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_save_frame_writes_png() {
        let dir = std::env::temp_dir().join(format!("voice-dots-snapshot-{}", std::process::id()));
        let frame = FrameImage::from_pixel(8, 6, Rgb([60, 180, 255]));

        let path = save_frame(&frame, &dir, "solid").unwrap();
        assert!(path.ends_with("solid.png"));

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (8, 6));
        assert_eq!(*loaded.get_pixel(3, 3), Rgb([60, 180, 255]));

        let _ = fs::remove_dir_all(&dir);
    }
}
