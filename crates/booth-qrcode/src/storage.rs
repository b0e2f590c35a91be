//! Saving the rendered QR bitmap next to the photo file.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

/// Errors while persisting a QR bitmap.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported QR file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Expand a leading `~` or `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if path == "~" {
            return home;
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Derive the QR file path for a photo:
/// `<dir>/<photo-stem><suffix>.<ext>`.
///
/// `dir` is `save_dir` when configured (non-empty, `~` expanded), else
/// the photo's own directory, else the current directory. A leading `.`
/// on `ext` is tolerated.
pub fn qr_image_path(photo: &Path, suffix: &str, ext: &str, save_dir: Option<&str>) -> PathBuf {
    let stem = photo
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("picture");
    let ext = ext.trim().trim_start_matches('.');

    let dir = match save_dir {
        Some(d) if !d.trim().is_empty() => expand_home(d.trim()),
        _ => photo
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    dir.join(format!("{stem}{suffix}.{ext}"))
}

/// Write the bitmap to `path`, creating missing parent directories.
///
/// The encoder is picked from the path's extension. JPEG has no alpha
/// channel, so RGBA input is flattened to RGB first.
pub fn save_qr_image(bitmap: &RgbaImage, path: &Path) -> Result<(), StorageError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = ImageFormat::from_extension(ext)
        .ok_or_else(|| StorageError::UnsupportedExtension(ext.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if format == ImageFormat::Jpeg {
        let rgb = image::DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
        rgb.save_with_format(path, format)?;
    } else {
        bitmap.save_with_format(path, format)?;
    }

    tracing::info!(path = %path.display(), "QR image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn derives_path_next_to_photo() {
        let path = qr_image_path(
            Path::new("/data/session/2021-06-11-10-14-08_booth.jpg"),
            "_qrcode",
            "png",
            None,
        );
        assert_eq!(
            path,
            PathBuf::from("/data/session/2021-06-11-10-14-08_booth_qrcode.png")
        );
    }

    #[test]
    fn override_directory_wins() {
        let path = qr_image_path(
            Path::new("/data/session/IMG_001.jpg"),
            "_qrcode",
            "png",
            Some("/srv/qrcodes"),
        );
        assert_eq!(path, PathBuf::from("/srv/qrcodes/IMG_001_qrcode.png"));
    }

    #[test]
    fn empty_override_falls_back_to_photo_directory() {
        let path = qr_image_path(Path::new("/data/a.jpg"), "_qrcode", "png", Some(""));
        assert_eq!(path, PathBuf::from("/data/a_qrcode.png"));
    }

    #[test]
    fn dotted_extension_is_tolerated() {
        let path = qr_image_path(Path::new("/data/a.jpg"), "_qr", ".png", None);
        assert_eq!(path, PathBuf::from("/data/a_qr.png"));
    }

    #[test]
    fn bare_stem_lands_in_current_directory() {
        let path = qr_image_path(Path::new("picture_3"), "_qrcode", "png", None);
        assert_eq!(path, PathBuf::from("./picture_3_qrcode.png"));
    }

    #[test]
    fn tilde_override_expands_to_home() {
        let path = qr_image_path(Path::new("/data/a.jpg"), "_qr", "png", Some("~/qr"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("qr").join("a_qr.png"));
        }
    }

    #[test]
    fn saves_png_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let bitmap = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let path = dir.path().join("nested").join("qr.png");

        save_qr_image(&bitmap, &path).unwrap();
        assert!(path.is_file());
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.width(), 8);
    }

    #[test]
    fn saves_jpeg_by_flattening_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let bitmap = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 128]));
        let path = dir.path().join("qr.jpg");

        save_qr_image(&bitmap, &path).unwrap();
        assert!(path.is_file());
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let bitmap = RgbaImage::new(4, 4);
        let err = save_qr_image(&bitmap, Path::new("/tmp/qr.nope")).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedExtension(_)));
    }
}
