//! Image URL helpers for uploaded media.
//!
//! Uploads are either absolute (Cloudinary or other http URLs) or relative
//! to the backend's `/uploads/` directory.

/// Crop mode for Cloudinary transformations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Crop {
    #[default]
    Fill,
    Fit,
    Crop,
}

impl Crop {
    fn as_str(self) -> &'static str {
        match self {
            Crop::Fill => "fill",
            Crop::Fit => "fit",
            Crop::Crop => "crop",
        }
    }
}

/// Resolve an image path to a full URL against the API origin.
pub fn image_url(origin: &str, path: &str) -> String {
    if path.trim().is_empty() {
        log::warn!("Empty image path provided to image_url");
        return String::new();
    }
    if path.contains("cloudinary.com") || path.starts_with("http") {
        return path.to_string();
    }
    if path.starts_with("/uploads/") {
        return format!("{}{}", origin, path);
    }
    if path.starts_with("uploads/") {
        return format!("{}/{}", origin, path);
    }
    format!("{}/uploads/{}", origin, path)
}

/// Insert auto-format/quality and sizing transformations into a Cloudinary URL.
///
/// Non-Cloudinary and malformed URLs are returned unchanged.
pub fn optimize_cloudinary_url(
    url: &str,
    width: Option<u32>,
    height: Option<u32>,
    crop: Crop,
) -> String {
    if url.trim().is_empty() {
        log::warn!("Empty Cloudinary URL provided to optimize_cloudinary_url");
        return String::new();
    }
    if !url.contains("cloudinary.com") {
        return url.to_string();
    }

    let parts: Vec<&str> = url.split("/upload/").collect();
    if parts.len() != 2 {
        log::warn!("Invalid Cloudinary URL format: {}", url);
        return url.to_string();
    }

    let mut transformations = String::from("f_auto,q_auto");
    if let Some(w) = width {
        transformations.push_str(&format!(",w_{}", w));
    }
    if let Some(h) = height {
        transformations.push_str(&format!(",h_{}", h));
    }
    transformations.push_str(&format!(",c_{}", crop.as_str()));

    format!("{}/upload/{}/{}", parts[0], transformations, parts[1])
}
