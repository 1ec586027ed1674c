//! Extension-driven save policy.
//!
//! The options applied when re-encoding depend only on the *output* path's
//! extension, never on the decoded input format. Saving a decoded PNG as
//! `photo.jpg` therefore gets the full JPEG policy, while saving a decoded
//! JPEG as `photo.png` gets format defaults. This is intentional.

use std::path::Path;

/// JPEG re-encode quality. High enough that a single strip pass is
/// visually lossless for typical photos.
pub const JPEG_QUALITY: u8 = 95;

/// Per-invocation encoding options derived from the output path.
///
/// # Example
///
/// ```rust
/// use metastrip::options::SaveOptions;
/// use std::path::Path;
///
/// let opts = SaveOptions::for_output(Path::new("out.jpg"));
/// assert_eq!(opts.quality, Some(95));
/// assert!(opts.optimize && opts.progressive);
///
/// let opts = SaveOptions::for_output(Path::new("out.png"));
/// assert_eq!(opts.quality, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveOptions {
    /// Lossy compression quality (JPEG only).
    pub quality: Option<u8>,
    /// Re-entropy-code for a smaller file where the codec supports it.
    pub optimize: bool,
    /// Interleaved (progressive) encoding for JPEG.
    pub progressive: bool,
    /// ICC profile bytes to embed in the output container, if preservation
    /// was requested and the source had one.
    pub icc_profile: Option<Vec<u8>>,
}

impl SaveOptions {
    /// Derive save options from the output path's extension (case-insensitive).
    ///
    /// `.jpg`/`.jpeg` get the lossy policy (quality 95, optimize,
    /// progressive); every other extension gets format defaults.
    pub fn for_output(output: &Path) -> Self {
        let ext = output
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" => Self {
                quality: Some(JPEG_QUALITY),
                optimize: true,
                progressive: true,
                icc_profile: None,
            },
            _ => Self::default(),
        }
    }
}
