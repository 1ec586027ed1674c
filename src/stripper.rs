//! The metadata-stripping pipeline.
//!
//! A single linear flow: validate → decode → reconstruct → derive-policy →
//! (maybe) reattach-profile → encode. Stripping works by reconstruction: the
//! pixels are copied into a freshly allocated image that never carried any
//! ancillary metadata, so there is nothing format-specific to scrub.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageBuffer, ImageFormat, ImageReader, Pixel};

use crate::error::StripError;
use crate::options::{JPEG_QUALITY, SaveOptions};
use crate::profile;

/// A decoded input image plus the raw container bytes it came from.
///
/// The raw bytes are kept around so the ICC profile can be read from the
/// container side channel without reopening the file.
struct SourceImage {
    pixels: DynamicImage,
    raw: Vec<u8>,
}

impl SourceImage {
    fn open(path: &Path) -> Result<Self, StripError> {
        let raw = fs::read(path).map_err(|e| StripError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?;

        let pixels = ImageReader::new(Cursor::new(raw.as_slice()))
            .with_guessed_format()
            .map_err(|e| StripError::Decode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|e| StripError::Decode {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self { pixels, raw })
    }

    /// Read the embedded ICC profile from the container side channel.
    fn icc_profile(&self) -> Result<Option<Vec<u8>>, img_parts::Error> {
        profile::extract(&self.raw)
    }
}

/// Summary of a successful strip, for logging and assertions.
#[derive(Debug)]
pub struct StripReport {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
    pub format: ImageFormat,
    pub profile_preserved: bool,
}

/// Strip all ancillary metadata from `input`, writing the sanitized image to
/// `output` in the format implied by its extension.
///
/// `output` is overwritten if it exists; on any failure it is left untouched
/// (the encode goes to a temp file that is renamed into place on success).
/// With `keep_color_profile`, the source's ICC profile is carried over when
/// present and readable; a profile that cannot be read is logged as a
/// warning and skipped, never failing the operation.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
///
/// let report = metastrip::strip(
///     Path::new("photo.jpg"),
///     Path::new("clean.jpg"),
///     false,
/// )?;
/// println!("wrote {}x{} image", report.width, report.height);
/// # Ok::<(), metastrip::StripError>(())
/// ```
pub fn strip(
    input: &Path,
    output: &Path,
    keep_color_profile: bool,
) -> Result<StripReport, StripError> {
    // Validation happens before any decode attempt or output I/O.
    if !input.exists() {
        return Err(StripError::NotFound(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(StripError::InvalidInput(input.to_path_buf()));
    }

    let source = SourceImage::open(input)?;

    // Reconstruction is the stripping mechanism: the fresh image starts with
    // no metadata at all.
    let sanitized = rebuild(&source.pixels);

    let mut opts = SaveOptions::for_output(output);

    if keep_color_profile {
        match source.icc_profile() {
            Ok(Some(icc)) => {
                log::info!("Preserving color profile ({} bytes)", icc.len());
                opts.icc_profile = Some(icc);
            }
            Ok(None) => {}
            Err(e) => {
                // Best effort only. A broken or unreadable profile must not
                // fail the strip.
                log::warn!(
                    "Could not read color profile from {}: {e}; continuing without it",
                    input.display()
                );
            }
        }
    }

    let report = encode(&sanitized, output, &opts)?;

    log::info!(
        "Metadata removed successfully. Output file: {}",
        output.display()
    );

    Ok(report)
}

/// Allocate a fresh image with the source's color type and dimensions and
/// copy the raw sample buffer verbatim, row-major.
///
/// Layouts without a matching standard buffer fall back to an RGBA8 copy.
fn rebuild(source: &DynamicImage) -> DynamicImage {
    use DynamicImage::*;
    match source {
        ImageLuma8(b) => ImageLuma8(copy_samples(b)),
        ImageLumaA8(b) => ImageLumaA8(copy_samples(b)),
        ImageRgb8(b) => ImageRgb8(copy_samples(b)),
        ImageRgba8(b) => ImageRgba8(copy_samples(b)),
        ImageLuma16(b) => ImageLuma16(copy_samples(b)),
        ImageLumaA16(b) => ImageLumaA16(copy_samples(b)),
        ImageRgb16(b) => ImageRgb16(copy_samples(b)),
        ImageRgba16(b) => ImageRgba16(copy_samples(b)),
        ImageRgb32F(b) => ImageRgb32F(copy_samples(b)),
        ImageRgba32F(b) => ImageRgba32F(copy_samples(b)),
        other => ImageRgba8(other.to_rgba8()),
    }
}

fn copy_samples<P: Pixel>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut fresh = ImageBuffer::new(src.width(), src.height());
    fresh.copy_from_slice(src.as_raw());
    fresh
}

/// Encode into memory, splice in the ICC profile when requested, then write
/// atomically: temp file in the output's directory, renamed into place.
fn encode(
    img: &DynamicImage,
    output: &Path,
    opts: &SaveOptions,
) -> Result<StripReport, StripError> {
    let format = ImageFormat::from_path(output).map_err(|e| StripError::encode(output, e))?;

    let mut encoded = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let quality = opts.quality.unwrap_or(JPEG_QUALITY);
            let encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| StripError::encode(output, e))?;
        }
        _ => {
            img.write_to(&mut Cursor::new(&mut encoded), format)
                .map_err(|e| StripError::encode(output, e))?;
        }
    }

    let mut profile_preserved = false;
    if let Some(icc) = &opts.icc_profile {
        match profile::embed(&encoded, icc) {
            Ok(Some(with_icc)) => {
                encoded = with_icc;
                profile_preserved = true;
            }
            Ok(None) => {
                log::warn!(
                    "Output format {format:?} cannot carry a color profile; dropping it"
                );
            }
            Err(e) => return Err(StripError::encode(output, e)),
        }
    }

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".metastrip-")
        .tempfile_in(parent)
        .map_err(|e| StripError::encode(output, e))?;
    tmp.write_all(&encoded)
        .map_err(|e| StripError::encode(output, e))?;
    tmp.persist(output)
        .map_err(|e| StripError::encode(output, e.error))?;

    Ok(StripReport {
        output: output.to_path_buf(),
        width: img.width(),
        height: img.height(),
        color: img.color(),
        format,
        profile_preserved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use image::{GrayImage, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn checkerboard_rgb(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 0, 128])
            } else {
                image::Rgb([0, 200, 40])
            }
        })
    }

    // ── validation ───────────────────────────────────────────────────

    #[test]
    fn missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = strip(
            Path::new("does/not/exist.jpg"),
            &dir.path().join("out.jpg"),
            false,
        )
        .unwrap_err();
        assert_matches!(err, StripError::NotFound(_));
    }

    #[test]
    fn directory_input_is_invalid() {
        let dir = TempDir::new().unwrap();
        let err = strip(dir.path(), &dir.path().join("out.jpg"), false).unwrap_err();
        assert_matches!(err, StripError::InvalidInput(_));
    }

    #[test]
    fn garbage_input_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.jpg");
        fs::write(&bad, b"definitely not a jpeg").unwrap();

        let out = dir.path().join("out.jpg");
        let err = strip(&bad, &out, false).unwrap_err();
        assert_matches!(err, StripError::Decode { .. });
        assert!(!out.exists(), "no partial output on decode failure");
    }

    #[test]
    fn unrecognized_output_extension_is_encode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        checkerboard_rgb(4, 4).save(&input).unwrap();

        let err = strip(&input, &dir.path().join("out.xyz"), false).unwrap_err();
        assert_matches!(err, StripError::Encode { .. });
    }

    // ── reconstruction ───────────────────────────────────────────────

    #[test]
    fn rebuild_copies_rgb_samples_verbatim() {
        let src = DynamicImage::ImageRgb8(checkerboard_rgb(7, 5));
        let rebuilt = rebuild(&src);
        assert_eq!(rebuilt.color(), ColorType::Rgb8);
        assert_eq!(rebuilt.as_bytes(), src.as_bytes());
    }

    #[test]
    fn rebuild_preserves_grayscale_mode() {
        let gray = GrayImage::from_fn(3, 3, |x, y| image::Luma([(x * 80 + y) as u8]));
        let src = DynamicImage::ImageLuma8(gray);
        let rebuilt = rebuild(&src);
        assert_eq!(rebuilt.color(), ColorType::L8);
        assert_eq!(rebuilt.as_bytes(), src.as_bytes());
    }

    #[test]
    fn rebuild_preserves_alpha() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 120]));
        let src = DynamicImage::ImageRgba8(rgba);
        let rebuilt = rebuild(&src);
        assert_eq!(rebuilt.color(), ColorType::Rgba8);
        assert_eq!(rebuilt.as_bytes(), src.as_bytes());
    }

    // ── report ───────────────────────────────────────────────────────

    #[test]
    fn report_carries_dimensions_and_format() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        checkerboard_rgb(6, 4).save(&input).unwrap();

        let out = dir.path().join("out.png");
        let report = strip(&input, &out, false).unwrap();
        assert_eq!((report.width, report.height), (6, 4));
        assert_eq!(report.color, ColorType::Rgb8);
        assert_eq!(report.format, ImageFormat::Png);
        assert!(!report.profile_preserved);
        assert!(out.exists());
    }
}
