//! ICC color profile extraction and reattachment.
//!
//! Works on raw container bytes, not decoded pixels: the profile lives in a
//! JPEG APP2 segment, a PNG `iCCP` chunk, or a WebP `ICCP` chunk, and
//! `img-parts` handles all three behind [`DynImage`].

use img_parts::{Bytes, DynImage, ImageICC};

/// Extract the embedded ICC profile from raw image file bytes.
///
/// Returns `Ok(None)` when the container has no profile or the format is not
/// one img-parts understands. Errors only on a malformed container.
pub fn extract(file_bytes: &[u8]) -> Result<Option<Vec<u8>>, img_parts::Error> {
    let parsed = DynImage::from_bytes(Bytes::copy_from_slice(file_bytes))?;
    Ok(parsed
        .and_then(|img| img.icc_profile())
        .map(|icc| icc.to_vec()))
}

/// Splice an ICC profile into freshly encoded image bytes.
///
/// Returns the rewritten container, or `Ok(None)` when the output format
/// cannot carry a profile (the caller decides whether that is worth a
/// warning). Errors only on a malformed container, which for bytes we just
/// encoded would indicate a codec bug.
pub fn embed(encoded: &[u8], icc: &[u8]) -> Result<Option<Vec<u8>>, img_parts::Error> {
    let Some(mut img) = DynImage::from_bytes(Bytes::copy_from_slice(encoded))? else {
        return Ok(None);
    };
    img.set_icc_profile(Some(Bytes::copy_from_slice(icc)));
    Ok(Some(img.encoder().bytes().to_vec()))
}
