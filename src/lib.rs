//! # metastrip
//!
//! Strip embedded metadata (EXIF, ICC color profile, text chunks, and any
//! other ancillary data) from a raster image, writing a sanitized copy that
//! is visually equivalent to the input. Meant for publishing or sharing
//! images without leaking camera, location, or software details.
//!
//! Stripping works by reconstruction rather than by format-specific chunk
//! surgery: the pixels are decoded, copied verbatim into a freshly allocated
//! image, and re-encoded. The fresh image never carried any metadata, so
//! nothing format-specific has to be scrubbed — the approach covers EXIF,
//! IPTC, XMP, and text chunks alike.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! fn main() -> Result<(), metastrip::StripError> {
//!     // Strip everything, keeping the ICC color profile.
//!     let report = metastrip::strip(
//!         Path::new("vacation.jpg"),
//!         Path::new("vacation-clean.jpg"),
//!         true, // keep_color_profile
//!     )?;
//!
//!     println!(
//!         "wrote {}x{} {:?}, profile preserved: {}",
//!         report.width, report.height, report.format, report.profile_preserved,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Save policy
//!
//! Re-encode options are derived from the *output* extension only:
//! `.jpg`/`.jpeg` outputs are written at quality 95 with optimized,
//! progressive encoding; every other format uses codec defaults. See
//! [`options::SaveOptions`].
//!
//! ## Modules
//!
//! - [`stripper`] — the validate → decode → reconstruct → encode pipeline
//! - [`options`] — extension-driven save policy
//! - [`profile`] — ICC profile extraction and reattachment
//! - [`error`] — the error taxonomy

pub mod error;
pub mod options;
pub mod profile;
pub mod stripper;

pub use error::StripError;
pub use options::SaveOptions;
pub use stripper::{strip, StripReport};
