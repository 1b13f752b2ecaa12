//! # Substego
//!
//! Hides an arbitrary file inside the least significant bits of an image and
//! recovers it exactly, byte for byte. On top of plain LSB substitution the
//! codec brings:
//!
//! - a self describing binary header (payload length, bit depth, filename,
//!   compression flag, CRC-32), embedded one bit per pixel
//! - deflate compression of the secret, applied only when it actually shrinks
//!   the payload
//! - a password seeded permutation of the pixel coordinates, thwarting
//!   sequential embedding steganalysis
//! - the Optimal Pixel Adjustment correction pass, halving the worst case
//!   distortion of multi bit substitution
//!
//! The password is not encryption: it only decides WHERE bits live, not what
//! they look like. Outputs must stay in a lossless format, the LSB plane does
//! not survive lossy re-encoding.
//!
//! # Usage Examples
//!
//! ## Hide a file inside an image
//!
//! ```rust
//! use tempfile::tempdir;
//!
//! let dir = tempdir().expect("Failed to create temporary directory");
//! let cover = dir.path().join("cover.png");
//! let secret = dir.path().join("note.txt");
//! image::GrayImage::from_fn(100, 100, |x, y| image::Luma([(x + y) as u8]))
//!     .save(&cover)
//!     .expect("Failed to write cover image");
//! std::fs::write(&secret, b"meet me at dawn").expect("Failed to write secret");
//!
//! substego::api::embed::prepare()
//!     .with_cover(&cover)
//!     .with_secret_file(&secret)
//!     .with_output(dir.path().join("stego.png"))
//!     .with_password("hunter2")
//!     .with_bit_depth(2)
//!     .execute()
//!     .expect("Failed to hide secret in image");
//! ```
//!
//! ## Recover it again
//!
//! ```rust,no_run
//! let recovered = substego::api::extract::prepare()
//!     .from_secret_file("stego.png")
//!     .with_password("hunter2")
//!     .execute()
//!     .expect("Failed to extract secret from image");
//! // recovered now points at "[extracted]note.txt" next to the stego image
//! ```

pub mod api;
pub mod binary;
pub mod carrier;
pub mod codec;
pub mod commands;
pub mod compression;
pub mod error;
pub mod header;
pub mod opa;
pub mod permutation;
pub mod result;
pub mod validation;

use std::path::Path;

pub use crate::carrier::{Carrier, Plane};
pub use crate::codec::{embed_into_plane, extract_from_plane, CodecOptions, Secret};
pub use crate::error::SubstegoError;
pub use crate::header::{Header, MAX_HEADER_BITS};
pub use crate::result::Result;

/// Anything that can persist itself to a file.
pub trait Persist {
    fn save_as(&mut self, path: &Path) -> Result<()>;
}
