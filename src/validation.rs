//! Fail fast precondition and integrity checks.
//!
//! Every check is side effect free and runs before any pixel or file is
//! mutated, so a failing embed or extract never leaves a partial result
//! behind.

use std::path::Path;

use crate::error::SubstegoError;
use crate::header::crc32;
use crate::result::Result;

/// The JPEG family re-encodes lossily and would destroy the LSB plane.
const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe", "jfif"];

/// Check whether the bit depth is within the supported [1, 8] range.
pub fn bit_depth_range(bit_depth: u8) -> Result<()> {
    if !(1..=8).contains(&bit_depth) {
        return Err(SubstegoError::InvalidBitDepth(bit_depth));
    }
    Ok(())
}

/// Check that the stego target does not use a lossy image format.
pub fn output_format(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    if let Some(ext) = ext {
        if LOSSY_EXTENSIONS.contains(&ext.as_str()) {
            return Err(SubstegoError::UnsupportedOutputFormat(
                path.display().to_string(),
            ));
        }
    }
    Ok(())
}

/// Check that the carrier plane has enough pixels for header and payload.
pub fn capacity(needed: usize, available: usize) -> Result<()> {
    if needed > available {
        return Err(SubstegoError::InsufficientCapacity { needed, available });
    }
    Ok(())
}

/// Check the extracted payload against the checksum stored in the header.
pub fn integrity(data: &[u8], expected_crc: u32) -> Result<()> {
    if crc32(data) != expected_crc {
        return Err(SubstegoError::IntegrityFailure);
    }
    Ok(())
}
