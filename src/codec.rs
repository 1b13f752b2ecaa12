//! The embed and extract orchestration over a single carrier plane.
//!
//! Everything here is pure in-memory work: compression decision, header
//! assembly, coordinate permutation, bit substitution and the OPA correction
//! pass. File and image I/O live in the [`crate::api`] layer.

use log::{debug, info};

use crate::binary;
use crate::carrier::Plane;
use crate::compression;
use crate::error::SubstegoError;
use crate::header::{self, MAX_HEADER_BITS};
use crate::opa;
use crate::permutation::permute_indices;
use crate::result::Result;
use crate::validation;

/// Knobs of the embedding codec.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Color channel carrying the secret for color images (0 red, 1 green,
    /// 2 blue). Ignored for grayscale carriers.
    pub color_channel: usize,
    /// Number of low bits substituted per payload pixel, in [1, 8]. Higher
    /// values increase capacity and distortion alike.
    pub bit_depth: u8,
    /// Deflate the secret before embedding when that actually shrinks it.
    pub compress: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            color_channel: 2,
            bit_depth: 1,
            compress: true,
        }
    }
}

/// A recovered secret: the original basename and the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    /// Basename the secret was embedded under, opaque bytes.
    pub file_name: Vec<u8>,
    pub data: Vec<u8>,
}

/// Embed `secret` into the plane.
///
/// Header bits always occupy one bit per pixel so extraction can parse them
/// before knowing the bit depth; payload bit groups replace the low
/// `bit_depth` bits of the remaining permuted pixels. For bit depths above
/// one the OPA pass corrects the substituted region against the
/// pre-substitution values.
pub fn embed_into_plane(
    plane: &mut Plane,
    secret: &[u8],
    file_name: &[u8],
    password: &str,
    options: &CodecOptions,
) -> Result<()> {
    validation::bit_depth_range(options.bit_depth)?;
    let bit_depth = options.bit_depth;

    let (payload, compressed) = if options.compress {
        let deflated = compression::deflate(secret)?;
        if deflated.len() < secret.len() {
            debug!(
                "compressed secret from {} to {} bytes",
                secret.len(),
                deflated.len()
            );
            (deflated, true)
        } else {
            debug!("compression does not pay off, embedding raw bytes");
            (secret.to_vec(), false)
        }
    } else {
        (secret.to_vec(), false)
    };

    let header = header::encode(&payload, file_name, bit_depth, compressed)?;
    let groups = binary::bytes_to_bit_groups(&payload, bit_depth);

    let needed = header.len() + groups.len();
    validation::capacity(needed, plane.len())?;
    info!("{needed}/{} pixels used", plane.len());

    let coords = permute_indices(plane.height(), plane.width(), password, Some(needed));

    for (&bit, &(row, col)) in header.iter().zip(coords.iter()) {
        let pixel = plane.get(row, col);
        plane.set(row, col, (pixel & 0xfe) | bit);
    }

    let payload_coords = &coords[header.len()..];
    let low_mask = ((1u16 << bit_depth) - 1) as u8;

    if bit_depth == 1 {
        for (&group, &(row, col)) in groups.iter().zip(payload_coords.iter()) {
            let pixel = plane.get(row, col);
            plane.set(row, col, (pixel & 0xfe) | group);
        }
    } else {
        let originals: Vec<u8> = payload_coords
            .iter()
            .map(|&(row, col)| plane.get(row, col))
            .collect();
        let mut substituted: Vec<u8> = originals
            .iter()
            .zip(groups.iter())
            .map(|(&original, &group)| (original & !low_mask) | group)
            .collect();

        opa::adjust(&mut substituted, &originals, bit_depth);

        for (&(row, col), &value) in payload_coords.iter().zip(substituted.iter()) {
            plane.set(row, col, value);
        }
    }

    Ok(())
}

/// Extract a secret embedded with [`embed_into_plane`].
///
/// The same password must be supplied; a wrong one yields garbage header
/// bits and fails with [`SubstegoError::MalformedHeader`] or
/// [`SubstegoError::IntegrityFailure`], never with silently wrong data.
pub fn extract_from_plane(plane: &Plane, password: &str) -> Result<Secret> {
    let coords = permute_indices(plane.height(), plane.width(), password, None);

    let header_bits: Vec<u8> = coords
        .iter()
        .take(MAX_HEADER_BITS)
        .map(|&(row, col)| plane.get(row, col) & 1)
        .collect();
    let header = header::decode(&header_bits)?;

    let payload_bits = header
        .payload_len
        .checked_mul(8)
        .ok_or(SubstegoError::MalformedHeader)?;
    let group_count = payload_bits.div_ceil(header.bit_depth as usize);
    let end = header
        .bit_len
        .checked_add(group_count)
        .filter(|&end| end <= coords.len())
        .ok_or(SubstegoError::MalformedHeader)?;

    let low_mask = ((1u16 << header.bit_depth) - 1) as u8;
    let groups: Vec<u8> = coords[header.bit_len..end]
        .iter()
        .map(|&(row, col)| plane.get(row, col) & low_mask)
        .collect();

    let mut data = binary::bit_groups_to_bytes(&groups, header.bit_depth);
    data.truncate(header.payload_len);
    validation::integrity(&data, header.crc)?;

    if header.compressed {
        data = compression::inflate(&data)?;
    }

    Ok(Secret {
        file_name: header.file_name,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::encoded_len;

    fn zero_plane(height: usize, width: usize) -> Plane {
        Plane::new(height, width, vec![0; height * width])
    }

    fn gradient_plane(height: usize, width: usize) -> Plane {
        let data = (0..height * width).map(|i| (i % 251) as u8).collect();
        Plane::new(height, width, data)
    }

    fn options(bit_depth: u8, compress: bool) -> CodecOptions {
        CodecOptions {
            bit_depth,
            compress,
            ..CodecOptions::default()
        }
    }

    #[test]
    fn should_embed_and_extract_hi_in_a_zeroed_grayscale_plane() {
        // 100x100 zero cover, 2 byte secret, bit depth 1, no password:
        // 131 header bits + 16 payload bits out of 10000 pixels
        let mut plane = zero_plane(100, 100);
        embed_into_plane(&mut plane, b"hi", b"secret.txt", "", &options(1, true)).unwrap();

        let secret = extract_from_plane(&plane, "").unwrap();
        assert_eq!(secret.data, b"hi");
        assert_eq!(secret.file_name, b"secret.txt");
    }

    #[test]
    fn should_round_trip_across_all_bit_depths_and_passwords() {
        let secret = b"The quick brown fox jumps over the lazy dog \x00\xff\x80";
        for bit_depth in 1..=8u8 {
            for password in ["", "any-string"] {
                let mut plane = gradient_plane(64, 64);
                embed_into_plane(
                    &mut plane,
                    secret,
                    b"fox.bin",
                    password,
                    &options(bit_depth, true),
                )
                .unwrap();

                let recovered = extract_from_plane(&plane, password).unwrap();
                assert_eq!(
                    recovered.data, secret,
                    "bit_depth={bit_depth} password={password:?}"
                );
                assert_eq!(recovered.file_name, b"fox.bin");
            }
        }
    }

    #[test]
    fn should_round_trip_incompressible_data_without_compression_gain() {
        // a short pseudo random secret that deflate cannot shrink
        let secret: Vec<u8> = (0..64u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect();
        let mut plane = gradient_plane(48, 48);
        embed_into_plane(&mut plane, &secret, b"noise.bin", "pw", &options(2, true)).unwrap();

        let recovered = extract_from_plane(&plane, "pw").unwrap();
        assert_eq!(recovered.data, secret);
    }

    #[test]
    fn should_round_trip_an_empty_secret() {
        let mut plane = gradient_plane(16, 16);
        embed_into_plane(&mut plane, b"", b"empty", "", &options(1, false)).unwrap();

        let recovered = extract_from_plane(&plane, "").unwrap();
        assert_eq!(recovered.data, b"");
        assert_eq!(recovered.file_name, b"empty");
    }

    #[test]
    fn should_succeed_when_needed_equals_available() {
        let secret = b"x";
        // header of a 1 byte payload with a 1 byte name, plus 8 payload bits
        let needed = encoded_len(1, 1) + 8;
        let mut plane = zero_plane(1, needed);
        embed_into_plane(&mut plane, secret, b"a", "", &options(1, false)).unwrap();
        assert_eq!(extract_from_plane(&plane, "").unwrap().data, b"x");
    }

    #[test]
    fn should_fail_when_one_pixel_short() {
        let secret = b"x";
        let needed = encoded_len(1, 1) + 8;
        let mut plane = zero_plane(1, needed - 1);
        match embed_into_plane(&mut plane, secret, b"a", "", &options(1, false)) {
            Err(SubstegoError::InsufficientCapacity { needed: n, available }) => {
                assert_eq!(n, needed);
                assert_eq!(available, needed - 1);
            }
            other => panic!("expected InsufficientCapacity, got {other:?}"),
        }
    }

    #[test]
    fn should_fail_with_integrity_error_on_a_single_corrupted_payload_bit() {
        let mut plane = zero_plane(32, 32);
        embed_into_plane(&mut plane, b"payload", b"p.bin", "", &options(1, false)).unwrap();

        // without a password the layout is row-major: the first payload bit
        // sits right after the header bits
        let header_bits = encoded_len(7, 5);
        let (row, col) = (header_bits / 32, header_bits % 32);
        plane.set(row, col, plane.get(row, col) ^ 1);

        match extract_from_plane(&plane, "") {
            Err(SubstegoError::IntegrityFailure) => (),
            other => panic!("expected IntegrityFailure, got {other:?}"),
        }
    }

    #[test]
    fn should_not_extract_with_the_wrong_password() {
        let mut plane = gradient_plane(64, 64);
        embed_into_plane(&mut plane, b"top secret", b"s.txt", "right", &options(1, true))
            .unwrap();

        assert!(extract_from_plane(&plane, "wrong").is_err());
    }

    #[test]
    fn should_leave_pixels_outside_the_needed_region_untouched() {
        let original = gradient_plane(32, 32);
        let mut plane = original.clone();
        embed_into_plane(&mut plane, b"hi", b"t", "", &options(1, false)).unwrap();

        let used = encoded_len(2, 1) + 16;
        let mut changed = 0;
        for row in 0..32 {
            for col in 0..32 {
                let idx = row * 32 + col;
                if idx >= used {
                    assert_eq!(plane.get(row, col), original.get(row, col));
                } else if plane.get(row, col) != original.get(row, col) {
                    changed += 1;
                }
            }
        }
        assert!(changed > 0, "embedding must actually touch pixels");
    }

    #[test]
    fn should_keep_distortion_within_the_opa_bound() {
        // mid-range pixel values keep the clipping rule out of the picture
        let data = (0..64 * 64).map(|i| 100 + (i % 100) as u8).collect();
        let original = Plane::new(64, 64, data);
        let mut plane = original.clone();
        let secret: Vec<u8> = (0..200).map(|i| (i * 37 % 256) as u8).collect();
        embed_into_plane(&mut plane, &secret, b"d.bin", "", &options(4, false)).unwrap();

        let inner = 1i16 << 3;
        for row in 0..64 {
            for col in 0..64 {
                let diff = i16::from(plane.get(row, col)) - i16::from(original.get(row, col));
                // header pixels only move by 1, payload pixels by at most
                // 2^(k-1) after OPA (clipping cannot trigger on this fixture)
                assert!(diff.abs() <= inner, "pixel ({row},{col}) moved by {diff}");
            }
        }
    }
}
