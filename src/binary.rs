//! Bit level conversions for the embedding protocol.
//!
//! The whole wire format is little-endian on the bit level: the first bit of
//! a byte is its least significant one. Bit sequences shorter than a byte are
//! tail padded with zeroes, so 10011 (19) reads as 11001000 would in a full
//! byte. `bitstream_io` with [`LittleEndian`] matches that convention.

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};
use std::io::Cursor;

use crate::error::SubstegoError;
use crate::result::Result;

/// Split a byte stream into little-endian bit groups of `group` bits each.
///
/// Every returned value is in `[0, 2^group - 1]` and occupies exactly one
/// embedding slot. The final group is padded with trailing zero bits when the
/// total bit count is not a multiple of `group`.
pub fn bytes_to_bit_groups(bytes: &[u8], group: u8) -> Vec<u8> {
    debug_assert!((1..=8).contains(&group));
    let group = group as usize;
    let total_bits = bytes.len() * 8;
    let mut reader = BitReader::endian(Cursor::new(bytes), LittleEndian);
    let mut groups = Vec::with_capacity(total_bits.div_ceil(group));

    let mut remaining = total_bits;
    while remaining > 0 {
        let take = remaining.min(group);
        // a partial read leaves the missing high bits at zero, which is
        // exactly the tail padding the protocol wants
        let value: u8 = reader
            .read(take as u32)
            .expect("in-bounds bit read cannot fail");
        groups.push(value);
        remaining -= take;
    }

    groups
}

/// Combine little-endian bit groups back into bytes.
///
/// The inverse of [`bytes_to_bit_groups`]; the result is padded with trailing
/// zero bits up to a byte boundary. Group values wider than `group` bits are
/// truncated to their low `group` bits.
pub fn bit_groups_to_bytes(groups: &[u8], group: u8) -> Vec<u8> {
    debug_assert!((1..=8).contains(&group));
    let mask = if group >= 8 { u8::MAX } else { (1u8 << group) - 1 };
    let mut writer = BitWriter::endian(Vec::new(), LittleEndian);

    for &g in groups {
        writer
            .write(group as u32, g & mask)
            .expect("bit write into a Vec cannot fail");
    }
    writer
        .byte_align()
        .expect("zero padding into a Vec cannot fail");

    writer.into_writer()
}

/// Pack up to 32 little-endian bits into an unsigned integer.
///
/// Fails with [`SubstegoError::BitWidthOverflow`] when more than 32 bits are
/// given.
pub fn pack_bits(bits: &[u8]) -> Result<u32> {
    if bits.len() > 32 {
        return Err(SubstegoError::BitWidthOverflow(bits.len()));
    }

    Ok(bits
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &bit)| acc | (u32::from(bit & 1) << i)))
}

/// Split an unsigned integer into its little-endian bit sequence.
///
/// Without a `width` the minimal number of bits is returned, so there is no
/// zero padding; the value 0 yields an empty sequence. With a `width` exactly
/// that many bits are returned -- high order bits beyond `width` are silently
/// lost, callers must guarantee the width is sufficient.
pub fn unpack_bits(value: u32, width: Option<usize>) -> Vec<u8> {
    let width = width.unwrap_or_else(|| min_bit_width(value));
    (0..width)
        .map(|i| if i < 32 { ((value >> i) & 1) as u8 } else { 0 })
        .collect()
}

/// Number of bits in the minimal representation of `value`, 0 for 0.
pub fn min_bit_width(value: u32) -> usize {
    (32 - value.leading_zeros()) as usize
}
