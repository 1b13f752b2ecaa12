//! The self describing header embedded ahead of the payload.
//!
//! Field order on the wire, all in little-endian bit order:
//!
//! 1. 5 bits: width of the payload length field (0..=31)
//! 2. that many bits: payload length in bytes, minimal representation
//! 3. 3 bits: bit depth minus one
//! 4. 8 bits: filename length in bytes (0..=255)
//! 5. 8 bits per filename byte, filenames are opaque byte sequences
//! 6. 1 bit: compression flag
//! 7. 32 bits: CRC-32 (ISO HDLC, the zlib polynomial) over the payload bytes
//!    exactly as embedded, i.e. after compression when it was applied
//!
//! The header itself always occupies one bit per pixel, independent of the
//! payload bit depth, so it can be parsed before the bit depth is known.

use crc::{Crc, CRC_32_ISO_HDLC};

use crate::binary::{min_bit_width, pack_bits, unpack_bits};
use crate::error::SubstegoError;
use crate::result::Result;

/// Worst case header width in bits:
/// length 5 + 31, bit depth 3, filename length 8, filename 255 * 8,
/// compression flag 1, crc 32.
pub const MAX_HEADER_BITS: usize = 2121;

/// The largest payload the 31 bit length field can describe.
pub const MAX_PAYLOAD_LEN: usize = (1 << 31) - 1;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 checksum as stored in the header, zlib compatible.
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// A parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Length in bytes of the embedded payload (after compression if any).
    pub payload_len: usize,
    /// Number of low bits each payload pixel carries.
    pub bit_depth: u8,
    /// Original filename of the secret, opaque bytes.
    pub file_name: Vec<u8>,
    /// Whether the payload was deflate compressed before embedding.
    pub compressed: bool,
    /// Expected CRC-32 of the embedded payload bytes.
    pub crc: u32,
    /// Total number of header bits consumed; payload bits start right after.
    pub bit_len: usize,
}

/// Assemble the header bit sequence for a payload about to be embedded.
///
/// `payload` must be the bytes exactly as they will be embedded and
/// `file_name` the basename of the secret, at most 255 bytes.
pub fn encode(payload: &[u8], file_name: &[u8], bit_depth: u8, compressed: bool) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(SubstegoError::SecretTooLarge(payload.len()));
    }
    if file_name.len() > u8::MAX as usize {
        return Err(SubstegoError::InvalidFileName);
    }

    let len_bits = unpack_bits(payload.len() as u32, None);
    let mut bits = unpack_bits(len_bits.len() as u32, Some(5));
    bits.extend_from_slice(&len_bits);

    bits.extend_from_slice(&unpack_bits(u32::from(bit_depth - 1), Some(3)));
    bits.extend_from_slice(&unpack_bits(file_name.len() as u32, Some(8)));
    for &byte in file_name {
        bits.extend_from_slice(&unpack_bits(u32::from(byte), Some(8)));
    }
    bits.push(u8::from(compressed));
    bits.extend_from_slice(&unpack_bits(crc32(payload), Some(32)));

    debug_assert!(bits.len() <= MAX_HEADER_BITS);
    Ok(bits)
}

/// Parse a header from the first bits of a candidate bitstream.
///
/// `bits` is expected to hold at least [`MAX_HEADER_BITS`] entries when the
/// plane is large enough; short or inconsistent input fails with
/// [`SubstegoError::MalformedHeader`] rather than panicking on a wrong
/// password or an innocent image.
pub fn decode(bits: &[u8]) -> Result<Header> {
    let mut cursor = Cursor { bits, index: 0 };

    let len_width = cursor.take(5)? as usize;
    let payload_len = cursor.take(len_width)? as usize;
    let bit_depth = cursor.take(3)? as u8 + 1;
    let name_len = cursor.take(8)? as usize;

    let mut file_name = Vec::with_capacity(name_len);
    for _ in 0..name_len {
        file_name.push(cursor.take(8)? as u8);
    }

    let compressed = cursor.take(1)? == 1;
    let crc = cursor.take(32)?;

    Ok(Header {
        payload_len,
        bit_depth,
        file_name,
        compressed,
        crc,
        bit_len: cursor.index,
    })
}

/// Bounds checked forward-only reader over a bit slice.
struct Cursor<'a> {
    bits: &'a [u8],
    index: usize,
}

impl Cursor<'_> {
    fn take(&mut self, width: usize) -> Result<u32> {
        let end = self
            .index
            .checked_add(width)
            .filter(|&end| end <= self.bits.len())
            .ok_or(SubstegoError::MalformedHeader)?;

        let value = pack_bits(&self.bits[self.index..end])?;
        self.index = end;
        Ok(value)
    }
}

/// Header width in bits for a given payload and filename, without building it.
pub fn encoded_len(payload_len: usize, file_name_len: usize) -> usize {
    5 + min_bit_width(payload_len as u32) + 3 + 8 + 8 * file_name_len + 1 + 32
}
