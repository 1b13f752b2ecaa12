//! Optimal Pixel Adjustment (OPA).
//!
//! Plain LSB substitution of `k` bits can move a pixel value by up to
//! `2^k - 1`. When the substituted low bits drifted far from the originals,
//! adding or subtracting `2^k` brings the pixel much closer to its original
//! value while leaving the low `k` bits, and with them the embedded data,
//! untouched. See Chan & Cheng, "Hiding data in images by simple LSB
//! substitution", Pattern Recognition 37 (2004).

/// Correct one substituted pixel against its original value.
///
/// The correction is always a multiple of `2^k`, so the embedded bits
/// survive; corrections that would leave the `[0, 255]` range are discarded.
pub fn adjust_pixel(modified: u8, original: u8, k: u8) -> u8 {
    let inner = 1i16 << (k - 1);
    let outer = 1i16 << k;

    let diff = i16::from(modified) - i16::from(original);
    let correction = if diff > inner && diff < outer {
        -outer
    } else if diff < -inner && diff > -outer {
        outer
    } else {
        0
    };

    let candidate = i16::from(modified) + correction;
    if (0..=255).contains(&candidate) {
        candidate as u8
    } else {
        modified
    }
}

/// Correct a whole substituted region in place.
///
/// `modified` and `original` must line up element by element; `k` is the
/// number of substituted low bits and must be in `[1, 8]`.
pub fn adjust(modified: &mut [u8], original: &[u8], k: u8) {
    debug_assert_eq!(modified.len(), original.len());
    debug_assert!((1..=8).contains(&k));

    for (m, &o) in modified.iter_mut().zip(original.iter()) {
        *m = adjust_pixel(*m, o, k);
    }
}
