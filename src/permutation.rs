//! Password seeded permutation of pixel coordinates.
//!
//! Spreading the secret over pseudo-randomly chosen pixels thwarts sequential
//! embedding steganalysis. The ordering is a pure function of the plane shape
//! and the password, so embedding and extraction derive the very same
//! coordinate sequence independently. The seed derivation and the shuffle
//! below are part of the stego format: changing either breaks extraction of
//! previously produced images.

use sha2::{Digest, Sha256};

/// Derive the shuffle seed from a password.
///
/// The low 32 bits of the SHA-256 digest, read as a big-endian unsigned
/// integer. A plain string hash would not do here since it must be stable
/// across runs and platforms.
pub fn seed_from_password(password: &str) -> u32 {
    let digest = Sha256::digest(password.as_bytes());
    u32::from_be_bytes(
        digest[28..32]
            .try_into()
            .expect("digest tail is always 4 bytes"),
    )
}

/// Produce the ordered `(row, col)` coordinates for embedding into a
/// `height` x `width` plane.
///
/// With an empty password the coordinates come in row-major order. Otherwise
/// the full linear index domain `[0, height * width)` is shuffled with a
/// Fisher-Yates pass driven by a [`fastrand::Rng`] seeded from the password.
/// The result is truncated to `length` coordinates when given, all `h * w`
/// otherwise.
pub fn permute_indices(
    height: usize,
    width: usize,
    password: &str,
    length: Option<usize>,
) -> Vec<(usize, usize)> {
    let pixels = height * width;
    let length = length.unwrap_or(pixels).min(pixels);

    let mut indices: Vec<usize> = (0..pixels).collect();
    if !password.is_empty() {
        let mut rng = fastrand::Rng::with_seed(seed_from_password(password) as u64);
        for i in (1..pixels).rev() {
            let j = rng.usize(0..=i);
            indices.swap(i, j);
        }
    }

    indices
        .into_iter()
        .take(length)
        .map(|i| (i / width, i % width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn should_return_row_major_order_without_password() {
        let idx = permute_indices(3, 4, "", None);
        let expected: Vec<(usize, usize)> =
            (0..3).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
        assert_eq!(idx, expected);
    }

    #[test]
    fn should_truncate_to_the_requested_length() {
        assert_eq!(permute_indices(3, 4, "", Some(7)).len(), 7);
        assert_eq!(permute_indices(3, 4, "hello world", Some(7)).len(), 7);
    }

    #[test]
    fn should_be_deterministic_for_the_same_password_and_shape() {
        let a = permute_indices(32, 48, "hunter2", None);
        let b = permute_indices(32, 48, "hunter2", None);
        assert_eq!(a, b);
    }

    #[test]
    fn should_differ_between_passwords() {
        let a = permute_indices(32, 48, "hunter2", None);
        let b = permute_indices(32, 48, "hunter3", None);
        assert_ne!(a, b);
    }

    #[test]
    fn should_be_a_bijection_over_the_full_plane() {
        let idx = permute_indices(17, 13, "scatter me", None);
        assert_eq!(idx.len(), 17 * 13);

        let unique: HashSet<_> = idx.iter().copied().collect();
        assert_eq!(unique.len(), 17 * 13, "coordinates must not repeat");
        assert!(idx.iter().all(|&(r, c)| r < 17 && c < 13));
    }

    #[test]
    fn should_keep_coordinates_in_bounds_after_shuffling() {
        for password in ["a", "b", "quite a long password with spaces"] {
            let idx = permute_indices(5, 9, password, None);
            assert!(idx.iter().all(|&(r, c)| r < 5 && c < 9));
        }
    }

    #[test]
    fn should_derive_a_stable_seed() {
        assert_eq!(seed_from_password("hunter2"), seed_from_password("hunter2"));
        assert_ne!(seed_from_password("hunter2"), seed_from_password(""));
    }
}
