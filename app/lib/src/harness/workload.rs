//! Seeded arrays and search keys.
//!
//! All generation goes through [`StdRng`] seeded from the harness
//! configuration, so two runs with the same seed search identical data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LfindError, Result};

/// Create the generator used for a harness run.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `len` uniformly random bytes.
pub fn random_u8_array(len: usize, rng: &mut StdRng) -> Vec<u8> {
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

/// `len` uniformly random `u32`s.
pub fn random_u32_array(len: usize, rng: &mut StdRng) -> Vec<u32> {
    (0..len).map(|_| rng.gen::<u32>()).collect()
}

/// `count` search keys for `array`.
///
/// Every `miss_every`-th key (starting with the first) is drawn uniformly at
/// random and may or may not occur; the rest are copies of randomly chosen
/// elements and are guaranteed to occur. An empty array yields only random
/// keys.
pub fn search_keys<T>(array: &[T], count: usize, miss_every: usize, rng: &mut StdRng) -> Vec<T>
where
    T: Copy,
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let miss_every = miss_every.max(1);
    (0..count)
        .map(|i| {
            if array.is_empty() || i.is_multiple_of(miss_every) {
                rng.gen::<T>()
            } else {
                array[rng.gen_range(0..array.len())]
            }
        })
        .collect()
}

/// Bytes `i % modulus` for `i` in `0..len`.
///
/// `modulus` 256 gives the repeating `0..=255` ramp; 255 gives a ramp that
/// never contains 255.
pub fn modulo_pattern_u8(len: usize, modulus: u16) -> Vec<u8> {
    let modulus = modulus.clamp(1, 256) as usize;
    (0..len).map(|i| (i % modulus) as u8).collect()
}

/// Even numbers `2 * i` for `i` in `0..len`, wrapping on overflow.
pub fn even_pattern_u32(len: usize) -> Vec<u32> {
    (0..len).map(|i| (i as u32).wrapping_mul(2)).collect()
}

/// Decode a little-endian byte buffer into `u32` elements.
pub fn parse_u32_le(bytes: &[u8]) -> Result<Vec<u32>> {
    const WIDTH: usize = std::mem::size_of::<u32>();
    if bytes.len() % WIDTH != 0 {
        return Err(LfindError::MisalignedInput {
            len: bytes.len(),
            width: WIDTH,
        });
    }
    Ok(bytes
        .chunks_exact(WIDTH)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
