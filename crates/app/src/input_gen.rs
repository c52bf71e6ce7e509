//! Operand-matrix generation for test vectors.
//!
//! Values are small non-negative integers; the kernels under test are
//! exercised with narrow ranges so intermediate products stay well
//! inside the accelerator's accumulator width. All randomness comes
//! from a seeded ChaCha8 RNG so a vector set is reproducible from its
//! seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Value range for generated operands (exclusive upper bound).
const VALUE_RANGE: std::ops::Range<i64> = 0..10;

/// Generate a `rows * cols` tile, row-major.
pub fn gen_tile(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Vec<i64> {
    (0..rows * cols).map(|_| rng.gen_range(VALUE_RANGE)).collect()
}

/// Convenience: a fresh seeded RNG.
pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Render the plain tiled text format: row-major, one row per line,
/// values space-separated. Consumed directly by the simulator.
pub fn render_plain(values: &[i64], cols: usize) -> String {
    let mut out = String::new();
    for row in values.chunks(cols) {
        let mut first = true;
        for v in row {
            if !first {
                out.push(' ');
            }
            out.push_str(&v.to_string());
            first = false;
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size_and_range() {
        let mut rng = rng_from_seed(42);
        let tile = gen_tile(&mut rng, 16, 8);
        assert_eq!(tile.len(), 128);
        assert!(tile.iter().all(|v| (0..10).contains(v)));
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = rng_from_seed(12345);
        let mut rng2 = rng_from_seed(12345);
        assert_eq!(gen_tile(&mut rng1, 4, 4), gen_tile(&mut rng2, 4, 4));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = rng_from_seed(1);
        let mut rng2 = rng_from_seed(2);
        assert_ne!(gen_tile(&mut rng1, 8, 8), gen_tile(&mut rng2, 8, 8));
    }

    #[test]
    fn test_render_plain_rows() {
        let text = render_plain(&[1, 2, 3, 4, 5, 6], 3);
        assert_eq!(text, "1 2 3\n4 5 6\n");
    }
}
