//! Workload generation for the bench and check binaries

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{LsmError, Result};
use crate::types::Key;

/// The even keys `0, 2, .., 2(n-1)` in random order.
///
/// Odd keys are never produced, so any odd key is a known miss. Fails with
/// `Config` when `2(n-1)` does not fit in a `Key`.
pub fn shuffled_even_keys<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<Key>> {
    let largest = n.saturating_sub(1).checked_mul(2);
    if largest.map_or(true, |key| Key::try_from(key).is_err()) {
        return Err(LsmError::Config(format!(
            "{} even keys do not fit in a {}-bit key",
            n,
            Key::BITS
        )));
    }

    let mut keys: Vec<Key> = (0..n as Key).map(|i| i * 2).collect();
    keys.shuffle(rng);
    Ok(keys)
}
