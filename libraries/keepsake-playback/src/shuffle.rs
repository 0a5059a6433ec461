//! Random track selection for shuffle mode

use rand::Rng;

/// Pick a random index in `0..len`, avoiding `current` when there is a choice
///
/// `len` must be non-zero.
pub fn pick_other<R: Rng + ?Sized>(rng: &mut R, len: usize, current: Option<usize>) -> usize {
    debug_assert!(len > 0);
    match current {
        Some(current) if len > 1 && current < len => {
            // Sample from the len-1 other slots, then skip over current
            let pick = rng.gen_range(0..len - 1);
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        }
        _ => rng.gen_range(0..len),
    }
}
