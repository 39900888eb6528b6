use std::ops::Range;
use std::time::Duration;

use rand::Rng;

/// Uniform draw in `[min, max)`: `min + u * (max - min)`.
///
/// Also valid when `max < min`; the draw then falls in `(max, min]`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.random::<f64>() * (max - min)
}

/// A coin that lands true with probability `chance`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

/// Sample the simulated processing delay, floored to whole milliseconds.
pub fn sample_delay<R: Rng + ?Sized>(rng: &mut R, range_ms: &Range<u64>) -> Duration {
    let ms = random_between(rng, range_ms.start as f64, range_ms.end as f64).floor();
    Duration::from_millis(ms.max(0.0) as u64)
}
