//! Per-generation predation arithmetic.
//!
//! Everything here is pure: given the pre-step morph counts, the current
//! sootiness, the voracity setting and the generation's noise sample, it
//! decides how many moths of each morph are eaten.

use crate::config::{SOOTINESS_EXPONENT, VORACITY_SCALE};

/// Number of moths of each morph eaten in one generation, already clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Predation {
    pub light_eaten: usize,
    pub dark_eaten: usize,
}

impl Predation {
    pub fn total(&self) -> usize {
        self.light_eaten + self.dark_eaten
    }
}

/// Squared, normalised predation pressure for a voracity setting
pub fn voracity_constant(predator_voracity: u32) -> f64 {
    (predator_voracity as f64 * VORACITY_SCALE).powi(2)
}

/// Superlinear sootiness term applied to light-morph predation
pub fn sootiness_constant(sootiness: f64) -> f64 {
    sootiness.powf(SOOTINESS_EXPONENT)
}

/// Computes the clamped predation counts for one generation.
///
/// `random_variance` is added to the light count and subtracted from the dark
/// count. A negative raw count hands its magnitude to the other morph before
/// both are clamped into `0..=count`.
pub fn compute_predation(
    light_count: usize,
    dark_count: usize,
    sootiness: f64,
    predator_voracity: u32,
    random_variance: f64,
) -> Predation {
    let voracity = voracity_constant(predator_voracity);
    let soot = sootiness_constant(sootiness);

    let mut light_eaten =
        round_half_up(soot * voracity * light_count as f64 + random_variance);
    let mut dark_eaten =
        round_half_up((voracity - sootiness * voracity) * dark_count as f64 - random_variance);

    if dark_eaten < 0 {
        light_eaten += dark_eaten.abs();
    }
    if light_eaten < 0 {
        dark_eaten += light_eaten.abs();
    }

    Predation {
        light_eaten: clamp_to_population(light_eaten, light_count),
        dark_eaten: clamp_to_population(dark_eaten, dark_count),
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn clamp_to_population(eaten: i64, available: usize) -> usize {
    if eaten <= 0 {
        0
    } else {
        (eaten as u64).min(available as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_towards_positive_infinity() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.51), -1);
        assert_eq!(round_half_up(2.49), 2);
    }

    #[test]
    fn clamp_never_exceeds_available() {
        assert_eq!(clamp_to_population(-3, 10), 0);
        assert_eq!(clamp_to_population(12, 10), 10);
        assert_eq!(clamp_to_population(4, 10), 4);
    }
}
