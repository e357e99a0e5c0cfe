use peppered_moths::environment::sootiness_at;
use peppered_moths::predation::{sootiness_constant, voracity_constant};
use peppered_moths::{BarkMode, Environment, Predation, compute_predation};

const VARIANCES: [f64; 7] = [-0.5, -0.3, -0.1, 0.0, 0.1, 0.3, 0.49];

#[test]
fn test_calibration_constants() {
    assert!((voracity_constant(5) - 0.5625).abs() < 1e-12);
    assert!((voracity_constant(10) - 2.25).abs() < 1e-12);
    assert_eq!(voracity_constant(0), 0.0);

    assert_eq!(sootiness_constant(0.0), 0.0);
    assert_eq!(sootiness_constant(1.0), 1.0);
    // Early soot barely registers.
    assert!(sootiness_constant(0.25) < 0.05);
}

/// Clean bark never costs light moths anything
#[test]
fn test_clean_bark_spares_light_moths() {
    for variance in VARIANCES {
        for dark in [0, 1, 10, 50] {
            let predation = compute_predation(80, dark, 0.0, 5, variance);
            assert_eq!(predation.light_eaten, 0, "variance {variance}, dark {dark}");
            assert!(predation.dark_eaten <= dark);
        }
    }
}

/// Fully sooty bark hides dark moths
#[test]
fn test_sooty_bark_hits_light_moths() {
    let predation = compute_predation(100, 100, 1.0, 5, 0.0);
    assert_eq!(predation.dark_eaten, 0);
    // round(0.5625 * 100)
    assert_eq!(predation.light_eaten, 56);
}

#[test]
fn test_variance_shifts_counts_in_opposite_directions() {
    // Clean bark: 0.5625 * 10 dark moths gives a raw dark count of 5.625.
    let low = compute_predation(0, 10, 0.0, 5, -0.4);
    let high = compute_predation(0, 10, 0.0, 5, 0.4);
    assert_eq!(low.dark_eaten, 6);
    assert_eq!(high.dark_eaten, 5);
}

/// A negative count hands its magnitude to the other morph
#[test]
fn test_negative_count_is_transferred() {
    let predation = compute_predation(10, 10, 1.0, 0, 0.9);
    assert_eq!(
        predation,
        Predation {
            light_eaten: 2,
            dark_eaten: 0,
        }
    );

    let predation = compute_predation(10, 10, 1.0, 0, -0.9);
    assert_eq!(
        predation,
        Predation {
            light_eaten: 0,
            dark_eaten: 2,
        }
    );
}

/// Clamped counts stay within the pre-step morph counts
#[test]
fn test_counts_clamped_to_available_moths() {
    let predation = compute_predation(5, 10, 0.0, 10, 0.0);
    assert_eq!(predation.dark_eaten, 10);
    assert_eq!(predation.light_eaten, 0);

    let predation = compute_predation(0, 0, 0.5, 10, 0.49);
    assert_eq!(predation.total(), 0);

    for light in [0, 1, 7, 40] {
        for dark in [0, 1, 7, 40] {
            for sootiness in [0.0, 0.3, 0.7, 1.0] {
                for variance in VARIANCES {
                    let predation = compute_predation(light, dark, sootiness, 10, variance);
                    assert!(predation.light_eaten <= light);
                    assert!(predation.dark_eaten <= dark);
                }
            }
        }
    }
}

#[test]
fn test_dynamic_sootiness_ramps_then_saturates() {
    assert_eq!(sootiness_at(BarkMode::Dynamic, 0), 0.0);
    assert_eq!(sootiness_at(BarkMode::Dynamic, 10), 0.5);
    assert_eq!(sootiness_at(BarkMode::Dynamic, 20), 1.0);
    assert_eq!(sootiness_at(BarkMode::Dynamic, 50), 1.0);

    let mut previous = 0.0;
    for t in 0..=50 {
        let sootiness = sootiness_at(BarkMode::Dynamic, t);
        assert!(sootiness >= previous);
        assert!((0.0..=1.0).contains(&sootiness));
        previous = sootiness;
    }
}

#[test]
fn test_pinned_bark_modes_ignore_time() {
    for t in 0..=50 {
        assert_eq!(sootiness_at(BarkMode::Clean, t), 0.0);
        assert_eq!(sootiness_at(BarkMode::Sooty, t), 1.0);
    }

    let mut environment = Environment::new(BarkMode::Sooty, 0);
    environment.update(7);
    assert_eq!(environment.sootiness(), 1.0);

    environment.set_bark_mode(BarkMode::Dynamic, 4);
    assert_eq!(environment.sootiness(), 0.2);
    assert_eq!(environment.bark_mode(), BarkMode::Dynamic);
}
