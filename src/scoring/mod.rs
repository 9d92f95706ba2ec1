//! Profile matching primitives: the gap-to-weight kernel and the
//! certificate normalizer.

/// Absolute gap at which a factor stops earning any weight
pub const MAX_GAP: f64 = 10.0;

/// Weight awarded for an exact match on the ideal value
pub const MAX_WEIGHT: f64 = 5.0;

/// Weight awarded once the gap saturates
pub const MIN_WEIGHT: f64 = 0.0;

/// Round to 2 decimal places, half away from zero.
///
/// Applied to `value * 100`, so ties are decided on the binary value
/// after scaling.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a signed gap (actual - ideal) into a weight in `[0, 5]`.
///
/// Symmetric triangular kernel: `5.0 * (1 - |gap| / 10)`, clamped to 0 once
/// `|gap| >= 10`, rounded with [`round2`]. Callers must reject non-finite
/// gaps before getting here.
pub fn gap_to_weight(gap: f64) -> f64 {
    let abs_gap = gap.abs();

    if abs_gap >= MAX_GAP {
        return MIN_WEIGHT;
    }

    round2(MAX_WEIGHT - (abs_gap / MAX_GAP) * MAX_WEIGHT)
}

/// Map a tournament certificate label to its ordinal level.
///
/// Case-insensitive: "nasional" = 3, "provinsi" = 2, "kota" = 1,
/// anything else (or no certificate) = 0.
pub fn cert_to_number(cert: Option<&str>) -> f64 {
    let Some(cert) = cert else {
        return 0.0;
    };

    match cert.trim().to_lowercase().as_str() {
        "nasional" => 3.0,
        "provinsi" => 2.0,
        "kota" => 1.0,
        _ => 0.0,
    }
}

/// Plain mean, 0 for an empty slice
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_to_weight_anchors() {
        assert_eq!(gap_to_weight(0.0), 5.0);
        assert_eq!(gap_to_weight(10.0), 0.0);
        assert_eq!(gap_to_weight(-10.0), 0.0);
        assert_eq!(gap_to_weight(5.0), 2.5);
        assert_eq!(gap_to_weight(-3.0), 3.5);
        assert_eq!(gap_to_weight(-20.0), 0.0);
        assert_eq!(gap_to_weight(1e9), 0.0);
    }

    #[test]
    fn test_gap_to_weight_symmetry() {
        for i in 0..=300 {
            let gap = i as f64 * 0.05;
            assert_eq!(gap_to_weight(gap), gap_to_weight(-gap), "gap {}", gap);
        }
    }

    #[test]
    fn test_gap_to_weight_bounded_and_monotonic() {
        let mut previous = gap_to_weight(0.0);
        for i in 1..=120 {
            let weight = gap_to_weight(i as f64 * 0.1);
            assert!((0.0..=5.0).contains(&weight));
            assert!(weight <= previous);
            previous = weight;
        }
    }

    #[test]
    fn test_gap_to_weight_rounds_to_two_places() {
        // 5 * (1 - 0.333) = 3.335
        let weight = gap_to_weight(3.33);
        assert_eq!(weight, round2(weight));
        assert_eq!(gap_to_weight(0.5), 4.75);
    }

    #[test]
    fn test_round2_ties_go_away_from_zero() {
        // 4.965 scales to exactly 496.5
        assert_eq!(gap_to_weight(0.07), 4.97);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn test_cert_to_number_case_insensitive() {
        assert_eq!(cert_to_number(Some("NASIONAL")), 3.0);
        assert_eq!(cert_to_number(Some("nasional")), 3.0);
        assert_eq!(cert_to_number(Some("Provinsi")), 2.0);
        assert_eq!(cert_to_number(Some("kOtA")), 1.0);
    }

    #[test]
    fn test_cert_to_number_unknown_or_absent() {
        assert_eq!(cert_to_number(None), 0.0);
        assert_eq!(cert_to_number(Some("")), 0.0);
        assert_eq!(cert_to_number(Some("internasional")), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[3.5, 0.0]), 1.75);
    }
}
