//! Published regression equations for each protocol.
//!
//! Density estimators return whole-body density (g/mL), which is turned
//! into BF% by the Siri step. Direct estimators return BF% outright.
//! Every estimator returns `None` when its governing inputs are missing.

use crate::{AnthropometricInput, SkinfoldSite};

/// Siri equation: BF% = (4.95 / density - 4.50) * 100
pub fn siri(density: f64) -> f64 {
    (4.95 / density - 4.50) * 100.0
}

fn nonzero_sum(input: &AnthropometricInput, sites: &[SkinfoldSite]) -> Option<f64> {
    let sum = input.skinfolds.sum_of(sites);
    if sum == 0.0 {
        None
    } else {
        Some(sum)
    }
}

// ============================================================================
// Governing skinfold sites
// ============================================================================

pub(crate) const POLLOCK3_MALE: &[SkinfoldSite] = &[
    SkinfoldSite::Chest,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Thigh,
];

pub(crate) const POLLOCK3_FEMALE: &[SkinfoldSite] = &[
    SkinfoldSite::Triceps,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Thigh,
];

pub(crate) const POLLOCK7: &[SkinfoldSite] = &[
    SkinfoldSite::Chest,
    SkinfoldSite::Midaxillary,
    SkinfoldSite::Triceps,
    SkinfoldSite::Subscapular,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Thigh,
];

pub(crate) const GUEDES: &[SkinfoldSite] = &[
    SkinfoldSite::Triceps,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Abdominal,
];

pub(crate) const PETROSKI: &[SkinfoldSite] = &[
    SkinfoldSite::Subscapular,
    SkinfoldSite::Triceps,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Calf,
];

pub(crate) const FAULKNER: &[SkinfoldSite] = &[
    SkinfoldSite::Triceps,
    SkinfoldSite::Subscapular,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Abdominal,
];

pub(crate) const SLAUGHTER: &[SkinfoldSite] = &[SkinfoldSite::Triceps, SkinfoldSite::Subscapular];

pub(crate) const NONE: &[SkinfoldSite] = &[];

// ============================================================================
// Density estimators
// ============================================================================

/// Jackson & Pollock, 3 sites
pub fn pollock3_density(input: &AnthropometricInput) -> Option<f64> {
    let age = f64::from(input.age);
    if input.sex.is_female() {
        let s = nonzero_sum(input, POLLOCK3_FEMALE)?;
        Some(1.0994921 - 0.0009929 * s + 0.0000023 * s * s - 0.0001392 * age)
    } else {
        let s = nonzero_sum(input, POLLOCK3_MALE)?;
        Some(1.10938 - 0.0008267 * s + 0.0000016 * s * s - 0.0002574 * age)
    }
}

/// Jackson & Pollock, 7 sites
pub fn pollock7_density(input: &AnthropometricInput) -> Option<f64> {
    let s = nonzero_sum(input, POLLOCK7)?;
    let age = f64::from(input.age);
    let density = if input.sex.is_female() {
        1.097 - 0.00046971 * s + 0.00000056 * s * s - 0.00012828 * age
    } else {
        1.112 - 0.00043499 * s + 0.00000055 * s * s - 0.00028826 * age
    };
    Some(density)
}

/// Guedes, 3 sites, log-sum model
pub fn guedes_density(input: &AnthropometricInput) -> Option<f64> {
    let s = nonzero_sum(input, GUEDES)?;
    let density = if input.sex.is_female() {
        1.16650 - 0.07063 * s.log10()
    } else {
        1.17136 - 0.06706 * s.log10()
    };
    Some(density)
}

/// Petroski, 4 sites
pub fn petroski_density(input: &AnthropometricInput) -> Option<f64> {
    let s = nonzero_sum(input, PETROSKI)?;
    let age = f64::from(input.age);
    let density = if input.sex.is_female() {
        1.05481122 - 0.00082334 * s + 0.000003 * s * s - 0.0001392 * age
    } else {
        1.10726863 - 0.00081201 * s + 0.00000212 * s * s - 0.00041761 * age
    };
    Some(density)
}

// ============================================================================
// Direct estimators
// ============================================================================

/// Faulkner, 4 sites, sex-independent
pub fn faulkner_body_fat(input: &AnthropometricInput) -> Option<f64> {
    let s = nonzero_sum(input, FAULKNER)?;
    Some(0.153 * s + 5.783)
}

/// Weltman, perimeter based. Abdomen is preferred, waist is the fallback.
pub fn weltman_body_fat(input: &AnthropometricInput) -> Option<f64> {
    let abd = if input.perimeters.abdomen > 0.0 {
        input.perimeters.abdomen
    } else {
        input.perimeters.waist
    };
    let weight = input.weight_kg;
    if abd <= 0.0 || weight <= 0.0 {
        return None;
    }

    if input.sex.is_female() {
        let height = input.height_cm;
        if height <= 0.0 {
            return None;
        }
        Some(0.11077 * abd - 0.17666 * height + 0.14354 * weight + 29.7403)
    } else {
        Some(0.31457 * abd - 0.10969 * weight + 10.8336)
    }
}

/// Slaughter, 2 sites, piecewise on the sum
pub fn slaughter_body_fat(input: &AnthropometricInput) -> Option<f64> {
    let s = nonzero_sum(input, SLAUGHTER)?;
    let female = input.sex.is_female();
    let bf = if s > 35.0 {
        if female {
            0.546 * s + 9.7
        } else {
            0.783 * s + 1.6
        }
    } else if female {
        1.33 * s - 0.013 * s * s - 2.5
    } else {
        1.21 * s - 0.008 * s * s - 1.7
    };
    Some(bf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Perimeters, Sex, Skinfolds};

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn input(sex: Sex, age: u32, skinfolds: Skinfolds) -> AnthropometricInput {
        AnthropometricInput {
            sex,
            age,
            weight_kg: 70.0,
            height_cm: 170.0,
            skinfolds,
            perimeters: Perimeters::default(),
        }
    }

    #[test]
    fn test_siri() {
        assert!(approx(siri(1.1), 0.0, 1e-9));
        assert!(approx(siri(1.05), 21.428571428571, 1e-9));
    }

    #[test]
    fn test_pollock7_female_density() {
        let d = pollock7_density(&input(Sex::F, 29, pollock7_folds())).unwrap();
        assert!(approx(d, 1.050487, 1e-9));
    }

    fn pollock7_folds() -> Skinfolds {
        Skinfolds {
            chest: 10.0,
            midaxillary: 12.0,
            triceps: 12.0,
            subscapular: 14.0,
            abdominal: 18.0,
            suprailiac: 16.0,
            thigh: 22.0,
            ..Default::default()
        }
    }

    /// Density estimate and its Siri BF%, for reference-value checks
    fn density_and_bf(
        f: fn(&AnthropometricInput) -> Option<f64>,
        subject: &AnthropometricInput,
    ) -> (f64, f64) {
        let d = f(subject).unwrap();
        (d, siri(d))
    }

    #[test]
    fn test_pollock7_male_reference_value() {
        // S = 104, age 29
        let (d, bf) = density_and_bf(pollock7_density, &input(Sex::M, 29, pollock7_folds()));
        assert!(approx(d, 1.0643503, 1e-9));
        assert!(approx(bf, 15.072448422291, 1e-9));
    }

    #[test]
    fn test_pollock3_female_reference_value() {
        let folds = Skinfolds {
            triceps: 10.0,
            suprailiac: 16.0,
            thigh: 22.0,
            ..Default::default()
        };
        // S = 48, age 25
        let (d, bf) = density_and_bf(pollock3_density, &input(Sex::F, 25, folds));
        assert!(approx(d, 1.0536521, 1e-9));
        assert!(approx(bf, 19.794536545792, 1e-9));
    }

    #[test]
    fn test_guedes_reference_values() {
        let folds = Skinfolds {
            triceps: 12.0,
            suprailiac: 16.0,
            abdominal: 18.0,
            ..Default::default()
        };
        // S = 46, age does not enter the equation
        let (d, bf) = density_and_bf(guedes_density, &input(Sex::M, 40, folds));
        assert!(approx(d, 1.0598554598074, 1e-9));
        assert!(approx(bf, 17.044817686685, 1e-9));

        let (d, bf) = density_and_bf(guedes_density, &input(Sex::F, 40, folds));
        assert!(approx(d, 1.0490594143483, 1e-9));
        assert!(approx(bf, 21.851253827688, 1e-9));
    }

    #[test]
    fn test_petroski_reference_values() {
        let folds = Skinfolds {
            subscapular: 12.0,
            triceps: 10.0,
            suprailiac: 10.0,
            calf: 8.0,
            ..Default::default()
        };
        // S = 40, age 30
        let (d, bf) = density_and_bf(petroski_density, &input(Sex::M, 30, folds));
        assert!(approx(d, 1.06565193, 1e-9));
        assert!(approx(bf, 14.504390284359, 1e-9));

        let (d, bf) = density_and_bf(petroski_density, &input(Sex::F, 30, folds));
        assert!(approx(d, 1.02250162, 1e-9));
        assert!(approx(bf, 34.106812466468, 1e-9));
    }

    #[test]
    fn test_faulkner_reference_value() {
        let folds = Skinfolds {
            triceps: 12.0,
            subscapular: 14.0,
            suprailiac: 16.0,
            abdominal: 18.0,
            ..Default::default()
        };
        // Sex-independent
        for sex in [Sex::M, Sex::F] {
            let bf = faulkner_body_fat(&input(sex, 30, folds)).unwrap();
            assert!(approx(bf, 14.963, 1e-9));
        }
    }

    #[test]
    fn test_pollock3_uses_sex_specific_sites() {
        let folds = Skinfolds {
            chest: 10.0,
            abdominal: 20.0,
            thigh: 15.0,
            ..Default::default()
        };
        let male = pollock3_density(&input(Sex::M, 30, folds)).unwrap();
        assert!(approx(male, 1.0676965, 1e-9));

        // Female sites (triceps, suprailiac) are empty, only thigh counts
        let female = pollock3_density(&input(Sex::F, 30, folds)).unwrap();
        let s = 15.0;
        let expected = 1.0994921 - 0.0009929 * s + 0.0000023 * s * s - 0.0001392 * 30.0;
        assert!(approx(female, expected, 1e-12));
    }

    #[test]
    fn test_other_sex_uses_male_coefficients() {
        let folds = Skinfolds {
            triceps: 12.0,
            suprailiac: 16.0,
            abdominal: 18.0,
            ..Default::default()
        };
        assert_eq!(
            guedes_density(&input(Sex::O, 40, folds)),
            guedes_density(&input(Sex::M, 40, folds))
        );
    }

    #[test]
    fn test_empty_sum_is_insufficient_data() {
        let empty = input(Sex::M, 30, Skinfolds::default());
        assert_eq!(pollock3_density(&empty), None);
        assert_eq!(pollock7_density(&empty), None);
        assert_eq!(guedes_density(&empty), None);
        assert_eq!(petroski_density(&empty), None);
        assert_eq!(faulkner_body_fat(&empty), None);
        assert_eq!(slaughter_body_fat(&empty), None);
    }

    #[test]
    fn test_weltman_prefers_abdomen_over_waist() {
        let mut subject = input(Sex::M, 30, Skinfolds::default());
        subject.weight_kg = 80.0;
        subject.perimeters.abdomen = 90.0;
        subject.perimeters.waist = 85.0;
        assert!(approx(weltman_body_fat(&subject).unwrap(), 30.3697, 1e-9));

        subject.perimeters.abdomen = 0.0;
        let from_waist = 0.31457 * 85.0 - 0.10969 * 80.0 + 10.8336;
        assert!(approx(weltman_body_fat(&subject).unwrap(), from_waist, 1e-9));

        subject.perimeters.waist = 0.0;
        assert_eq!(weltman_body_fat(&subject), None);
    }

    #[test]
    fn test_weltman_female_needs_height() {
        let mut subject = input(Sex::F, 30, Skinfolds::default());
        subject.weight_kg = 60.0;
        subject.height_cm = 165.0;
        subject.perimeters.abdomen = 80.0;
        assert!(approx(weltman_body_fat(&subject).unwrap(), 18.0654, 1e-9));

        subject.height_cm = 0.0;
        assert_eq!(weltman_body_fat(&subject), None);
    }

    #[test]
    fn test_slaughter_branches() {
        let high = Skinfolds {
            triceps: 20.0,
            subscapular: 20.0,
            ..Default::default()
        };
        assert!(approx(
            slaughter_body_fat(&input(Sex::M, 12, high)).unwrap(),
            32.92,
            1e-9
        ));
        assert!(approx(
            slaughter_body_fat(&input(Sex::F, 12, high)).unwrap(),
            0.546 * 40.0 + 9.7,
            1e-9
        ));

        let low = Skinfolds {
            triceps: 10.0,
            subscapular: 10.0,
            ..Default::default()
        };
        assert!(approx(
            slaughter_body_fat(&input(Sex::M, 12, low)).unwrap(),
            19.3,
            1e-9
        ));
        assert!(approx(
            slaughter_body_fat(&input(Sex::F, 12, low)).unwrap(),
            18.9,
            1e-9
        ));
    }
}
