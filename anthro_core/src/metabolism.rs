//! Basal metabolic rate and daily energy expenditure from lean mass.
//!
//! BMR follows the Katch-McArdle form `370 + 21.6 * lean_mass_kg`, which
//! depends only on fat-free mass. TDEE applies a single fixed
//! "moderately active" factor; other activity levels are not modelled.

use crate::MetabolicResult;

/// Katch-McArdle intercept (kcal/day)
pub const BMR_INTERCEPT_KCAL: f64 = 370.0;

/// Katch-McArdle slope (kcal/day per kg of lean mass)
pub const BMR_KCAL_PER_LEAN_KG: f64 = 21.6;

/// Moderately active multiplier
pub const MODERATE_ACTIVITY_FACTOR: f64 = 1.55;

/// BMR and TDEE for the given lean mass.
///
/// A lean mass that is not positive yields `{0, 0}`.
pub fn compute_metabolism(lean_mass_kg: f64) -> MetabolicResult {
    if lean_mass_kg <= 0.0 || lean_mass_kg.is_nan() {
        tracing::debug!("Lean mass {} not positive, metabolism not computed", lean_mass_kg);
        return MetabolicResult::default();
    }

    let bmr_kcal = BMR_INTERCEPT_KCAL + BMR_KCAL_PER_LEAN_KG * lean_mass_kg;
    MetabolicResult {
        bmr_kcal,
        tdee_kcal: bmr_kcal * MODERATE_ACTIVITY_FACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_reference_lean_mass() {
        let result = compute_metabolism(51.28);
        assert!(approx(result.bmr_kcal, 1477.648, 1e-9));
        assert!(approx(result.tdee_kcal, 2290.3544, 1e-9));
    }

    #[test]
    fn test_non_positive_lean_mass_is_degenerate() {
        assert_eq!(compute_metabolism(0.0), MetabolicResult::default());
        assert_eq!(compute_metabolism(-4.0), MetabolicResult::default());
        assert_eq!(compute_metabolism(f64::NAN), MetabolicResult::default());
    }

    #[test]
    fn test_small_positive_lean_mass_is_computed() {
        let result = compute_metabolism(0.001);
        assert!(result.bmr_kcal > BMR_INTERCEPT_KCAL);
        assert!(result.tdee_kcal > result.bmr_kcal);
    }
}
