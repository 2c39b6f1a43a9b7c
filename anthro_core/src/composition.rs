//! Body-composition calculator.
//!
//! Dispatches to the selected protocol, clamps the result into the
//! protocol's physiological range and splits total weight into fat and
//! lean mass. Nothing is rounded here.

use crate::clamp::sanity_clamp;
use crate::{AnthropometricInput, BodyCompositionResult, Protocol};

/// Body-fat percentage for `input` under `protocol`.
///
/// Returns exactly 0 when the protocol's governing inputs are missing.
/// Otherwise the result lies within `protocol.clamp_range(input.sex)`.
pub fn compute_body_fat(protocol: Protocol, input: &AnthropometricInput) -> f64 {
    let spec = protocol.spec();
    let range = protocol.clamp_range(input.sex);

    match spec.estimator.body_fat(input) {
        Some(raw) => {
            let bf = sanity_clamp(raw, range);
            if !range.contains(raw) {
                tracing::debug!(
                    "{}: raw BF% {} adjusted to {} (range {}..={})",
                    spec.id,
                    raw,
                    bf,
                    range.min,
                    range.max
                );
            }
            bf
        }
        None => {
            tracing::debug!("{}: insufficient data, returning 0", spec.id);
            0.0
        }
    }
}

/// String-keyed variant of [`compute_body_fat`].
///
/// An identifier that names no protocol yields 0, the same sentinel as
/// missing data.
pub fn compute_body_fat_by_id(protocol_id: &str, input: &AnthropometricInput) -> f64 {
    match Protocol::lookup(protocol_id) {
        Some(protocol) => compute_body_fat(protocol, input),
        None => {
            tracing::warn!("Unknown protocol {:?}, returning 0", protocol_id);
            0.0
        }
    }
}

/// Split `weight_kg` into fat and lean mass.
///
/// Lean mass is derived by subtraction and fat mass is then re-derived
/// from lean mass, so `fat_mass_kg + lean_mass_kg == weight_kg` holds
/// bit-exactly for any BF% in 0..=100.
pub fn compute_composition(body_fat_percent: f64, weight_kg: f64) -> BodyCompositionResult {
    let raw_fat = weight_kg * body_fat_percent / 100.0;
    let lean_mass_kg = weight_kg - raw_fat;
    // One of the two subtractions is exact (Sterbenz), which closes the sum
    let fat_mass_kg = weight_kg - lean_mass_kg;

    BodyCompositionResult {
        body_fat_percent,
        fat_mass_kg,
        lean_mass_kg,
    }
}

/// BF% and mass split in one call.
///
/// Without a BF% estimate there is no lean mass to split out, so both
/// masses are 0 rather than the whole weight counting as lean.
pub fn body_composition(protocol: Protocol, input: &AnthropometricInput) -> BodyCompositionResult {
    let bf = compute_body_fat(protocol, input);
    if bf == 0.0 {
        return BodyCompositionResult {
            body_fat_percent: 0.0,
            fat_mass_kg: 0.0,
            lean_mass_kg: 0.0,
        };
    }
    compute_composition(bf, input.weight_kg)
}
