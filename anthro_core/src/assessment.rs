//! Full assessment pipeline.
//!
//! Runs every computation once for a single evaluation:
//! - Skinfold sum and body-fat percentage for the chosen protocol
//! - Fat/lean mass split
//! - BMR and TDEE
//! - BMI, body-fat and waist-hip classifications

use crate::classification::{bmi, classify_bmi, classify_body_fat, classify_whr};
use crate::composition::body_composition;
use crate::metabolism::compute_metabolism;
use crate::{
    AnthropometricInput, BodyCompositionResult, ClassificationResult, MetabolicResult, Protocol,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every value derived from one set of measurements
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub protocol: Protocol,
    pub input: AnthropometricInput,
    /// Governing skinfold sum (0 for perimeter-based protocols)
    pub skinfold_sum_mm: f64,
    pub composition: BodyCompositionResult,
    pub metabolism: MetabolicResult,
    pub bmi: Option<ClassificationResult>,
    /// Absent when BF% could not be estimated
    pub body_fat: Option<ClassificationResult>,
    pub whr: Option<ClassificationResult>,
}

impl Assessment {
    /// True when the protocol produced a body-fat estimate
    pub fn has_body_fat(&self) -> bool {
        self.composition.body_fat_percent != 0.0
    }

    /// BMI value, or 0 when it could not be computed
    pub fn bmi_value(&self) -> f64 {
        self.bmi.as_ref().map_or(0.0, |c| c.value)
    }
}

/// An assessment stamped for storage in a client record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub assessment: Assessment,
}

impl AssessmentRecord {
    pub fn new(assessment: Assessment, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            evaluated_at,
            assessment,
        }
    }
}

/// Run the full pipeline for `input` under `protocol`
pub fn assess(input: &AnthropometricInput, protocol: Protocol) -> Assessment {
    let skinfold_sum_mm = protocol.skinfold_sum(input);
    let composition = body_composition(protocol, input);
    let bf = composition.body_fat_percent;

    let metabolism = compute_metabolism(composition.lean_mass_kg);
    let body_fat = classify_body_fat(bf, input.sex);

    tracing::info!(
        "Assessed with {}: BF% {:.2}, BMI {:.2}",
        protocol,
        bf,
        bmi(input.weight_kg, input.height_cm)
    );

    Assessment {
        protocol,
        input: input.clone(),
        skinfold_sum_mm,
        composition,
        metabolism,
        bmi: classify_bmi(input.weight_kg, input.height_cm),
        body_fat,
        whr: classify_whr(input.perimeters.waist, input.perimeters.hips, input.sex),
    }
}
