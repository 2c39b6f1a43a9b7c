//! Core domain types for the anthropometric assessment engine.
//!
//! This module defines the value types exchanged with callers:
//! - Raw measurements (skinfolds, perimeters, body data)
//! - Body-composition and metabolic results
//! - Classification results and their severity tiers
//!
//! Every type here is a plain value: built fresh for each evaluation,
//! never mutated by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Subject Types
// ============================================================================

/// Biological sex as recorded on the evaluation form
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    #[serde(rename = "M", alias = "m")]
    M,
    #[serde(rename = "F", alias = "f")]
    F,
    #[serde(rename = "O", alias = "o")]
    O,
}

impl Sex {
    /// True only for `F`. `O` follows the male equations and tables.
    pub fn is_female(self) -> bool {
        matches!(self, Sex::F)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::M => "M",
            Sex::F => "F",
            Sex::O => "O",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Sex {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Sex::M),
            "F" => Ok(Sex::F),
            "O" => Ok(Sex::O),
            other => Err(crate::Error::Input(format!("invalid sex: {:?}", other))),
        }
    }
}

// ============================================================================
// Measurement Types
// ============================================================================

/// Skinfold measurement site
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldSite {
    Triceps,
    Biceps,
    Subscapular,
    Suprailiac,
    Abdominal,
    Chest,
    Thigh,
    Midaxillary,
    Calf,
}

impl SkinfoldSite {
    pub const ALL: [SkinfoldSite; 9] = [
        SkinfoldSite::Triceps,
        SkinfoldSite::Biceps,
        SkinfoldSite::Subscapular,
        SkinfoldSite::Suprailiac,
        SkinfoldSite::Abdominal,
        SkinfoldSite::Chest,
        SkinfoldSite::Thigh,
        SkinfoldSite::Midaxillary,
        SkinfoldSite::Calf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkinfoldSite::Triceps => "triceps",
            SkinfoldSite::Biceps => "biceps",
            SkinfoldSite::Subscapular => "subscapular",
            SkinfoldSite::Suprailiac => "suprailiac",
            SkinfoldSite::Abdominal => "abdominal",
            SkinfoldSite::Chest => "chest",
            SkinfoldSite::Thigh => "thigh",
            SkinfoldSite::Midaxillary => "midaxillary",
            SkinfoldSite::Calf => "calf",
        }
    }
}

/// Skinfold thicknesses in millimetres. A site left at 0 was not measured.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Skinfolds {
    pub triceps: f64,
    pub biceps: f64,
    pub subscapular: f64,
    pub suprailiac: f64,
    pub abdominal: f64,
    pub chest: f64,
    pub thigh: f64,
    pub midaxillary: f64,
    pub calf: f64,
}

impl Skinfolds {
    /// Value recorded for a single site
    pub fn get(&self, site: SkinfoldSite) -> f64 {
        match site {
            SkinfoldSite::Triceps => self.triceps,
            SkinfoldSite::Biceps => self.biceps,
            SkinfoldSite::Subscapular => self.subscapular,
            SkinfoldSite::Suprailiac => self.suprailiac,
            SkinfoldSite::Abdominal => self.abdominal,
            SkinfoldSite::Chest => self.chest,
            SkinfoldSite::Thigh => self.thigh,
            SkinfoldSite::Midaxillary => self.midaxillary,
            SkinfoldSite::Calf => self.calf,
        }
    }

    /// Sum over the given sites, in the order given
    pub fn sum_of(&self, sites: &[SkinfoldSite]) -> f64 {
        sites.iter().map(|&s| self.get(s)).sum()
    }
}

/// Body circumferences in centimetres. A site left at 0 was not measured.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Perimeters {
    pub neck: f64,
    pub shoulder: f64,
    pub chest: f64,
    pub waist: f64,
    pub abdomen: f64,
    pub hips: f64,
    pub arm_relaxed: f64,
    pub arm_flexed: f64,
    pub forearm: f64,
    pub thigh_proximal: f64,
    pub thigh_mid: f64,
    pub calf: f64,
}

/// Complete set of raw measurements for one evaluation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnthropometricInput {
    pub sex: Sex,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub skinfolds: Skinfolds,
    #[serde(default)]
    pub perimeters: Perimeters,
}

// ============================================================================
// Result Types
// ============================================================================

/// Body-fat percentage split into fat and lean mass
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyCompositionResult {
    pub body_fat_percent: f64,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
}

/// Resting and daily energy expenditure
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MetabolicResult {
    pub bmr_kcal: f64,
    pub tdee_kcal: f64,
}

/// Severity tier attached to a classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Report colour for the tier
    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "green",
            Severity::Moderate => "amber",
            Severity::High => "red",
        }
    }
}

/// Label and severity for a classified value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    /// The value that was classified (BMI, BF% or WHR)
    pub value: f64,
    pub label: String,
    pub severity: Severity,
}
