//! Measurement files.
//!
//! A measurement file is the TOML or JSON document the capture workflow
//! writes for one evaluation: the raw input plus, optionally, the client
//! name and the protocol to use.

use crate::{AnthropometricInput, Error, Protocol, Result, SkinfoldSite};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of one measurement file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasurementFile {
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    #[serde(flatten)]
    pub input: AnthropometricInput,
}

impl MeasurementFile {
    /// Load from `path`, choosing the format from the extension
    /// (`.json` is JSON, anything else is TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let file: MeasurementFile = if is_json {
            serde_json::from_str(&contents)?
        } else {
            toml::from_str(&contents)?
        };

        validate_input(&file.input)?;
        tracing::debug!("Loaded measurements from {:?}", path);
        Ok(file)
    }

    /// Protocol from the file, falling back to `default`
    pub fn protocol_or(&self, default: Protocol) -> Protocol {
        self.protocol.unwrap_or(default)
    }
}

/// Reject values no caliper or tape can produce.
///
/// Zero is accepted everywhere and means "not measured".
pub fn validate_input(input: &AnthropometricInput) -> Result<()> {
    let check = |name: &str, value: f64| -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Input(format!("{} must be a non-negative number, got {}", name, value)));
        }
        Ok(())
    };

    check("weight_kg", input.weight_kg)?;
    check("height_cm", input.height_cm)?;

    for site in SkinfoldSite::ALL {
        check(site.name(), input.skinfolds.get(site))?;
    }

    let p = &input.perimeters;
    for (name, value) in [
        ("neck", p.neck),
        ("shoulder", p.shoulder),
        ("chest", p.chest),
        ("waist", p.waist),
        ("abdomen", p.abdomen),
        ("hips", p.hips),
        ("arm_relaxed", p.arm_relaxed),
        ("arm_flexed", p.arm_flexed),
        ("forearm", p.forearm),
        ("thigh_proximal", p.thigh_proximal),
        ("thigh_mid", p.thigh_mid),
        ("calf", p.calf),
    ] {
        check(name, value)?;
    }

    Ok(())
}
