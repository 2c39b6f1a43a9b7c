//! Protocol registry.
//!
//! Each of the seven protocols maps to one entry in a fixed table holding
//! its estimator, clamp ranges and governing skinfold sites. Dispatch is a
//! table lookup; formulas live in [`crate::estimators`].

use crate::clamp::ClampRange;
use crate::estimators::{self, *};
use crate::{AnthropometricInput, Error, Result, Sex, SkinfoldSite};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Body-composition estimation protocol
///
/// Serialized as its lowercase id. Deserialization goes through
/// [`Protocol::lookup`], so it accepts the same spellings as `FromStr`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Protocol {
    Pollock3,
    Pollock7,
    Guedes,
    Petroski,
    Faulkner,
    Weltman,
    Slaughter,
}

/// Shape of a protocol's regression
#[derive(Clone, Copy)]
pub enum Estimator {
    /// Produces body density, converted with the Siri equation
    Density(fn(&AnthropometricInput) -> Option<f64>),
    /// Produces BF% directly
    Direct(fn(&AnthropometricInput) -> Option<f64>),
}

impl Estimator {
    /// Raw (unclamped) BF%, or `None` when inputs are insufficient
    pub fn body_fat(&self, input: &AnthropometricInput) -> Option<f64> {
        match self {
            Estimator::Density(f) => f(input).map(estimators::siri),
            Estimator::Direct(f) => f(input),
        }
    }

    pub fn is_density_based(&self) -> bool {
        matches!(self, Estimator::Density(_))
    }
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimator::Density(_) => f.write_str("Density"),
            Estimator::Direct(_) => f.write_str("Direct"),
        }
    }
}

/// Registry entry for one protocol
#[derive(Debug)]
pub struct ProtocolSpec {
    pub protocol: Protocol,
    pub id: &'static str,
    pub name: &'static str,
    pub estimator: Estimator,
    male_range: ClampRange,
    female_range: ClampRange,
    male_sites: &'static [SkinfoldSite],
    female_sites: &'static [SkinfoldSite],
}

const STANDARD_RANGE: ClampRange = ClampRange::new(2.0, 60.0);

/// Ordered by `Protocol` discriminant
static REGISTRY: [ProtocolSpec; 7] = [
    ProtocolSpec {
        protocol: Protocol::Pollock3,
        id: "pollock3",
        name: "Jackson & Pollock (3 dobras)",
        estimator: Estimator::Density(pollock3_density),
        male_range: STANDARD_RANGE,
        female_range: STANDARD_RANGE,
        male_sites: POLLOCK3_MALE,
        female_sites: POLLOCK3_FEMALE,
    },
    ProtocolSpec {
        protocol: Protocol::Pollock7,
        id: "pollock7",
        name: "Jackson & Pollock (7 dobras)",
        estimator: Estimator::Density(pollock7_density),
        male_range: STANDARD_RANGE,
        female_range: STANDARD_RANGE,
        male_sites: POLLOCK7,
        female_sites: POLLOCK7,
    },
    ProtocolSpec {
        protocol: Protocol::Guedes,
        id: "guedes",
        name: "Guedes (3 dobras)",
        estimator: Estimator::Density(guedes_density),
        male_range: STANDARD_RANGE,
        female_range: STANDARD_RANGE,
        male_sites: GUEDES,
        female_sites: GUEDES,
    },
    ProtocolSpec {
        protocol: Protocol::Petroski,
        id: "petroski",
        name: "Petroski (4 dobras)",
        estimator: Estimator::Density(petroski_density),
        male_range: STANDARD_RANGE,
        female_range: STANDARD_RANGE,
        male_sites: PETROSKI,
        female_sites: PETROSKI,
    },
    ProtocolSpec {
        protocol: Protocol::Faulkner,
        id: "faulkner",
        name: "Faulkner (4 dobras)",
        estimator: Estimator::Direct(faulkner_body_fat),
        male_range: ClampRange::new(3.0, 60.0),
        female_range: ClampRange::new(3.0, 60.0),
        male_sites: FAULKNER,
        female_sites: FAULKNER,
    },
    ProtocolSpec {
        protocol: Protocol::Weltman,
        id: "weltman",
        name: "Weltman (perimetria)",
        estimator: Estimator::Direct(weltman_body_fat),
        male_range: ClampRange::new(5.0, 65.0),
        female_range: ClampRange::new(8.0, 70.0),
        male_sites: NONE,
        female_sites: NONE,
    },
    ProtocolSpec {
        protocol: Protocol::Slaughter,
        id: "slaughter",
        name: "Slaughter (crianças e adolescentes)",
        estimator: Estimator::Direct(slaughter_body_fat),
        male_range: ClampRange::new(3.0, 50.0),
        female_range: ClampRange::new(3.0, 50.0),
        male_sites: SLAUGHTER,
        female_sites: SLAUGHTER,
    },
];

/// Identifier (and alias) index over the registry
static ID_INDEX: Lazy<HashMap<&'static str, Protocol>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, Protocol> =
        REGISTRY.iter().map(|spec| (spec.id, spec.protocol)).collect();
    index.insert("jp3", Protocol::Pollock3);
    index.insert("jp7", Protocol::Pollock7);
    index
});

impl Protocol {
    pub const ALL: [Protocol; 7] = [
        Protocol::Pollock3,
        Protocol::Pollock7,
        Protocol::Guedes,
        Protocol::Petroski,
        Protocol::Faulkner,
        Protocol::Weltman,
        Protocol::Slaughter,
    ];

    /// Registry entry for this protocol
    pub fn spec(self) -> &'static ProtocolSpec {
        &REGISTRY[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.spec().id
    }

    /// Look up a protocol by identifier, returning `None` if unknown
    pub fn lookup(id: &str) -> Option<Protocol> {
        ID_INDEX.get(id.trim().to_ascii_lowercase().as_str()).copied()
    }

    /// Physiological bounds applied to this protocol's result
    pub fn clamp_range(self, sex: Sex) -> ClampRange {
        let spec = self.spec();
        if sex.is_female() {
            spec.female_range
        } else {
            spec.male_range
        }
    }

    /// Skinfold sites whose sum drives the equation (empty for Weltman)
    pub fn required_skinfolds(self, sex: Sex) -> &'static [SkinfoldSite] {
        let spec = self.spec();
        if sex.is_female() {
            spec.female_sites
        } else {
            spec.male_sites
        }
    }

    /// Governing skinfold sum for this subject
    pub fn skinfold_sum(self, input: &AnthropometricInput) -> f64 {
        input.skinfolds.sum_of(self.required_skinfolds(input.sex))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Protocol::lookup(s).ok_or_else(|| Error::UnknownProtocol(s.to_string()))
    }
}

impl TryFrom<String> for Protocol {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
