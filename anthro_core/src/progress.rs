//! Progress between two assessments of the same client.

use crate::Assessment;
use serde::{Deserialize, Serialize};

/// Deltas at or below this magnitude count as no change
const EPSILON: f64 = 1e-9;

/// Direction of change for a metric
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improved,
    Worsened,
    Unchanged,
}

/// Which direction is better for a metric
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Better {
    Lower,
    Higher,
    /// Body weight: no value judgement
    Neither,
}

/// Change in one metric
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricDelta {
    pub metric: String,
    pub before: f64,
    pub after: f64,
    pub delta: f64,
    pub trend: Trend,
}

impl MetricDelta {
    fn new(metric: &str, before: f64, after: f64, better: Better) -> Self {
        let delta = after - before;
        let trend = if delta.abs() <= EPSILON || better == Better::Neither {
            Trend::Unchanged
        } else if (delta < 0.0) == (better == Better::Lower) {
            Trend::Improved
        } else {
            Trend::Worsened
        };

        Self {
            metric: metric.to_string(),
            before,
            after,
            delta,
            trend,
        }
    }
}

/// All metric changes between two assessments
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    pub deltas: Vec<MetricDelta>,
}

impl ProgressReport {
    pub fn get(&self, metric: &str) -> Option<&MetricDelta> {
        self.deltas.iter().find(|d| d.metric == metric)
    }
}

/// Compare `before` with `after`.
///
/// Body-fat metrics are only compared when both assessments produced a
/// BF% estimate; WHR only when both have one.
pub fn compare(before: &Assessment, after: &Assessment) -> ProgressReport {
    let mut deltas = vec![MetricDelta::new(
        "weight_kg",
        before.input.weight_kg,
        after.input.weight_kg,
        Better::Neither,
    )];

    if before.has_body_fat() && after.has_body_fat() {
        let (b, a) = (&before.composition, &after.composition);
        deltas.push(MetricDelta::new(
            "body_fat_percent",
            b.body_fat_percent,
            a.body_fat_percent,
            Better::Lower,
        ));
        deltas.push(MetricDelta::new(
            "fat_mass_kg",
            b.fat_mass_kg,
            a.fat_mass_kg,
            Better::Lower,
        ));
        deltas.push(MetricDelta::new(
            "lean_mass_kg",
            b.lean_mass_kg,
            a.lean_mass_kg,
            Better::Higher,
        ));
    } else {
        tracing::debug!("Skipping body-fat deltas, estimate missing on one side");
    }

    if before.bmi.is_some() && after.bmi.is_some() {
        deltas.push(MetricDelta::new(
            "bmi",
            before.bmi_value(),
            after.bmi_value(),
            Better::Lower,
        ));
    }

    if let (Some(b), Some(a)) = (&before.whr, &after.whr) {
        deltas.push(MetricDelta::new("whr", b.value, a.value, Better::Lower));
    }

    if before.protocol != after.protocol {
        tracing::warn!(
            "Comparing assessments from different protocols ({} vs {})",
            before.protocol,
            after.protocol
        );
    }

    ProgressReport { deltas }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assess, AnthropometricInput, Perimeters, Protocol, Sex, Skinfolds};

    fn input(weight_kg: f64, fold: f64, waist: f64) -> AnthropometricInput {
        AnthropometricInput {
            sex: Sex::M,
            age: 40,
            weight_kg,
            height_cm: 180.0,
            skinfolds: Skinfolds {
                chest: fold,
                abdominal: fold,
                thigh: fold,
                ..Default::default()
            },
            perimeters: Perimeters {
                waist,
                hips: 100.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_fat_loss_is_improvement() {
        let before = assess(&input(90.0, 25.0, 98.0), Protocol::Pollock3);
        let after = assess(&input(86.0, 18.0, 92.0), Protocol::Pollock3);
        let report = compare(&before, &after);

        assert_eq!(report.get("weight_kg").unwrap().delta, -4.0);
        assert_eq!(report.get("weight_kg").unwrap().trend, Trend::Unchanged);
        assert_eq!(report.get("body_fat_percent").unwrap().trend, Trend::Improved);
        assert_eq!(report.get("fat_mass_kg").unwrap().trend, Trend::Improved);
        assert_eq!(report.get("bmi").unwrap().trend, Trend::Improved);
        assert_eq!(report.get("whr").unwrap().trend, Trend::Improved);
    }

    #[test]
    fn test_lean_mass_gain_is_improvement() {
        // Same skinfolds, more weight: same BF%, more lean mass
        let before = assess(&input(80.0, 15.0, 90.0), Protocol::Pollock3);
        let after = assess(&input(84.0, 15.0, 90.0), Protocol::Pollock3);
        let report = compare(&before, &after);

        assert_eq!(report.get("body_fat_percent").unwrap().trend, Trend::Unchanged);
        assert_eq!(report.get("lean_mass_kg").unwrap().trend, Trend::Improved);
        assert_eq!(report.get("fat_mass_kg").unwrap().trend, Trend::Worsened);
    }

    #[test]
    fn test_missing_estimates_are_skipped() {
        let before = assess(&input(80.0, 0.0, 0.0), Protocol::Pollock3);
        let after = assess(&input(79.0, 15.0, 90.0), Protocol::Pollock3);
        let report = compare(&before, &after);

        assert!(report.get("body_fat_percent").is_none());
        assert!(report.get("whr").is_none());
        assert!(report.get("bmi").is_some());
    }
}
