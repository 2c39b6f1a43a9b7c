//! Threshold tables for BMI, body-fat percentage and waist-hip ratio.
//!
//! Each lookup is independent and never feeds back into the
//! composition math. Labels are the ones printed on client reports.

use crate::{ClassificationResult, Severity, Sex};

/// One row of a threshold table: values below `upper` get this label
struct Band {
    upper: f64,
    label: &'static str,
    severity: Severity,
}

const fn band(upper: f64, label: &'static str, severity: Severity) -> Band {
    Band {
        upper,
        label,
        severity,
    }
}

const BMI_BANDS: &[Band] = &[
    band(18.5, "Abaixo do Peso", Severity::Moderate),
    band(25.0, "Normal", Severity::Low),
    band(30.0, "Sobrepeso", Severity::Moderate),
    band(f64::INFINITY, "Obesidade", Severity::High),
];

const BODY_FAT_MALE_BANDS: &[Band] = &[
    band(10.0, "Atleta", Severity::Low),
    band(15.0, "Excelente", Severity::Low),
    band(20.0, "Bom/Normal", Severity::Low),
    band(25.0, "Elevado", Severity::Moderate),
    band(f64::INFINITY, "Muito Elevado", Severity::High),
];

const BODY_FAT_FEMALE_BANDS: &[Band] = &[
    band(15.0, "Atleta", Severity::Low),
    band(22.0, "Excelente", Severity::Low),
    band(28.0, "Bom/Normal", Severity::Low),
    band(32.0, "Elevado", Severity::Moderate),
    band(f64::INFINITY, "Muito Elevado", Severity::High),
];

/// WHR above this is elevated risk (male and `O`)
pub const WHR_THRESHOLD_MALE: f64 = 0.95;

/// WHR above this is elevated risk (female)
pub const WHR_THRESHOLD_FEMALE: f64 = 0.85;

/// Band for `value`. Callers rule out NaN, the only value no band accepts.
fn lookup(bands: &[Band], value: f64) -> Option<ClassificationResult> {
    let band = bands.iter().find(|b| value < b.upper)?;
    Some(ClassificationResult {
        value,
        label: band.label.to_string(),
        severity: band.severity,
    })
}

/// Body-mass index, or 0 when weight or height is not positive
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if !(weight_kg > 0.0 && height_cm > 0.0) {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI. `None` when weight or height is missing.
pub fn classify_bmi(weight_kg: f64, height_cm: f64) -> Option<ClassificationResult> {
    let value = bmi(weight_kg, height_cm);
    if value == 0.0 {
        tracing::debug!("BMI not computed: weight {} height {}", weight_kg, height_cm);
        return None;
    }
    lookup(BMI_BANDS, value)
}

/// Classify a body-fat percentage against the sex-specific table.
///
/// `None` for the 0 "no estimate" sentinel and for anything that is not
/// a positive finite percentage. `Sex::O` has no table of its own and is
/// read against the male one.
pub fn classify_body_fat(body_fat_percent: f64, sex: Sex) -> Option<ClassificationResult> {
    if !(body_fat_percent.is_finite() && body_fat_percent > 0.0) {
        tracing::debug!("BF% not classified: {}", body_fat_percent);
        return None;
    }
    let bands = if sex.is_female() {
        BODY_FAT_FEMALE_BANDS
    } else {
        BODY_FAT_MALE_BANDS
    };
    lookup(bands, body_fat_percent)
}

/// Waist-hip ratio risk. `None` when either circumference is missing.
///
/// `Sex::O` uses the male threshold.
pub fn classify_whr(waist_cm: f64, hips_cm: f64, sex: Sex) -> Option<ClassificationResult> {
    if !(waist_cm > 0.0 && hips_cm > 0.0) {
        tracing::debug!("WHR not computed: waist {} hips {}", waist_cm, hips_cm);
        return None;
    }

    let ratio = waist_cm / hips_cm;
    let threshold = if sex.is_female() {
        WHR_THRESHOLD_FEMALE
    } else {
        WHR_THRESHOLD_MALE
    };

    let (label, severity) = if ratio > threshold {
        ("Risco Elevado", Severity::High)
    } else {
        ("Baixo Risco", Severity::Low)
    };

    Some(ClassificationResult {
        value: ratio,
        label: label.to_string(),
        severity,
    })
}
