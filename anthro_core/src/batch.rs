//! CSV batch assessment.
//!
//! Reads one measurement row per client and writes one result row per
//! client. Rows that cannot be assessed are logged and skipped so one bad
//! line does not sink the batch.

use crate::measurements::validate_input;
use crate::{assess, AnthropometricInput, Assessment, Perimeters, Protocol, Result, Sex, Skinfolds};
use std::io::{Read, Write};

/// A measurement row. Empty cells are "not measured".
#[derive(Debug, serde::Deserialize)]
struct InputRow {
    client: String,
    #[serde(default)]
    protocol: Option<String>,
    sex: String,
    age: u32,
    weight_kg: f64,
    height_cm: f64,

    #[serde(default)]
    triceps: Option<f64>,
    #[serde(default)]
    biceps: Option<f64>,
    #[serde(default)]
    subscapular: Option<f64>,
    #[serde(default)]
    suprailiac: Option<f64>,
    #[serde(default)]
    abdominal: Option<f64>,
    #[serde(default)]
    chest: Option<f64>,
    #[serde(default)]
    thigh: Option<f64>,
    #[serde(default)]
    midaxillary: Option<f64>,
    #[serde(default)]
    calf: Option<f64>,

    #[serde(default)]
    neck_cm: Option<f64>,
    #[serde(default)]
    shoulder_cm: Option<f64>,
    #[serde(default)]
    chest_cm: Option<f64>,
    #[serde(default)]
    waist_cm: Option<f64>,
    #[serde(default)]
    abdomen_cm: Option<f64>,
    #[serde(default)]
    hips_cm: Option<f64>,
    #[serde(default)]
    arm_relaxed_cm: Option<f64>,
    #[serde(default)]
    arm_flexed_cm: Option<f64>,
    #[serde(default)]
    forearm_cm: Option<f64>,
    #[serde(default)]
    thigh_proximal_cm: Option<f64>,
    #[serde(default)]
    thigh_mid_cm: Option<f64>,
    #[serde(default)]
    calf_cm: Option<f64>,
}

impl InputRow {
    fn protocol(&self, default: Protocol) -> Result<Protocol> {
        match self.protocol.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(id) => id.parse(),
        }
    }

    fn to_input(&self) -> Result<AnthropometricInput> {
        let v = |x: Option<f64>| x.unwrap_or(0.0);
        let input = AnthropometricInput {
            sex: self.sex.parse::<Sex>()?,
            age: self.age,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            skinfolds: Skinfolds {
                triceps: v(self.triceps),
                biceps: v(self.biceps),
                subscapular: v(self.subscapular),
                suprailiac: v(self.suprailiac),
                abdominal: v(self.abdominal),
                chest: v(self.chest),
                thigh: v(self.thigh),
                midaxillary: v(self.midaxillary),
                calf: v(self.calf),
            },
            perimeters: Perimeters {
                neck: v(self.neck_cm),
                shoulder: v(self.shoulder_cm),
                chest: v(self.chest_cm),
                waist: v(self.waist_cm),
                abdomen: v(self.abdomen_cm),
                hips: v(self.hips_cm),
                arm_relaxed: v(self.arm_relaxed_cm),
                arm_flexed: v(self.arm_flexed_cm),
                forearm: v(self.forearm_cm),
                thigh_proximal: v(self.thigh_proximal_cm),
                thigh_mid: v(self.thigh_mid_cm),
                calf: v(self.calf_cm),
            },
        };
        validate_input(&input)?;
        Ok(input)
    }
}

/// A result row in the CSV output
#[derive(Debug, serde::Serialize)]
struct OutputRow {
    client: String,
    protocol: String,
    sex: String,
    skinfold_sum_mm: f64,
    body_fat_percent: f64,
    fat_mass_kg: f64,
    lean_mass_kg: f64,
    bmr_kcal: f64,
    tdee_kcal: f64,
    bmi: Option<f64>,
    bmi_status: Option<String>,
    body_fat_status: Option<String>,
    whr: Option<f64>,
    whr_status: Option<String>,
}

impl OutputRow {
    fn new(client: String, a: &Assessment) -> Self {
        OutputRow {
            client,
            protocol: a.protocol.to_string(),
            sex: a.input.sex.to_string(),
            skinfold_sum_mm: a.skinfold_sum_mm,
            body_fat_percent: a.composition.body_fat_percent,
            fat_mass_kg: a.composition.fat_mass_kg,
            lean_mass_kg: a.composition.lean_mass_kg,
            bmr_kcal: a.metabolism.bmr_kcal,
            tdee_kcal: a.metabolism.tdee_kcal,
            bmi: a.bmi.as_ref().map(|c| c.value),
            bmi_status: a.bmi.as_ref().map(|c| c.label.clone()),
            body_fat_status: a.body_fat.as_ref().map(|c| c.label.clone()),
            whr: a.whr.as_ref().map(|c| c.value),
            whr_status: a.whr.as_ref().map(|c| c.label.clone()),
        }
    }
}

/// Outcome of a batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Assess every row of `reader` and write results to `writer`.
///
/// Rows without a protocol use `default_protocol`.
pub fn assess_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    default_protocol: Protocol,
) -> Result<BatchSummary> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (idx, record) in csv_reader.deserialize::<InputRow>().enumerate() {
        // Header is line 1
        let line = idx + 2;

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };

        let prepared = row
            .protocol(default_protocol)
            .and_then(|protocol| Ok((protocol, row.to_input()?)));

        match prepared {
            Ok((protocol, input)) => {
                let assessment = assess(&input, protocol);
                csv_writer.serialize(OutputRow::new(row.client, &assessment))?;
                summary.written += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping line {} ({}): {}", line, row.client, e);
                summary.skipped += 1;
            }
        }
    }

    csv_writer.flush()?;
    tracing::info!(
        "Batch complete: {} assessed, {} skipped",
        summary.written,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "client,protocol,sex,age,weight_kg,height_cm,triceps,subscapular,suprailiac,abdominal,chest,thigh,midaxillary,calf,waist_cm,hips_cm,abdomen_cm";

    fn run(body: &str) -> (BatchSummary, Vec<csv::StringRecord>, csv::StringRecord) {
        let input = format!("{}\n{}", HEADER, body);
        let mut out = Vec::new();
        let summary = assess_csv(input.as_bytes(), &mut out, Protocol::Pollock7).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        let rows = reader.records().map(|r| r.unwrap()).collect();
        (summary, rows, headers)
    }

    fn column(headers: &csv::StringRecord, name: &str) -> usize {
        headers.iter().position(|h| h == name).unwrap()
    }

    #[test]
    fn test_batch_assesses_each_row() {
        let (summary, rows, headers) = run(
            "Ana,,F,29,65,168,12,14,16,18,10,22,12,,70,98,\n\
             Bruno,faulkner,M,35,80,178,10,12,14,20,,,,,,,\n",
        );

        assert_eq!(summary, BatchSummary { written: 2, skipped: 0 });
        assert_eq!(rows.len(), 2);

        let protocol = column(&headers, "protocol");
        let bf = column(&headers, "body_fat_percent");
        let whr_status = column(&headers, "whr_status");

        assert_eq!(&rows[0][protocol], "pollock7");
        let ana_bf: f64 = rows[0][bf].parse().unwrap();
        assert!((ana_bf - 21.21).abs() < 0.01);
        assert_eq!(&rows[0][whr_status], "Baixo Risco");

        assert_eq!(&rows[1][protocol], "faulkner");
        let bruno_bf: f64 = rows[1][bf].parse().unwrap();
        assert!((bruno_bf - (0.153 * 56.0 + 5.783)).abs() < 1e-9);
        assert_eq!(&rows[1][whr_status], "");
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let (summary, rows, headers) = run(
            "Ana,durnin,F,29,65,168,12,14,16,18,10,22,12,,70,98,\n\
             Bia,,X,29,65,168,12,14,16,18,10,22,12,,70,98,\n\
             Caio,,M,abc,65,168,12,14,16,18,10,22,12,,70,98,\n\
             Duda,guedes,F,31,60,160,15,,18,20,,,,,,,\n",
        );

        assert_eq!(summary, BatchSummary { written: 1, skipped: 3 });
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][column(&headers, "client")], "Duda");
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let mut out = Vec::new();
        let summary = assess_csv(HEADER.as_bytes(), &mut out, Protocol::Pollock7).unwrap();
        assert_eq!(summary, BatchSummary::default());
    }
}
