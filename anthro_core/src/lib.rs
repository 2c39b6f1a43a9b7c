#![forbid(unsafe_code)]

//! Anthropometric assessment engine.
//!
//! This crate provides:
//! - Measurement and result types
//! - The seven body-fat protocols and their registry
//! - Body composition, metabolic and classification calculations
//! - Whole-assessment orchestration and progress comparison
//! - Measurement file loading and CSV batch assessment
//!
//! All calculations are pure functions of their inputs. Missing data is
//! signalled with sentinel values (0 or `None`), never with errors.

pub mod types;
pub mod error;
pub mod clamp;
pub mod estimators;
pub mod protocol;
pub mod composition;
pub mod metabolism;
pub mod classification;
pub mod assessment;
pub mod progress;
pub mod measurements;
pub mod batch;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clamp::{sanity_clamp, ClampRange};
pub use protocol::Protocol;
pub use composition::{compute_body_fat, compute_body_fat_by_id, compute_composition};
pub use metabolism::compute_metabolism;
pub use classification::{classify_bmi, classify_body_fat, classify_whr};
pub use assessment::{assess, Assessment, AssessmentRecord};
pub use progress::{compare, ProgressReport, Trend};
pub use measurements::MeasurementFile;
pub use config::Config;
