//! Growth Engine - weight-for-age growth assessment
//!
//! Scores a child's weight against WHO LMS reference data (Z-score, percentile
//! and clinical interpretation), generates canonical percentile curves, and
//! keeps one deduplicated alert per patient for measurements outside the
//! normal band.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{GrowthEngine, GrowthError, OutOfRangePolicy, ReferenceTable};
pub use models::{Alert, AlertStats, Assessment, CurvePoint, Interpretation, ScoreResult, Sex};
pub use services::{AlertStore, AssessmentService, MemoryAlertStore, PostgresAlertStore};
