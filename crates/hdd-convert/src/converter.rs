//! The converter seam.
//!
//! Conversion to VLMD is owned by an external tool. The driver only needs
//! something that takes a data dictionary and hands back the VLMD JSON and
//! CSV renderings plus their template checks.

use std::future::Future;
use std::path::Path;

use hdd_core::InputType;
use serde_json::Value;

use crate::error::ConvertError;

/// One file to convert.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub input_path: &'a Path,
    pub input_type: InputType,
    /// Artifact base name without extension, e.g. `HDP00223_pain.vlmd`.
    pub artifact_stem: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

/// Result of the CSV and JSON template checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateChecks {
    pub csv_valid: bool,
    pub json_valid: bool,
    pub messages: Vec<String>,
}

impl TemplateChecks {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.csv_valid && self.json_valid
    }
}

/// VLMD renderings of one data dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct VlmdPayload {
    pub json: Value,
    pub csv: String,
    pub checks: TemplateChecks,
}

pub trait VlmdConverter {
    /// Convert one data dictionary.
    fn convert(
        &self,
        request: &ConversionRequest<'_>,
    ) -> impl Future<Output = Result<VlmdPayload, ConvertError>> + Send;
}
