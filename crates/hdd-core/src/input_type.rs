//! Converter input tags.
//!
//! The tag is chosen from the file name alone. Suffixes are checked from most
//! to least specific, so `foo.data-dict.csv` is a CSV data dictionary while
//! any other `.csv` is treated as a REDCap export.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    Stata,
    CsvDataDict,
    RedcapCsv,
}

impl InputType {
    /// Detect the input type from a file name. Returns `None` for
    /// unsupported files.
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".dta") {
            Some(Self::Stata)
        } else if name.ends_with(".data-dict.csv") {
            Some(Self::CsvDataDict)
        } else if name.ends_with(".redcap.csv") || name.ends_with(".csv") {
            Some(Self::RedcapCsv)
        } else {
            None
        }
    }

    /// Tag passed to the external converter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stata => "stata",
            Self::CsvDataDict => "csv-data-dict",
            Self::RedcapCsv => "redcap-csv",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
