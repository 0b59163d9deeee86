//! # hdd-convert
//!
//! Drives VLMD conversion for one study: discovers the data dictionaries in a
//! clean study directory, hands each to a [`VlmdConverter`], and writes the
//! returned artifacts, the input copy, and the metadata descriptors into the
//! study's output layout.

pub mod command;
pub mod converter;
pub mod driver;

mod error;

pub use command::CommandConverter;
pub use converter::{ConversionRequest, TemplateChecks, VlmdConverter, VlmdPayload};
pub use driver::{
    BatchProgress, BatchReport, ConversionDriver, DriverOptions, FileOutcome, discover_inputs,
};
pub use error::ConvertError;
