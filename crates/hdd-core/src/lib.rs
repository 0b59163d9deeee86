//! # hdd-core
//!
//! Core types for heal-dd, the HEAL data-dictionary to VLMD converter.
//!
//! This crate provides the pieces shared by the conversion driver and the CLI:
//! - [`StudyIdentity`]: the HDP ID / APPL ID / project chain for one study
//! - [`InputType`]: converter input tags detected from file names
//! - [`OutputLayout`] and [`ConversionJob`]: deterministic output paths
//! - Directory provisioning under the overwrite policy
//! - Metadata YAML descriptors written next to converted artifacts

pub mod descriptor;
pub mod errors;
pub mod identity;
pub mod input_type;
pub mod layout;
pub mod provision;

pub use descriptor::{FileConfig, MetadataDocument, ProjectBlock};
pub use errors::CoreError;
pub use identity::StudyIdentity;
pub use input_type::InputType;
pub use layout::{ConversionJob, OutputLayout};
