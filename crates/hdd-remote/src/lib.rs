//! # hdd-remote
//!
//! HTTP clients for the services heal-dd talks to:
//! - the HEAL metadata service (MDS), for resolving a study's APPL ID and
//!   project title from its HDP ID (and the reverse, APPL ID → HDP ID)
//! - the REDCap API, for checking that a data dictionary imports cleanly

pub mod lookup;
pub mod mds;
pub mod redcap;
pub mod resolver;

mod error;
mod http;

pub use error::RemoteError;
pub use mds::{MdsClient, MetadataSource};
pub use redcap::{RedcapClient, RedcapReport};
pub use resolver::{IdentityRequest, resolve_hdp_id, resolve_identity};
