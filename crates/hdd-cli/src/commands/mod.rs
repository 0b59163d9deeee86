pub mod convert;
pub mod dispatch;
pub mod resolve;
pub mod validate_redcap;
