//! Core export data model: ledger records, export requests, company settings,
//! the ledger seam and the crate-wide error type.

mod builder;
mod error;
mod ledger;
mod request;
mod settings;
mod types;

pub use builder::*;
pub use error::*;
pub use ledger::*;
pub use request::*;
pub use settings::*;
pub use types::*;
