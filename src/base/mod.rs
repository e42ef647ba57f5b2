//! Base types and error handling.
//!
//! - [`CrumbError`](error::CrumbError): everything a session command can report
//! - [`StoreError`](error::StoreError): failures of the backing cookie store
//! - [`context`]: extension traits attaching file paths to IO/JSON errors

pub mod context;
pub mod error;
