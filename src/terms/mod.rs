//! Term Registry
//!
//! Domain dictionary of product names and acronyms that bypass the normal
//! case rules. Loaded once, read-only for the lifetime of the process.

pub mod registry;
pub mod schema;

pub use registry::TermRegistry;
pub use schema::{TermCategory, TermEntry};
