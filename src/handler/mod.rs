//! Request handler module
//!
//! Request routing dispatch and the query endpoint's business logic.

pub mod query;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
