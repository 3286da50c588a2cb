//! HTTP protocol layer module
//!
//! Response builders and CORS policy evaluation, decoupled from the query
//! handler's business logic.

pub mod cors;
pub mod response;

pub use cors::CorsPolicy;
pub use response::{
    bad_request, build_404_response, build_405_response, build_413_response,
    build_options_response, json_response,
};
