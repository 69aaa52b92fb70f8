//! HTTP protocol layer module
//!
//! Response construction shared by all handlers.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_500_response,
    build_redirect_response_with_code, build_status_response, build_text_response,
};
