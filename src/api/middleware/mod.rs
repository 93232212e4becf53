//! API middleware.

mod content_negotiation;

pub use content_negotiation::{check_api_headers, require_api_headers};
