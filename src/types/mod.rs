//! Shared types for pagination and responses.

mod pagination;
mod response;

pub use pagination::{Page, PaginationParams};
pub use response::{Envelope, EnvelopeData};
