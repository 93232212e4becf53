//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the repository trait rather
//! than on SeaORM directly.

mod user_service;

pub use user_service::{UserManager, UserService};
