//! Request extractors
//!
//! Authentication, pagination, and validated JSON bodies.

mod auth;
mod pagination;
mod validated;

pub use auth::AuthUser;
pub use pagination::Pagination;
pub use validated::ValidatedJson;
