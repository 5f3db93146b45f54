//! Data Transfer Objects for the HTTP surface.

pub mod request;
pub mod response;
pub mod validation;

pub use request::*;
pub use response::*;
pub use validation::{ApiPath, ApiQuery, ValidatedForm, ValidatedJson};
