pub mod characters;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
