pub mod basic_types;
pub mod encoding;
pub mod endpoints;
pub mod error;
pub mod files;
pub mod media;
pub mod params;
pub mod proto;
pub mod request;
pub mod response;
pub mod schema;
pub mod validate;

pub use error::{Error, Result};
pub use validate::{Validate, Validated, ValidationError};
