//! Business objects, independent of both the wire format and the storage format.

pub mod error;
pub mod query;
pub mod restaurant;

pub use error::*;
pub use query::*;
pub use restaurant::*;
