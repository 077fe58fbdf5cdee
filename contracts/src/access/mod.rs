//! Access control for administrative entry points.
pub mod ownable;

pub use ownable::{Error as OwnableError, Ownable};
