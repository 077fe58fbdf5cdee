//! Helpers for logic contracts living behind a proxy.
pub mod initializable;

pub use initializable::Initializable;
