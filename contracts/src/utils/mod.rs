//! Common Smart Contracts utilities.
pub mod address;
pub mod context;
pub mod storage_slot;

pub use address::AddressUtils;
pub use storage_slot::StorageSlot;
