//! Helper for reading and writing primitive types to specific storage slots.
use alloc::{vec, vec::Vec};

use alloy_primitives::{B256, U256};
use stylus_sdk::prelude::*;

const SLOT_BYTE_SPACE: u8 = 32;

/// Returns the storage slot reserved for `label`: `keccak256(label) - 1`.
///
/// Subtracting one from the hash means the slot has no known preimage, so it
/// can never coincide with a slot derived by the storage layout of a logic
/// contract (mapping keys and dynamic arrays are `keccak256` preimages
/// themselves).
///
/// Computed at compile time:
///
/// ```rust
/// use alloy_primitives::{b256, B256};
/// use lockbox_stylus::utils::storage_slot::erc1967_slot;
///
/// const IMPLEMENTATION_SLOT: B256 =
///     erc1967_slot(b"eip1967.proxy.implementation");
///
/// assert_eq!(
///     IMPLEMENTATION_SLOT,
///     b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc")
/// );
/// ```
#[must_use]
pub const fn erc1967_slot(label: &[u8]) -> B256 {
    let mut hash = keccak_const::Keccak256::new().update(label).finalize();

    let mut i = hash.len();
    while i > 0 {
        i -= 1;
        if hash[i] == 0 {
            hash[i] = u8::MAX;
        } else {
            hash[i] -= 1;
            break;
        }
    }

    B256::new(hash)
}

/// Helper for reading and writing primitive types to specific storage slots.
///
/// Storage slots are used to keep proxy metadata out of the way of the
/// sequential storage layout of the logic contract running behind the proxy.
/// The functions in this library return storage types bound to an arbitrary
/// slot, so callers can `get` or `set` them like any other field.
///
/// Example usage to set the ERC-1967 implementation slot:
///
/// ```rust,ignore
/// use lockbox_stylus::utils::storage_slot::{erc1967_slot, StorageSlot};
/// use stylus_sdk::{prelude::*, storage::StorageAddress};
///
/// const IMPLEMENTATION_SLOT: B256 =
///     erc1967_slot(b"eip1967.proxy.implementation");
///
/// #[storage]
/// pub struct Proxy {
///     storage_slot: StorageSlot,
/// }
///
/// impl Proxy {
///     fn implementation(&self) -> Address {
///         self.storage_slot
///             .get_slot::<StorageAddress>(IMPLEMENTATION_SLOT)
///             .get()
///     }
/// }
/// ```
#[storage]
pub struct StorageSlot;

impl StorageSlot {
    /// Returns a [`StorageType`] located at `slot`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `slot` - The slot to bind the storage type to.
    #[must_use]
    pub fn get_slot<ST: StorageType>(&self, slot: impl Into<U256>) -> ST {
        // SAFETY: Truncation is safe here because ST::SLOT_BYTES is never
        // larger than 32, so the subtraction cannot underflow and the
        // cast is always valid.
        #[allow(clippy::cast_possible_truncation)]
        unsafe {
            ST::new(
                slot.into(),
                SLOT_BYTE_SPACE - ST::SLOT_BYTES as u8,
                self.__stylus_host.clone(),
            )
        }
    }
}
