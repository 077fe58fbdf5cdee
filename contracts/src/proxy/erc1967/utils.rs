//! This library provides getters and event emitting update functions for
//! [ERC-1967] slots.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::{vec, vec::Vec};

use alloy_primitives::{b256, Address, B256};
pub use sol::*;
use stylus_sdk::{
    call::MethodError,
    prelude::*,
    storage::{StorageAddress, StorageB256},
    stylus_core,
};

use crate::{
    proxy::erc1967,
    utils::storage_slot::{erc1967_slot, StorageSlot},
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Indicates an error related to the fact that the `implementation`
        /// of the proxy is invalid.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967InvalidImplementation(address implementation);

        /// Indicates an error related to the fact that the `admin` of the
        /// proxy is invalid.
        ///
        /// * `admin` - Address of the invalid admin.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967InvalidAdmin(address admin);

        /// Indicates an error related to the fact that an upgrade function
        /// sees `msg.value > 0` that may be lost.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967NonPayable();
    }
}

/// An [`Erc1967Utils`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// Indicates an error related to the fact that the `implementation`
    /// of the proxy is invalid.
    InvalidImplementation(ERC1967InvalidImplementation),
    /// Indicates an error related to the fact that the `admin` of the
    /// proxy is invalid.
    InvalidAdmin(ERC1967InvalidAdmin),
    /// Indicates an error related to the fact that an upgrade function
    /// sees `msg.value > 0` that may be lost.
    NonPayable(ERC1967NonPayable),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// Storage slot with the address of the current implementation.
/// This is the keccak-256 hash of "eip1967.proxy.implementation" subtracted by
/// 1.
pub const IMPLEMENTATION_SLOT: B256 =
    erc1967_slot(b"eip1967.proxy.implementation");

/// Storage slot with the admin of the contract.
/// This is the keccak-256 hash of "eip1967.proxy.admin" subtracted by 1.
pub const ADMIN_SLOT: B256 = erc1967_slot(b"eip1967.proxy.admin");

/// Code hash reported for an account without code: `keccak256("")`.
pub const EMPTY_CODE_HASH: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// Returns whether `code_hash`, as reported by `EXTCODEHASH`, belongs to an
/// account with deployed code. Accounts that were never touched report zero.
#[must_use]
pub fn is_contract_code_hash(code_hash: B256) -> bool {
    !code_hash.is_zero() && code_hash != EMPTY_CODE_HASH
}

/// Getters and event emitting setters for the [ERC-1967] slots.
///
/// The struct occupies no sequential storage, so embedding it in a proxy
/// leaves the whole sequential layout to the implementation behind it.
///
/// [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
#[storage]
pub struct Erc1967Utils {
    storage_slot: StorageSlot,
}

impl Erc1967Utils {
    /// Returns the current implementation address.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn get_implementation(&self) -> Address {
        self.storage_slot
            .get_slot::<StorageAddress>(IMPLEMENTATION_SLOT)
            .get()
    }

    /// Returns the current admin.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn get_admin(&self) -> Address {
        self.storage_slot.get_slot::<StorageAddress>(ADMIN_SLOT).get()
    }

    /// Returns the raw 32-byte word stored at `slot`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `slot` - The slot to read.
    #[must_use]
    pub fn read_slot(&self, slot: B256) -> B256 {
        self.storage_slot.get_slot::<StorageB256>(slot).get()
    }

    /// Overwrites the raw word at `slot`. Lets tests move state that only
    /// delegated code can normally write, such as a deadline.
    #[cfg(test)]
    pub(crate) fn write_slot(&mut self, slot: B256, value: B256) {
        self.storage_slot.get_slot::<StorageB256>(slot).set(value);
    }

    /// Interprets a storage word as a right-aligned 20-byte address.
    ///
    /// # Arguments
    ///
    /// * `word` - The word returned by [`Self::read_slot`].
    #[must_use]
    pub fn decode_address(word: B256) -> Address {
        Address::from_word(word)
    }

    /// Changes the admin of the proxy.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_admin` - The new admin address.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAdmin`] - If `new_admin` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`erc1967::AdminChanged`].
    pub fn change_admin(&mut self, new_admin: Address) -> Result<(), Error> {
        let previous_admin = self.get_admin();
        self._set_admin(new_admin)?;
        stylus_core::log(
            self.vm(),
            erc1967::AdminChanged { previous_admin, new_admin },
        );
        Ok(())
    }

    /// Reverts if `msg.value` is not zero. Used to avoid value getting stuck
    /// in the proxy when an upgrade performs no setup call.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::NonPayable`] - If `msg.value` is not zero.
    pub fn check_non_payable(&self) -> Result<(), Error> {
        if self.vm().msg_value().is_zero() {
            Ok(())
        } else {
            Err(ERC1967NonPayable {}.into())
        }
    }

    /// Stores a new address in the ERC-1967 implementation slot.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_implementation` - The new implementation address.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If there is no code at
    ///   `new_implementation`.
    pub fn _set_implementation(
        &mut self,
        new_implementation: Address,
    ) -> Result<(), Error> {
        if !is_contract_code_hash(self.vm().code_hash(new_implementation)) {
            return Err(ERC1967InvalidImplementation {
                implementation: new_implementation,
            }
            .into());
        }

        self._restore_implementation(new_implementation);
        Ok(())
    }

    /// Writes `implementation` to the implementation slot without any
    /// validation. Only used to roll back a staged upgrade to the address
    /// that was there before.
    pub(crate) fn _restore_implementation(&mut self, implementation: Address) {
        self.storage_slot
            .get_slot::<StorageAddress>(IMPLEMENTATION_SLOT)
            .set(implementation);
    }

    /// Stores a new address in the ERC-1967 admin slot.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_admin` - The new admin address.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAdmin`] - If `new_admin` is [`Address::ZERO`].
    fn _set_admin(&mut self, new_admin: Address) -> Result<(), Error> {
        if new_admin.is_zero() {
            return Err(ERC1967InvalidAdmin { admin: new_admin }.into());
        }

        self.storage_slot.get_slot::<StorageAddress>(ADMIN_SLOT).set(new_admin);

        Ok(())
    }
}
