//! Single-owner access control.
//!
//! [`Ownable`] is a storage component: the embedding contract decides which
//! of its entry points are restricted and guards them with
//! [`Ownable::only_owner`]. Ownership can move to another account or be
//! renounced, which permanently closes every restricted entry point.
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{
    call::MethodError, prelude::*, storage::StorageAddress, stylus_core,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when ownership moves to `new_owner`.
        ///
        /// * `previous_owner` - Owner before the change.
        /// * `new_owner` - Owner after the change, zero once renounced.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);

        /// `account` called a restricted entry point without being the owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);

        /// `owner` cannot be made the owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An [`Ownable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The caller is not the owner.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The zero address was proposed as owner.
    InvalidOwner(OwnableInvalidOwner),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// State of the single-owner access control.
#[storage]
pub struct Ownable {
    owner: StorageAddress,
}

impl Ownable {
    /// Sets the first owner. Meant to be called from the constructor of the
    /// embedding contract.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `initial_owner` - The first owner.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `initial_owner` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _initialize_owner(
        &mut self,
        initial_owner: Address,
    ) -> Result<(), Error> {
        Self::check_owner_candidate(initial_owner)?;
        self._transfer_ownership(initial_owner);
        Ok(())
    }

    /// Returns the current owner, [`Address::ZERO`] once renounced.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Hands ownership to `new_owner`. Restricted to the owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_owner` - The next owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is [`Address::ZERO`]. Use
    ///   [`Self::renounce_ownership`] to give up ownership.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.only_owner()?;
        Self::check_owner_candidate(new_owner)?;
        self._transfer_ownership(new_owner);
        Ok(())
    }

    /// Leaves the contract without an owner. Restricted to the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn renounce_ownership(&mut self) -> Result<(), Error> {
        self.only_owner()?;
        self._transfer_ownership(Address::ZERO);
        Ok(())
    }

    /// Fails unless the caller of the current call is the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If the caller is not the owner.
    pub fn only_owner(&self) -> Result<(), Error> {
        let account = self.vm().msg_sender();
        if account == self.owner() {
            Ok(())
        } else {
            Err(OwnableUnauthorizedAccount { account }.into())
        }
    }

    /// Writes `new_owner` without any access check.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(&mut self, new_owner: Address) {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        stylus_core::log(
            self.vm(),
            OwnershipTransferred { previous_owner, new_owner },
        );
    }

    fn check_owner_candidate(owner: Address) -> Result<(), Error> {
        if owner.is_zero() {
            return Err(OwnableInvalidOwner { owner }.into());
        }
        Ok(())
    }
}
