//! Second version of the vault: the owner withdraws a chosen amount.
//!
//! The storage layout is the one of [`LockV1`], so a proxy can be upgraded
//! from one to the other. [`LockV2::initialize`] is a version `2`
//! reinitializer, runnable once on a vault that was set up by [`LockV1`].
//!
//! [`LockV1`]: crate::lock::LockV1
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
pub use sol::*;
use stylus_sdk::{prelude::*, stylus_core};

use crate::{
    lock::{Error, LockStorage},
    proxy::utils::Initializable,
    utils::AddressUtils,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the owner withdraws from the vault.
        ///
        /// * `amount` - Amount of wei sent to the owner.
        /// * `when` - Timestamp of the withdrawal.
        /// * `remaining` - Balance left in the vault.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Withdrawal(uint256 amount, uint256 when, uint256 remaining);
    }
}

/// Initializer version of [`LockV2`].
pub const VERSION: u64 = 2;

/// State of a [`LockV2`] contract.
#[storage]
pub struct LockV2 {
    lock: LockStorage,
    initializable: Initializable,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for LockV2 {}

#[public]
impl LockV2 {
    /// Locks the initializers of the template itself.
    #[constructor]
    pub fn constructor(&mut self) {
        self.initializable._disable_initializers();
    }

    /// Resets the unlock time and makes the transaction origin the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::Initialization`] - If version `2` already ran.
    /// * [`Error::UnlockTimeNotInFuture`] - If `unlock_time` is not after the
    ///   current block.
    #[payable]
    pub fn initialize(&mut self, unlock_time: U256) -> Result<(), Error> {
        self.initializable._check_initializable(VERSION)?;
        self.lock._initialize(unlock_time)?;
        self.initializable._reinitializer(VERSION)?;
        Ok(())
    }

    /// Sends `amount` of the balance to the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::TooEarly`] - Before the unlock time.
    /// * [`Error::NotOwner`] - If the caller is not the owner.
    /// * [`Error::AmountExceedsBalance`] - If `amount` is greater than the
    ///   balance.
    /// * [`Error::Transfer`] - If the owner rejects the transfer.
    pub fn withdraw(&mut self, amount: U256) -> Result<(), Error> {
        let when = self.lock._authorize_withdrawal()?;
        let remaining = self
            .lock
            .balance()
            .checked_sub(amount)
            .ok_or(Error::AmountExceedsBalance)?;
        let owner = self.lock.owner();

        stylus_core::log(self.vm(), Withdrawal { amount, when, remaining });

        AddressUtils::function_call_with_value(self, owner, &[], amount)?;
        Ok(())
    }

    /// Returns the timestamp from which the owner may withdraw.
    pub fn unlock_time(&self) -> U256 {
        self.lock.unlock_time()
    }

    /// Returns the account allowed to withdraw.
    pub fn owner(&self) -> Address {
        self.lock.owner()
    }
}
