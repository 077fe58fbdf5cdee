//! A time-locked vault meant to live behind a
//! [`TransparentUpgradeableProxy`].
//!
//! The vault holds the native balance of the proxy until an unlock time, after
//! which its owner may withdraw. Two logic versions exist:
//!
//! * [`LockV1`] withdraws the whole balance at once.
//! * [`LockV2`] withdraws a chosen amount and reports what remains.
//!
//! Both versions embed [`LockStorage`] as their first field, so `unlock_time`
//! occupies sequential slot 0 and `owner` slot 1 in either version and an
//! upgrade from one to the other keeps the state readable.
//!
//! Failures revert with a standard `Error(string)` payload carrying a human
//! readable reason, see [`Error`].
//!
//! [`TransparentUpgradeableProxy`]: crate::proxy::transparent::TransparentUpgradeableProxy
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::{Revert, SolError};
use stylus_sdk::{
    call::MethodError,
    prelude::*,
    storage::{StorageAddress, StorageU256},
};

use crate::{
    proxy::utils::initializable,
    utils::{address, context},
};

pub mod abi;
pub mod v1;
pub mod v2;

pub use v1::LockV1;
pub use v2::LockV2;

/// Reason reported when the requested unlock time is not in the future.
pub const UNLOCK_TIME_NOT_IN_FUTURE: &str =
    "Unlock time should be in the future";
/// Reason reported for a withdrawal before the unlock time.
pub const TOO_EARLY: &str = "You can't withdraw yet";
/// Reason reported for a withdrawal by anyone but the owner.
pub const NOT_OWNER: &str = "You aren't the owner";
/// Reason reported for a withdrawal larger than the vault balance.
pub const AMOUNT_EXCEEDS_BALANCE: &str = "Amount exceeds balance";

/// A vault error.
///
/// Rule violations encode as `Error(string)` with the matching reason.
/// Errors of the lower layers keep their own encoding.
#[derive(Debug)]
pub enum Error {
    /// The requested unlock time is not after the current block.
    UnlockTimeNotInFuture,
    /// The unlock time has not been reached yet.
    TooEarly,
    /// The caller is not the owner of the vault.
    NotOwner,
    /// The requested amount is greater than the vault balance.
    AmountExceedsBalance,
    /// The initializer for this version already ran.
    Initialization(initializable::Error),
    /// The transfer to the owner failed.
    Transfer(address::Error),
}

impl Error {
    /// Returns the revert reason of a rule violation, or `None` for errors of
    /// the lower layers.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Error::UnlockTimeNotInFuture => Some(UNLOCK_TIME_NOT_IN_FUTURE),
            Error::TooEarly => Some(TOO_EARLY),
            Error::NotOwner => Some(NOT_OWNER),
            Error::AmountExceedsBalance => Some(AMOUNT_EXCEEDS_BALANCE),
            Error::Initialization(_) | Error::Transfer(_) => None,
        }
    }
}

impl From<initializable::Error> for Error {
    fn from(value: initializable::Error) -> Self {
        Error::Initialization(value)
    }
}

impl From<address::Error> for Error {
    fn from(value: address::Error) -> Self {
        Error::Transfer(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::Initialization(e) => e.into(),
            Error::Transfer(e) => e.into(),
            rule => {
                let reason = String::from(rule.reason().unwrap_or_default());
                Revert { reason }.abi_encode()
            }
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Checks that `unlock_time` lies strictly after `now`.
///
/// # Errors
///
/// * [`Error::UnlockTimeNotInFuture`] - If `unlock_time <= now`.
pub fn check_unlock_time(now: U256, unlock_time: U256) -> Result<(), Error> {
    if now < unlock_time {
        Ok(())
    } else {
        Err(Error::UnlockTimeNotInFuture)
    }
}

/// Checks that `caller` may withdraw at `now`. The deadline is checked first.
///
/// # Errors
///
/// * [`Error::TooEarly`] - If `now < unlock_time`.
/// * [`Error::NotOwner`] - If `caller != owner`.
pub fn check_withdrawal(
    now: U256,
    unlock_time: U256,
    caller: Address,
    owner: Address,
) -> Result<(), Error> {
    if now < unlock_time {
        return Err(Error::TooEarly);
    }
    if caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(())
}

/// State shared by every version of the vault.
///
/// Fields must stay in this order: appending is fine, reordering or
/// removing corrupts vaults that already live behind a proxy.
#[storage]
pub struct LockStorage {
    /// Timestamp from which the owner may withdraw.
    pub(crate) unlock_time: StorageU256,
    /// Account allowed to withdraw.
    pub(crate) owner: StorageAddress,
}

impl LockStorage {
    /// Returns the unlock time.
    #[must_use]
    pub fn unlock_time(&self) -> U256 {
        self.unlock_time.get()
    }

    /// Returns the owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Returns the current block timestamp.
    #[must_use]
    pub fn now(&self) -> U256 {
        U256::from(self.vm().block_timestamp())
    }

    /// Sets the unlock time, and the transaction origin as the owner.
    ///
    /// When the initializer runs from the proxy constructor or through a
    /// [`ProxyAdmin`], the origin is the account that signed the deployment or
    /// the upgrade.
    ///
    /// [`ProxyAdmin`]: crate::proxy::transparent::ProxyAdmin
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `unlock_time` - Timestamp from which withdrawals are allowed.
    ///
    /// # Errors
    ///
    /// * [`Error::UnlockTimeNotInFuture`] - If `unlock_time` is not after the
    ///   current block.
    pub fn _initialize(&mut self, unlock_time: U256) -> Result<(), Error> {
        check_unlock_time(self.now(), unlock_time)?;

        self.unlock_time.set(unlock_time);
        self.owner.set(context::tx_origin(self.vm()));
        Ok(())
    }

    /// Checks that the caller may withdraw now, returning the current block
    /// timestamp.
    ///
    /// # Errors
    ///
    /// * [`Error::TooEarly`] - Before the unlock time.
    /// * [`Error::NotOwner`] - If the caller is not the owner.
    pub fn _authorize_withdrawal(&self) -> Result<U256, Error> {
        let now = self.now();
        check_withdrawal(
            now,
            self.unlock_time(),
            self.vm().msg_sender(),
            self.owner(),
        )?;
        Ok(now)
    }

    /// Returns the native balance held by the executing contract, which is
    /// the proxy when running behind one.
    #[must_use]
    pub fn balance(&self) -> U256 {
        let vm = self.vm();
        vm.balance(vm.contract_address())
    }
}
