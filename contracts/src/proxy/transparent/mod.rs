//! A proxy that is upgradeable through an administrative account.
//!
//! To avoid [proxy selector clashing], which can potentially be used in an
//! attack, this contract uses the [transparent proxy pattern]. This pattern
//! implies two things that go hand in hand:
//!
//! 1. If any account other than the admin calls the proxy, the call will be
//!    forwarded to the implementation, even if that call matches the
//!    `upgradeTo` or `upgradeToAndCall` function exposed by the proxy itself.
//! 2. If the admin calls the proxy, it can call the upgrade functions but any
//!    other call won't be forwarded to the implementation. If the admin tries
//!    to call a function on the implementation it will fail with
//!    [`AdminCannotFallback`].
//!
//! These properties mean that the admin account can only be used for
//! upgrading the proxy, so it's best if it's a dedicated account that is not
//! used for anything else. Deploy a [`ProxyAdmin`] and use it as the admin.
//!
//! The proxy keeps both the implementation and the admin in [ERC-1967]
//! slots and declares no sequential storage, so the implementation is free to
//! lay its state out from slot zero.
//!
//! [proxy selector clashing]: https://medium.com/nomic-foundation-blog/malicious-backdoors-in-ethereum-proxies-62629adf3357
//! [transparent proxy pattern]: https://blog.openzeppelin.com/the-transparent-proxy-pattern
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolCall;
pub use sol::*;
use stylus_sdk::{
    abi::Bytes, call::MethodError, prelude::*, stylus_core, ArbResult,
};

use crate::{
    proxy::{
        abi::ITransparentUpgradeableProxy::{upgradeToAndCallCall, upgradeToCall},
        erc1967::{self, Erc1967Utils},
        IProxy,
    },
    utils::AddressUtils,
};

pub mod admin;

pub use admin::ProxyAdmin;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The proxy caller is the current admin, and can't fallback to the
        /// proxy target.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error AdminCannotFallback();
    }
}

/// A [`TransparentUpgradeableProxy`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The proxy caller is the current admin, and can't fallback to the
    /// proxy target.
    AdminCannotFallback(AdminCannotFallback),
    /// Indicates an error related to the fact that the `implementation`
    /// of the proxy is invalid.
    InvalidImplementation(erc1967::utils::ERC1967InvalidImplementation),
    /// Indicates an error related to the fact that the `admin` of the
    /// proxy is invalid.
    InvalidAdmin(erc1967::utils::ERC1967InvalidAdmin),
    /// Indicates an error related to the fact that an upgrade function
    /// sees `msg.value > 0` that may be lost.
    NonPayable(erc1967::utils::ERC1967NonPayable),
}

impl From<erc1967::Error> for Error {
    fn from(e: erc1967::Error) -> Self {
        match e {
            erc1967::Error::InvalidImplementation(e) => {
                Error::InvalidImplementation(e)
            }
            erc1967::Error::InvalidAdmin(e) => Error::InvalidAdmin(e),
            erc1967::Error::NonPayable(e) => Error::NonPayable(e),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of a [`TransparentUpgradeableProxy`] contract.
#[storage]
pub struct TransparentUpgradeableProxy {
    erc1967: Erc1967Utils,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for TransparentUpgradeableProxy {}

#[public]
impl TransparentUpgradeableProxy {
    /// Initializes an upgradeable proxy managed by `admin`, backed by the
    /// implementation at `logic`, and optionally initialized with `data` as
    /// explained in [`Self::upgrade_to_and_call`].
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `logic` - The address of the initial implementation.
    /// * `admin` - The account allowed to upgrade the proxy, usually a
    ///   [`ProxyAdmin`].
    /// * `data` - Calldata delegated to `logic` right after it is set. Usually
    ///   an encoded `initialize` call.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAdmin`] - If `admin` is [`Address::ZERO`].
    /// * Any error of [`Self::upgrade_to_and_call`].
    ///
    /// # Events
    ///
    /// * [`erc1967::AdminChanged`].
    /// * [`erc1967::Upgraded`].
    #[constructor]
    #[payable]
    pub fn constructor(
        &mut self,
        logic: Address,
        admin: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.erc1967.change_admin(admin).map_err(Error::from)?;
        self.upgrade_to_and_call(logic, &data)
    }

    /// Routes every call made to the proxy.
    ///
    /// Calls from the admin are decoded as `upgradeTo(address)` or
    /// `upgradeToAndCall(address,bytes)` and rejected with
    /// [`Error::AdminCannotFallback`] otherwise. Every other caller is
    /// delegated to the current implementation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `calldata` - The raw calldata of the call.
    ///
    /// # Errors
    ///
    /// * [`Error::AdminCannotFallback`] - If the admin sends anything other
    ///   than an upgrade call.
    /// * Any error of [`Self::upgrade_to_and_call`] for admin calls.
    /// * The unchanged revert data of the implementation for other calls.
    #[fallback]
    #[payable]
    pub fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
        if self.vm().msg_sender() == self.erc1967.get_admin() {
            self.dispatch_upgrade(calldata)?;
            Ok(Vec::new())
        } else {
            self.do_fallback(calldata)
        }
    }
}

impl TransparentUpgradeableProxy {
    /// Returns the current implementation address.
    #[must_use]
    pub fn get_implementation(&self) -> Address {
        self.erc1967.get_implementation()
    }

    /// Returns the current admin.
    #[must_use]
    pub fn get_admin(&self) -> Address {
        self.erc1967.get_admin()
    }

    /// Returns the raw word stored at `slot` of the proxy.
    #[must_use]
    pub fn read_slot(&self, slot: B256) -> B256 {
        self.erc1967.read_slot(slot)
    }

    #[cfg(test)]
    pub(crate) fn write_slot(&mut self, slot: B256, value: B256) {
        self.erc1967.write_slot(slot, value);
    }

    /// Upgrades the implementation to `new_implementation`, then delegates
    /// `data` to it.
    ///
    /// The slot write and the delegated call form a single unit of work: the
    /// previous implementation is staged first and written back if the
    /// delegated call fails, and [`erc1967::Upgraded`] is only emitted once
    /// both steps succeeded. When `data` is empty no call is made and no
    /// value may be attached.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Calldata delegated to the new implementation.
    ///
    /// # Errors
    ///
    /// * [`Error::NonPayable`] - If `data` is empty and value is attached.
    /// * [`Error::InvalidImplementation`] - If there is no code at
    ///   `new_implementation`.
    /// * The unchanged revert data of the delegated call.
    ///
    /// # Events
    ///
    /// * [`erc1967::Upgraded`].
    pub fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Vec<u8>> {
        if data.is_empty() {
            self.erc1967.check_non_payable().map_err(Error::from)?;
        }

        let previous_implementation = self.erc1967.get_implementation();
        self.erc1967
            ._set_implementation(new_implementation)
            .map_err(Error::from)?;

        if !data.is_empty() {
            if let Err(e) = AddressUtils::function_delegate_call(
                self,
                new_implementation,
                data,
            ) {
                self.erc1967._restore_implementation(previous_implementation);
                return Err(e.into());
            }
        }

        stylus_core::log(
            self.vm(),
            erc1967::Upgraded { implementation: new_implementation },
        );

        Ok(())
    }

    fn dispatch_upgrade(&mut self, calldata: &[u8]) -> Result<(), Vec<u8>> {
        if calldata.starts_with(&upgradeToCall::SELECTOR) {
            // Malformed arguments revert with empty data, as an ABI decoding
            // failure does in Solidity.
            let call = upgradeToCall::abi_decode(calldata, true)
                .map_err(|_| Vec::new())?;
            self.upgrade_to_and_call(call.newImplementation, &[])
        } else if calldata.starts_with(&upgradeToAndCallCall::SELECTOR) {
            let call = upgradeToAndCallCall::abi_decode(calldata, true)
                .map_err(|_| Vec::new())?;
            self.upgrade_to_and_call(call.newImplementation, &call.data)
        } else {
            Err(Error::AdminCannotFallback(AdminCannotFallback {}).into())
        }
    }
}

impl IProxy for TransparentUpgradeableProxy {
    fn implementation(&self) -> Result<Address, Vec<u8>> {
        Ok(self.erc1967.get_implementation())
    }
}
