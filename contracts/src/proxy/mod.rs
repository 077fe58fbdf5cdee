//! Upgradeability machinery: a delegating proxy, [ERC-1967] storage slots,
//! the transparent proxy with its admin controller, and the initializer
//! lifecycle for logic contracts.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::vec::Vec;

use alloy_primitives::Address;
use stylus_sdk::prelude::*;

use crate::utils::{address, AddressUtils};

pub mod abi;
pub mod erc1967;
pub mod transparent;
pub mod utils;

/// Forwarding of calls to a logic contract through `delegatecall`.
///
/// The logic contract runs against the storage and balance of the proxy and
/// sees the caller and value of the original call. Its return data, or its
/// revert data, is handed back to the caller of the proxy byte for byte.
///
/// Implementors resolve the current logic contract in
/// [`IProxy::implementation`] and route unmatched calls to
/// [`IProxy::do_fallback`].
pub trait IProxy: TopLevelStorage + Sized {
    /// Runs `calldata` against the code of `implementation`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `implementation` - The logic contract whose code runs.
    /// * `calldata` - Calldata passed to the logic contract.
    ///
    /// # Errors
    ///
    /// * [`address::Error::Reverted`] - The logic contract reverted, with its
    ///   revert data untouched.
    /// * [`address::Error::FailedCall`] - The logic contract reverted without
    ///   any data.
    fn delegate(
        &mut self,
        implementation: Address,
        calldata: &[u8],
    ) -> Result<Vec<u8>, address::Error> {
        AddressUtils::function_delegate_call(self, implementation, calldata)
    }

    /// Resolves the logic contract that unmatched calls are forwarded to.
    ///
    /// # Errors
    ///
    /// * Encoded revert data if no logic contract can be resolved.
    fn implementation(&self) -> Result<Address, Vec<u8>>;

    /// Forwards `calldata` to the logic contract returned by
    /// [`IProxy::implementation`].
    ///
    /// # Errors
    ///
    /// * The error of [`IProxy::implementation`], or the revert data of the
    ///   logic contract.
    fn do_fallback(&mut self, calldata: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let implementation = self.implementation()?;
        Ok(self.delegate(implementation, calldata)?)
    }
}
