//! The controller that owns the upgrade authority over transparent proxies.
//!
//! A [`ProxyAdmin`] is deployed once, owned by the operator, and passed as the
//! `admin` of every [`TransparentUpgradeableProxy`] it should manage. Since the
//! proxy refuses to forward any call coming from its admin, routing upgrades
//! through this contract keeps the operator's own account free to use the
//! vault like any other caller.
//!
//! [`TransparentUpgradeableProxy`]: super::TransparentUpgradeableProxy
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use stylus_sdk::{abi::Bytes, prelude::*};

use crate::{
    access::ownable::{self, Ownable},
    proxy::abi::ITransparentUpgradeableProxy::{
        upgradeToAndCallCall, upgradeToCall,
    },
    utils::AddressUtils,
};

/// The version of the upgrade interface of the contract.
pub const UPGRADE_INTERFACE_VERSION: &str = "5.0.0";

/// State of a [`ProxyAdmin`] contract.
#[storage]
pub struct ProxyAdmin {
    ownable: Ownable,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for ProxyAdmin {}

#[public]
impl ProxyAdmin {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `initial_owner` - The account allowed to perform upgrades.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::InvalidOwner`] - If `initial_owner` is
    ///   [`Address::ZERO`].
    #[constructor]
    pub fn constructor(
        &mut self,
        initial_owner: Address,
    ) -> Result<(), ownable::Error> {
        self.ownable._initialize_owner(initial_owner)
    }

    /// Returns the account allowed to perform upgrades.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Hands the upgrade authority to `new_owner`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_owner` - The next owner of the upgrade authority.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::UnauthorizedAccount`] - If not called by the
    ///   owner.
    /// * [`ownable::Error::InvalidOwner`] - If `new_owner` is
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), ownable::Error> {
        self.ownable.transfer_ownership(new_owner)
    }

    /// Gives up the upgrade authority. Every proxy managed by this contract
    /// becomes permanently frozen on its current implementation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::UnauthorizedAccount`] - If not called by the
    ///   owner.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn renounce_ownership(&mut self) -> Result<(), ownable::Error> {
        self.ownable.renounce_ownership()
    }

    /// The version of the upgrade interface of the contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[selector(name = "UPGRADE_INTERFACE_VERSION")]
    pub fn upgrade_interface_version(&self) -> String {
        String::from(UPGRADE_INTERFACE_VERSION)
    }

    /// Upgrades `proxy` to `new_implementation`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `proxy` - The proxy to upgrade.
    /// * `new_implementation` - The address of the new implementation.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::UnauthorizedAccount`] - If not called by the
    ///   owner.
    /// * The unchanged revert data of the proxy.
    pub fn upgrade(
        &mut self,
        proxy: Address,
        new_implementation: Address,
    ) -> Result<(), Vec<u8>> {
        self.ownable.only_owner()?;

        let data =
            upgradeToCall { newImplementation: new_implementation }.abi_encode();
        AddressUtils::function_call_with_value(self, proxy, &data, U256::ZERO)?;
        Ok(())
    }

    /// Upgrades `proxy` to `new_implementation` and delegates `data` to the
    /// new implementation, forwarding the attached value.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `proxy` - The proxy to upgrade.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Calldata delegated to the new implementation, usually an
    ///   encoded initializer.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::UnauthorizedAccount`] - If not called by the
    ///   owner.
    /// * The unchanged revert data of the proxy.
    #[payable]
    pub fn upgrade_and_call(
        &mut self,
        proxy: Address,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.ownable.only_owner()?;

        let value = self.vm().msg_value();
        let call = upgradeToAndCallCall {
            newImplementation: new_implementation,
            data: data.to_vec().into(),
        }
        .abi_encode();
        AddressUtils::function_call_with_value(self, proxy, &call, value)?;
        Ok(())
    }
}
