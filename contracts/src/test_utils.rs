//! Unit-testing utilities for the vault deployed behind a proxy.
use alloc::vec::Vec;

use alloy_primitives::{uint, Address, B256, U256};
use alloy_sol_types::{Revert, SolCall, SolError, SolValue};
use motsu::prelude::*;
use stylus_sdk::prelude::*;

use crate::{
    lock::abi::ILockV1,
    proxy::transparent::{ProxyAdmin, TransparentUpgradeableProxy},
    utils::context,
};

/// Number of seconds in a year of 365 days.
pub(crate) const ONE_YEAR: U256 = uint!(31536000_U256);

/// Reports the block timestamp seen by contracts.
#[storage]
pub(crate) struct Clock;

unsafe impl TopLevelStorage for Clock {}

#[public]
impl Clock {
    pub(crate) fn now(&self) -> U256 {
        U256::from(self.vm().block_timestamp())
    }
}

/// Deploys `admin` owned by `deployer`, then `proxy` backed by `logic` and
/// set up with `data`, attaching `value`. `deployer` signs the deployment.
pub(crate) fn deploy(
    proxy: &Contract<TransparentUpgradeableProxy>,
    admin: &Contract<ProxyAdmin>,
    logic: Address,
    deployer: Address,
    data: Vec<u8>,
    value: U256,
) {
    context::sign_as(deployer);
    admin
        .sender(deployer)
        .constructor(deployer)
        .motsu_expect("should deploy proxy admin");

    deployer.fund(value);
    proxy
        .sender_and_value(deployer, value)
        .constructor(logic, admin.address(), data.into())
        .motsu_expect("should deploy proxy");
}

/// Moves the vault's unlock time (sequential slot 0) to the current block, as
/// if the chain had advanced to the deadline.
pub(crate) fn advance_to_unlock(
    proxy: &Contract<TransparentUpgradeableProxy>,
    clock: &Contract<Clock>,
    caller: Address,
) {
    let now = clock.sender(caller).now();
    proxy
        .sender(caller)
        .write_slot(B256::ZERO, B256::from(now.to_be_bytes::<32>()));
}

/// Reads the vault's unlock time through the proxy.
pub(crate) fn unlock_time(
    proxy: &Contract<TransparentUpgradeableProxy>,
    caller: Address,
) -> U256 {
    let data = proxy
        .sender(caller)
        .fallback(&ILockV1::unlockTimeCall {}.abi_encode())
        .motsu_expect("should read unlock time");
    U256::abi_decode(&data, true).expect("should decode uint256")
}

/// Reads the vault's owner through the proxy.
pub(crate) fn owner(
    proxy: &Contract<TransparentUpgradeableProxy>,
    caller: Address,
) -> Address {
    let data = proxy
        .sender(caller)
        .fallback(&ILockV1::ownerCall {}.abi_encode())
        .motsu_expect("should read owner");
    Address::abi_decode(&data, true).expect("should decode address")
}

/// Encodes `reason` as a standard `Error(string)` revert payload.
pub(crate) fn revert_reason(reason: &str) -> Vec<u8> {
    Revert { reason: reason.into() }.abi_encode()
}
