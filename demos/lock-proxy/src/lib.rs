//! Deployable transparent proxy for a lock vault.
//!
//! Deploy with the address of a lock template, the address of a deployed
//! proxy admin and the ABI-encoded `initialize(uint256)` call, attaching the
//! amount to lock.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;

use alloy_primitives::Address;
use lockbox_stylus::proxy::transparent::TransparentUpgradeableProxy;
use stylus_sdk::{abi::Bytes, prelude::*, ArbResult};

#[entrypoint]
#[storage]
struct LockProxyExample {
    proxy: TransparentUpgradeableProxy,
}

#[public]
impl LockProxyExample {
    #[constructor]
    #[payable]
    pub fn constructor(
        &mut self,
        logic: Address,
        admin: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.proxy.constructor(logic, admin, data)
    }

    #[fallback]
    #[payable]
    fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
        self.proxy.fallback(calldata)
    }
}
