#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{string::String, vec::Vec};

use alloy_primitives::Address;
use lockbox_stylus::{access::ownable, proxy::transparent::ProxyAdmin};
use stylus_sdk::{abi::Bytes, prelude::*};

#[entrypoint]
#[storage]
struct ProxyAdminExample {
    admin: ProxyAdmin,
}

#[public]
impl ProxyAdminExample {
    #[constructor]
    pub fn constructor(
        &mut self,
        initial_owner: Address,
    ) -> Result<(), ownable::Error> {
        self.admin.constructor(initial_owner)
    }

    fn owner(&self) -> Address {
        self.admin.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), ownable::Error> {
        self.admin.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), ownable::Error> {
        self.admin.renounce_ownership()
    }

    #[selector(name = "UPGRADE_INTERFACE_VERSION")]
    fn upgrade_interface_version(&self) -> String {
        self.admin.upgrade_interface_version()
    }

    fn upgrade(
        &mut self,
        proxy: Address,
        new_implementation: Address,
    ) -> Result<(), Vec<u8>> {
        self.admin.upgrade(proxy, new_implementation)
    }

    #[payable]
    fn upgrade_and_call(
        &mut self,
        proxy: Address,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.admin.upgrade_and_call(proxy, new_implementation, data)
    }
}
