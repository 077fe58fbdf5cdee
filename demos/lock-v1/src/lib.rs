#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{Address, U256};
use lockbox_stylus::lock::{self, LockV1};
use stylus_sdk::prelude::*;

#[entrypoint]
#[storage]
struct LockV1Example {
    lock: LockV1,
}

#[public]
impl LockV1Example {
    #[constructor]
    pub fn constructor(&mut self) {
        self.lock.constructor();
    }

    #[payable]
    fn initialize(&mut self, unlock_time: U256) -> Result<(), lock::Error> {
        self.lock.initialize(unlock_time)
    }

    fn withdraw(&mut self) -> Result<(), lock::Error> {
        self.lock.withdraw()
    }

    fn unlock_time(&self) -> U256 {
        self.lock.unlock_time()
    }

    fn owner(&self) -> Address {
        self.lock.owner()
    }
}
