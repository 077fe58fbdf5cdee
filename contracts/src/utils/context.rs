//! Transaction context accessors that unit tests can drive.
//!
//! The unit-test host answers every `tx_origin` query with the zero address,
//! so under `cfg(test)` the origin comes from the account registered with
//! `sign_as` instead.
use alloy_primitives::Address;
use stylus_sdk::stylus_core::Host;

/// Returns the externally owned account that signed the current transaction.
#[cfg(not(test))]
pub fn tx_origin(vm: &dyn Host) -> Address {
    vm.tx_origin()
}

/// Returns the account registered as the signer of the current transaction.
#[cfg(test)]
pub fn tx_origin(_vm: &dyn Host) -> Address {
    TX_ORIGIN.with(core::cell::Cell::get)
}

#[cfg(test)]
std::thread_local! {
    static TX_ORIGIN: core::cell::Cell<Address> =
        const { core::cell::Cell::new(Address::ZERO) };
}

/// Makes `account` the signer of every transaction that follows on this
/// test thread.
#[cfg(test)]
pub(crate) fn sign_as(account: Address) {
    TX_ORIGIN.with(|origin| origin.set(account));
}
