//! Proxy storage slots and the events as defined in [ERC-1967].
//!
//! [ERC-1967]: <https://eips.ethereum.org/EIPS/eip-1967>
pub mod utils;

pub use sol::*;
pub use utils::{
    is_contract_code_hash, Erc1967Utils, Error, ADMIN_SLOT, EMPTY_CODE_HASH,
    IMPLEMENTATION_SLOT,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation is upgraded.
        ///
        /// * `implementation` - Address of the new implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Upgraded(address indexed implementation);

        /// Emitted when the admin account has changed.
        ///
        /// * `previous_admin` - Address of the previous admin.
        /// * `new_admin` - Address of the new admin.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event AdminChanged(address previous_admin, address new_admin);
    }
}
