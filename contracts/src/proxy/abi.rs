//! Solidity ABI interfaces for the proxy contracts.
//!
//! Defined with `alloy_sol_types::sol`, which enables constructing and
//! decoding function call data for the admin-only upgrade entry points of the
//! transparent proxy. These entry points are never part of the proxy's public
//! ABI, since every selector coming from a non-admin caller is forwarded to the
//! implementation.

pub use interfaces::*;

mod interfaces {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    use alloy_sol_macro::sol;

    sol! {
        /// Admin-only interface of the transparent upgradeable proxy.
        interface ITransparentUpgradeableProxy {
            function upgradeTo(address newImplementation) external;
            function upgradeToAndCall(address newImplementation, bytes calldata data) external payable;
        }
    }
}
