//! Solidity ABI of the vault versions.
//!
//! Used to build the setup payload handed to the proxy constructor or to
//! [`ProxyAdmin::upgrade_and_call`], and to call the vault through the proxy.
//!
//! [`ProxyAdmin::upgrade_and_call`]: crate::proxy::transparent::ProxyAdmin::upgrade_and_call

pub use interfaces::*;

mod interfaces {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    use alloy_sol_macro::sol;

    sol! {
        /// Vault that releases its whole balance at once.
        interface ILockV1 {
            function initialize(uint256 unlockTime) external payable;
            function withdraw() external;
            function unlockTime() external view returns (uint256);
            function owner() external view returns (address);
        }
    }

    sol! {
        /// Vault that releases a chosen amount.
        interface ILockV2 {
            function initialize(uint256 unlockTime) external payable;
            function withdraw(uint256 amount) external;
            function unlockTime() external view returns (uint256);
            function owner() external view returns (address);
        }
    }
}
