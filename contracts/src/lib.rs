/*!
# Lockbox Contracts for Stylus

An upgradeable, access-controlled, time-locked value vault written in Rust for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction).

The crate is split in two halves:

- [`proxy`] contains the upgradeability machinery: [ERC-1967] storage slots,
  a transparent upgradeable proxy that separates the admin from every other
  caller, the [`ProxyAdmin`] controller that owns the upgrade authority, and
  the [`Initializable`] lifecycle that replaces constructors in logic
  contracts.
- [`lock`] contains the versioned vault logic ([`LockV1`], [`LockV2`]) that
  lives behind the proxy. Both versions share the same storage layout.

Deploy a lock behind a proxy by deploying a logic template, a
[`ProxyAdmin`] owned by the operator, and finally the proxy itself with the
ABI-encoded `initialize` call as its setup payload:

```ignore
use lockbox_stylus::proxy::transparent::TransparentUpgradeableProxy;

#[entrypoint]
#[storage]
struct LockProxy {
    proxy: TransparentUpgradeableProxy,
}
```

> This project has never been audited. Do not use in production.

[ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
[`ProxyAdmin`]: crate::proxy::transparent::admin::ProxyAdmin
[`Initializable`]: crate::proxy::utils::initializable::Initializable
[`LockV1`]: crate::lock::v1::LockV1
[`LockV2`]: crate::lock::v2::LockV2
*/

#![allow(
    clippy::module_name_repetitions,
    clippy::used_underscore_items,
    clippy::unreadable_literal
)]
#![cfg_attr(
    not(any(test, feature = "std", feature = "export-abi")),
    no_std,
    no_main
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod lock;
pub mod proxy;
pub mod utils;

#[cfg(test)]
mod test_utils;
