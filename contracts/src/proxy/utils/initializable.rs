//! Protected initialization for contracts deployed behind a proxy.
//!
//! Logic contracts running behind a proxy cannot rely on constructors, since
//! constructor code runs against the storage of the logic contract itself and
//! never against the proxy's. Instead, an initializer function is called
//! through the proxy, usually as part of the deployment or the upgrade.
//!
//! [`Initializable`] tracks the highest initialized version of the contract.
//! An initializer for version `v` runs only while the stored version is lower
//! than `v`, so each version's setup runs at most once, and an upgraded logic
//! contract can add a new initialization step with a higher version.
//!
//! The version lives in a dedicated storage slot derived the same way as the
//! [ERC-1967] slots, so it never collides with the sequential layout of the
//! contract that embeds it.
//!
//! Logic templates should call [`Initializable::_disable_initializers`] in
//! their constructor, so that nobody can initialize (and take ownership of)
//! the template itself.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::{vec, vec::Vec};

use alloy_primitives::{B256, U64};
pub use sol::*;
use stylus_sdk::{
    call::MethodError, prelude::*, storage::StorageU64, stylus_core,
};

use crate::utils::storage_slot::{erc1967_slot, StorageSlot};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the contract has been initialized or reinitialized.
        ///
        /// * `version` - The version the contract is now initialized to.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Initialized(uint64 version);

        /// The contract is already initialized to the requested version or
        /// higher.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error InvalidInitialization();
    }
}

/// An [`Initializable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The contract is already initialized to the requested version or
    /// higher.
    InvalidInitialization(InvalidInitialization),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// Storage slot with the highest initialized version.
/// This is the keccak-256 hash of "lockbox.proxy.initializable" subtracted by
/// 1.
pub const INITIALIZABLE_SLOT: B256 =
    erc1967_slot(b"lockbox.proxy.initializable");

/// State of the initializer lifecycle.
#[storage]
pub struct Initializable {
    storage_slot: StorageSlot,
}

impl Initializable {
    /// Returns the highest version that has been initialized.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn get_initialized_version(&self) -> u64 {
        self.version().get().to::<u64>()
    }

    /// Marks the contract as initialized to version `1`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the contract is already
    ///   initialized.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn _initializer(&mut self) -> Result<(), Error> {
        self._reinitializer(1)
    }

    /// Marks the contract as initialized to `version`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `version` - The version being initialized.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the contract is already
    ///   initialized to `version` or higher.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn _reinitializer(&mut self, version: u64) -> Result<(), Error> {
        self._check_initializable(version)?;

        self.version().set(U64::from(version));
        stylus_core::log(self.vm(), Initialized { version });
        Ok(())
    }

    /// Checks that an initializer for `version` may run, without marking
    /// anything. Lets an initializer validate its own arguments before any
    /// state is written.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `version` - The version about to be initialized.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the contract is already
    ///   initialized to `version` or higher.
    pub fn _check_initializable(&self, version: u64) -> Result<(), Error> {
        if self.get_initialized_version() >= version {
            return Err(Error::InvalidInitialization(InvalidInitialization {}));
        }
        Ok(())
    }

    /// Locks the contract, preventing any future (re)initialization.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Events
    ///
    /// * [`Initialized`] - Only the first time the contract is locked.
    pub fn _disable_initializers(&mut self) {
        if self.get_initialized_version() != u64::MAX {
            self.version().set(U64::from(u64::MAX));
            stylus_core::log(self.vm(), Initialized { version: u64::MAX });
        }
    }

    fn version(&self) -> StorageU64 {
        self.storage_slot.get_slot::<StorageU64>(INITIALIZABLE_SLOT)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use motsu::prelude::*;
    use stylus_sdk::storage::StorageU256;

    use super::*;

    #[storage]
    struct InitializableExample {
        value: StorageU256,
        initializable: Initializable,
    }

    unsafe impl TopLevelStorage for InitializableExample {}

    #[public]
    impl InitializableExample {
        fn initialize(&mut self, value: U256) -> Result<(), Error> {
            self.initializable._initializer()?;
            self.value.set(value);
            Ok(())
        }

        fn reinitialize(&mut self, version: u64) -> Result<(), Error> {
            self.initializable._reinitializer(version)
        }

        fn disable(&mut self) {
            self.initializable._disable_initializers();
        }

        fn version(&self) -> u64 {
            self.initializable.get_initialized_version()
        }

        fn value(&self) -> U256 {
            self.value.get()
        }
    }

    #[motsu::test]
    fn initializes_once(
        contract: Contract<InitializableExample>,
        alice: Address,
    ) {
        assert_eq!(contract.sender(alice).version(), 0);

        contract
            .sender(alice)
            .initialize(U256::from(7))
            .motsu_expect("should initialize");
        assert_eq!(contract.sender(alice).version(), 1);
        assert_eq!(contract.sender(alice).value(), U256::from(7));
        contract.assert_emitted(&Initialized { version: 1 });

        let err = contract
            .sender(alice)
            .initialize(U256::from(8))
            .motsu_expect_err("should not initialize twice");
        assert!(matches!(err, Error::InvalidInitialization(_)));
        assert_eq!(contract.sender(alice).value(), U256::from(7));
    }

    #[motsu::test]
    fn reinitializes_to_higher_version(
        contract: Contract<InitializableExample>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .initialize(U256::ONE)
            .motsu_expect("should initialize");

        contract
            .sender(alice)
            .reinitialize(2)
            .motsu_expect("should reinitialize to version 2");
        assert_eq!(contract.sender(alice).version(), 2);
        contract.assert_emitted(&Initialized { version: 2 });

        let err = contract
            .sender(alice)
            .reinitialize(2)
            .motsu_expect_err("should not reinitialize to the same version");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }

    #[motsu::test]
    fn reinitializer_can_skip_versions(
        contract: Contract<InitializableExample>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .reinitialize(2)
            .motsu_expect("should initialize straight to version 2");

        let err = contract
            .sender(alice)
            .initialize(U256::ONE)
            .motsu_expect_err("version 1 is already behind");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }

    #[motsu::test]
    fn disabled_initializers_reject_every_version(
        contract: Contract<InitializableExample>,
        alice: Address,
    ) {
        contract.sender(alice).disable();
        assert_eq!(contract.sender(alice).version(), u64::MAX);
        contract.assert_emitted(&Initialized { version: u64::MAX });

        let err = contract
            .sender(alice)
            .initialize(U256::ONE)
            .motsu_expect_err("should be locked");
        assert!(matches!(err, Error::InvalidInitialization(_)));

        let err = contract
            .sender(alice)
            .reinitialize(u64::MAX)
            .motsu_expect_err("should be locked");
        assert!(matches!(err, Error::InvalidInitialization(_)));
    }

    #[motsu::test]
    fn version_does_not_touch_sequential_storage(
        contract: Contract<InitializableExample>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .initialize(U256::from(5))
            .motsu_expect("should initialize");

        assert_eq!(contract.sender(alice).value(), U256::from(5));
        assert_eq!(contract.sender(alice).version(), 1);
    }
}
