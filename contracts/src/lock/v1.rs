//! First version of the vault: the owner withdraws the whole balance at once.
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
pub use sol::*;
use stylus_sdk::{prelude::*, stylus_core};

use crate::{
    lock::{Error, LockStorage},
    proxy::utils::Initializable,
    utils::AddressUtils,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the owner withdraws the vault balance.
        ///
        /// * `amount` - Amount of wei sent to the owner.
        /// * `when` - Timestamp of the withdrawal.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Withdrawal(uint256 amount, uint256 when);
    }
}

/// Initializer version of [`LockV1`].
pub const VERSION: u64 = 1;

/// State of a [`LockV1`] contract.
#[storage]
pub struct LockV1 {
    lock: LockStorage,
    initializable: Initializable,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for LockV1 {}

#[public]
impl LockV1 {
    /// Locks the initializers of the template itself. State behind a proxy
    /// is set through [`Self::initialize`].
    #[constructor]
    pub fn constructor(&mut self) {
        self.initializable._disable_initializers();
    }

    /// Sets the unlock time and makes the transaction origin the owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `unlock_time` - Timestamp from which the owner may withdraw.
    ///
    /// # Errors
    ///
    /// * [`Error::Initialization`] - If the vault is already initialized.
    /// * [`Error::UnlockTimeNotInFuture`] - If `unlock_time` is not after the
    ///   current block.
    ///
    /// # Events
    ///
    /// * [`crate::proxy::utils::initializable::Initialized`].
    #[payable]
    pub fn initialize(&mut self, unlock_time: U256) -> Result<(), Error> {
        self.initializable._check_initializable(VERSION)?;
        self.lock._initialize(unlock_time)?;
        self.initializable._initializer()?;
        Ok(())
    }

    /// Sends the whole balance to the owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::TooEarly`] - Before the unlock time.
    /// * [`Error::NotOwner`] - If the caller is not the owner.
    /// * [`Error::Transfer`] - If the owner rejects the transfer.
    ///
    /// # Events
    ///
    /// * [`Withdrawal`].
    pub fn withdraw(&mut self) -> Result<(), Error> {
        let when = self.lock._authorize_withdrawal()?;
        let amount = self.lock.balance();
        let owner = self.lock.owner();

        stylus_core::log(self.vm(), Withdrawal { amount, when });

        AddressUtils::function_call_with_value(self, owner, &[], amount)?;
        Ok(())
    }

    /// Returns the timestamp from which the owner may withdraw.
    pub fn unlock_time(&self) -> U256 {
        self.lock.unlock_time()
    }

    /// Returns the account allowed to withdraw.
    pub fn owner(&self) -> Address {
        self.lock.owner()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use alloy_sol_types::{SolCall, SolError};
    use motsu::prelude::*;

    use super::*;
    use crate::{
        lock::{abi::ILockV1, NOT_OWNER, TOO_EARLY, UNLOCK_TIME_NOT_IN_FUTURE},
        proxy::{
            erc1967::{Erc1967Utils, ADMIN_SLOT, IMPLEMENTATION_SLOT},
            transparent::{ProxyAdmin, TransparentUpgradeableProxy},
            utils::initializable::{Initialized, InvalidInitialization},
        },
        test_utils::{self, revert_reason, Clock, ONE_YEAR},
    };

    const LOCKED_AMOUNT: U256 = uint!(1_000_000_000_U256);

    fn deploy_locked(
        proxy: &Contract<TransparentUpgradeableProxy>,
        admin: &Contract<ProxyAdmin>,
        logic: &Contract<LockV1>,
        clock: &Contract<Clock>,
        deployer: Address,
    ) -> U256 {
        let unlock_time = clock.sender(deployer).now() + ONE_YEAR;
        let data =
            ILockV1::initializeCall { unlockTime: unlock_time }.abi_encode();
        test_utils::deploy(
            proxy,
            admin,
            logic.address(),
            deployer,
            data,
            LOCKED_AMOUNT,
        );
        unlock_time
    }

    fn withdraw(
        proxy: &Contract<TransparentUpgradeableProxy>,
        caller: Address,
    ) -> Result<Vec<u8>, Vec<u8>> {
        proxy.sender(caller).fallback(&ILockV1::withdrawCall {}.abi_encode())
    }

    #[motsu::test]
    fn deployment_fills_erc1967_slots(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
    ) {
        deploy_locked(&proxy, &admin, &logic, &clock, alice);

        let implementation = Erc1967Utils::decode_address(
            proxy.sender(alice).read_slot(IMPLEMENTATION_SLOT),
        );
        let proxy_admin =
            Erc1967Utils::decode_address(proxy.sender(alice).read_slot(ADMIN_SLOT));

        assert_eq!(implementation, logic.address());
        assert_eq!(proxy_admin, admin.address());
        assert_ne!(proxy_admin, alice);
        assert_ne!(proxy_admin, logic.address());
        assert_eq!(admin.sender(alice).owner(), alice);
    }

    #[motsu::test]
    fn initializes_through_proxy(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
    ) {
        let unlock_time = deploy_locked(&proxy, &admin, &logic, &clock, alice);

        assert_eq!(test_utils::unlock_time(&proxy, alice), unlock_time);
        assert_eq!(test_utils::owner(&proxy, alice), alice);
        assert_eq!(proxy.balance(), LOCKED_AMOUNT);

        // State lives in the proxy, the template is untouched.
        assert_eq!(logic.sender(alice).unlock_time(), U256::ZERO);
        assert_eq!(logic.sender(alice).owner(), Address::ZERO);
        assert_eq!(logic.balance(), U256::ZERO);

        // TODO: this should assert that the event was emitted on the proxy
        // https://github.com/OpenZeppelin/stylus-test-helpers/issues/111
        logic.assert_emitted(&Initialized { version: VERSION });
    }

    #[motsu::test]
    fn cannot_initialize_twice(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
        bob: Address,
    ) {
        let unlock_time = deploy_locked(&proxy, &admin, &logic, &clock, alice);

        let err = proxy
            .sender(bob)
            .fallback(
                &ILockV1::initializeCall { unlockTime: unlock_time + ONE_YEAR }
                    .abi_encode(),
            )
            .motsu_expect_err("should not initialize twice");

        assert_eq!(err, InvalidInitialization::SELECTOR.to_vec());
        assert_eq!(test_utils::owner(&proxy, alice), alice);
        assert_eq!(test_utils::unlock_time(&proxy, alice), unlock_time);
    }

    #[motsu::test]
    fn rejects_unlock_time_in_the_past(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
    ) {
        admin
            .sender(alice)
            .constructor(alice)
            .motsu_expect("should deploy proxy admin");

        let now = clock.sender(alice).now();
        let data = ILockV1::initializeCall { unlockTime: now }.abi_encode();
        let err = proxy
            .sender(alice)
            .constructor(logic.address(), admin.address(), data.into())
            .motsu_expect_err("unlock time must be in the future");

        assert_eq!(err, revert_reason(UNLOCK_TIME_NOT_IN_FUTURE));
    }

    #[motsu::test]
    fn template_rejects_direct_initialization(
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
    ) {
        logic.sender(alice).constructor();
        logic.assert_emitted(&Initialized { version: u64::MAX });

        let unlock_time = clock.sender(alice).now() + ONE_YEAR;
        let err = logic
            .sender(alice)
            .initialize(unlock_time)
            .motsu_expect_err("template should be locked");

        assert!(matches!(err, Error::Initialization(_)));
        assert_eq!(logic.sender(alice).owner(), Address::ZERO);
    }

    #[motsu::test]
    fn nobody_withdraws_before_unlock(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
        bob: Address,
    ) {
        deploy_locked(&proxy, &admin, &logic, &clock, alice);

        for caller in [alice, bob] {
            let err = withdraw(&proxy, caller)
                .motsu_expect_err("should not withdraw before unlock");
            assert_eq!(err, revert_reason(TOO_EARLY));
        }
        assert_eq!(proxy.balance(), LOCKED_AMOUNT);
    }

    #[motsu::test]
    fn non_owner_cannot_withdraw_after_unlock(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
        bob: Address,
    ) {
        deploy_locked(&proxy, &admin, &logic, &clock, alice);
        test_utils::advance_to_unlock(&proxy, &clock, alice);

        let err = withdraw(&proxy, bob)
            .motsu_expect_err("only the owner may withdraw");
        assert_eq!(err, revert_reason(NOT_OWNER));
        assert_eq!(proxy.balance(), LOCKED_AMOUNT);
    }

    #[motsu::test]
    fn owner_withdraws_whole_balance(
        proxy: Contract<TransparentUpgradeableProxy>,
        admin: Contract<ProxyAdmin>,
        logic: Contract<LockV1>,
        clock: Contract<Clock>,
        alice: Address,
        bob: Address,
    ) {
        deploy_locked(&proxy, &admin, &logic, &clock, alice);

        let err = withdraw(&proxy, alice)
            .motsu_expect_err("should not withdraw before unlock");
        assert_eq!(err, revert_reason(TOO_EARLY));

        test_utils::advance_to_unlock(&proxy, &clock, alice);

        let err = withdraw(&proxy, bob)
            .motsu_expect_err("only the owner may withdraw");
        assert_eq!(err, revert_reason(NOT_OWNER));

        let owner_balance = alice.balance();
        withdraw(&proxy, alice).motsu_expect("owner should withdraw");

        assert_eq!(proxy.balance(), U256::ZERO);
        assert_eq!(alice.balance(), owner_balance + LOCKED_AMOUNT);

        // TODO: this should assert that the event was emitted on the proxy
        // https://github.com/OpenZeppelin/stylus-test-helpers/issues/111
        let when = clock.sender(alice).now();
        logic.assert_emitted(&Withdrawal { amount: LOCKED_AMOUNT, when });
    }
}
