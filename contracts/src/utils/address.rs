//! A collection of utilities for low-level calls to other accounts.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolError;
pub use sol::*;
use stylus_sdk::{
    call::{self, Call, MethodError},
    prelude::*,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// A call to an address target failed. The target reverted without
        /// a revert reason.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error FailedCall();
    }
}

/// An [`AddressUtils`] error.
#[derive(Debug)]
pub enum Error {
    /// A call to an address target failed. The target reverted without a
    /// revert reason.
    FailedCall(FailedCall),
    /// The target reverted with `reason`. The payload is passed back to the
    /// caller untouched, so a revert inside delegated code is observed
    /// exactly as if the caller had reverted itself.
    Reverted(Vec<u8>),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::FailedCall(e) => e.abi_encode(),
            Error::Reverted(reason) => reason,
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// A collection of utilities for low-level calls to other accounts.
pub struct AddressUtils;

impl AddressUtils {
    /// Performs a delegate call to `target` with the given `data`, running
    /// `target`'s code against the storage and balance of `context`.
    ///
    /// # Arguments
    ///
    /// * `context` - Mutable access to the calling contract's state.
    /// * `target` - The address of the target contract.
    /// * `data` - The calldata to pass to the target contract.
    ///
    /// # Errors
    ///
    /// * [`Error::FailedCall`] - If the target reverted without a reason.
    /// * [`Error::Reverted`] - If the target reverted with a reason.
    pub fn function_delegate_call(
        context: &mut impl TopLevelStorage,
        target: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        #[allow(deprecated)]
        let result =
            unsafe { call::delegate_call(Call::new_in(context), target, data) };
        Self::verify_call_result(result)
    }

    /// Performs a call to `target` with the given `data`, forwarding `value`
    /// wei.
    ///
    /// # Arguments
    ///
    /// * `context` - Mutable access to the calling contract's state.
    /// * `target` - The address of the target account.
    /// * `data` - The calldata to pass to the target.
    /// * `value` - The amount of wei to attach.
    ///
    /// # Errors
    ///
    /// * [`Error::FailedCall`] - If the target reverted without a reason.
    /// * [`Error::Reverted`] - If the target reverted with a reason.
    pub fn function_call_with_value(
        context: &mut impl TopLevelStorage,
        target: Address,
        data: &[u8],
        value: U256,
    ) -> Result<Vec<u8>, Error> {
        #[allow(deprecated)]
        let result = call::call(Call::new_in(context).value(value), target, data);
        Self::verify_call_result(result)
    }

    /// Turns the result of a low-level call into [`Error`] on failure.
    ///
    /// Bubbles up the revert reason, falling back to [`Error::FailedCall`]
    /// when the target reverted with empty data.
    ///
    /// # Arguments
    ///
    /// * `result` - The result of the call.
    ///
    /// # Errors
    ///
    /// * [`Error::FailedCall`] - If the call failed without a revert reason.
    /// * [`Error::Reverted`] - If the call failed with a revert reason.
    pub fn verify_call_result<T>(
        result: Result<T, call::Error>,
    ) -> Result<T, Error> {
        result.map_err(Self::revert)
    }

    fn revert(error: call::Error) -> Error {
        match error {
            call::Error::Revert(data) if data.is_empty() => {
                FailedCall {}.into()
            }
            other => Error::Reverted(other.encode()),
        }
    }
}

impl From<FailedCall> for Error {
    fn from(value: FailedCall) -> Self {
        Error::FailedCall(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_returns_failed_call() {
        let error = call::Error::Revert(vec![]);
        let result = AddressUtils::revert(error);
        assert!(matches!(result, Error::FailedCall(FailedCall {})));
    }

    #[test]
    fn revert_bubbles_reason() {
        let error = call::Error::Revert(vec![1, 2, 3]);
        let result = AddressUtils::revert(error);
        assert!(matches!(result, Error::Reverted(ref data) if data == &[1, 2, 3]));
    }

    #[test]
    fn encodes_failed_call_as_custom_error() {
        let encoded: Vec<u8> = Error::FailedCall(FailedCall {}).into();
        assert_eq!(encoded, FailedCall::SELECTOR.to_vec());
    }

    #[test]
    fn passes_successful_result_through() {
        let data = vec![7u8; 32];
        let result = AddressUtils::verify_call_result(Ok(data.clone()))
            .expect("should pass through");
        assert_eq!(result, data);
    }
}
