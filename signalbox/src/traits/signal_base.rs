/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::any::{type_name, Any};

use tracing::{error, trace, warn};

use crate::action::ActionBase;
use crate::common::{describe_list, ManagerRef, SignalError, SignalKey, TypeDescriptor};
use crate::signal::{Signal, SignalCore};
use crate::traits::{ArgPack, IntoAction, Signature};

use sealed::ErasedTrigger;

pub(crate) mod sealed {
    use std::any::Any;

    use crate::common::SignalError;

    /// Unchecked dispatch behind the blind trigger. Not nameable outside the crate, which
    /// also keeps [`SignalBase`](super::SignalBase) from being implemented elsewhere.
    pub trait ErasedTrigger {
        /// Triggers with a type-erased argument tuple; fails if it is not the declared one.
        fn trigger_erased(&mut self, args: &dyn Any, found: &'static str) -> Result<(), SignalError>;
    }
}

/// The signature-independent view of a signal.
///
/// Every [`Signal`] implements this trait, so heterogeneous signals can be stored together
/// (`Box<dyn SignalBase>`) and driven by code that does not know their parameter types.
/// Through `dyn SignalBase` a caller can inspect a signal, attach prebuilt
/// [`Action`](crate::action::Action)s, remove subscriptions, and fire the signal with
/// [`base_trigger`](#method.base_trigger).
///
/// The trait is sealed; [`Signal`] is its only implementation. Dispatch from a
/// type-erased handle always goes through the checked blind trigger:
///
/// ```compile_fail
/// use signalbox::prelude::*;
///
/// let mut signal: Signal<fn(i32)> = Signal::new("sealed");
/// let erased: &mut dyn SignalBase = &mut signal;
/// erased.trigger_erased(&(1_i32,), "(i32,)");
/// ```
pub trait SignalBase: Any + ErasedTrigger {
    /// Shared signal state.
    fn core(&self) -> &SignalCore;

    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut SignalCore;

    /// The signal as [`Any`], for downcasting to its concrete [`Signal`] type.
    fn as_any(&self) -> &dyn Any;

    /// The signal as mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Name of the signal's exact signature, e.g. `fn(i32, i32) -> f64`.
    fn signature(&self) -> &'static str;

    /// Number of live subscriptions.
    fn num_actions(&self) -> usize;

    /// Subscribes a prebuilt action whose signature equals the signal's exactly.
    ///
    /// # Errors
    ///
    /// [`SignalError::ActionMismatch`] if the action has any other signature.
    fn add_action_dyn(&mut self, action: &dyn ActionBase) -> Result<SignalKey, SignalError>;

    /// Would [`add_action_dyn`](Self::add_action_dyn) accept `action`?
    fn test_match(&self, action: &dyn ActionBase) -> bool;

    /// Unsubscribes the callable behind `key`. Later subscriptions move up one slot.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownKey`] if `key` is not live on this signal; nothing changes.
    fn remove(&mut self, key: SignalKey) -> Result<(), SignalError>;

    /// A fresh signal with the same name and signature and no subscribers or managers.
    fn clone_signal(&self) -> Box<dyn SignalBase>;

    /// Diagnostic name.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Process-wide id, shared by every key this signal issues.
    fn signal_id(&self) -> u32 {
        self.core().signal_id()
    }

    /// Number of declared parameters.
    fn num_args(&self) -> usize {
        self.core().arg_types().len()
    }

    /// Descriptors of the declared parameters.
    fn arg_types(&self) -> &[TypeDescriptor] {
        self.core().arg_types()
    }

    /// Descriptor of the declared return type.
    fn return_type(&self) -> TypeDescriptor {
        self.core().return_type()
    }

    /// Is `key` live on this signal?
    fn has(&self, key: SignalKey) -> bool {
        self.core().has(key)
    }

    /// Live keys in trigger order.
    fn keys(&self) -> Vec<SignalKey> {
        self.core().keys()
    }

    /// Removes every subscription.
    fn clear(&mut self) {
        for key in self.keys() {
            if let Err(e) = self.remove(key) {
                error!("{e}");
            }
        }
    }

    /// Adds a manager to notify when this signal is destroyed.
    fn subscribe_manager(&mut self, manager: ManagerRef) {
        self.core_mut().subscribe_manager(manager);
    }

    /// Marks the manager that owns this signal; it is not notified of the signal's destruction.
    fn set_prime_manager(&mut self, manager: ManagerRef) {
        self.core_mut().set_prime_manager(manager);
    }

    /// Turns descriptor checks for blind triggers on this signal on or off.
    ///
    /// With checks off, a mismatched blind trigger still fails, with
    /// [`SignalError::SignatureMismatch`], once the concrete type is consulted.
    fn set_verify_blind_triggers(&mut self, verify: bool) {
        self.core_mut().set_verify_blind_triggers(verify);
    }
}

impl dyn SignalBase {
    /// Fires the signal from a type-erased handle, discarding any results.
    ///
    /// `args` is a tuple of the call-site arguments; `()` for none. Each position must match
    /// the declared parameter type exactly or be a shared borrow of it. The declared return
    /// type is irrelevant.
    ///
    /// ```rust
    /// use signalbox::prelude::*;
    ///
    /// let mut signal: Signal<fn(i32, String) -> usize> = Signal::new("sized");
    /// signal.add_action(|n: i32, s: String| s.len() + n as usize);
    ///
    /// let erased: &mut dyn SignalBase = &mut signal;
    /// let label = String::from("abc");
    /// assert!(erased.base_trigger((1, &label)).is_ok());
    /// assert!(erased.base_trigger((1_u8, &label)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// [`SignalError::ArityMismatch`] or [`SignalError::ArgumentMismatch`] when the arguments
    /// do not fit the declared parameters. If checks are disabled,
    /// [`SignalError::SignatureMismatch`] instead.
    pub fn base_trigger<A: ArgPack>(&mut self, args: A) -> Result<(), SignalError> {
        self.verify_call::<A>(None)?;
        let owned = A::into_owned(args);
        self.trigger_erased(&owned, type_name::<A::Owned>())
    }

    /// Fires the signal from a type-erased handle and returns the per-subscriber results.
    ///
    /// The results are borrowed from the signal and stay valid until its next trigger.
    ///
    /// # Errors
    ///
    /// As [`base_trigger`](#method.base_trigger), plus [`SignalError::ReturnMismatch`] when
    /// `R` is not the declared return type.
    pub fn base_trigger_returning<R: 'static, A: ArgPack>(
        &mut self,
        args: A,
    ) -> Result<&[R], SignalError> {
        self.verify_call::<A>(Some(TypeDescriptor::of::<R>()))?;
        let signal = self.checked_downcast_mut::<A::Target<R>>()?;
        Ok(signal.trigger_with(&A::into_owned(args)))
    }

    /// Subscribes a callable after checking that this signal has signature `S`.
    ///
    /// The callable may take any prefix of `S`'s parameters, as with [`Signal::add_action`].
    ///
    /// # Errors
    ///
    /// [`SignalError::SignatureMismatch`] if the signal's signature is not `S`.
    pub fn add_typed<S: Signature, M>(
        &mut self,
        action: impl IntoAction<S, M>,
    ) -> Result<SignalKey, SignalError> {
        Ok(self.checked_downcast_mut::<S>()?.add_action(action))
    }

    /// The concrete signal, if its signature is `S`.
    #[must_use]
    pub fn downcast_ref<S: Signature>(&self) -> Option<&Signal<S>> {
        self.as_any().downcast_ref()
    }

    /// The concrete signal, mutably, if its signature is `S`.
    pub fn downcast_mut<S: Signature>(&mut self) -> Option<&mut Signal<S>> {
        self.as_any_mut().downcast_mut()
    }

    fn checked_downcast_mut<S: Signature>(&mut self) -> Result<&mut Signal<S>, SignalError> {
        let name = self.core().shared_name();
        let expected = self.signature();
        match self.downcast_mut::<S>() {
            Some(signal) => Ok(signal),
            None => {
                let err = SignalError::SignatureMismatch {
                    signal: name.to_string(),
                    expected,
                    found: type_name::<S>(),
                };
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Compares the call-site descriptors with the declared ones: arity, then each
    /// position, then (if given) the return type.
    fn verify_call<A: ArgPack>(&self, wanted_return: Option<TypeDescriptor>) -> Result<(), SignalError> {
        let core = self.core();
        if !core.verifies_blind_triggers() {
            return Ok(());
        }
        let declared = core.arg_types();
        let passed = A::descriptors();
        trace!(
            signal = core.name(),
            declared = %describe_list(declared),
            passed = %describe_list(&passed),
            "verifying blind trigger"
        );

        let err = if declared.len() != passed.len() {
            Some(SignalError::ArityMismatch {
                signal: core.name().to_string(),
                expected: declared.len(),
                found: passed.len(),
            })
        } else if let Some((position, (expected, found))) = declared
            .iter()
            .zip(&passed)
            .enumerate()
            .find(|(_, (expected, found))| !expected.accepts(found))
        {
            Some(SignalError::ArgumentMismatch {
                signal: core.name().to_string(),
                position,
                expected: expected.to_string(),
                found: found.to_string(),
            })
        } else {
            wanted_return
                .filter(|wanted| *wanted != core.return_type())
                .map(|wanted| SignalError::ReturnMismatch {
                    signal: core.name().to_string(),
                    expected: core.return_type().to_string(),
                    found: wanted.to_string(),
                })
        };

        match err {
            Some(err) => {
                warn!("{err}");
                Err(err)
            }
            None => Ok(()),
        }
    }
}
