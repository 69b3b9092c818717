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
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::action::{Action, ActionBase};
use crate::common::{manager_ref, SignalError, SignalKey};
use crate::signal::SignalCore;
use crate::traits::{ErasedTrigger, IntoAction, SignalBase, SignalManager, Signature};

/// A typed dispatch point: an ordered list of subscribers with signature `S`.
///
/// `S` is written as a function-pointer type. Triggering a signal calls every subscriber in
/// slot order with its own copy of the arguments and collects what each returns.
///
/// ```rust
/// use signalbox::prelude::*;
///
/// let mut signal: Signal<fn(i32, i32) -> i32> = Signal::new("combine");
/// signal.add_action(|a: i32, b: i32| a + b);
/// let key = signal.add_action(|a: i32, b: i32| a * b);
/// signal.add_action(|a: i32| a);
///
/// assert_eq!(signal.trigger(3, 4), &[7, 12, 3]);
///
/// signal.remove(key).unwrap();
/// assert_eq!(signal.trigger(3, 4), &[7, 3]);
/// ```
///
/// When dropped, a signal releases its subscribers and then tells each subscribed
/// [`SignalManager`] that it is going away, skipping its prime manager.
pub struct Signal<S: Signature> {
    core: SignalCore,
    actions: Vec<Box<S::Callback>>,
    results: Vec<S::Output>,
}

impl<S: Signature> Signal<S> {
    /// Creates an empty signal with no managers.
    pub fn new(name: impl Into<String>) -> Self {
        let signal = Self {
            core: SignalCore::new(name.into(), S::arg_types(), S::return_type()),
            actions: Vec::new(),
            results: Vec::new(),
        };
        debug!(
            signal = signal.core.name(),
            id = signal.core.signal_id(),
            signature = type_name::<S>(),
            "signal created"
        );
        signal
    }

    /// Creates an empty signal subscribed to `manager`, and notifies the manager.
    pub fn with_manager<M: SignalManager + 'static>(name: impl Into<String>, manager: &Rc<M>) -> Self {
        let mut signal = Self::new(name);
        signal.core.subscribe_manager(manager_ref(manager));
        manager.notify_construct(&signal);
        signal
    }

    /// Subscribes an already boxed full-signature callable, placing it last.
    ///
    /// # Panics
    ///
    /// If this signal has already issued `u32::MAX` keys. Keys are never reused, so a
    /// wrapped sequence would hand out the inactive sentinel.
    pub fn add_boxed_action(&mut self, action: Box<S::Callback>) -> SignalKey {
        let key = self.core.next_key();
        self.core.bind(key, self.actions.len());
        self.actions.push(action);
        trace!(signal = self.core.name(), %key, slot = self.actions.len() - 1, "action added");
        key
    }

    /// Subscribes a callable, placing it last.
    ///
    /// The callable may take the full parameter list or any prefix of it; extra trailing
    /// arguments are dropped when it is called. Its return type must be the signal's.
    ///
    /// # Panics
    ///
    /// As [`add_boxed_action`](Self::add_boxed_action).
    pub fn add_action<M>(&mut self, action: impl IntoAction<S, M>) -> SignalKey {
        self.add_boxed_action(action.into_action())
    }

    /// Subscribes the callable behind a prebuilt [`Action`], sharing it.
    pub fn attach(&mut self, action: &Action<S>) -> SignalKey {
        self.add_boxed_action(S::share(Rc::clone(action.fun())))
    }

    /// The current slot of `key`; slot 0 runs first.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownKey`] if `key` is not live on this signal.
    pub fn priority(&self, key: SignalKey) -> Result<usize, SignalError> {
        self.core.slot(key).ok_or_else(|| self.core.unknown_key(key))
    }

    /// Calls every subscriber in slot order with a copy of `args`.
    ///
    /// Returns one result per subscriber, in slot order. The slice borrows the signal and
    /// is replaced by the next trigger.
    pub fn trigger_with(&mut self, args: &S::Args) -> &[S::Output] {
        trace!(signal = self.core.name(), actions = self.actions.len(), "triggering");
        self.results.clear();
        self.results.reserve(self.actions.len());
        for action in &mut self.actions {
            self.results.push(S::invoke(action.as_mut(), args));
        }
        &self.results
    }

    /// A fresh signal with the same name and signature: no subscribers, no managers.
    #[must_use]
    pub fn clone_empty(&self) -> Self {
        Self::new(self.core.name())
    }
}

macro_rules! impl_trigger {
    ($($A:ident $a:ident $idx:tt),*) => {
        impl<R: 'static, $($A: Clone + 'static,)*> Signal<fn($($A),*) -> R> {
            /// Calls every subscriber in slot order and returns their results in the same order.
            ///
            /// Each subscriber gets its own copy of the arguments. The returned slice
            /// borrows the signal and is replaced by the next trigger.
            pub fn trigger(&mut self, $($a: $A),*) -> &[R] {
                self.trigger_with(&($($a,)*))
            }
        }
    };
}

for_each_signature!(impl_trigger);

impl<S: Signature> SignalBase for Signal<S> {
    fn core(&self) -> &SignalCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SignalCore {
        &mut self.core
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn signature(&self) -> &'static str {
        type_name::<S>()
    }

    fn num_actions(&self) -> usize {
        self.actions.len()
    }

    fn add_action_dyn(&mut self, action: &dyn ActionBase) -> Result<SignalKey, SignalError> {
        match action.as_any().downcast_ref::<Action<S>>() {
            Some(action) => Ok(self.attach(action)),
            None => {
                let err = SignalError::ActionMismatch {
                    signal: self.core.name().to_string(),
                    expected: type_name::<S>(),
                    found: action.signature(),
                };
                warn!(action = action.name(), "{err}");
                Err(err)
            }
        }
    }

    fn test_match(&self, action: &dyn ActionBase) -> bool {
        action.as_any().is::<Action<S>>()
    }

    fn remove(&mut self, key: SignalKey) -> Result<(), SignalError> {
        let slot = self.core.unbind(key)?;
        self.actions.remove(slot);
        trace!(signal = self.core.name(), %key, slot, "action removed");
        Ok(())
    }

    fn clone_signal(&self) -> Box<dyn SignalBase> {
        Box::new(self.clone_empty())
    }
}

impl<S: Signature> ErasedTrigger for Signal<S> {
    fn trigger_erased(&mut self, args: &dyn Any, found: &'static str) -> Result<(), SignalError> {
        match args.downcast_ref::<S::Args>() {
            Some(args) => {
                self.trigger_with(args);
                Ok(())
            }
            None => {
                let err = SignalError::SignatureMismatch {
                    signal: self.core.name().to_string(),
                    expected: type_name::<S::Args>(),
                    found,
                };
                warn!("{err}");
                Err(err)
            }
        }
    }
}

impl<S: Signature> Drop for Signal<S> {
    fn drop(&mut self) {
        self.actions.clear();
        self.results.clear();
        self.core.unbind_all();

        let (managers, prime) = self.core.take_managers();
        debug!(
            signal = self.core.name(),
            id = self.core.signal_id(),
            managers = managers.len(),
            "signal dropped"
        );
        for manager in managers {
            if prime.as_ref().is_some_and(|prime| prime.ptr_eq(&manager)) {
                continue;
            }
            match manager.upgrade() {
                Some(manager) => manager.notify_destruct(&*self),
                None => trace!(signal = self.core.name(), "manager already gone"),
            }
        }
    }
}

impl<S: Signature> fmt::Debug for Signal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.core.name())
            .field("signal_id", &self.core.signal_id())
            .field("signature", &type_name::<S>())
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn keys_are_distinct_and_tagged_with_the_signal() {
        let mut signal: Signal<fn(i32)> = Signal::new("keys");
        let a = signal.add_action(|_: i32| {});
        let b = signal.add_action(|_: i32| {});
        assert_ne!(a, b);
        assert_eq!(a.signal_id(), signal.signal_id());
        assert_eq!(signal.priority(a).unwrap(), 0);
        assert_eq!(signal.priority(b).unwrap(), 1);
        assert_eq!(signal.keys(), vec![a, b]);
    }

    #[test]
    fn removal_shifts_later_priorities() {
        let mut signal: Signal<fn() -> char> = Signal::new("letters");
        let a = signal.add_action(|| 'a');
        let b = signal.add_action(|| 'b');
        let c = signal.add_action(|| 'c');

        signal.remove(b).unwrap();
        assert_eq!(signal.priority(a).unwrap(), 0);
        assert_eq!(signal.priority(c).unwrap(), 1);
        assert!(signal.priority(b).is_err());
        assert_eq!(signal.trigger(), &['a', 'c']);
    }

    #[test]
    fn foreign_and_stale_keys_are_rejected() {
        let mut first: Signal<fn()> = Signal::new("first");
        let mut second: Signal<fn()> = Signal::new("second");
        let key = first.add_action(|| {});
        second.add_action(|| {});

        assert!(matches!(second.remove(key), Err(SignalError::UnknownKey { .. })));
        first.remove(key).unwrap();
        assert!(matches!(first.remove(key), Err(SignalError::UnknownKey { .. })));
        assert_eq!(second.num_actions(), 1);
    }

    #[test]
    fn every_subscriber_gets_its_own_copy() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal: Signal<fn(Vec<u8>)> = Signal::new("copies");
        let log = Rc::clone(&seen);
        signal.add_action(move |mut bytes: Vec<u8>| {
            bytes.push(9);
            log.borrow_mut().push(bytes);
        });
        let log = Rc::clone(&seen);
        signal.add_action(move |bytes: Vec<u8>| log.borrow_mut().push(bytes));

        signal.trigger(vec![1]);
        assert_eq!(*seen.borrow(), vec![vec![1, 9], vec![1]]);
    }

    #[test]
    fn stateful_subscribers_keep_state_between_triggers() {
        let mut signal: Signal<fn() -> u32> = Signal::new("counter");
        let mut count = 0;
        signal.add_action(move || {
            count += 1;
            count
        });
        assert_eq!(signal.trigger(), &[1]);
        assert_eq!(signal.trigger(), &[2]);
    }

    #[test]
    fn clone_empty_keeps_identity_but_not_subscribers() {
        let mut signal: Signal<fn(u8) -> u8> = Signal::new("source");
        signal.add_action(|x: u8| x);
        let copy = signal.clone_empty();
        assert_eq!(copy.name(), "source");
        assert_eq!(copy.num_actions(), 0);
        assert_ne!(copy.signal_id(), signal.signal_id());

        let boxed = signal.clone_signal();
        assert_eq!(boxed.signature(), signal.signature());
        assert_eq!(boxed.arg_types(), signal.arg_types());
    }
}
