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

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use derive_new::new;
use tracing::*;

use crate::action::ActionBase;
use crate::common::{ManagerRef, SignalError, SignalKey, TypeDescriptor, CONFIG};
use crate::signal::Signal;
use crate::traits::{ArgPack, IntoAction, SignalBase, SignalManager, Signature};

/// What a [`SignalRegistry`] knows about a signal it was notified of.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct SignalRecord {
    name: String,
    signal_id: u32,
    signature: &'static str,
    arg_types: Vec<TypeDescriptor>,
    return_type: TypeDescriptor,
    #[new(value = "false")]
    owned: bool,
}

impl SignalRecord {
    /// Name of the signal when it was constructed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-wide id of the signal.
    #[must_use]
    pub const fn signal_id(&self) -> u32 {
        self.signal_id
    }

    /// Name of the signal's signature.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        self.signature
    }

    /// Declared parameter descriptors.
    #[must_use]
    pub fn arg_types(&self) -> &[TypeDescriptor] {
        &self.arg_types
    }

    /// Declared return descriptor.
    #[must_use]
    pub const fn return_type(&self) -> TypeDescriptor {
        self.return_type
    }

    /// True if the registry owns the signal, false if it only observes it.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.owned
    }
}

/// A named collection of signals, and a [`SignalManager`] for signals it does not own.
///
/// Signals added with [`add`](Self::add) are owned by the registry, which is their prime
/// manager: dropping one through [`remove_signal`](Self::remove_signal) notifies every other
/// manager but not the registry. Signals built elsewhere with
/// [`Signal::with_manager`] are catalogued when they are constructed and forgotten when
/// they are dropped.
///
/// Everything is driven by name through `&self`. Calls made from inside a subscriber while
/// the registry is dispatching fail with [`SignalError::RegistryBusy`].
///
/// ```rust
/// use signalbox::prelude::*;
///
/// let registry = SignalRegistry::new();
/// registry.add::<fn(i32) -> i32>("square").unwrap();
/// registry
///     .add_typed::<fn(i32) -> i32, _>("square", |x: i32| x * x)
///     .unwrap();
///
/// assert_eq!(registry.trigger_returning::<i32, _>("square", (7,)).unwrap(), vec![49]);
/// ```
pub struct SignalRegistry {
    this: Weak<SignalRegistry>,
    prefix: String,
    generated: Cell<usize>,
    signals: RefCell<BTreeMap<String, Box<dyn SignalBase>>>,
    // Names of owned signals; readable while `signals` is lent to a subscriber.
    index: RefCell<BTreeSet<String>>,
    records: RefCell<HashMap<u32, SignalRecord>>,
}

impl SignalRegistry {
    /// Creates an empty registry that names anonymous signals with the configured prefix.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Self::with_prefix(CONFIG.defaults.signal_prefix.clone())
    }

    /// Creates an empty registry that names anonymous signals `{prefix}_{n}`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Rc<Self> {
        let prefix = prefix.into();
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            prefix,
            generated: Cell::new(0),
            signals: RefCell::new(BTreeMap::new()),
            index: RefCell::new(BTreeSet::new()),
            records: RefCell::new(HashMap::new()),
        })
    }

    /// This registry as a manager reference.
    #[must_use]
    pub fn manager_ref(&self) -> ManagerRef {
        let this: Weak<Self> = self.this.clone();
        this
    }

    /// Creates and takes ownership of a signal with signature `S`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name to register the signal under; an empty name gets a generated one.
    ///
    /// Returns the name the signal was registered under.
    ///
    /// # Errors
    ///
    /// [`SignalError::DuplicateSignal`] if the name is taken.
    #[instrument(skip(self))]
    pub fn add<S: Signature>(&self, name: &str) -> Result<String, SignalError> {
        let mut signals = self.signals.try_borrow_mut().map_err(|_| SignalError::RegistryBusy)?;
        let name = if name.is_empty() {
            self.generate_name()
        } else {
            name.to_string()
        };
        if signals.contains_key(&name) {
            warn!(%name, "signal name already registered");
            return Err(SignalError::DuplicateSignal(name));
        }

        let mut signal: Signal<S> = Signal::new(name.clone());
        signal.subscribe_manager(self.manager_ref());
        signal.set_prime_manager(self.manager_ref());
        self.notify_construct(&signal);
        if let Some(record) = self.records.borrow_mut().get_mut(&signal.signal_id()) {
            record.owned = true;
        }

        debug!(%name, signal_id = signal.signal_id(), "signal registered");
        signals.insert(name.clone(), Box::new(signal));
        self.index.borrow_mut().insert(name.clone());
        Ok(name)
    }

    /// Subscribes a prebuilt action to the named signal.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`], or [`SignalError::ActionMismatch`] if the action's
    /// signature differs from the signal's.
    #[instrument(skip(self, action), fields(action = action.name()))]
    pub fn add_action(&self, name: &str, action: &dyn ActionBase) -> Result<SignalKey, SignalError> {
        self.with_signal(name, |signal| signal.add_action_dyn(action))?
    }

    /// Subscribes a callable to the named signal, which must have signature `S`.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`], or [`SignalError::SignatureMismatch`] if the signal's
    /// signature is not `S`.
    #[instrument(skip(self, action))]
    pub fn add_typed<S: Signature, M>(
        &self,
        name: &str,
        action: impl IntoAction<S, M>,
    ) -> Result<SignalKey, SignalError> {
        self.with_signal(name, |signal| signal.add_typed::<S, M>(action))?
    }

    /// Would the named signal accept `action`?
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`].
    pub fn test_match(&self, name: &str, action: &dyn ActionBase) -> Result<bool, SignalError> {
        self.with_signal(name, |signal| signal.test_match(action))
    }

    /// Removes a subscription from the named signal.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`] or [`SignalError::UnknownKey`].
    #[instrument(skip(self))]
    pub fn remove_action(&self, name: &str, key: SignalKey) -> Result<(), SignalError> {
        self.with_signal(name, |signal| signal.remove(key))?
    }

    /// Fires the named signal blind, discarding results.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`] or any error from
    /// [`base_trigger`](../traits/trait.SignalBase.html#method.base_trigger).
    #[instrument(skip(self, args))]
    pub fn trigger<A: ArgPack>(&self, name: &str, args: A) -> Result<(), SignalError> {
        self.with_signal(name, |signal| signal.base_trigger(args))?
    }

    /// Fires the named signal blind and returns a copy of the results.
    ///
    /// # Errors
    ///
    /// As [`trigger`](Self::trigger), plus [`SignalError::ReturnMismatch`].
    #[instrument(skip(self, args))]
    pub fn trigger_returning<R: Clone + 'static, A: ArgPack>(
        &self,
        name: &str,
        args: A,
    ) -> Result<Vec<R>, SignalError> {
        self.with_signal(name, |signal| {
            signal.base_trigger_returning::<R, A>(args).map(<[R]>::to_vec)
        })?
    }

    /// Runs `f` with mutable access to the named signal.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`], or [`SignalError::RegistryBusy`] when called from
    /// inside another registry operation.
    pub fn with_signal<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut dyn SignalBase) -> T,
    ) -> Result<T, SignalError> {
        let mut signals = self.signals.try_borrow_mut().map_err(|_| SignalError::RegistryBusy)?;
        let signal = signals
            .get_mut(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        Ok(f(signal.as_mut()))
    }

    /// Drops an owned signal. Its other managers are notified; the registry is not.
    ///
    /// # Errors
    ///
    /// [`SignalError::UnknownSignal`] or [`SignalError::RegistryBusy`].
    #[instrument(skip(self))]
    pub fn remove_signal(&self, name: &str) -> Result<(), SignalError> {
        let signal = self
            .signals
            .try_borrow_mut()
            .map_err(|_| SignalError::RegistryBusy)?
            .remove(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        self.index.borrow_mut().remove(name);
        let signal_id = signal.signal_id();
        drop(signal);
        self.records.borrow_mut().remove(&signal_id);
        debug!(%name, signal_id, "signal removed");
        Ok(())
    }

    /// Is a signal registered under `name`? Answers correctly from inside a subscriber.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.borrow().contains(name)
    }

    /// Names of the owned signals, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.index.borrow().iter().cloned().collect()
    }

    /// Records of every signal the registry knows about, owned or observed, by id.
    #[must_use]
    pub fn records(&self) -> Vec<SignalRecord> {
        let mut records: Vec<SignalRecord> = self.records.borrow().values().cloned().collect();
        records.sort_by_key(SignalRecord::signal_id);
        records
    }

    /// The record for a signal id, if the registry knows that signal.
    #[must_use]
    pub fn record(&self, signal_id: u32) -> Option<SignalRecord> {
        self.records.borrow().get(&signal_id).cloned()
    }

    /// Number of owned signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.borrow().len()
    }

    /// True if the registry owns no signals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn generate_name(&self) -> String {
        let taken = self.index.borrow();
        loop {
            let n = self.generated.get();
            self.generated.set(n + 1);
            let candidate = format!("{}_{n}", self.prefix);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalRegistry")
            .field("prefix", &self.prefix)
            .field("signals", &self.names())
            .field("records", &self.records.try_borrow().map_or(0, |records| records.len()))
            .finish()
    }
}

impl SignalManager for SignalRegistry {
    fn notify_construct(&self, signal: &dyn SignalBase) {
        trace!(signal = signal.name(), signal_id = signal.signal_id(), "cataloguing signal");
        let record = SignalRecord::new(
            signal.name().to_string(),
            signal.signal_id(),
            signal.signature(),
            signal.arg_types().to_vec(),
            signal.return_type(),
        );
        match self.records.try_borrow_mut() {
            Ok(mut records) => {
                records.insert(record.signal_id, record);
            }
            Err(_) => error!(signal = signal.name(), "record table busy; signal not catalogued"),
        }
    }

    fn notify_destruct(&self, signal: &dyn SignalBase) {
        trace!(signal = signal.name(), signal_id = signal.signal_id(), "forgetting signal");
        match self.records.try_borrow_mut() {
            Ok(mut records) => {
                records.remove(&signal.signal_id());
            }
            Err(_) => error!(signal = signal.name(), "record table busy; signal not forgotten"),
        }
    }
}
