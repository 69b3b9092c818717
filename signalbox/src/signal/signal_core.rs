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

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::{ManagerRef, SignalError, SignalKey, TypeDescriptor, CONFIG};

/// Source of process-wide signal ids; 0 is never handed out.
static NEXT_SIGNAL_ID: AtomicU32 = AtomicU32::new(1);

/// State shared by every signal regardless of its signature.
///
/// Holds the identity of a signal, the map from live keys to slots, the recorded type
/// descriptors, and the managers to notify on destruction. Slots stay dense: the map is
/// always a bijection onto `0..len()`.
#[derive(Debug)]
pub struct SignalCore {
    name: Rc<str>,
    signal_id: u32,
    next_key_id: u32,
    link_key_map: HashMap<SignalKey, usize>,
    managers: Vec<ManagerRef>,
    prime_manager: Option<ManagerRef>,
    arg_types: Vec<TypeDescriptor>,
    return_type: TypeDescriptor,
    verify_blind_triggers: bool,
}

impl SignalCore {
    pub(crate) fn new(
        name: String,
        arg_types: Vec<TypeDescriptor>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            signal_id: NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed),
            next_key_id: 0,
            link_key_map: HashMap::new(),
            managers: Vec::new(),
            prime_manager: None,
            arg_types,
            return_type,
            verify_blind_triggers: CONFIG.contracts.verify_blind_triggers,
        }
    }

    /// Diagnostic name of the signal.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Rc<str> {
        Rc::clone(&self.name)
    }

    /// Process-wide id of the signal; every key it issues carries this id.
    #[must_use]
    pub const fn signal_id(&self) -> u32 {
        self.signal_id
    }

    /// Recorded parameter descriptors.
    #[must_use]
    pub fn arg_types(&self) -> &[TypeDescriptor] {
        &self.arg_types
    }

    /// Recorded return descriptor.
    #[must_use]
    pub const fn return_type(&self) -> TypeDescriptor {
        self.return_type
    }

    /// Whether blind triggers compare descriptors before dispatching.
    #[must_use]
    pub const fn verifies_blind_triggers(&self) -> bool {
        self.verify_blind_triggers
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.link_key_map.len()
    }

    /// True if there are no live subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link_key_map.is_empty()
    }

    /// Is `key` live on this signal?
    #[must_use]
    pub fn has(&self, key: SignalKey) -> bool {
        self.link_key_map.contains_key(&key)
    }

    /// Current slot of a live key.
    #[must_use]
    pub fn slot(&self, key: SignalKey) -> Option<usize> {
        self.link_key_map.get(&key).copied()
    }

    /// Live keys in slot order.
    #[must_use]
    pub fn keys(&self) -> Vec<SignalKey> {
        let mut by_slot: Vec<(usize, SignalKey)> = self
            .link_key_map
            .iter()
            .map(|(key, slot)| (*slot, *key))
            .collect();
        by_slot.sort_unstable();
        by_slot.into_iter().map(|(_, key)| key).collect()
    }

    /// Number of managers this signal will consider notifying on destruction.
    #[must_use]
    pub fn num_managers(&self) -> usize {
        self.managers.len()
    }

    pub(crate) fn set_verify_blind_triggers(&mut self, verify: bool) {
        self.verify_blind_triggers = verify;
    }

    /// Issues the next key. Sequence ids never wrap back to the inactive sentinel.
    ///
    /// # Panics
    ///
    /// Once `u32::MAX` keys have been issued by this signal.
    pub(crate) fn next_key(&mut self) -> SignalKey {
        let Some(key_id) = self.next_key_id.checked_add(1) else {
            panic!("signal '{}' has issued all {} keys", self.name, u32::MAX);
        };
        self.next_key_id = key_id;
        SignalKey::new(self.signal_id, key_id)
    }

    pub(crate) fn bind(&mut self, key: SignalKey, slot: usize) {
        self.link_key_map.insert(key, slot);
    }

    /// Erases `key` and shifts every later slot down by one; returns the freed slot.
    pub(crate) fn unbind(&mut self, key: SignalKey) -> Result<usize, SignalError> {
        let pos = self
            .link_key_map
            .remove(&key)
            .ok_or_else(|| self.unknown_key(key))?;
        for slot in self.link_key_map.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(pos)
    }

    pub(crate) fn unbind_all(&mut self) {
        self.link_key_map.clear();
    }

    pub(crate) fn subscribe_manager(&mut self, manager: ManagerRef) {
        self.managers.push(manager);
    }

    pub(crate) fn set_prime_manager(&mut self, manager: ManagerRef) {
        self.prime_manager = Some(manager);
    }

    /// Hands the manager list and prime manager to the destructor.
    pub(crate) fn take_managers(&mut self) -> (Vec<ManagerRef>, Option<ManagerRef>) {
        (std::mem::take(&mut self.managers), self.prime_manager.take())
    }

    pub(crate) fn unknown_key(&self, key: SignalKey) -> SignalError {
        SignalError::UnknownKey {
            signal: self.name.to_string(),
            key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> SignalCore {
        SignalCore::new(
            "core".to_string(),
            vec![TypeDescriptor::of::<i32>()],
            TypeDescriptor::of::<()>(),
        )
    }

    #[test]
    fn ids_are_unique_and_keys_start_above_zero() {
        let mut a = core();
        let b = core();
        assert_ne!(a.signal_id(), b.signal_id());
        assert_ne!(a.signal_id(), 0);

        let first = a.next_key();
        assert_eq!(first.id(), 1);
        assert_eq!(first.signal_id(), a.signal_id());
        assert_eq!(a.next_key().id(), 2);
    }

    #[test]
    fn last_key_is_issued_without_wrapping() {
        let mut c = core();
        c.next_key_id = u32::MAX - 1;
        let last = c.next_key();
        assert_eq!(last.id(), u32::MAX);
        assert!(last.is_active());
    }

    #[test]
    #[should_panic(expected = "has issued all")]
    fn key_sequence_exhaustion_panics_instead_of_reusing_the_sentinel() {
        let mut c = core();
        c.next_key_id = u32::MAX;
        c.next_key();
    }

    #[test]
    fn unbind_compacts_later_slots() {
        let mut c = core();
        let keys: Vec<_> = (0..4).map(|_| c.next_key()).collect();
        for (slot, key) in keys.iter().enumerate() {
            c.bind(*key, slot);
        }

        assert_eq!(c.unbind(keys[1]).unwrap(), 1);
        assert_eq!(c.slot(keys[0]), Some(0));
        assert_eq!(c.slot(keys[2]), Some(1));
        assert_eq!(c.slot(keys[3]), Some(2));
        assert_eq!(c.keys(), vec![keys[0], keys[2], keys[3]]);
        assert!(!c.has(keys[1]));
    }

    #[test]
    fn unbinding_unknown_key_is_an_error() {
        let mut c = core();
        let stray = SignalKey::new(c.signal_id(), 99);
        assert_eq!(
            c.unbind(stray),
            Err(SignalError::UnknownKey {
                signal: "core".to_string(),
                key: stray
            })
        );
    }
}
