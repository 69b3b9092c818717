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

use std::fmt;

use derive_new::new;
use static_assertions::assert_impl_all;

/// Identifies one subscription on one signal instance.
///
/// A key pairs the id of the signal that issued it with a per-signal sequence number.
/// Keys are plain values: holding one only lets you query or remove the subscription it
/// names. Sequence number `0` is reserved for the inactive sentinel and is never issued
/// by a signal, so `SignalKey::default()` never matches a live subscription.
///
/// Keys order lexicographically on `(signal_id, key_id)`.
#[derive(new, Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalKey {
    /// Which signal issued this key.
    signal_id: u32,
    /// Sequence number of the subscription within that signal.
    key_id: u32,
}

assert_impl_all!(SignalKey: Copy, Ord, std::hash::Hash, Send, Sync);

impl SignalKey {
    /// The per-signal sequence number of this key.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.key_id
    }

    /// The id of the signal this key belongs to.
    #[inline]
    #[must_use]
    pub const fn signal_id(&self) -> u32 {
        self.signal_id
    }

    /// Is this key currently pointing at a subscription?
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.key_id > 0
    }

    /// Overwrites both parts of the key.
    pub fn set(&mut self, signal_id: u32, key_id: u32) {
        self.signal_id = signal_id;
        self.key_id = key_id;
    }

    /// Resets the key to the inactive sentinel.
    pub fn clear(&mut self) {
        self.signal_id = 0;
        self.key_id = 0;
    }
}

impl fmt::Display for SignalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.signal_id, self.key_id)
    }
}
