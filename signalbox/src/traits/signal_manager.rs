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

use crate::traits::SignalBase;

/// Lifecycle hooks a signal calls on the managers it is subscribed to.
///
/// A manager is told once when a signal is constructed under it, and once when a signal it
/// is subscribed to is destroyed, unless it is that signal's prime manager (the manager
/// that initiated the destruction and therefore already knows). Destruction notices go out
/// in the order the managers subscribed.
///
/// Both hooks receive a borrow that ends with the call; a manager records what it needs
/// (name, id, descriptors) and must not expect to reach the signal again through them.
/// Hooks take `&self`: managers keep their bookkeeping behind interior mutability.
pub trait SignalManager {
    /// Called once, right after `signal` is constructed with this manager.
    fn notify_construct(&self, signal: &dyn SignalBase);

    /// Called once while `signal` is being dropped, unless this is its prime manager.
    fn notify_destruct(&self, signal: &dyn SignalBase);
}
