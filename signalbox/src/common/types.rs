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

use std::rc::{Rc, Weak};

use crate::traits::SignalManager;

/// A non-owning reference from a signal to one of its managers.
///
/// Signals never keep their managers alive; a manager that has already been dropped is
/// skipped when the signal is destroyed.
pub type ManagerRef = Weak<dyn SignalManager>;

/// Downgrades a shared manager into a [`ManagerRef`].
#[must_use]
pub fn manager_ref<M: SignalManager + 'static>(manager: &Rc<M>) -> ManagerRef {
    let weak: Weak<M> = Rc::downgrade(manager);
    weak
}
