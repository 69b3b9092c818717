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

#![forbid(unsafe_code)]
//! Signalbox
//!
//! Typed signals with ordered subscribers. A [`Signal`](signal::Signal) is a named dispatch
//! point with a fixed call signature; subscribers are added in order, identified by a
//! [`SignalKey`](common::SignalKey), and called in that order whenever the signal is
//! triggered. Signals can also be driven through the signature-independent
//! [`SignalBase`](traits::SignalBase) view, where a blind trigger checks the call-site
//! argument types against the declared ones before dispatching.
//!
//! Managers ([`SignalManager`](traits::SignalManager)) are told when signals come and go;
//! [`SignalRegistry`](common::SignalRegistry) is a manager that also owns signals by name.

extern crate self as signalbox;

#[macro_use]
mod macros;

/// Prebuilt, named callables.
pub mod action;
/// Keys, descriptors, errors, configuration, and the registry.
pub mod common;
/// The concrete signal type.
pub mod signal;
/// Trait definitions for signatures, arguments, signals, and managers.
pub mod traits;

pub use signalbox_macro::signal_arg;
pub use traits::{ArgPack, SignalArg};

/// Prelude module for convenient imports.
///
/// Re-exports the signal, its traits, keys, actions, errors, and the registry.
pub mod prelude {
    pub use crate::action::{Action, ActionBase};
    pub use crate::common::{
        manager_ref, ManagerRef, SignalConfig, SignalError, SignalKey, SignalRecord, SignalRegistry,
        TypeDescriptor,
    };
    pub use crate::signal::Signal;
    pub use crate::signal_arg;
    pub use crate::traits::{ArgPack, IntoAction, SignalArg, SignalBase, SignalManager, Signature};
}
