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

// --- Public Re-exports ---
pub use into_action::IntoAction;
pub use signal_arg::{ArgPack, SignalArg};
pub(crate) use signal_base::sealed::ErasedTrigger;
pub use signal_base::SignalBase;
pub use signal_manager::SignalManager;
pub use signature::Signature;

// --- Submodules ---

/// Adapts closures with a prefix of a signal's parameters into subscribers.
mod into_action;
/// Call-site descriptors used by blind triggers.
mod signal_arg;
/// Defines the [`SignalBase`] trait and the blind trigger.
mod signal_base;
mod signal_manager;
/// Defines the [`Signature`] trait for function-pointer signatures.
mod signature;
