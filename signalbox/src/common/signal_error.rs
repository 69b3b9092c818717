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

use crate::common::SignalKey;

/// Errors reported when a caller breaks the contract of a signal or registry.
///
/// Every variant describes a contract violation: a type or arity mismatch at the
/// boundary between the typed and type-erased APIs, or a handle or name that the
/// receiver does not know. Failures raised *inside* subscriber callables are never
/// translated into a `SignalError`; they propagate unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// A blind trigger supplied the wrong number of arguments.
    ArityMismatch {
        /// Name of the signal.
        signal: String,
        /// Number of arguments the signal declares.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },
    /// A blind trigger argument does not match the declared type at `position`.
    ArgumentMismatch {
        /// Name of the signal.
        signal: String,
        /// Zero-based argument position.
        position: usize,
        /// Declared type.
        expected: String,
        /// Supplied type.
        found: String,
    },
    /// A value-returning blind trigger expected a different return type.
    ReturnMismatch {
        /// Name of the signal.
        signal: String,
        /// Declared return type.
        expected: String,
        /// Return type requested by the caller.
        found: String,
    },
    /// An action's signature is not the signal's signature.
    ActionMismatch {
        /// Name of the signal.
        signal: String,
        /// Signature of the signal.
        expected: &'static str,
        /// Signature of the rejected action.
        found: &'static str,
    },
    /// The checked downcast to a concrete signal failed.
    ///
    /// Reported when descriptor verification is switched off and the call site disagrees
    /// with the signal, or when a typed operation is routed through the wrong signature.
    SignatureMismatch {
        /// Name of the signal.
        signal: String,
        /// Signature of the signal.
        expected: &'static str,
        /// Signature requested by the caller.
        found: &'static str,
    },
    /// The key is not live on this signal.
    UnknownKey {
        /// Name of the signal.
        signal: String,
        /// The rejected key.
        key: SignalKey,
    },
    /// No signal with this name is known to the registry.
    UnknownSignal(String),
    /// A signal with this name is already owned by the registry.
    DuplicateSignal(String),
    /// The registry was re-entered while one of its signals was being used.
    RegistryBusy,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch {
                signal,
                expected,
                found,
            } => write!(
                f,
                "signal '{signal}' expects {expected} argument(s) but was passed {found}"
            ),
            Self::ArgumentMismatch {
                signal,
                position,
                expected,
                found,
            } => write!(
                f,
                "argument {position} of signal '{signal}' does not match: expected {expected}, passed {found}"
            ),
            Self::ReturnMismatch {
                signal,
                expected,
                found,
            } => write!(
                f,
                "signal '{signal}' returns {expected} but the caller expected {found}"
            ),
            Self::ActionMismatch {
                signal,
                expected,
                found,
            } => write!(
                f,
                "action of type {found} cannot be added to signal '{signal}' of type {expected}"
            ),
            Self::SignatureMismatch {
                signal,
                expected,
                found,
            } => write!(
                f,
                "signal '{signal}' has signature {expected}, not {found}"
            ),
            Self::UnknownKey { signal, key } => {
                write!(f, "key {key} is not registered on signal '{signal}'")
            }
            Self::UnknownSignal(name) => write!(f, "unknown signal: {name}"),
            Self::DuplicateSignal(name) => write!(f, "signal already registered: {name}"),
            Self::RegistryBusy => write!(f, "signal registry is already in use"),
        }
    }
}

impl std::error::Error for SignalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_signal() {
        let err = SignalError::UnknownKey {
            signal: "on_update".to_string(),
            key: SignalKey::new(3, 4),
        };
        assert_eq!(err.to_string(), "key 3:4 is not registered on signal 'on_update'");

        let err = SignalError::ArityMismatch {
            signal: "tick".to_string(),
            expected: 2,
            found: 1,
        };
        assert!(err.to_string().contains("expects 2 argument(s)"));
    }
}
