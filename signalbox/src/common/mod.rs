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
pub use config::{ContractConfig, DefaultsConfig, SignalConfig, CONFIG};
pub use registry::{SignalRecord, SignalRegistry};
pub use signal_error::SignalError;
pub use signal_key::SignalKey;
pub(crate) use type_descriptor::describe_list;
pub use type_descriptor::TypeDescriptor;
pub use types::*;

mod types;

mod config;
mod registry;
mod signal_error;
mod signal_key;
mod type_descriptor;
