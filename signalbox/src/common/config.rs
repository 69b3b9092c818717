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

use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Configuration for Signalbox.
///
/// Loaded from `config.toml` in the XDG-compliant `signalbox` configuration directory.
/// Every section is optional; missing values fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Contract verification switches
    pub contracts: ContractConfig,
    /// Default values
    pub defaults: DefaultsConfig,
}

/// Contract verification switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Compare call-site descriptors against the recorded ones before every blind trigger.
    ///
    /// When off, a blind trigger skips the comparison and relies on the checked downcast
    /// alone, reporting `SignatureMismatch` instead of the more specific errors.
    pub verify_blind_triggers: bool,
}

/// Default configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Prefix for names the registry generates for signals added without one
    pub signal_prefix: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            verify_blind_triggers: true,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            signal_prefix: "signal".to_string(),
        }
    }
}

impl SignalConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from an explicit file.
    ///
    /// A missing, unreadable, or malformed file is logged and yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_toml_str(&text) {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path.display());
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `signalbox/config.toml` under `$XDG_CONFIG_HOME` (falling back to
    /// `~/.config`). Without a file the defaults are used.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("signalbox") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path),
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: SignalConfig = SignalConfig::load();
}
