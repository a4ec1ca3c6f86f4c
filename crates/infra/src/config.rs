//! Hotel-wide settings document (`settings.json`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innkeeper_bookings::RefundPolicy;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "INNKEEPER_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Resolved hotel configuration consumed by the booking engine and invoice generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSettings {
    vat_rate: Decimal,
    currency: String,
    hotel_name: String,
    default_refund_policy: String,
}

/// On-disk shape. Every field is optional; absent or null fields take the default.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsDocument {
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    vat_rate: Option<Decimal>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    hotel_name: Option<String>,
    #[serde(default)]
    default_refund_policy: Option<String>,
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            vat_rate: Decimal::new(10, 2),
            currency: "USD".to_string(),
            hotel_name: "Grand Hotel".to_string(),
            default_refund_policy: RefundPolicy::Tiered.name().to_string(),
        }
    }
}

impl HotelSettings {
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load from `path`. A missing or blank document yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no settings at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let doc: SettingsDocument =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let defaults = Self::default();
        let settings = Self {
            vat_rate: doc.vat_rate.unwrap_or(defaults.vat_rate),
            currency: doc.currency.unwrap_or(defaults.currency),
            hotel_name: doc.hotel_name.unwrap_or(defaults.hotel_name),
            default_refund_policy: doc
                .default_refund_policy
                .unwrap_or(defaults.default_refund_policy),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Write every field back to `path` as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let doc = SettingsDocument {
            vat_rate: Some(self.vat_rate),
            currency: Some(self.currency.clone()),
            hotel_name: Some(self.hotel_name.clone()),
            default_refund_policy: Some(self.default_refund_policy.clone()),
        };
        let json = serde_json::to_string_pretty(&doc).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vat_rate < Decimal::ZERO || self.vat_rate > Decimal::ONE {
            return Err(ConfigError::Invalid(format!(
                "vatRate must be between 0 and 1, got {}",
                self.vat_rate
            )));
        }
        Ok(())
    }

    pub fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn hotel_name(&self) -> &str {
        &self.hotel_name
    }

    /// Configured policy name as written in the document.
    pub fn default_refund_policy(&self) -> &str {
        &self.default_refund_policy
    }

    pub fn refund_policy(&self) -> RefundPolicy {
        RefundPolicy::from_name(&self.default_refund_policy)
    }

    pub fn set_vat_rate(&mut self, vat_rate: Decimal) -> Result<(), ConfigError> {
        let previous = std::mem::replace(&mut self.vat_rate, vat_rate);
        if let Err(err) = self.validate() {
            self.vat_rate = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn set_hotel_name(&mut self, hotel_name: impl Into<String>) {
        self.hotel_name = hotel_name.into();
    }

    pub fn set_default_refund_policy(&mut self, policy: RefundPolicy) {
        self.default_refund_policy = policy.name().to_string();
    }
}

/// Data directory from `INNKEEPER_DATA_DIR`, defaulting to `data`.
pub fn data_dir_from_env() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
