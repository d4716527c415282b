//! Site-wide contact settings

use serde::Deserialize;

use super::lenient;

/// The recognized configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Whatsapp,
    Phone,
    Hours,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::Whatsapp, ConfigKey::Phone, ConfigKey::Hours];

    /// Key as stored in the `config` table
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Whatsapp => "whatsapp",
            ConfigKey::Phone => "telefono",
            ConfigKey::Hours => "horarios",
        }
    }
}

/// Config write request. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    #[serde(deserialize_with = "lenient::text")]
    pub whatsapp: Option<String>,
    #[serde(rename = "telefono", deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(rename = "horarios", deserialize_with = "lenient::text")]
    pub hours: Option<String>,
}

impl ConfigUpdate {
    /// Entries to write: recognized keys with a non-empty value
    pub fn entries(&self) -> Vec<(ConfigKey, &str)> {
        ConfigKey::ALL
            .into_iter()
            .filter_map(|key| {
                let value = match key {
                    ConfigKey::Whatsapp => self.whatsapp.as_deref(),
                    ConfigKey::Phone => self.phone.as_deref(),
                    ConfigKey::Hours => self.hours.as_deref(),
                };
                value.filter(|v| !v.is_empty()).map(|v| (key, v))
            })
            .collect()
    }
}
