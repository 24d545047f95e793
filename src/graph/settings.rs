//! Build settings model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Array(Vec<String>),
}

impl SettingValue {
    /// Values as a token list; a string value splits on whitespace.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            SettingValue::String(value) => value.split_whitespace().map(str::to_string).collect(),
            SettingValue::Array(values) => values.clone(),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

pub type SettingsDictionary = BTreeMap<String, SettingValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildVariant {
    Debug,
    Release,
}

impl BuildVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Release => "release",
        }
    }
}

/// One build configuration overlay (e.g. `Debug`, `Beta`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub variant: BuildVariant,
    #[serde(default)]
    pub settings: SettingsDictionary,
    #[serde(default)]
    pub xcconfig: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DefaultSettings {
    Recommended {
        #[serde(default)]
        excluding: BTreeSet<String>,
    },
    Essential {
        #[serde(default)]
        excluding: BTreeSet<String>,
    },
    None,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings::Recommended {
            excluding: BTreeSet::new(),
        }
    }
}

impl DefaultSettings {
    pub fn name(&self) -> &'static str {
        match self {
            DefaultSettings::Recommended { .. } => "recommended",
            DefaultSettings::Essential { .. } => "essential",
            DefaultSettings::None => "none",
        }
    }

    pub fn excluding(&self) -> Option<&BTreeSet<String>> {
        match self {
            DefaultSettings::Recommended { excluding } | DefaultSettings::Essential { excluding } => {
                Some(excluding)
            }
            DefaultSettings::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub base: SettingsDictionary,
    #[serde(default)]
    pub configurations: Vec<Configuration>,
    #[serde(default)]
    pub default_settings: DefaultSettings,
}

impl Settings {
    pub fn with_base(base: SettingsDictionary) -> Self {
        Self {
            base,
            ..Settings::default()
        }
    }
}
