//! Build settings.
//!
//! Settings flatten to sorted `KEY=VALUE` lines. Warning-only settings and
//! warning flags are dropped first: they change diagnostics, never the built
//! product.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::settings::{SettingValue, Settings, SettingsDictionary};
use crate::hashers::xcconfig::XcconfigHasher;
use crate::hashers::AspectContext;
use std::collections::BTreeSet;

const WARNING_KEY_PREFIXES: &[&str] = &["GCC_WARN_", "CLANG_WARN_", "CLANG_ANALYZER_"];

const WARNING_KEYS: &[&str] = &[
    "WARNING_CFLAGS",
    "SWIFT_SUPPRESS_WARNINGS",
    "GCC_TREAT_WARNINGS_AS_ERRORS",
    "SWIFT_TREAT_WARNINGS_AS_ERRORS",
];

const FLAG_KEYS: &[&str] = &["OTHER_CFLAGS", "OTHER_CPLUSPLUSFLAGS", "OTHER_SWIFT_FLAGS"];

const WARNING_FLAGS: &[&str] = &[
    "-w",
    "-warnings-as-errors",
    "-no-warnings-as-errors",
    "-suppress-warnings",
];

/// Linker, assembler and preprocessor pass-through, not warnings.
const PASS_THROUGH_PREFIXES: &[&str] = &["-Wl,", "-Wa,", "-Wp,"];

/// Decides which settings and flags only affect compiler warnings.
#[derive(Debug, Clone, Default)]
pub struct WarningFilter {
    extra_keys: BTreeSet<String>,
}

impl WarningFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat `keys` as warning-only settings.
    pub fn with_extra_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            extra_keys: keys.into_iter().collect(),
        }
    }

    pub fn is_warning_key(&self, key: &str) -> bool {
        WARNING_KEY_PREFIXES.iter().any(|p| key.starts_with(p))
            || WARNING_KEYS.contains(&key)
            || self.extra_keys.contains(key)
    }

    pub fn is_warning_flag(flag: &str) -> bool {
        if WARNING_FLAGS.contains(&flag) {
            return true;
        }
        flag.starts_with("-W") && !PASS_THROUGH_PREFIXES.iter().any(|p| flag.starts_with(p))
    }

    /// Drop warning flags, together with the `-Xcc` that forwards one.
    pub fn filter_flags(&self, tokens: Vec<String>) -> Vec<String> {
        let mut kept: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            if Self::is_warning_flag(&token) {
                if kept.last().is_some_and(|t| t == "-Xcc") {
                    kept.pop();
                }
                continue;
            }
            kept.push(token);
        }
        kept
    }

    /// Sorted `KEY=VALUE` lines of `settings` without warning-only entries.
    pub fn flatten(&self, settings: &SettingsDictionary) -> Result<Vec<String>, HashingError> {
        let mut lines = Vec::with_capacity(settings.len());
        for (key, value) in settings {
            if key.is_empty() || key.contains('=') {
                return Err(HashingError::Unsupported(format!(
                    "build setting name '{key}'"
                )));
            }
            if self.is_warning_key(key) {
                continue;
            }
            let value = if FLAG_KEYS.contains(&key.as_str()) {
                self.filter_flags(value.tokens()).join(" ")
            } else {
                match value {
                    SettingValue::String(value) => value.clone(),
                    SettingValue::Array(values) => values.join(" "),
                }
            };
            if value.contains('\n') {
                return Err(HashingError::Unsupported(format!(
                    "multi-line value for build setting '{key}'"
                )));
            }
            lines.push(format!("{key}={value}"));
        }
        // BTreeMap iteration already sorts by key.
        Ok(lines)
    }
}

pub fn hash(
    context: &AspectContext<'_>,
    filter: &WarningFilter,
    identifier: &str,
    settings: &Settings,
) -> Result<MerkleNode, HashingError> {
    let mut configurations: Vec<_> = settings.configurations.iter().collect();
    configurations.sort_by(|a, b| a.name.cmp(&b.name));

    let mut configuration_nodes = Vec::with_capacity(configurations.len());
    for configuration in configurations {
        let mut children = vec![
            context.leaf_str("variant", configuration.variant.as_str()),
            context.leaf_strings("settings", &filter.flatten(&configuration.settings)?),
        ];
        if let Some(xcconfig) = &configuration.xcconfig {
            let composed = XcconfigHasher::new(context.content).hash(&context.resolve(xcconfig))?;
            children.push(context.leaf_str("xcconfig", &composed));
        }
        configuration_nodes.push(MerkleNode::branch(configuration.name.clone(), children));
    }

    let mut policy = vec![settings.default_settings.name().to_string()];
    if let Some(excluding) = settings.default_settings.excluding() {
        policy.extend(excluding.iter().cloned());
    }

    Ok(MerkleNode::branch(
        identifier,
        vec![
            context.leaf_strings("base", &filter.flatten(&settings.base)?),
            MerkleNode::branch("configurations", configuration_nodes),
            context.leaf_strings("default_settings", &policy),
        ],
    ))
}
