//! CLI presentation: table and json formatters for hash results.

use crate::hashers::graph::GraphContentHashes;
use crate::hashers::TargetContentHashSubhashes;
use comfy_table::Table;
use serde_json::{json, Map, Value};

/// Aspect name and hex digest for every aspect that contributed.
fn subhash_rows(subhashes: &TargetContentHashSubhashes) -> Vec<(String, String)> {
    match serde_json::to_value(subhashes) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(aspect, digest)| digest.as_str().map(|d| (aspect, d.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn format_hashes_table(hashes: &GraphContentHashes, subhashes: bool) -> String {
    if hashes.is_empty() {
        return "No targets matched.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    if subhashes {
        table.set_header(vec!["Target", "Aspect", "Hash"]);
    } else {
        table.set_header(vec!["Target", "Hash"]);
    }
    for (identity, content_hash) in hashes {
        let identity = identity.to_string();
        let hash = content_hash.hash.to_hex();
        if subhashes {
            table.add_row(vec![identity.as_str(), "", hash.as_str()]);
            for (aspect, digest) in subhash_rows(&content_hash.subhashes) {
                table.add_row(vec!["", aspect.as_str(), digest.as_str()]);
            }
        } else {
            table.add_row(vec![identity, hash]);
        }
    }
    table.to_string()
}

pub fn format_hashes_json(
    hashes: &GraphContentHashes,
    subhashes: bool,
) -> Result<String, serde_json::Error> {
    let mut targets = Map::new();
    for (identity, content_hash) in hashes {
        let value = if subhashes {
            serde_json::to_value(content_hash)?
        } else {
            json!({ "hash": content_hash.hash })
        };
        targets.insert(identity.to_string(), value);
    }
    serde_json::to_string_pretty(&Value::Object(targets))
}
