use crate::catalog::Catalog;
use std::collections::BTreeMap;
use std::path::Path;

/// Keys of `reference` that `target` lacks, in reference order.
/// A key present in the target with an empty value is not missing.
pub fn diff_keys(reference: &Catalog, target: &Catalog) -> Vec<String> {
    reference
        .keys()
        .filter(|k| !target.contains_key(k.as_str()))
        .cloned()
        .collect()
}

// fr-FR.json -> fr, de.json -> de; an override keyed by the stem wins
pub fn language_code(path: &Path, overrides: &BTreeMap<String, String>) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    if let Some(code) = overrides.get(stem) {
        return code.clone();
    }
    stem.split('-').next().unwrap_or_default().to_string()
}
