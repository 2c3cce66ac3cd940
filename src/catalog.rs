use crate::errors::FillError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Flat locale file contents: key to value, in file order.
pub type Catalog = IndexMap<String, Value>;

pub fn load(path: &Path) -> Result<Catalog, FillError> {
    let s = fs::read_to_string(path).map_err(|source| FillError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let v: Value = serde_json::from_str(&s).map_err(|source| FillError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match v {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(FillError::NotAnObject(path.to_path_buf())),
    }
}

/// Two-space pretty JSON with a trailing newline. Non-ASCII is written as-is.
pub fn to_pretty_string(catalog: &Catalog) -> serde_json::Result<String> {
    let mut pretty = serde_json::to_string_pretty(catalog)?;
    pretty.push('\n');
    Ok(pretty)
}

pub fn save(path: &Path, catalog: &Catalog) -> Result<(), FillError> {
    let pretty = to_pretty_string(catalog).map_err(|source| FillError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = path.with_extension("tmp");
    let write_err = |source| FillError::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp_path, pretty).map_err(write_err)?;
    fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn load_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en-US.json");
        fs::write(&path, r#"{"zeta":"Z","alpha":"A","mid":"M"}"#).unwrap();

        let cat = load(&path).unwrap();
        let keys: Vec<&str> = cat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr-FR.json");
        fs::write(&path, r#"{"a": "Bonjour""#).unwrap();

        assert!(matches!(load(&path), Err(FillError::Parse { .. })));
    }

    #[test]
    fn load_rejects_top_level_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr-FR.json");
        fs::write(&path, r#"["a", "b"]"#).unwrap();

        assert!(matches!(load(&path), Err(FillError::NotAnObject(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FillError::Io { .. }));
    }

    #[test]
    fn save_writes_non_ascii_literally_with_indentation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ja-JP.json");
        let mut cat = Catalog::new();
        cat.insert("greeting".into(), json!("こんにちは"));
        cat.insert("farewell".into(), json!("Até logo"));

        save(&path, &cat).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"greeting\": \"こんにちは\",\n  \"farewell\": \"Até logo\"\n}\n"
        );
        assert!(!dir.path().join("ja-JP.tmp").exists());
    }

    #[test]
    fn pretty_string_ends_with_newline_and_reparses() {
        let mut cat = Catalog::new();
        cat.insert("count".into(), json!(3));
        cat.insert("label".into(), json!("Items"));

        let pretty = to_pretty_string(&cat).unwrap();
        assert!(pretty.ends_with("}\n"));
        let back: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, json!({"count": 3, "label": "Items"}));
    }

    #[test]
    fn save_into_missing_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("fr-FR.json");
        let mut cat = Catalog::new();
        cat.insert("a".into(), json!("Bonjour"));

        let err = save(&path, &cat).unwrap_err();
        assert!(matches!(err, FillError::Write { .. }));
        assert!(!path.exists());
    }
}
