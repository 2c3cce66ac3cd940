//! Completing locale files against the reference catalog.
//!
//! Files are processed one at a time and keys one at a time; every missing
//! key costs exactly one awaited call to the [`Translator`]. A failed call
//! leaves the reference text in place and the run moves on. Failing to read
//! or parse a file ends the run.

use crate::catalog::{self, Catalog};
use crate::diff::{diff_keys, language_code};
use crate::errors::FillError;
use crate::translator::{Translation, Translator};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A locale file to complete and the language its missing keys go into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub path: PathBuf,
    pub language: String,
}

impl TargetFile {
    pub fn new(path: impl Into<PathBuf>, overrides: &BTreeMap<String, String>) -> Self {
        let path = path.into();
        let language = language_code(&path, overrides);
        Self { path, language }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub added: usize,
    pub fallbacks: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_updated: usize,
    pub keys_added: usize,
    pub fallbacks: usize,
}

/// Files in `dir` with `extension`, except `reference_name`, sorted by name.
pub fn discover_targets(
    dir: &Path,
    reference_name: &str,
    extension: &str,
    overrides: &BTreeMap<String, String>,
) -> Result<Vec<TargetFile>, FillError> {
    let io_err = |source| FillError::Io { path: dir.to_path_buf(), source };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(reference_name) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths.into_iter().map(|p| TargetFile::new(p, overrides)).collect())
}

/// Append every reference key missing from `target`. Existing keys are left alone.
pub async fn fill_catalog<T: Translator>(
    reference: &Catalog,
    target: &mut Catalog,
    language: &str,
    translator: &T,
) -> FillReport {
    let mut report = FillReport::default();
    for key in diff_keys(reference, target) {
        let Some(value) = reference.get(&key) else { continue };
        let filled = match value {
            Value::String(text) => {
                let translation = Translation::resolve(translator, text, language).await;
                if let Translation::Fallback { reason, .. } = &translation {
                    warn!(
                        key = %key,
                        language = %language,
                        %reason,
                        "Translation failed, using reference text"
                    );
                    report.fallbacks += 1;
                }
                Value::String(translation.into_text())
            }
            other => other.clone(),
        };
        target.insert(key, filled);
        report.added += 1;
    }
    report
}

/// Load the reference, then complete each target in turn, writing one
/// `<path>: added <n> keys` line to `out` per file that changed.
pub async fn run<T, W>(
    reference_path: &Path,
    targets: impl IntoIterator<Item = TargetFile>,
    translator: &T,
    options: RunOptions,
    out: &mut W,
) -> Result<RunSummary, FillError>
where
    T: Translator,
    W: Write,
{
    let reference = catalog::load(reference_path)?;
    info!(file = ?reference_path, keys = reference.len(), "Loaded reference catalog");

    let mut summary = RunSummary::default();
    for target_file in targets {
        let mut target = catalog::load(&target_file.path)?;

        if options.dry_run {
            let missing = diff_keys(&reference, &target).len();
            if missing > 0 {
                writeln!(out, "{}: would add {} keys", target_file.path.display(), missing)
                    .map_err(|source| report_err(&target_file.path, source))?;
            }
            continue;
        }

        let report =
            fill_catalog(&reference, &mut target, &target_file.language, translator).await;
        if report.added == 0 {
            debug!(file = ?target_file.path, "Already complete");
            continue;
        }

        catalog::save(&target_file.path, &target)?;
        info!(
            file = ?target_file.path,
            language = %target_file.language,
            added = report.added,
            fallbacks = report.fallbacks,
            "Wrote translations"
        );
        writeln!(out, "{}: added {} keys", target_file.path.display(), report.added)
            .map_err(|source| report_err(&target_file.path, source))?;

        summary.files_updated += 1;
        summary.keys_added += report.added;
        summary.fallbacks += report.fallbacks;
    }
    Ok(summary)
}

fn report_err(path: &Path, source: std::io::Error) -> FillError {
    FillError::Report { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TranslationError;
    use serde_json::json;
    use std::cell::RefCell;

    struct Suffix;
    impl Translator for Suffix {
        async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
            Ok(format!("{text}-{language}"))
        }
    }

    /// Fails for one specific text, records every call.
    struct Flaky {
        bad: &'static str,
        calls: RefCell<Vec<String>>,
    }
    impl Translator for Flaky {
        async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
            self.calls.borrow_mut().push(text.to_string());
            if text == self.bad {
                Err(TranslationError::Empty)
            } else {
                Ok(format!("{text}-{language}"))
            }
        }
    }

    fn cat(v: serde_json::Value) -> Catalog {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn appends_missing_keys_after_existing_ones() {
        let reference = cat(json!({"a": "Hello", "b": "World", "c": "Bye"}));
        let mut target = cat(json!({"c": "Au revoir"}));

        let report = fill_catalog(&reference, &mut target, "fr", &Suffix).await;

        assert_eq!(report, FillReport { added: 2, fallbacks: 0 });
        let keys: Vec<&str> = target.keys().map(String::as_str).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(target["c"], json!("Au revoir"));
        assert_eq!(target["a"], json!("Hello-fr"));
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let reference = cat(json!({"a": "Hello", "b": "World", "c": "Bye"}));
        let mut target = Catalog::new();
        let flaky = Flaky { bad: "World", calls: RefCell::new(Vec::new()) };

        let report = fill_catalog(&reference, &mut target, "de", &flaky).await;

        assert_eq!(report, FillReport { added: 3, fallbacks: 1 });
        assert_eq!(*flaky.calls.borrow(), ["Hello", "World", "Bye"]);
        assert_eq!(target["b"], json!("World"));
        assert_eq!(target["c"], json!("Bye-de"));
    }

    #[tokio::test]
    async fn non_string_values_are_copied_without_a_call() {
        let reference = cat(json!({"count": 3, "nested": {"x": "y"}}));
        let mut target = Catalog::new();
        let flaky = Flaky { bad: "", calls: RefCell::new(Vec::new()) };

        let report = fill_catalog(&reference, &mut target, "it", &flaky).await;

        assert_eq!(report.added, 2);
        assert!(flaky.calls.borrow().is_empty());
        assert_eq!(target["nested"], json!({"x": "y"}));
    }

    /// Answers with the placeholder itself translated.
    struct RenamesPlaceholders;
    impl Translator for RenamesPlaceholders {
        async fn translate(&self, text: &str, _: &str) -> Result<String, TranslationError> {
            let reply = text.replace("{{name}}", "{{nom}}");
            crate::placeholders::verify(text, &reply)
        }
    }

    #[tokio::test]
    async fn lost_placeholder_falls_back_to_reference_text() {
        let reference = cat(json!({"greet": "Hello {{name}}", "plain": "Hello"}));
        let mut target = Catalog::new();

        let report = fill_catalog(&reference, &mut target, "fr", &RenamesPlaceholders).await;

        assert_eq!(report, FillReport { added: 2, fallbacks: 1 });
        assert_eq!(target["greet"], json!("Hello {{name}}"));
        assert_eq!(target["plain"], json!("Hello"));
    }

    #[test]
    fn target_file_derives_language() {
        let t = TargetFile::new("locales/ko-KR.json", &BTreeMap::new());
        assert_eq!(t.language, "ko");
    }
}
