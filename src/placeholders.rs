use crate::errors::TranslationError;
use regex::Regex;
use std::sync::LazyLock;

// Patterns: {{mustache}}, {word}, {0}, :named, %s, %d
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\{\{[^}]+\}\}",
        r"\{[^}]+\}",
        r":[A-Za-z_][A-Za-z0-9_]*",
        r"%[sd]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static MUSTACHE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").ok());

/// Every distinct placeholder in `s`, grouped by pattern.
pub fn extract(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = s.to_string();
    for re in PATTERNS.iter() {
        for m in re.find_iter(&rest) {
            let p = m.as_str().to_string();
            if !out.contains(&p) {
                out.push(p);
            }
        }
        // so `{{name}}` is not found again as `{{name}`
        rest = re.replace_all(&rest, " ").into_owned();
    }
    out
}

/// Placeholders of `reference` that do not appear verbatim in `translated`.
pub fn missing(reference: &str, translated: &str) -> Vec<String> {
    extract(reference)
        .into_iter()
        .filter(|p| !translated.contains(p.as_str()))
        .collect()
}

/// Accept a service reply for `reference`: put back the reference's leading
/// and trailing whitespace, then reject it if any placeholder went missing.
pub fn verify(reference: &str, translated: &str) -> Result<String, TranslationError> {
    if reference.trim().is_empty() {
        return Ok(reference.to_string());
    }
    let core = translated.trim();
    let lead = &reference[..reference.len() - reference.trim_start().len()];
    let trail = &reference[reference.trim_end().len()..];
    let restored = format!("{lead}{core}{trail}");

    let lost = missing(reference, &restored);
    if !lost.is_empty() {
        return Err(TranslationError::PlaceholderLost(lost));
    }
    Ok(restored)
}

/// Text with `{{...}}` tokens swapped for opaque markers the service leaves alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Masked {
    pub text: String,
    tokens: Vec<(String, String)>,
}

pub fn mask(s: &str) -> Masked {
    let Some(re) = MUSTACHE.as_ref() else {
        return Masked { text: s.to_string(), tokens: Vec::new() };
    };
    let mut tokens = Vec::new();
    let text = re
        .replace_all(s, |caps: &regex::Captures| {
            let marker = format!("__VAR{}__", tokens.len());
            tokens.push((marker.clone(), caps[0].to_string()));
            marker
        })
        .into_owned();
    Masked { text, tokens }
}

impl Masked {
    pub fn unmask(&self, translated: &str) -> String {
        self.tokens
            .iter()
            .fold(translated.to_string(), |acc, (marker, original)| acc.replace(marker, original))
    }
}
