use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("Reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parsing JSON {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected a JSON object at the top level of {0:?}")]
    NotAnObject(PathBuf),
    #[error("Writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serializing {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Writing summary for {path:?} to output: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single translation call produced nothing usable.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("empty translation")]
    Empty,
    #[error("placeholders lost in translation: {}", .0.join(", "))]
    PlaceholderLost(Vec<String>),
}
