//! fillang: complete locale JSON files against a reference locale.
//!
//! Every `*.json` file next to the reference (default `en-US.json`) gains the
//! keys it is missing. New values are machine translations into the language
//! named by the file's leading hyphen segment, or the reference text itself
//! when the translation service fails.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod diff;
pub mod errors;
pub mod fill;
pub mod google;
pub mod openai_client;
pub mod placeholders;
pub mod translator;
