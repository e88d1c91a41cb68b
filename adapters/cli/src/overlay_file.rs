use std::{fs, path::Path};

use anyhow::Context;
use gravewatch_core::{Difficulty, DifficultyOverlay, FieldValue, SchemaError};
use serde::Deserialize;
use thiserror::Error;

/// Host-provided overlay as written in a TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverlayDocument {
    difficulty: Option<String>,
    #[serde(default)]
    extension: bool,
    #[serde(default)]
    fields: toml::Table,
}

/// Reasons an overlay file cannot be turned into a [`DifficultyOverlay`].
#[derive(Debug, Error)]
pub(crate) enum OverlayFileError {
    #[error("overlay is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Difficulty(#[from] SchemaError),
    #[error("`{key}` holds {found}, which no ruleset field accepts")]
    UnsupportedValue { key: String, found: &'static str },
    #[error("`{key}` weight entries must be [label, weight] pairs")]
    MalformedWeights { key: String },
}

/// Reads an overlay file, using `fallback` when it names no difficulty.
pub(crate) fn load(path: &Path, fallback: Difficulty) -> anyhow::Result<DifficultyOverlay> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read overlay file {}", path.display()))?;
    parse(&text, fallback).with_context(|| format!("invalid overlay file {}", path.display()))
}

/// Parses overlay text.
///
/// Scalars map onto integer, float and text values; `{ min, max }` tables map
/// onto ranges; arrays of `[label, weight]` pairs map onto weight tables in
/// the order written.
pub(crate) fn parse(
    text: &str,
    fallback: Difficulty,
) -> Result<DifficultyOverlay, OverlayFileError> {
    let document: OverlayDocument = toml::from_str(text)?;
    let difficulty = match document.difficulty {
        Some(name) => name.parse::<Difficulty>()?,
        None => fallback,
    };
    let mut overlay = if document.extension {
        DifficultyOverlay::extension(difficulty)
    } else {
        DifficultyOverlay::new(difficulty)
    };
    for (key, value) in document.fields {
        let value = field_value(&key, value)?;
        overlay.push(key, value);
    }
    Ok(overlay)
}

fn field_value(key: &str, value: toml::Value) -> Result<FieldValue, OverlayFileError> {
    match value {
        toml::Value::Integer(value) => Ok(FieldValue::Integer(value)),
        toml::Value::Float(value) => Ok(FieldValue::Float(value)),
        toml::Value::String(value) => Ok(FieldValue::Text(value)),
        toml::Value::Table(table) => {
            let bound = |name: &str| table.get(name).and_then(number);
            match (bound("min"), bound("max"), table.len()) {
                (Some(min), Some(max), 2) => Ok(FieldValue::range(min, max)),
                _ => Err(unsupported(key, "a table other than { min, max }")),
            }
        }
        toml::Value::Array(entries) => entries
            .iter()
            .map(|entry| weight_entry(key, entry))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::Weights),
        toml::Value::Boolean(_) => Err(unsupported(key, "a boolean")),
        toml::Value::Datetime(_) => Err(unsupported(key, "a datetime")),
    }
}

fn weight_entry(key: &str, entry: &toml::Value) -> Result<(String, f64), OverlayFileError> {
    let malformed = || OverlayFileError::MalformedWeights {
        key: key.to_owned(),
    };
    let pair = entry.as_array().ok_or_else(malformed)?;
    match pair.as_slice() {
        [toml::Value::String(label), weight] => {
            let weight = number(weight).ok_or_else(malformed)?;
            Ok((label.clone(), weight))
        }
        _ => Err(malformed()),
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(value) => Some(*value as f64),
        toml::Value::Float(value) => Some(*value),
        _ => None,
    }
}

fn unsupported(key: &str, found: &'static str) -> OverlayFileError {
    OverlayFileError::UnsupportedValue {
        key: key.to_owned(),
        found,
    }
}
