use thiserror::Error;

use crate::{AssetKey, Difficulty, Episode, FieldKind, RuleField};

/// Structural mismatch between an overlay or base and the canonical schema.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SchemaError {
    /// The key does not name any canonical field.
    #[error("`{key}` is not a ruleset field")]
    UnknownField {
        /// Key exactly as it appeared in the overlay.
        key: String,
    },
    /// The overlay declares the same key more than once.
    #[error("`{key}` is declared more than once in the {difficulty} overlay")]
    DuplicateField {
        /// Repeated key.
        key: String,
        /// Difficulty of the offending overlay.
        difficulty: Difficulty,
    },
    /// The overlay sets a range both whole and through a `_MIN`/`_MAX` key.
    #[error("`{field}` is set both whole and by bound in the {difficulty} overlay")]
    ConflictingKeys {
        /// Range field addressed twice.
        field: RuleField,
        /// Difficulty of the offending overlay.
        difficulty: Difficulty,
    },
    /// A required field is absent from the base configuration.
    #[error("{episode} base configuration is missing required field `{field}`")]
    MissingField {
        /// Episode whose base is incomplete.
        episode: Episode,
        /// Field that must be present.
        field: RuleField,
    },
    /// A non-extension overlay introduced a field the base does not declare.
    #[error("`{field}` is absent from the base and the {difficulty} overlay cannot extend it")]
    UndeclaredExtension {
        /// Field the overlay tried to introduce.
        field: RuleField,
        /// Difficulty of the offending overlay.
        difficulty: Difficulty,
    },
    /// The value does not have the shape the field requires.
    #[error("`{field}` expects {expected} but received {found}")]
    KindMismatch {
        /// Field whose value was malformed.
        field: RuleField,
        /// Shape the field accepts.
        expected: FieldKind,
        /// Shape of the value that was supplied.
        found: &'static str,
    },
    /// A weight table named a label that is not a known variant.
    #[error("`{label}` in `{field}` does not name a known variant")]
    UnknownLabel {
        /// Weight table field.
        field: RuleField,
        /// Unrecognised label.
        label: String,
    },
    /// A `_MIN` or `_MAX` key was applied to a field that is not a range.
    #[error("`{key}` addresses a bound of `{field}`, which is not a range")]
    SplitBoundOnScalar {
        /// Key exactly as it appeared in the overlay.
        key: String,
        /// Scalar field the stem resolved to.
        field: RuleField,
    },
    /// A difficulty name was not recognised.
    #[error("difficulty `{name}` is not recognised")]
    UnknownDifficulty {
        /// Name that failed to parse.
        name: String,
    },
    /// An episode name was not recognised.
    #[error("episode `{name}` is not recognised")]
    UnknownEpisode {
        /// Name that failed to parse.
        name: String,
    },
}

/// A resolved value violates the domain constraint of its field.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("`{field}` = {value} violates constraint: {constraint}")]
pub struct RangeError {
    /// Field whose resolved value is out of range.
    pub field: RuleField,
    /// Offending value.
    pub value: f64,
    /// Constraint that was violated.
    pub constraint: &'static str,
}

/// Malformed spawn distribution or range.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// Weights do not sum to one within epsilon.
    #[error("weights sum to {sum}, expected 1.0 within {epsilon}")]
    WeightSum {
        /// Observed total.
        sum: f64,
        /// Accepted tolerance.
        epsilon: f64,
    },
    /// A weight is below zero.
    #[error("weight for `{label}` is negative ({weight})")]
    NegativeWeight {
        /// Label carrying the negative weight.
        label: String,
        /// Offending weight.
        weight: f64,
    },
    /// A label appears more than once.
    #[error("`{label}` is weighted more than once")]
    DuplicateLabel {
        /// Repeated label.
        label: String,
    },
    /// A weight or bound is NaN or infinite.
    #[error("`{label}` is not a finite number")]
    NonFinite {
        /// Label or bound name carrying the value.
        label: String,
    },
    /// The distribution declares no entries.
    #[error("distribution declares no labels")]
    Empty,
    /// A range's lower bound exceeds its upper bound.
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Boundary behavior name outside the closed set of policies.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown wall behavior `{name}`; expected teleport, push_down or game_over")]
pub struct UnknownWallBehaviorError {
    /// Name that failed to parse.
    pub name: String,
}

/// Name outside one of the closed identifier sets (boundaries, key layouts,
/// asset keys).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownNameError {
    /// What the name was meant to identify.
    pub kind: &'static str,
    /// Name that failed to parse.
    pub name: String,
}

impl UnknownNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
        }
    }
}

/// Asset binding that cannot be played back.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AssetError {
    /// A frame sequence has no frames.
    #[error("asset `{key}` has an empty frame sequence")]
    EmptySequence {
        /// Offending asset.
        key: AssetKey,
    },
    /// The visual scale is not a positive finite number.
    #[error("asset `{key}` has invalid scale {scale}")]
    InvalidScale {
        /// Offending asset.
        key: AssetKey,
        /// Declared scale.
        scale: f32,
    },
}

/// Every way resolving a ruleset can fail.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Structural schema mismatch.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Domain constraint violation.
    #[error(transparent)]
    Range(#[from] RangeError),
    /// Malformed spawn distribution or range.
    #[error("`{field}` is malformed: {source}")]
    Distribution {
        /// Field holding the distribution.
        field: RuleField,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },
    /// Unrecognised wall behavior.
    #[error(transparent)]
    UnknownWallBehavior(#[from] UnknownWallBehaviorError),
    /// Asset table entry that cannot be played back.
    #[error(transparent)]
    Asset(#[from] AssetError),
}
