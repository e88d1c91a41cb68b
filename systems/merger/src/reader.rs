use std::time::Duration;

use gravewatch_core::{
    ConfigError, EnemyKind, Episode, FieldKind, FieldTable, FieldValue, RangeError, RuleField,
    SchemaError, SpawnDistribution, SpawnRange, WallBehavior,
};
use gravewatch_system_selection::WeightedSelector;

/// Typed, constraint-checked view over a merged field table.
pub(crate) struct FieldReader<'a> {
    episode: Episode,
    fields: &'a FieldTable,
    selector: &'a WeightedSelector,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        episode: Episode,
        fields: &'a FieldTable,
        selector: &'a WeightedSelector,
    ) -> Self {
        Self {
            episode,
            fields,
            selector,
        }
    }

    fn value(&self, field: RuleField) -> Result<&'a FieldValue, ConfigError> {
        self.fields.get(field).ok_or_else(|| {
            SchemaError::MissingField {
                episode: self.episode,
                field,
            }
            .into()
        })
    }

    fn integer(&self, field: RuleField) -> Result<i64, ConfigError> {
        match self.value(field)? {
            FieldValue::Integer(value) => Ok(*value),
            other => Err(mismatch(field, other)),
        }
    }

    /// Integer that must be at least `min`.
    pub(crate) fn count(
        &self,
        field: RuleField,
        min: i64,
        constraint: &'static str,
    ) -> Result<u32, ConfigError> {
        let value = self.integer(field)?;
        if value < min {
            return Err(out_of_range(field, value as f64, constraint));
        }
        u32::try_from(value).map_err(|_| out_of_range(field, value as f64, "must fit in 32 bits"))
    }

    /// Millisecond duration that must be at least `min_ms`.
    pub(crate) fn duration(
        &self,
        field: RuleField,
        min_ms: i64,
        constraint: &'static str,
    ) -> Result<Duration, ConfigError> {
        let millis = self.integer(field)?;
        if millis < min_ms {
            return Err(out_of_range(field, millis as f64, constraint));
        }
        Ok(Duration::from_millis(millis.unsigned_abs()))
    }

    /// Duration of an extension field that may be absent.
    pub(crate) fn optional_duration(
        &self,
        field: RuleField,
    ) -> Result<Option<Duration>, ConfigError> {
        if !self.fields.contains(field) {
            return Ok(None);
        }
        self.duration(field, 0, "must not be negative").map(Some)
    }

    /// Finite real number; integers are accepted.
    pub(crate) fn float(&self, field: RuleField) -> Result<f64, ConfigError> {
        let value = self.value(field)?;
        let number = match value {
            FieldValue::Integer(_) | FieldValue::Float(_) => value.as_number(),
            _ => None,
        }
        .ok_or_else(|| mismatch(field, value))?;
        if !number.is_finite() {
            return Err(out_of_range(field, number, "must be finite"));
        }
        Ok(number)
    }

    /// Closed millisecond range with a positive lower bound.
    ///
    /// A scalar is accepted and read as a degenerate range.
    pub(crate) fn range(&self, field: RuleField) -> Result<SpawnRange, ConfigError> {
        let range = match self.value(field)? {
            FieldValue::Range { min, max } => SpawnRange::new(*min, *max),
            FieldValue::Integer(value) => SpawnRange::fixed(*value as f64),
            FieldValue::Float(value) => SpawnRange::fixed(*value),
            other => return Err(mismatch(field, other)),
        };
        self.selector
            .validate_range(&range)
            .map_err(|source| ConfigError::Distribution { field, source })?;
        if range.min() <= 0.0 {
            return Err(out_of_range(field, range.min(), "range bounds must be positive"));
        }
        Ok(range)
    }

    pub(crate) fn wall_behavior(&self, field: RuleField) -> Result<WallBehavior, ConfigError> {
        match self.value(field)? {
            FieldValue::Text(name) => Ok(name.parse::<WallBehavior>()?),
            other => Err(mismatch(field, other)),
        }
    }

    /// Enemy weights, validated before they can reach a sampler.
    pub(crate) fn enemy_weights(
        &self,
        field: RuleField,
    ) -> Result<SpawnDistribution<EnemyKind>, ConfigError> {
        let entries = match self.value(field)? {
            FieldValue::Weights(entries) => entries,
            other => return Err(mismatch(field, other)),
        };
        let typed = entries
            .iter()
            .map(|(label, weight)| {
                EnemyKind::from_label(label)
                    .map(|kind| (kind, *weight))
                    .ok_or_else(|| SchemaError::UnknownLabel {
                        field,
                        label: label.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let distribution = SpawnDistribution::new(typed);
        self.selector
            .validate(&distribution)
            .map_err(|source| ConfigError::Distribution { field, source })?;
        Ok(distribution)
    }
}

pub(crate) fn out_of_range(field: RuleField, value: f64, constraint: &'static str) -> ConfigError {
    RangeError {
        field,
        value,
        constraint,
    }
    .into()
}

pub(crate) fn mismatch(field: RuleField, value: &FieldValue) -> ConfigError {
    mismatch_as(field, field.kind(), value)
}

pub(crate) fn mismatch_as(
    field: RuleField,
    expected: FieldKind,
    value: &FieldValue,
) -> ConfigError {
    SchemaError::KindMismatch {
        field,
        expected,
        found: value.shape(),
    }
    .into()
}
