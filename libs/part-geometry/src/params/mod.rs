//! # Parameters
//!
//! Part families, numeric parameters and the maps that carry them from the
//! external parameter store into the factory.
//!
//! Values are never rejected for being out of range; they are clamped to
//! their declared bounds when read.

pub mod schema;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// PART TYPE
// =============================================================================

/// The five supported part families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Gear,
    Pipe,
    Spring,
    Bolt,
    Nut,
}

impl PartType {
    /// All part types in display order.
    pub const ALL: [PartType; 5] = [
        PartType::Gear,
        PartType::Pipe,
        PartType::Spring,
        PartType::Bolt,
        PartType::Nut,
    ];

    /// Lowercase identifier, as used by the parameter store.
    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Gear => "gear",
            PartType::Pipe => "pipe",
            PartType::Spring => "spring",
            PartType::Bolt => "bolt",
            PartType::Nut => "nut",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a part type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown part type: '{0}'")]
pub struct UnknownPartType(pub String);

impl FromStr for PartType {
    type Err = UnknownPartType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartType::ALL
            .into_iter()
            .find(|part| part.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPartType(s.to_string()))
    }
}

// =============================================================================
// PARAMETER
// =============================================================================

/// A single tunable number with declared bounds.
///
/// `value` holds whatever the user last requested; [`Parameter::clamped`]
/// returns the value that generation actually uses.
///
/// # Example
///
/// ```rust
/// use part_geometry::Parameter;
///
/// let p = Parameter::new("teeth", 50.0, 8.0, 36.0, 1.0);
/// assert_eq!(p.clamped(), 36.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub step: f64,
}

impl Parameter {
    /// Creates a parameter, swapping the bounds if given in the wrong order.
    pub fn new(id: impl Into<String>, value: f64, min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            id: id.into(),
            value,
            min,
            max,
            step,
        }
    }

    /// Returns the bounds as `(low, high)`, normalized even if the fields
    /// were deserialized in the wrong order.
    pub fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Clamps an arbitrary value to this parameter's bounds.
    ///
    /// NaN clamps to the lower bound.
    pub fn clamp(&self, value: f64) -> f64 {
        let (low, high) = self.bounds();
        if value.is_nan() {
            low
        } else {
            value.clamp(low, high)
        }
    }

    /// Returns the current value clamped to the bounds.
    pub fn clamped(&self) -> f64 {
        self.clamp(self.value)
    }

    /// Returns true if the stored value lies outside the bounds.
    pub fn is_out_of_range(&self) -> bool {
        self.clamped() != self.value
    }

    /// Returns a copy with a new requested value.
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

// =============================================================================
// PARAMETER MAP
// =============================================================================

/// Ordered `id -> Parameter` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, Parameter>,
}

impl ParameterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a schema and raw values.
    ///
    /// Every schema entry is kept; values for ids the schema does not know
    /// are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use part_geometry::{params::schema, ParameterMap, PartType};
    ///
    /// let schema = schema::default_parameters(PartType::Gear);
    /// let map = ParameterMap::from_values(&schema, [("teeth", 12.0), ("bogus", 1.0)]);
    /// assert_eq!(map.value("teeth"), Some(12.0));
    /// assert!(map.get("bogus").is_none());
    /// ```
    pub fn from_values<'a>(
        schema: &ParameterMap,
        values: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let mut map = schema.clone();
        for (id, value) in values {
            map.set_value(id, value);
        }
        map
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, parameter: Parameter) -> Option<Parameter> {
        self.entries.insert(parameter.id.clone(), parameter)
    }

    /// Sets the requested value of an existing parameter.
    ///
    /// Returns false if the id is unknown.
    pub fn set_value(&mut self, id: &str, value: f64) -> bool {
        match self.entries.get_mut(id) {
            Some(parameter) => {
                parameter.value = value;
                true
            }
            None => false,
        }
    }

    /// Returns the parameter with the given id.
    pub fn get(&self, id: &str) -> Option<&Parameter> {
        self.entries.get(id)
    }

    /// Returns the requested (unclamped) value for an id.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.entries.get(id).map(|p| p.value)
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates parameters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.values()
    }

    /// Returns a copy with every value replaced by its clamped value.
    pub fn clamped(&self) -> Self {
        self.iter().map(|p| p.with_value(p.clamped())).collect()
    }
}

impl FromIterator<Parameter> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for parameter in iter {
            map.insert(parameter);
        }
        map
    }
}

// =============================================================================
// PART SPEC
// =============================================================================

/// A part family together with its current parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSpec {
    pub part_type: PartType,
    pub parameters: ParameterMap,
}

impl PartSpec {
    /// Creates a spec from explicit parameters.
    pub fn new(part_type: PartType, parameters: ParameterMap) -> Self {
        Self {
            part_type,
            parameters,
        }
    }

    /// Creates a spec populated from the reference default schema.
    pub fn with_defaults(part_type: PartType) -> Self {
        Self::new(part_type, schema::default_parameters(part_type))
    }
}
