//! Core data model: the column descriptor ([`Schema`]), the cleaned [`Record`], and the
//! [`Diagnostic`] produced for every dropped row.

use std::fmt;

use csv::StringRecord;
use serde::Serialize;

use crate::error::{CleaningError, CleaningResult};

/// Number of numeric measurement columns in a [`Record`].
pub const MEASUREMENT_COUNT: usize = 4;

/// Logical data type expected for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// 64-bit floating point number (decimal or scientific notation).
    Float64,
    /// Non-empty UTF-8 text.
    Utf8,
}

/// Where a parsed column value lands in a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    /// Positional numeric slot, `0..MEASUREMENT_COUNT`.
    Measurement(usize),
    /// The categorical label.
    Label,
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name (used when writing an optional header row).
    pub name: String,
    /// Expected type of the raw text.
    pub data_type: DataType,
    /// Target slot in the record.
    pub slot: Slot,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType, slot: Slot) -> Self {
        Self {
            name: name.into(),
            data_type,
            slot,
        }
    }

    /// A `Float64` column feeding measurement slot `index`.
    pub fn measurement(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, DataType::Float64, Slot::Measurement(index))
    }

    /// The `Utf8` label column.
    pub fn label(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Utf8, Slot::Label)
    }
}

/// Ordered column descriptor applied positionally to every input row.
///
/// Column `i` of the input is handled by `fields[i]`. A schema always maps each measurement
/// slot exactly once and has exactly one label column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema, checking that the fields describe a complete [`Record`].
    pub fn new(fields: Vec<Field>) -> CleaningResult<Self> {
        let mut seen = [false; MEASUREMENT_COUNT];
        let mut labels = 0usize;

        for field in &fields {
            match (field.slot, field.data_type) {
                (Slot::Measurement(idx), DataType::Float64) => {
                    let Some(taken) = seen.get_mut(idx) else {
                        return Err(mismatch(format!(
                            "column '{}' targets measurement slot {idx}, only {MEASUREMENT_COUNT} exist",
                            field.name
                        )));
                    };
                    if *taken {
                        return Err(mismatch(format!(
                            "measurement slot {idx} is mapped more than once (column '{}')",
                            field.name
                        )));
                    }
                    *taken = true;
                }
                (Slot::Label, DataType::Utf8) => labels += 1,
                (slot, data_type) => {
                    return Err(mismatch(format!(
                        "column '{}' has type {data_type:?} which cannot fill {slot:?}",
                        field.name
                    )));
                }
            }
        }

        if let Some(idx) = seen.iter().position(|s| !s) {
            return Err(mismatch(format!("measurement slot {idx} is not mapped")));
        }
        if labels != 1 {
            return Err(mismatch(format!("expected exactly one label column, found {labels}")));
        }

        Ok(Self { fields })
    }

    /// The iris layout: four measurements followed by the species label.
    pub fn iris() -> Self {
        Self {
            fields: vec![
                Field::measurement("sepal_length", 0),
                Field::measurement("sepal_width", 1),
                Field::measurement("petal_length", 2),
                Field::measurement("petal_width", 3),
                Field::label("species"),
            ],
        }
    }

    /// Ordered fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of columns every row must have.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a validated schema; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Parse one input row into a [`Record`].
    ///
    /// Fields are processed in positional order and processing stops at the first failure,
    /// so the returned diagnostic always names the first offending column. `line` is the
    /// 1-based row number used in the diagnostic.
    pub fn apply(&self, line: usize, row: &StringRecord) -> Result<Record, Diagnostic> {
        if row.len() != self.fields.len() {
            return Err(Diagnostic {
                line,
                column: row.len().min(self.fields.len()),
                cause: RowFailure::WrongFieldCount {
                    expected: self.fields.len(),
                    found: row.len(),
                },
            });
        }

        let mut measurements = [0.0; MEASUREMENT_COUNT];
        let mut label = String::new();

        for (column, (field, raw)) in self.fields.iter().zip(row.iter()).enumerate() {
            match field.slot {
                Slot::Label => {
                    if raw.is_empty() {
                        return Err(Diagnostic {
                            line,
                            column,
                            cause: RowFailure::EmptyLabel,
                        });
                    }
                    label = raw.to_owned();
                }
                Slot::Measurement(idx) => {
                    measurements[idx] = parse_measurement(raw).ok_or_else(|| Diagnostic {
                        line,
                        column,
                        cause: RowFailure::NonNumeric { raw: raw.to_owned() },
                    })?;
                }
            }
        }

        Ok(Record { measurements, label })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::iris()
    }
}

fn mismatch(message: String) -> CleaningError {
    CleaningError::SchemaMismatch { message }
}

/// Parse a measurement. Values that overflow `f64` (e.g. `1e400`) are rejected; only an explicit
/// `inf`/`infinity` literal may produce an infinite value.
fn parse_measurement(raw: &str) -> Option<f64> {
    let value = raw.parse::<f64>().ok()?;
    if value.is_infinite() {
        let unsigned = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if unsigned != "inf" && unsigned != "infinity" {
            return None;
        }
    }
    Some(value)
}

/// One successfully validated row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Numeric measurements in slot order.
    pub measurements: [f64; MEASUREMENT_COUNT],
    /// Categorical label, never empty.
    pub label: String,
}

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFailure {
    /// The label column was empty.
    EmptyLabel,
    /// A numeric column did not parse as a float.
    NonNumeric { raw: String },
    /// The row had a different number of columns than the schema.
    WrongFieldCount { expected: usize, found: usize },
    /// The row contained bytes that are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => f.write_str("empty label"),
            Self::NonNumeric { raw } => write!(f, "non-numeric value '{raw}'"),
            Self::WrongFieldCount { expected, found } => {
                write!(f, "wrong field count: expected {expected}, found {found}")
            }
            Self::InvalidUtf8 => f.write_str("invalid utf-8"),
        }
    }
}

/// A dropped row: where it failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based row number.
    pub line: usize,
    /// 0-based index of the first column that failed.
    pub column: usize,
    /// Failure cause.
    pub cause: RowFailure,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: unexpected value in column {}", self.line, self.column)
    }
}
