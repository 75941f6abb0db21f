use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::since_year;

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// A single yearly measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    /// Sea level relative to the dataset's baseline, in the file's units.
    pub level: f64,
}

impl Observation {
    pub fn new(year: i32, level: f64) -> Self {
        Self { year, level }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:.4})", self.year, self.level)
    }
}

// ---------------------------------------------------------------------------
// ColumnSpec – which columns hold the year and the level
// ---------------------------------------------------------------------------

pub const DEFAULT_YEAR_COLUMN: &str = "Year";
pub const DEFAULT_LEVEL_COLUMN: &str = "CSIRO Adjusted Sea Level";

/// Names of the source columns read by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub year: String,
    pub level: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR_COLUMN.to_string(),
            level: DEFAULT_LEVEL_COLUMN.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationSet – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded series, in file order. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
    columns: ColumnSpec,
}

impl ObservationSet {
    pub fn new(observations: Vec<Observation>, columns: ColumnSpec) -> Self {
        Self {
            observations,
            columns,
        }
    }

    /// Build a set from `(year, level)` pairs using the default column names.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let observations = pairs
            .into_iter()
            .map(|(year, level)| Observation { year, level })
            .collect();
        Self::new(observations, ColumnSpec::default())
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.observations.iter().map(|o| o.year)
    }

    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.level)
    }

    /// Smallest and largest observed year, `None` for an empty set.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.years().min()?;
        let max = self.years().max()?;
        Some((min, max))
    }

    /// Rows with `year >= min_year`, in original order. The set itself is untouched.
    pub fn since(&self, min_year: Option<i32>) -> Vec<Observation> {
        since_year(&self.observations, min_year)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
