use crate::constants::{DEFAULT_LANDSCAPE, MIN_SIDE};
use crate::error::{BeartoothError, Result};

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Square grid of altitudes, `f(x, y)` stored as `rows[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landscape {
    rows: Vec<Vec<u32>>,
}

impl Landscape {
    /// Creates a landscape, rejecting non-square grids and sides below 2.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self> {
        let n = rows.len();
        if n < MIN_SIDE {
            return Err(BeartoothError::Configuration(format!(
                "landscape side must be at least {}, got {}",
                MIN_SIDE, n
            )));
        }
        if let Some((x, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(BeartoothError::Configuration(format!(
                "landscape is not square: row {} has {} columns, expected {}",
                x,
                row.len(),
                n
            )));
        }
        Ok(Self { rows })
    }

    /// The 10x10 landscape shipped with the demo
    pub fn builtin() -> Self {
        Self {
            rows: DEFAULT_LANDSCAPE.iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Side length `n`
    pub fn side(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn altitude(&self, x: usize, y: usize) -> i64 {
        i64::from(self.rows[x][y])
    }

    /// Constant energy term `f(0, 0)` that the QUBO leaves out.
    pub fn offset(&self) -> i64 {
        self.altitude(0, 0)
    }

    /// `f(x+1, 0) - f(x, 0)`
    pub fn x_shift(&self, x: usize) -> i64 {
        self.altitude(x + 1, 0) - self.altitude(x, 0)
    }

    /// `f(0, y+1) - f(0, y)`
    pub fn y_shift(&self, y: usize) -> i64 {
        self.altitude(0, y + 1) - self.altitude(0, y)
    }

    /// Mixed second difference of the cell whose lower corner is `(x, y)`.
    pub fn angle_shift(&self, x: usize, y: usize) -> i64 {
        self.altitude(x + 1, y + 1) - self.altitude(x, y + 1) - self.altitude(x + 1, y)
            + self.altitude(x, y)
    }

    /// Reads a landscape file of whitespace-separated rows
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a value is not a non-negative
    /// integer, or the grid is not a square of side 2 or more
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses rows of whitespace-separated integers.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let row = trimmed
                .split_whitespace()
                .map(|value| {
                    value
                        .parse::<u32>()
                        .map_err(|source| BeartoothError::LandscapeParse {
                            line: i + 1,
                            value: value.to_string(),
                            source,
                        })
                })
                .collect::<Result<Vec<u32>>>()?;
            rows.push(row);
        }

        Self::new(rows)
    }
}
