//! QUBO construction for a landscape.
//!
//! Each coordinate uses the unary code of [`crate::variables::encode_unary`],
//! so a valid sample sets a prefix of the x-block and a prefix of the y-block.
//! The coefficients telescope along those prefixes:
//!
//! ```text
//! Q[xi, xi] = f(i+1, 0) - f(i, 0)                            (+ B for i >= 1)
//! Q[yj, yj] = f(0, j+1) - f(0, j)                            (+ B for j >= 1)
//! Q[xi, yj] = f(i+1, j+1) - f(i, j+1) - f(i+1, j) + f(i, j)
//! Q[xi-1, xi] = Q[yj-1, yj] = -B
//! ```
//!
//! so a valid encoding of `(x, y)` has energy `f(x, y) - f(0, 0)`. Every
//! `0 -> 1` step inside an axis costs an extra `B`. The constant `f(0, 0)` is
//! not part of the QUBO.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use itertools::iproduct;
use log::debug;
use serde::Serialize;

use crate::error::{BeartoothError, Result};
use crate::landscape::Landscape;
use crate::variables::VariableLayout;

/// Sparse upper-triangular coefficient map, keys are `(i, j)` with `i <= j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qubo {
    num_vars: usize,
    coefficients: BTreeMap<(usize, usize), i64>,
}

impl Qubo {
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Coefficient of the unordered pair, zero when absent
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.coefficients
            .get(&canonical(i, j))
            .copied()
            .unwrap_or(0)
    }

    pub fn coefficients(&self) -> &BTreeMap<(usize, usize), i64> {
        &self.coefficients
    }

    /// Diagonal entries
    pub fn linear(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.coefficients
            .iter()
            .filter(|((i, j), _)| i == j)
            .map(|(&(i, _), &c)| (i, c))
    }

    /// Off-diagonal entries
    pub fn quadratic(&self) -> impl Iterator<Item = ((usize, usize), i64)> + '_ {
        self.coefficients
            .iter()
            .filter(|((i, j), _)| i != j)
            .map(|(&key, &c)| (key, c))
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// `sum Q[i, j] * b_i * b_j` over the populated pairs.
    /// Indices past the end of `bits` read as 0.
    pub fn energy(&self, bits: &[bool]) -> i64 {
        let bit = |i: usize| bits.get(i).copied().unwrap_or(false);
        self.coefficients
            .iter()
            .filter(|((i, j), _)| bit(*i) && bit(*j))
            .map(|(_, &c)| c)
            .sum()
    }

    /// Writes the QUBO as JSON for an external solver.
    /// `offset` is the dropped constant, recorded for reference only.
    pub fn write_json<W: Write>(&self, writer: W, offset: i64) -> Result<()> {
        let file = QuboFile {
            num_variables: self.num_vars,
            offset,
            linear: self.linear().collect(),
            quadratic: self
                .quadratic()
                .map(|((i, j), c)| (i, j, c))
                .collect(),
        };
        serde_json::to_writer_pretty(writer, &file)?;
        Ok(())
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P, offset: i64) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_json(std::io::BufWriter::new(file), offset)
    }
}

#[derive(Debug, Serialize)]
struct QuboFile {
    num_variables: usize,
    offset: i64,
    linear: BTreeMap<usize, i64>,
    quadratic: Vec<(usize, usize, i64)>,
}

fn canonical(i: usize, j: usize) -> (usize, usize) {
    if i <= j { (i, j) } else { (j, i) }
}

/// Builds the QUBO of `landscape` with encoding bias `bias`.
///
/// # Errors
/// Returns a configuration error if `bias` is not positive
pub fn build_qubo(landscape: &Landscape, bias: i64) -> Result<Qubo> {
    if bias <= 0 {
        return Err(BeartoothError::Configuration(format!(
            "encoding bias must be positive, got {}",
            bias
        )));
    }

    let layout = VariableLayout::new(landscape.side());
    let bits = layout.bits_per_axis();
    let x_vars: Vec<usize> = layout.x_vars().collect();
    let y_vars: Vec<usize> = layout.y_vars().collect();

    // No preceding bit to order against at index 0, so no bias there.
    let step_bias = |i: usize| if i == 0 { 0 } else { bias };

    let x_diag = (0..bits).map(|i| ((x_vars[i], x_vars[i]), landscape.x_shift(i) + step_bias(i)));
    let y_diag = (0..bits).map(|j| ((y_vars[j], y_vars[j]), landscape.y_shift(j) + step_bias(j)));
    let cross = iproduct!(0..bits, 0..bits)
        .map(|(i, j)| ((x_vars[i], y_vars[j]), landscape.angle_shift(i, j)));
    let x_chain = (1..bits).map(|i| ((x_vars[i - 1], x_vars[i]), -bias));
    let y_chain = (1..bits).map(|j| ((y_vars[j - 1], y_vars[j]), -bias));

    let mut coefficients = BTreeMap::new();
    for (key, c) in x_diag.chain(y_diag).chain(cross).chain(x_chain).chain(y_chain) {
        let previous = coefficients.insert(canonical(key.0, key.1), c);
        debug_assert!(previous.is_none(), "pair {key:?} assigned twice");
    }

    debug!(
        "built QUBO: {} variables, {} coefficients, bias {}",
        layout.num_vars(),
        coefficients.len(),
        bias
    );

    Ok(Qubo {
        num_vars: layout.num_vars(),
        coefficients,
    })
}
