use std::ops::Range;

use strum_macros::{Display, EnumIter};

/// Coordinate axis of the landscape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Axis {
    #[strum(serialize = "x")]
    X,
    #[strum(serialize = "y")]
    Y,
}

/// Index layout of the logical variables: `[ x0 ... xn-2 y0 ... yn-2 ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    side: usize,
}

impl VariableLayout {
    pub fn new(side: usize) -> Self {
        Self { side }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Bits per axis
    pub fn bits_per_axis(&self) -> usize {
        self.side.saturating_sub(1)
    }

    pub fn num_vars(&self) -> usize {
        2 * self.bits_per_axis()
    }

    pub fn x_vars(&self) -> Range<usize> {
        0..self.bits_per_axis()
    }

    pub fn y_vars(&self) -> Range<usize> {
        self.bits_per_axis()..self.num_vars()
    }

    pub fn vars(&self, axis: Axis) -> Range<usize> {
        match axis {
            Axis::X => self.x_vars(),
            Axis::Y => self.y_vars(),
        }
    }

    /// Canonical bit-vector of `(x, y)` over all logical variables
    pub fn encode(&self, x: usize, y: usize) -> Vec<bool> {
        let mut bits = encode_unary(x, self.bits_per_axis());
        bits.extend(encode_unary(y, self.bits_per_axis()));
        bits
    }
}

/// Unary prefix code: coordinate `c` sets bits `0..c` on a `bits`-wide axis.
///
/// ```text
///   c   encoded (bits = 3)
///   0   000
///   1   100
///   2   110
///   3   111
/// ```
pub fn encode_unary(coord: usize, bits: usize) -> Vec<bool> {
    debug_assert!(coord <= bits, "coordinate {coord} does not fit in {bits} bits");
    (0..bits).map(|i| i < coord).collect()
}
