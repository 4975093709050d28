use std::collections::HashMap;

use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::decode::decode_axis;
use crate::variables::{Axis, VariableLayout};

/// One unembedded solution and how many times the solver returned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub bits: Vec<bool>,
    pub occurrences: u64,
}

impl Sample {
    pub fn new(bits: Vec<bool>, occurrences: u64) -> Self {
        Self { bits, occurrences }
    }
}

/// Occurrence totals per landscape coordinate.
///
/// Any in-range coordinate can be looked up with [`ResultTable::get`]; coordinates
/// that were never sampled read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    side: usize,
    counts: HashMap<(usize, usize), u64>,
    /// occurrences that decoded to a coordinate
    accepted: u64,
    /// occurrences dropped for a broken encoding
    discarded: u64,
}

impl ResultTable {
    pub fn side(&self) -> usize {
        self.side
    }

    /// Count at `(x, y)`, 0 if never sampled
    pub fn get(&self, x: usize, y: usize) -> u64 {
        self.counts.get(&(x, y)).copied().unwrap_or(0)
    }

    /// Sum over all coordinates
    pub fn total(&self) -> u64 {
        self.accepted
    }

    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Number of distinct coordinates sampled
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sampled coordinates in `(x, y)` order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), u64)> + '_ {
        let mut entries: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable_by_key(|&(k, _)| k);
        entries.into_iter()
    }

    /// Dense `side x side` view, indexed `[x][y]`
    pub fn grid(&self) -> Vec<Vec<u64>> {
        (0..self.side)
            .map(|x| (0..self.side).map(|y| self.get(x, y)).collect())
            .collect()
    }

    /// Coordinate with the highest count; ties go to the smallest `(x, y)`
    pub fn most_sampled(&self) -> Option<((usize, usize), u64)> {
        self.counts
            .iter()
            .map(|(&k, &v)| (k, v))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
    }
}

/// Folds samples into a [`ResultTable`].
#[derive(Debug, Clone)]
pub struct SampleAggregator {
    layout: VariableLayout,
    table: ResultTable,
}

impl SampleAggregator {
    pub fn new(layout: VariableLayout) -> Self {
        Self {
            layout,
            table: ResultTable {
                side: layout.side(),
                ..ResultTable::default()
            },
        }
    }

    /// Decodes both axes and credits `(x, y)`.
    /// A sample invalid on either axis credits nothing. Returns the coordinate when accepted.
    pub fn add(&mut self, sample: &Sample) -> Option<(usize, usize)> {
        if sample.bits.len() != self.layout.num_vars() {
            warn!(
                "sample has {} bits, expected {}",
                sample.bits.len(),
                self.layout.num_vars()
            );
        }

        let mut coords = [0usize; 2];
        for (slot, axis) in coords.iter_mut().zip(Axis::iter()) {
            match decode_axis(&sample.bits, self.layout.vars(axis)) {
                Some(c) => *slot = c,
                None => {
                    debug!("discarding sample {:?}: invalid {} encoding", sample.bits, axis);
                    self.table.discarded += sample.occurrences;
                    return None;
                }
            }
        }

        let [x, y] = coords;
        // duplicates are expected after unembedding, so accumulate
        *self.table.counts.entry((x, y)).or_insert(0) += sample.occurrences;
        self.table.accepted += sample.occurrences;
        Some((x, y))
    }

    pub fn finish(self) -> ResultTable {
        let table = self.table;
        info!(
            "aggregated {} occurrences over {} coordinates ({} discarded)",
            table.accepted,
            table.counts.len(),
            table.discarded
        );
        if table.accepted == 0 && table.discarded > 0 {
            warn!("every sample failed to decode");
        }
        table
    }
}

/// Builds the coordinate -> occurrences table for a batch of samples.
pub fn interpret_samples<'a, I>(layout: VariableLayout, samples: I) -> ResultTable
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut aggregator = SampleAggregator::new(layout);
    for sample in samples {
        aggregator.add(sample);
    }
    aggregator.finish()
}
