//! Hand-off to the external composer.
//!
//! Ising conversion, embedding onto the hardware graph, the solve itself and
//! unembedding all happen behind [`EmbeddingComposer`]. This module only checks
//! the inputs and wires the calls together.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use log::{debug, info};

use crate::aggregate::{ResultTable, Sample, interpret_samples};
use crate::constants::DEFAULT_EMBEDDING;
use crate::error::{BeartoothError, ComposerError, Result};
use crate::landscape::Landscape;
use crate::qubo::{Qubo, build_qubo};
use crate::variables::VariableLayout;

/// Chain of physical nodes for every logical variable, in variable order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedding {
    groups: Vec<Vec<usize>>,
}

impl Embedding {
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }

    /// Embedding of the built-in 10x10 landscape
    pub fn builtin() -> Self {
        Self::from_groups(DEFAULT_EMBEDDING.iter().map(|g| g.to_vec()).collect())
    }

    /// Reads a JSON array of node-index arrays
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let groups: Vec<Vec<usize>> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(Self::from_groups(groups))
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All physical nodes used by the embedding
    pub fn physical_nodes(&self) -> BTreeSet<usize> {
        self.groups.iter().flatten().copied().collect()
    }

    /// Checks the embedding has one non-empty chain per variable and that no
    /// physical node belongs to two chains.
    pub fn validate_for(&self, layout: &VariableLayout) -> Result<()> {
        if self.groups.len() != layout.num_vars() {
            return Err(BeartoothError::Configuration(format!(
                "embedding has {} groups, expected {} for a side-{} landscape",
                self.groups.len(),
                layout.num_vars(),
                layout.side()
            )));
        }

        let mut owner: HashMap<usize, usize> = HashMap::new();
        for (var, group) in self.groups.iter().enumerate() {
            if group.is_empty() {
                return Err(BeartoothError::Configuration(format!(
                    "embedding group {} is empty",
                    var
                )));
            }
            for &node in group {
                if let Some(other) = owner.insert(node, var)
                    && other != var
                {
                    return Err(BeartoothError::Configuration(format!(
                        "physical node {} is shared by groups {} and {}",
                        node, other, var
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Undirected couplers of the hardware graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwareAdjacency {
    edges: BTreeSet<(usize, usize)>,
}

impl HardwareAdjacency {
    pub fn new<I: IntoIterator<Item = (usize, usize)>>(edges: I) -> Self {
        Self {
            edges: edges
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
                .collect(),
        }
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.contains(&key)
    }

    pub fn edges(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Ising problem over physical nodes, as produced by the composer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedProblem {
    pub linear: BTreeMap<usize, f64>,
    pub quadratic: BTreeMap<(usize, usize), f64>,
    /// couplings holding each chain together
    pub chain: BTreeMap<(usize, usize), f64>,
}

impl EmbeddedProblem {
    /// Moves the chain couplings into `quadratic`, replacing any overlap.
    pub fn merge_chains(&mut self) {
        let chain = std::mem::take(&mut self.chain);
        self.quadratic.extend(chain);
    }
}

/// External collaborator that converts, embeds, solves and unembeds.
pub trait EmbeddingComposer {
    fn hardware_adjacency(&self) -> std::result::Result<HardwareAdjacency, ComposerError>;

    /// Converts `qubo` to Ising form and maps it onto the hardware graph.
    fn embed(
        &self,
        qubo: &Qubo,
        embedding: &Embedding,
        adjacency: &HardwareAdjacency,
    ) -> std::result::Result<EmbeddedProblem, ComposerError>;

    /// Solves the embedded problem and maps the answers back to the logical
    /// variables. Bits are 0/1 per logical variable.
    fn solve(
        &self,
        problem: &EmbeddedProblem,
        embedding: &Embedding,
        num_reads: u32,
    ) -> std::result::Result<Vec<Sample>, ComposerError>;
}

fn solve_failed(source: ComposerError) -> BeartoothError {
    BeartoothError::SolveFailed { source }
}

/// Return a coordinate -> number of samples mapping.
///
/// # Errors
/// Configuration errors are raised before anything is sent to the composer.
/// Any composer failure is returned as [`BeartoothError::SolveFailed`].
pub fn get_samples<C: EmbeddingComposer + ?Sized>(
    composer: &C,
    landscape: &Landscape,
    embedding: &Embedding,
    bias: i64,
    num_reads: u32,
) -> Result<ResultTable> {
    let layout = VariableLayout::new(landscape.side());
    embedding.validate_for(&layout)?;
    let qubo = build_qubo(landscape, bias)?;

    let adjacency = composer.hardware_adjacency().map_err(solve_failed)?;
    let mut problem = composer
        .embed(&qubo, embedding, &adjacency)
        .map_err(solve_failed)?;
    problem.merge_chains();
    debug!(
        "embedded problem: {} fields, {} couplers",
        problem.linear.len(),
        problem.quadratic.len()
    );

    let samples = composer
        .solve(&problem, embedding, num_reads)
        .map_err(solve_failed)?;
    info!("received {} distinct samples", samples.len());

    Ok(interpret_samples(layout, &samples))
}
