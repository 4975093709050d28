pub mod aggregate;
pub mod config;
pub mod constants;
pub mod decode;
pub mod embedding;
pub mod error;
pub mod export;
pub mod landscape;
pub mod qubo;
pub mod sample_reader;
pub mod variables;

pub use aggregate::{ResultTable, Sample, SampleAggregator, interpret_samples};
pub use config::Config;
pub use constants::ENCODING_BIAS;
pub use decode::decode_axis;
pub use embedding::{EmbeddedProblem, Embedding, EmbeddingComposer, HardwareAdjacency, get_samples};
pub use error::{BeartoothError, Result};
pub use landscape::Landscape;
pub use qubo::{Qubo, build_qubo};
pub use sample_reader::read_samples_csv;
pub use variables::{Axis, VariableLayout, encode_unary};
