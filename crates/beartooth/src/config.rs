use crate::{
    constants::{DEFAULT_NUM_READS, DEFAULT_OUTPUT_DIR, ENCODING_BIAS, ENV_OUTPUT_DIR},
    embedding::Embedding,
    error::{BeartoothError, Result},
    landscape::Landscape,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub problem: ProblemConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProblemConfig {
    #[serde(default = "default_encoding_bias")]
    pub encoding_bias: i64,
    /// Whitespace-separated altitude rows; built-in landscape when absent
    #[serde(default)]
    pub landscape_file: Option<PathBuf>,
    /// JSON array of node chains; built-in embedding when absent
    #[serde(default)]
    pub embedding_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    #[serde(default = "default_num_reads")]
    pub num_reads: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_encoding_bias() -> i64 {
    ENCODING_BIAS
}

fn default_num_reads() -> u32 {
    DEFAULT_NUM_READS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            encoding_bias: ENCODING_BIAS,
            landscape_file: None,
            embedding_file: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_reads: DEFAULT_NUM_READS,
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Reads and validates a TOML config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BeartoothError::Configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the serde defaults cannot express
    pub fn validate(&self) -> Result<()> {
        if self.problem.encoding_bias <= 0 {
            return Err(BeartoothError::Configuration(format!(
                "encoding_bias must be positive, got {}",
                self.problem.encoding_bias
            )));
        }

        if self.solver.num_reads == 0 {
            return Err(BeartoothError::Configuration(
                "num_reads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Applies `BEARTOOTH_OUTPUT_DIR` when it is set to a non-blank value
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = std::env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(BeartoothError::Configuration(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            debug!("output directory overridden by {}", ENV_OUTPUT_DIR);
            self.solver.output_dir = path;
        }
        Ok(())
    }

    pub fn landscape(&self) -> Result<Landscape> {
        match &self.problem.landscape_file {
            Some(path) => Landscape::load(path),
            None => Ok(Landscape::builtin()),
        }
    }

    pub fn embedding(&self) -> Result<Embedding> {
        match &self.problem.embedding_file {
            Some(path) => Embedding::load_json(path),
            None => Ok(Embedding::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.problem.encoding_bias, 5);
        assert_eq!(config.solver.num_reads, 100);
        assert_eq!(config.solver.output_dir, PathBuf::from("results"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config("[solver]\nnum_reads = 250\n");
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.solver.num_reads, 250);
        assert_eq!(config.problem.encoding_bias, 5);
        assert!(config.problem.landscape_file.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_config("");
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.solver.num_reads, 100);
    }

    #[test]
    fn test_rejects_non_positive_bias() {
        let file = write_config("[problem]\nencoding_bias = 0\n");
        assert!(matches!(
            Config::load_from_file(file.path()),
            Err(BeartoothError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_reads() {
        let file = write_config("[solver]\nnum_reads = 0\n");
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[problem\nencoding_bias = 5\n");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load_from_file("nonexistent/config.toml").is_err());
    }

    #[test]
    fn test_landscape_and_embedding_files() {
        let landscape = write_config("0 1 2\n3 4 5\n6 7 8\n");
        let embedding = write_config("[[0], [1], [2], [3]]");
        let text = format!(
            "[problem]\nlandscape_file = {:?}\nembedding_file = {:?}\n",
            landscape.path().display().to_string(),
            embedding.path().display().to_string()
        );
        let file = write_config(&text);

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.landscape().unwrap().side(), 3);
        assert_eq!(config.embedding().unwrap().len(), 4);
    }

    #[test]
    fn test_builtin_fallbacks() {
        let config = Config::default();
        assert_eq!(config.landscape().unwrap(), Landscape::builtin());
        assert_eq!(config.embedding().unwrap(), Embedding::builtin());
    }

    #[test]
    fn test_apply_env() {
        let orig = std::env::var(ENV_OUTPUT_DIR).ok();
        let temp_dir = tempfile::TempDir::new().unwrap();

        unsafe {
            std::env::set_var(ENV_OUTPUT_DIR, temp_dir.path());
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.solver.output_dir, temp_dir.path());

        unsafe {
            std::env::set_var(ENV_OUTPUT_DIR, "   ");
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.solver.output_dir, PathBuf::from("results"));

        let not_a_dir = NamedTempFile::new().unwrap();
        unsafe {
            std::env::set_var(ENV_OUTPUT_DIR, not_a_dir.path());
        }
        assert!(Config::default().apply_env().is_err());

        // Cleanup
        unsafe {
            std::env::remove_var(ENV_OUTPUT_DIR);
            if let Some(value) = orig {
                std::env::set_var(ENV_OUTPUT_DIR, value);
            }
        }
    }
}
