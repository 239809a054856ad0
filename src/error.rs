//! Errors for the fallible edges: reading and parsing data files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
  /// The file could not be read
  #[error("failed to read {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  /// The file is not valid TOML for the expected schema
  #[error("failed to parse {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}
