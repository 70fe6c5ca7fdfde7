//! Run configuration for the `edit-image` tool.
//!
//! ```json
//! {
//!   "input": "in.jpg",
//!   "output": "out.png",
//!   "display": false,
//!   "operations": [{"type": "box", "width": 5, "height": 5}]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EditError, EditResult};
use crate::pipeline::{OperationDescriptor, Pipeline};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub display: bool,
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

impl RunConfig {
    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> EditResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Parse and validate an in-memory configuration.
    pub fn from_json_str(json: &str) -> EditResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EditResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(EditError::config("'input' is required"));
        }
        if self.output_path().is_none() && !self.display {
            return Err(EditError::config(
                "either 'output' must be set or 'display' must be true",
            ));
        }
        Ok(())
    }

    /// The output path, treating an empty string as unset.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref().filter(|p| !p.as_os_str().is_empty())
    }

    /// Build the configured operations. Does not touch the input file.
    pub fn pipeline(&self) -> EditResult<Pipeline> {
        Pipeline::build(self.operations.iter().cloned())
    }
}
