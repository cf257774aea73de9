// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! TOML description of a shader program.
//!
//! ```toml
//! prelude = "#version 420 core\n"
//!
//! [vertex]
//! path = "quad.vert"
//!
//! [fragment]
//! source = """
//! out vec4 color;
//! void main() { color = vec4(1.0); }
//! """
//! ```
//!
//! Each stage table names either a file (`path`, relative to the manifest)
//! or inline `source`. The optional `prelude` is prepended to every stage.

#[cfg(test)]
mod tests {
    mod manifest;
}

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::program::{builder::ShaderProgramBuilder, shader::ShaderStage};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid {0} stage: {1}")]
    InvalidStage(ShaderStage, &'static str),
}

/// Where the source text of one stage comes from.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StageEntry {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgramManifest {
    /// Text prepended to every stage, typically a `#version` directive.
    #[serde(default)]
    pub prelude: Option<String>,
    #[serde(default)]
    pub vertex: Option<StageEntry>,
    #[serde(default)]
    pub fragment: Option<StageEntry>,
    #[serde(default)]
    pub tess_control: Option<StageEntry>,
    #[serde(default)]
    pub tess_evaluation: Option<StageEntry>,
    #[serde(default)]
    pub geometry: Option<StageEntry>,
    #[serde(default)]
    pub compute: Option<StageEntry>,

    /// Directory relative stage paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ProgramManifest {
    pub fn from_toml_str(toml: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(toml)?)
    }

    /// Reads a manifest file. Stage paths are resolved relative to its
    /// parent directory.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let contents = read_file(path)?;
        let mut manifest = Self::from_toml_str(&contents)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(manifest)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn entry(&self, stage: ShaderStage) -> Option<&StageEntry> {
        match stage {
            ShaderStage::Vertex => self.vertex.as_ref(),
            ShaderStage::Fragment => self.fragment.as_ref(),
            ShaderStage::TessControl => self.tess_control.as_ref(),
            ShaderStage::TessEvaluation => self.tess_evaluation.as_ref(),
            ShaderStage::Geometry => self.geometry.as_ref(),
            ShaderStage::Compute => self.compute.as_ref(),
        }
    }

    /// Loads every stage and returns the equivalent builder.
    pub fn into_builder(self) -> Result<ShaderProgramBuilder, ManifestError> {
        let prelude = self.prelude.as_deref().unwrap_or_default();
        let mut builder = ShaderProgramBuilder::new();

        for stage in ShaderStage::ALL {
            let Some(entry) = self.entry(stage) else {
                continue;
            };
            let body = match (&entry.path, &entry.source) {
                (Some(path), None) => read_file(&self.base_dir.join(path))?,
                (None, Some(source)) => source.clone(),
                (Some(_), Some(_)) => {
                    return Err(ManifestError::InvalidStage(
                        stage,
                        "`path` and `source` are mutually exclusive",
                    ))
                }
                (None, None) => {
                    return Err(ManifestError::InvalidStage(
                        stage,
                        "either `path` or `source` is required",
                    ))
                }
            };
            log::debug!("Loaded {stage} stage ({} bytes)", body.len());
            builder = builder.stage(stage, format!("{prelude}{body}"));
        }

        Ok(builder)
    }
}

/// Reads a shader or manifest file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
