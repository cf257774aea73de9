// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface.
//!
//! Stage sources come from an optional TOML manifest and from per-stage
//! flags. A flag replaces the manifest entry of the same stage.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use shaderlink::{manifest, ManifestError, ProgramManifest, ShaderProgramBuilder, ShaderStage};
use thiserror::Error;

use crate::*;

/// Flag name of each stage.
const STAGE_FLAGS: [(ShaderStage, &str); ShaderStage::COUNT] = [
    (ShaderStage::Vertex, "vertex"),
    (ShaderStage::Fragment, "fragment"),
    (ShaderStage::TessControl, "tess-control"),
    (ShaderStage::TessEvaluation, "tess-evaluation"),
    (ShaderStage::Geometry, "geometry"),
    (ShaderStage::Compute, "compute"),
];

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Runtime configuration resolved from the command line.
#[derive(Debug)]
pub struct CliConfig {
    /// Stage sources to build.
    pub builder: ShaderProgramBuilder,

    /// OpenGL version requested for the context, as (major, minor).
    pub gl_version: (i32, i32),
}

pub fn command() -> Command {
    let command = Command::new(APP_NAME)
        .author(APP_AUTHOR)
        .version(APP_SEMVER)
        .about(APP_ABOUT)
        .arg(
            Arg::new("manifest")
                .value_name("MANIFEST")
                .help("Path to a TOML program manifest")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("gl-version")
                .long("gl-version")
                .value_name("MAJOR.MINOR")
                .help("OpenGL version required from the context")
                .default_value(DEFAULT_GL_VERSION),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every driver interaction")
                .action(ArgAction::SetTrue),
        )
        .after_help("At least one stage must be given, either in MANIFEST or as a flag");

    STAGE_FLAGS.iter().fold(command, |command, (stage, flag)| {
        command.arg(
            Arg::new(*flag)
                .long(*flag)
                .value_name("FILE")
                .help(format!("Source file of the {stage} stage"))
                .value_parser(clap::value_parser!(PathBuf)),
        )
    })
}

/// Resolves stage sources and context settings from parsed arguments.
pub fn config_from_matches(matches: &ArgMatches) -> Result<CliConfig, CliError> {
    let gl_version = match matches.get_one::<String>("gl-version") {
        Some(version) => parse_gl_version(version)?,
        None => parse_gl_version(DEFAULT_GL_VERSION)?,
    };

    let mut builder = match matches.get_one::<PathBuf>("manifest") {
        Some(path) => {
            let builder = ProgramManifest::from_file(path)?.into_builder()?;
            log::info!("Loaded {}", path.display());
            builder
        }
        None => ShaderProgramBuilder::new(),
    };

    for (stage, flag) in STAGE_FLAGS {
        if let Some(path) = matches.get_one::<PathBuf>(flag) {
            *builder.slot_mut(stage) = Some(manifest::read_file(path)?);
        }
    }

    if builder.is_empty() {
        return Err(CliError::InvalidInput("no shader stage given".to_string()));
    }

    Ok(CliConfig {
        builder,
        gl_version,
    })
}

/// Parses `MAJOR.MINOR`.
pub fn parse_gl_version(version: &str) -> Result<(i32, i32), CliError> {
    let invalid = || CliError::InvalidInput(format!("invalid OpenGL version '{version}'"));
    let (major, minor) = version.trim().split_once('.').ok_or_else(invalid)?;
    let major = major.parse::<i32>().map_err(|_| invalid())?;
    let minor = minor.parse::<i32>().map_err(|_| invalid())?;
    if major < 1 || minor < 0 {
        return Err(invalid());
    }
    Ok((major, minor))
}
