// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::fmt;

/// Pipeline stage a shader object is compiled for.
///
/// The declaration order is the order in which [`ShaderProgramBuilder`]
/// submits stages to the driver.
///
/// [`ShaderProgramBuilder`]: super::builder::ShaderProgramBuilder
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    TessControl,
    TessEvaluation,
    Geometry,
    Compute,
}

impl ShaderStage {
    pub const COUNT: usize = 6;

    /// All stages, in submission order.
    pub const ALL: [ShaderStage; Self::COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Compute,
    ];

    /// The `glCreateShader` type enum for this stage.
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Compute => "compute",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure of a [`ShaderProgramBuilder::build`] call.
///
/// Both variants carry the driver's info log verbatim. The log may be empty
/// when the driver reports a zero-length log.
///
/// [`ShaderProgramBuilder::build`]: super::builder::ShaderProgramBuilder::build
#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Shader compile error ({stage} stage): {log}")]
    CompilationError { stage: ShaderStage, log: String },
    #[error("Shader link error: {log}")]
    LinkError { log: String },
}

impl ProgramError {
    /// Driver diagnostic text attached to this error.
    pub fn log(&self) -> &str {
        match self {
            ProgramError::CompilationError { log, .. } | ProgramError::LinkError { log } => log,
        }
    }

    /// Stage that failed to compile, if any.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ProgramError::CompilationError { stage, .. } => Some(*stage),
            ProgramError::LinkError { .. } => None,
        }
    }
}
