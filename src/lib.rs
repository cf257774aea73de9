// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative OpenGL shader program builder.
//!
//! A [`ShaderProgramBuilder`] collects up to six optional stage sources,
//! compiles and links them through a [`Driver`], and returns an immutable
//! [`ShaderProgram`] carrying the program id and a snapshot of its active
//! uniform locations.
//!
//! All driver calls happen on the calling thread, in order. The caller must
//! own the current GL context for the duration of every call.

pub mod manifest;
pub mod program;

pub use manifest::{ManifestError, ProgramManifest};
pub use program::{
    builder::ShaderProgramBuilder,
    driver::{ActiveUniform, Driver, GlDriver},
    shader::{ProgramError, ShaderStage},
    ShaderProgram, Uniform, UniformTable,
};
