// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text rendering of a linked program's uniform table.

use gl::types::*;
use owo_colors::OwoColorize;
use shaderlink::UniformTable;
use std::fmt::Write;

/// Formats the uniform table ordered by location, then name.
///
/// Uniforms without a location (members of uniform blocks) come first
/// with location -1.
pub fn format_program(id: GLuint, uniforms: &UniformTable, styled: bool) -> String {
    let mut rows: Vec<_> = uniforms
        .iter()
        .map(|(name, uniform)| (uniform.location(), name.as_str()))
        .collect();
    rows.sort_unstable();

    let mut out = format!("Program {id}: {} active uniform(s)\n", rows.len());
    if rows.is_empty() {
        return out;
    }

    let header = format!("{:>8}  {}", "LOCATION", "NAME");
    if styled {
        let _ = writeln!(out, "{}", header.bold());
    } else {
        let _ = writeln!(out, "{header}");
    }
    for (location, name) in rows {
        let _ = writeln!(out, "{location:>8}  {name}");
    }
    out
}
