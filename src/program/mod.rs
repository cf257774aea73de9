// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shader program construction and activation.
//!
//! The flow of a build is:
//!
//! 1. One shader object per populated stage is compiled and attached.
//! 2. The program object is linked.
//! 3. Shader objects are detached and deleted.
//! 4. Active uniforms are enumerated into a [`UniformTable`].
//!
//! Every step goes through a [`driver::Driver`], so the same code runs
//! against a live GL context or a test double.

#[cfg(test)]
mod tests {
    mod builder;
    mod program;
    mod shader;
    mod stub_driver;
}
pub mod builder;
pub mod driver;
pub mod shader;

#[cfg(debug_assertions)]
pub mod debug_output;

use gl::types::*;
use std::collections::HashMap;

use driver::Driver;

/// Uniform name, as reported by the driver, to its location.
pub type UniformTable = HashMap<String, Uniform>;

/// Location of an active uniform, usable for value uploads.
///
/// Uniforms that are members of a uniform block report -1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Uniform {
    location: GLint,
}

impl Uniform {
    pub fn new(location: GLint) -> Self {
        Self { location }
    }

    pub fn location(&self) -> GLint {
        self.location
    }
}

/// A linked program and the snapshot of its active uniforms.
///
/// Immutable once built. The program object stays alive in the driver
/// until [`ShaderProgram::delete`] is called with the same driver.
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    id: GLuint,
    uniforms: UniformTable,
}

impl ShaderProgram {
    pub(crate) fn new(id: GLuint, uniforms: UniformTable) -> Self {
        Self { id, uniforms }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    pub fn uniform(&self, name: &str) -> Option<Uniform> {
        self.uniforms.get(name).copied()
    }

    /// Makes this the current program for subsequent draw and dispatch calls.
    pub fn use_program<D: Driver>(&self, driver: &D) {
        driver.use_program(self.id);
    }

    /// Makes this the current program, then runs `f` with it.
    pub fn use_with<D: Driver, R>(&self, driver: &D, f: impl FnOnce(&Self) -> R) -> R {
        self.use_program(driver);
        f(self)
    }

    /// Deletes the program object.
    pub fn delete<D: Driver>(self, driver: &D) {
        log::trace!("Deleting program {}", self.id);
        driver.delete_program(self.id);
    }
}
