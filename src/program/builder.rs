// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;

use super::{driver::*, shader::*, ShaderProgram, Uniform, UniformTable};

/// Name buffer size used when the driver does not report
/// `GL_ACTIVE_UNIFORM_MAX_LENGTH`. Longer names are truncated.
pub const UNIFORM_NAME_FALLBACK_LEN: GLsizei = 1024;

/// Declarative description of a shader program.
///
/// Each populated slot becomes one compiled stage. Empty slots are skipped.
/// Source text is passed to the driver untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderProgramBuilder {
    pub vertex: Option<String>,
    pub fragment: Option<String>,
    pub tess_control: Option<String>,
    pub tess_evaluation: Option<String>,
    pub geometry: Option<String>,
    pub compute: Option<String>,
}

impl ShaderProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(mut self, source: impl Into<String>) -> Self {
        self.vertex = Some(source.into());
        self
    }

    pub fn fragment(mut self, source: impl Into<String>) -> Self {
        self.fragment = Some(source.into());
        self
    }

    pub fn tess_control(mut self, source: impl Into<String>) -> Self {
        self.tess_control = Some(source.into());
        self
    }

    pub fn tess_evaluation(mut self, source: impl Into<String>) -> Self {
        self.tess_evaluation = Some(source.into());
        self
    }

    pub fn geometry(mut self, source: impl Into<String>) -> Self {
        self.geometry = Some(source.into());
        self
    }

    pub fn compute(mut self, source: impl Into<String>) -> Self {
        self.compute = Some(source.into());
        self
    }

    /// Sets the slot for `stage`.
    pub fn stage(mut self, stage: ShaderStage, source: impl Into<String>) -> Self {
        *self.slot_mut(stage) = Some(source.into());
        self
    }

    pub fn source(&self, stage: ShaderStage) -> Option<&str> {
        match stage {
            ShaderStage::Vertex => self.vertex.as_deref(),
            ShaderStage::Fragment => self.fragment.as_deref(),
            ShaderStage::TessControl => self.tess_control.as_deref(),
            ShaderStage::TessEvaluation => self.tess_evaluation.as_deref(),
            ShaderStage::Geometry => self.geometry.as_deref(),
            ShaderStage::Compute => self.compute.as_deref(),
        }
    }

    pub fn slot_mut(&mut self, stage: ShaderStage) -> &mut Option<String> {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
            ShaderStage::TessControl => &mut self.tess_control,
            ShaderStage::TessEvaluation => &mut self.tess_evaluation,
            ShaderStage::Geometry => &mut self.geometry,
            ShaderStage::Compute => &mut self.compute,
        }
    }

    /// Populated slots in submission order.
    pub fn sources(&self) -> impl Iterator<Item = (ShaderStage, &str)> + '_ {
        ShaderStage::ALL
            .into_iter()
            .filter_map(move |stage| self.source(stage).map(|source| (stage, source)))
    }

    pub fn is_empty(&self) -> bool {
        self.sources().next().is_none()
    }

    /// Compiles every populated stage, links them into a new program and
    /// snapshots its active uniforms.
    ///
    /// On failure every shader and program object created by this call is
    /// deleted before the error is returned. On success the shader objects
    /// are detached and deleted, and the program object is owned by the
    /// returned [`ShaderProgram`].
    pub fn build<D: Driver>(&self, driver: &D) -> Result<ShaderProgram, ProgramError> {
        let program = ProgramGuard::new(driver);
        let mut stages = Vec::with_capacity(ShaderStage::COUNT);

        for (stage, source) in self.sources() {
            let shader = compile_stage(driver, stage, source)?;
            driver.attach_shader(program.id, shader.id);
            stages.push(shader);
        }

        driver.link_program(program.id);
        if !driver.program_link_status(program.id) {
            let log = driver.program_info_log(program.id);
            log::debug!("Program {} failed to link", program.id);
            return Err(ProgramError::LinkError { log });
        }

        for shader in stages {
            driver.detach_shader(program.id, shader.id);
        }

        let id = program.release();
        let uniforms = active_uniforms(driver, id);
        log::debug!(
            "Program {id} linked with {} active uniform(s)",
            uniforms.len()
        );

        Ok(ShaderProgram::new(id, uniforms))
    }
}

/// Creates, compiles and checks one stage.
fn compile_stage<'a, D: Driver>(
    driver: &'a D,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderGuard<'a, D>, ProgramError> {
    let shader = ShaderGuard {
        driver,
        id: driver.create_shader(stage),
    };
    driver.shader_source(shader.id, source);
    driver.compile_shader(shader.id);

    if driver.shader_compile_status(shader.id) {
        log::trace!("Compiled {stage} shader {}", shader.id);
        Ok(shader)
    } else {
        let log = driver.shader_info_log(shader.id);
        log::debug!("{stage} shader {} failed to compile", shader.id);
        Err(ProgramError::CompilationError { stage, log })
    }
}

/// Snapshot of the active uniforms of a linked program.
fn active_uniforms<D: Driver>(driver: &D, program: GLuint) -> UniformTable {
    let count = driver.active_uniform_count(program);
    let buf_size = match driver.active_uniform_max_length(program) {
        len if len > 0 => len,
        _ => UNIFORM_NAME_FALLBACK_LEN,
    };

    let mut uniforms = UniformTable::with_capacity(count as usize);
    for index in 0..count {
        let ActiveUniform { name, size, type_ } = driver.active_uniform(program, index, buf_size);
        let location = driver.uniform_location(program, &name);
        log::trace!(
            "Uniform #{index} '{name}': type=0x{type_:04X}, size={size}, location={location}"
        );
        uniforms.insert(name, Uniform::new(location));
    }
    uniforms
}

/// Shader object deleted on drop.
struct ShaderGuard<'a, D: Driver> {
    driver: &'a D,
    id: GLuint,
}

impl<D: Driver> Drop for ShaderGuard<'_, D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// Program object deleted on drop unless released.
struct ProgramGuard<'a, D: Driver> {
    driver: &'a D,
    id: GLuint,
}

impl<'a, D: Driver> ProgramGuard<'a, D> {
    fn new(driver: &'a D) -> Self {
        Self {
            driver,
            id: driver.create_program(),
        }
    }

    /// Hands the program object over to the caller.
    fn release(self) -> GLuint {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl<D: Driver> Drop for ProgramGuard<'_, D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}
