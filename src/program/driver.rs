// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Seam between the program builder and the native GL program object API.
//!
//! [`Driver`] lists exactly the calls the builder needs. [`GlDriver`] forwards
//! them to the function pointers loaded into the `gl` crate.

use gl::types::*;
use std::{ffi::CString, marker::PhantomData};

use super::shader::ShaderStage;

/// One entry of the driver's active-uniform list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveUniform {
    /// Name as written into the caller's buffer, possibly truncated.
    pub name: String,
    /// Array length, or 1 for non-array uniforms.
    pub size: GLint,
    /// GL type enum, e.g. `GL_FLOAT_MAT4`.
    pub type_: GLenum,
}

/// Program and shader object operations of a graphics driver.
///
/// Implementations are bound to one context and one thread. Methods take
/// `&self`; any bookkeeping an implementation needs is its own concern.
pub trait Driver {
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);

    fn active_uniform_count(&self, program: GLuint) -> GLuint;

    /// Longest active uniform name including the terminating NUL,
    /// or a non-positive value when the driver does not report one.
    fn active_uniform_max_length(&self, program: GLuint) -> GLsizei;

    /// Queries uniform `index` into a name buffer of `buf_size` bytes.
    /// Names that do not fit are truncated to `buf_size - 1` bytes.
    fn active_uniform(&self, program: GLuint, index: GLuint, buf_size: GLsizei) -> ActiveUniform;

    /// Location of `name`, or -1 when it has none.
    fn uniform_location(&self, program: GLuint, name: &str) -> GLint;

    fn use_program(&self, program: GLuint);
}

/// [`Driver`] backed by the global `gl` function pointers.
///
/// Not `Send` or `Sync`: a GL context is current on one thread only.
pub struct GlDriver {
    _not_send: PhantomData<*const ()>,
}

impl GlDriver {
    /// # Safety
    ///
    /// A GL context must be current on the calling thread, `gl::load_with`
    /// must have been called for it, and the driver must only be used while
    /// that context stays current.
    pub unsafe fn new() -> Self {
        Self {
            _not_send: PhantomData,
        }
    }
}

/// Reads an info log of `log_len` bytes through `get_log`.
fn read_info_log(
    log_len: GLint,
    get_log: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    if log_len <= 0 {
        return String::new();
    }
    let mut log = vec![0u8; log_len as usize];
    let mut written: GLsizei = 0;
    get_log(
        log_len,
        &mut written as *mut GLsizei,
        log.as_mut_ptr() as *mut GLchar,
    );
    decode_gl_string(log, written)
}

/// Text the driver wrote into `buf`, which reported `written` bytes.
///
/// `written` is clamped to the buffer; invalid UTF-8 is replaced.
fn decode_gl_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

impl Driver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    /// Sources longer than `GLint::MAX` bytes are cut off at that length.
    fn shader_source(&self, shader: GLuint, source: &str) {
        // Passing an explicit length avoids a NUL-terminated copy.
        let len = GLint::try_from(source.len()).unwrap_or(GLint::MAX);
        let ptr = source.as_ptr() as *const GLchar;
        unsafe { gl::ShaderSource(shader, 1, &ptr, &len) };
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut log_len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut log_len) };
        read_info_log(log_len, |len, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, written, buf)
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut log_len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_len) };
        read_info_log(log_len, |len, written, buf| unsafe {
            gl::GetProgramInfoLog(program, len, written, buf)
        })
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn active_uniform_count(&self, program: GLuint) -> GLuint {
        let mut count: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::ACTIVE_UNIFORMS, &mut count) };
        count.max(0) as GLuint
    }

    fn active_uniform_max_length(&self, program: GLuint) -> GLsizei {
        let mut max_length = 0;
        unsafe { gl::GetProgramiv(program, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_length) };
        max_length
    }

    fn active_uniform(&self, program: GLuint, index: GLuint, buf_size: GLsizei) -> ActiveUniform {
        let mut name = vec![0u8; buf_size.max(1) as usize];
        let mut length: GLsizei = 0;
        let mut size: GLint = 0;
        let mut type_: GLenum = 0;
        unsafe {
            gl::GetActiveUniform(
                program,
                index,
                name.len() as GLsizei,
                &mut length,
                &mut size,
                &mut type_,
                name.as_mut_ptr() as *mut GLchar,
            );
        }
        ActiveUniform {
            name: decode_gl_string(name, length),
            size,
            type_,
        }
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetUniformLocation(program, name.as_ptr()) },
            Err(_) => -1,
        }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }
}
