// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! Forwards `GL_KHR_debug` messages to the `log` facade in debug builds.

use gl::types::*;
use owo_colors::OwoColorize;

/// Installs the debug callback when the context exposes a debug extension.
///
/// Returns whether the callback was installed.
///
/// # Safety
///
/// Same requirements as [`GlDriver::new`](super::driver::GlDriver::new).
pub unsafe fn enable() -> bool {
    if !has_debug_extension() {
        log::debug!("GL debug output not available");
        return false;
    }
    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(on_debug_message), std::ptr::null());
    gl::DebugMessageControl(
        gl::DONT_CARE,
        gl::DONT_CARE,
        gl::DONT_CARE,
        0,
        std::ptr::null(),
        gl::TRUE,
    );
    true
}

unsafe fn has_debug_extension() -> bool {
    let mut num_extensions = 0;
    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);

    (0..num_extensions.max(0) as GLuint).any(|i| {
        let ptr = gl::GetStringi(gl::EXTENSIONS, i);
        !ptr.is_null()
            && matches!(
                std::ffi::CStr::from_ptr(ptr as *const _).to_bytes(),
                b"GL_KHR_debug" | b"GL_ARB_debug_output"
            )
    })
}

pub fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "WINDOW_SYSTEM",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "SHADER_COMPILER",
        gl::DEBUG_SOURCE_THIRD_PARTY => "THIRD_PARTY",
        gl::DEBUG_SOURCE_APPLICATION => "APPLICATION",
        gl::DEBUG_SOURCE_OTHER => "OTHER",
        _ => "UNKNOWN",
    }
}

pub fn type_name(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "ERROR",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "DEPRECATED_BEHAVIOR",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "UNDEFINED_BEHAVIOR",
        gl::DEBUG_TYPE_PORTABILITY => "PORTABILITY",
        gl::DEBUG_TYPE_PERFORMANCE => "PERFORMANCE",
        gl::DEBUG_TYPE_OTHER => "OTHER",
        _ => "UNKNOWN",
    }
}

/// Log level for a debug message severity.
///
/// Notifications are dropped.
pub fn severity_level(severity: GLenum) -> Option<log::Level> {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => Some(log::Level::Warn),
        gl::DEBUG_SEVERITY_MEDIUM | gl::DEBUG_SEVERITY_LOW => Some(log::Level::Debug),
        gl::DEBUG_SEVERITY_NOTIFICATION => None,
        _ => Some(log::Level::Debug),
    }
}

extern "system" fn on_debug_message(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut std::ffi::c_void,
) {
    let Some(level) = severity_level(severity) else {
        return;
    };
    if message.is_null() {
        return;
    }
    let message = unsafe { std::ffi::CStr::from_ptr(message) }.to_string_lossy();
    log::log!(
        level,
        "{} source={}, type={}, id={id}: {message}",
        "[GL]".white().bold(),
        source_name(source),
        type_name(type_),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_are_dropped() {
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_NOTIFICATION), None);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_HIGH), Some(log::Level::Warn));
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_LOW), Some(log::Level::Debug));
    }

    #[test]
    fn test_names() {
        assert_eq!(source_name(gl::DEBUG_SOURCE_SHADER_COMPILER), "SHADER_COMPILER");
        assert_eq!(type_name(gl::DEBUG_TYPE_PORTABILITY), "PORTABILITY");
        assert_eq!(type_name(0), "UNKNOWN");
    }
}
