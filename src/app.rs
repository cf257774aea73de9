// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

//! GTK bootstrap providing the GL context the build runs against.
//!
//! A hidden window with a single [`gtk::GLArea`] is realized, which creates
//! and makes current a context of the requested version. The program is
//! built, reported and deleted from the realize handler, then the
//! application quits.

use function_name::named;
use gtk::{gio, glib, prelude::*};
use owo_colors::OwoColorize;
use shaderlink::{GlDriver, ProgramError};
use std::{cell::Cell, io::IsTerminal, rc::Rc};
use thiserror::Error;

use crate::{cli::CliConfig, report, *};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenGL context error: {0}")]
    Context(String),

    #[error("Failed to load GL functions: {0}")]
    GlLoad(String),

    #[error(transparent)]
    Program(#[from] ProgramError),
}

pub fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        log::LevelFilter::Trace
    } else if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    simple_logger::SimpleLogger::new().with_level(level).init()
}

/// Runs the GTK application until the program has been built.
///
/// Returns a failure exit code if the context could not be created or
/// the build failed.
pub fn run(config: CliConfig) -> glib::ExitCode {
    let app = gtk::Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    let config = Rc::new(config);
    let succeeded = Rc::new(Cell::new(false));

    app.connect_activate({
        let succeeded = succeeded.clone();
        move |app| activate(app, &config, &succeeded)
    });

    // Arguments were already consumed by clap.
    let status = app.run_with_args::<&str>(&[]);

    if succeeded.get() {
        status
    } else {
        glib::ExitCode::FAILURE
    }
}

fn activate(app: &gtk::Application, config: &Rc<CliConfig>, succeeded: &Rc<Cell<bool>>) {
    let area = gtk::GLArea::new();
    let (major, minor) = config.gl_version;
    area.set_required_version(major, minor);
    area.set_has_depth_buffer(false);
    area.set_has_stencil_buffer(false);
    area.set_auto_render(false);

    area.connect_realize({
        let config = config.clone();
        let succeeded = succeeded.clone();
        move |area| match on_realize(area, &config) {
            Ok(()) => succeeded.set(true),
            Err(err) => log::error!("{err}"),
        }
    });

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title(APP_NAME)
        .child(&area)
        .build();

    // Realizing without presenting keeps the window off screen.
    area.realize();

    window.destroy();
    app.quit();
}

/// Makes the area's context current and builds the configured program.
#[named]
fn on_realize(area: &gtk::GLArea, config: &CliConfig) -> Result<(), AppError> {
    log::debug!("{}", function_name!().white().bold());

    if let Some(err) = area.error() {
        let (major, minor) = area.required_version();
        return Err(AppError::Context(format!(
            "{err} (OpenGL {major}.{minor} required)"
        )));
    }

    let gl_context = area
        .context()
        .ok_or_else(|| AppError::Context("no context created".to_string()))?;
    gl_context.make_current();

    let (major, minor) = gl_context.version();
    log::debug!("GL version: {major}.{minor}");

    load_gl_functions().map_err(|err| AppError::GlLoad(err.to_string()))?;

    #[cfg(debug_assertions)]
    unsafe {
        shaderlink::program::debug_output::enable();
    }

    // The context was made current above and stays current until the
    // realize handler returns.
    let driver = unsafe { GlDriver::new() };
    let program = config.builder.build(&driver)?;

    print!(
        "{}",
        report::format_program(
            program.id(),
            program.uniforms(),
            std::io::stdout().is_terminal()
        )
    );

    program.delete(&driver);
    Ok(())
}

/// Loads OpenGL function pointers via libepoxy.
///
/// GTK does not expose GL symbol loading, so epoxy's dispatch table is
/// resolved from the shared library GTK itself links against.
fn load_gl_functions() -> Result<(), Box<dyn std::error::Error>> {
    let library = unsafe {
        libloading::os::unix::Library::new("libepoxy.so.0")
            .map_err(|err| format!("Failed to load libepoxy.so.0: {err}"))?
    };

    epoxy::load_with(|name| {
        unsafe { library.get::<_>(name.as_bytes()) }
            .map(|symbol| *symbol)
            .unwrap_or(std::ptr::null())
    });

    gl::load_with(epoxy::get_proc_addr);

    if !gl::CreateProgram::is_loaded() || !gl::GetActiveUniform::is_loaded() {
        return Err("program object entry points not available".into());
    }

    Ok(())
}
