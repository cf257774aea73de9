// ShaderLink
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderlink
// SPDX-License-Identifier: GPL-3.0-or-later

mod app;
mod cli;
mod report;

use gtk::glib;

pub const APP_NAME: &str = "shaderlink";
pub const APP_ABOUT: &str = "Compile and link OpenGL shader programs and list their uniforms";
pub const APP_AUTHOR: &str = "Harlen Batagelo, hbatagelo@gmail.com";
pub const APP_ID: &str = "com.github.hbatagelo.shaderlink";
pub const APP_SEMVER: &str = "0.1.0";
pub const DEFAULT_GL_VERSION: &str = "4.2";

fn main() -> glib::ExitCode {
    let matches = cli::command().get_matches();

    if let Err(err) = app::init_logging(matches.get_flag("verbose")) {
        eprintln!("Failed to initialize logging: {err}");
    }

    match cli::config_from_matches(&matches) {
        Ok(config) => app::run(config),
        Err(err) => {
            log::error!("{err}");
            glib::ExitCode::FAILURE
        }
    }
}
