use pretty_assertions::assert_eq;

use super::super::{builder::ShaderProgramBuilder, ShaderProgram};
use super::stub_driver::StubDriver;

fn build(driver: &StubDriver) -> ShaderProgram {
    ShaderProgramBuilder::new()
        .vertex("uniform mat4 MVP; void main() {}")
        .fragment("void main() {}")
        .build(driver)
        .unwrap()
}

#[test]
fn test_use_program() {
    let driver = StubDriver::new();
    let program = build(&driver);
    assert_eq!(driver.current_program(), None);

    program.use_program(&driver);
    assert_eq!(driver.current_program(), Some(program.id()));
}

#[test]
fn test_use_with_runs_block_after_activation() {
    let driver = StubDriver::new();
    let program = build(&driver);

    let location = program.use_with(&driver, |active| {
        assert_eq!(driver.current_program(), Some(active.id()));
        active.uniform("MVP").map(|u| u.location())
    });

    assert_eq!(location, Some(0));
    let calls = driver.calls();
    assert_eq!(calls.last().map(String::as_str), Some("use_program"));
}

#[test]
fn test_delete_releases_program() {
    let driver = StubDriver::new();
    let program = build(&driver);
    program.use_program(&driver);
    assert_eq!(driver.live_programs(), 1);

    program.delete(&driver);
    assert_eq!(driver.live_programs(), 0);
    assert_eq!(driver.current_program(), None);
}

#[test]
fn test_unknown_uniform() {
    let driver = StubDriver::new();
    let program = build(&driver);
    assert_eq!(program.uniform("mvp"), None);
}
