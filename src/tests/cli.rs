use pretty_assertions::assert_eq;
use std::fs;

use super::super::cli::*;

fn config(args: &[&str]) -> Result<CliConfig, CliError> {
    let matches = command()
        .try_get_matches_from(std::iter::once("shaderlink").chain(args.iter().copied()))
        .unwrap();
    config_from_matches(&matches)
}

#[test]
fn test_parse_gl_version() {
    assert_eq!(parse_gl_version("4.2").unwrap(), (4, 2));
    assert_eq!(parse_gl_version(" 3.3 ").unwrap(), (3, 3));
    assert!(parse_gl_version("4").is_err());
    assert!(parse_gl_version("4.x").is_err());
    assert!(parse_gl_version("0.9").is_err());
}

#[test]
fn test_no_stage_is_rejected() {
    assert!(matches!(config(&[]), Err(CliError::InvalidInput(_))));
}

#[test]
fn test_stage_flags_and_manifest_override() {
    let dir = std::env::temp_dir().join(format!("shaderlink-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let manifest = dir.join("program.toml");
    let fragment = dir.join("override.frag");
    fs::write(
        &manifest,
        "[vertex]\nsource = \"void main() {}\"\n\n[fragment]\nsource = \"manifest\"\n",
    )
    .unwrap();
    fs::write(&fragment, "override").unwrap();

    let config = config(&[
        manifest.to_str().unwrap(),
        "--fragment",
        fragment.to_str().unwrap(),
        "--gl-version",
        "4.6",
    ])
    .unwrap();

    assert_eq!(config.gl_version, (4, 6));
    assert_eq!(config.builder.vertex.as_deref(), Some("void main() {}"));
    assert_eq!(config.builder.fragment.as_deref(), Some("override"));
    assert_eq!(config.builder.compute, None);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_stage_file() {
    let result = config(&["--compute", "/nonexistent/shaderlink/a.comp"]);
    assert!(matches!(result, Err(CliError::Manifest(_))));
}

#[test]
fn test_default_gl_version() {
    let dir = std::env::temp_dir().join(format!("shaderlink-cli-default-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let compute = dir.join("a.comp");
    fs::write(&compute, "void main() {}").unwrap();

    let config = config(&["--compute", compute.to_str().unwrap()]).unwrap();
    assert_eq!(config.gl_version, (4, 2));

    fs::remove_dir_all(&dir).unwrap();
}
