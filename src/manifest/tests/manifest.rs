use pretty_assertions::assert_eq;
use std::{fs, path::PathBuf};

use super::super::*;
use crate::program::shader::ShaderStage;

/// Fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shaderlink-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_inline_sources_with_prelude() {
    let manifest = ProgramManifest::from_toml_str(
        r##"
prelude = "#version 420 core\n"

[vertex]
source = "void main() {}"

[compute]
source = "layout(local_size_x = 1) in;\nvoid main() {}"
"##,
    )
    .unwrap();

    let builder = manifest.into_builder().unwrap();
    assert_eq!(
        builder.vertex.as_deref(),
        Some("#version 420 core\nvoid main() {}")
    );
    assert_eq!(
        builder.compute.as_deref(),
        Some("#version 420 core\nlayout(local_size_x = 1) in;\nvoid main() {}")
    );
    assert_eq!(builder.fragment, None);
}

#[test]
fn test_paths_resolve_against_manifest_dir() {
    let dir = scratch_dir("paths");
    fs::create_dir_all(dir.join("shaders")).unwrap();
    fs::write(dir.join("shaders/quad.vert"), "void main() { gl_Position = vec4(0); }").unwrap();
    fs::write(
        dir.join("program.toml"),
        "[vertex]\npath = \"shaders/quad.vert\"\n\n[fragment]\nsource = \"void main() {}\"\n",
    )
    .unwrap();

    let manifest = ProgramManifest::from_file(&dir.join("program.toml")).unwrap();
    assert_eq!(manifest.base_dir(), dir.as_path());

    let builder = manifest.into_builder().unwrap();
    assert_eq!(
        builder.sources().map(|(stage, _)| stage).collect::<Vec<_>>(),
        vec![ShaderStage::Vertex, ShaderStage::Fragment]
    );
    assert_eq!(
        builder.vertex.as_deref(),
        Some("void main() { gl_Position = vec4(0); }")
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_stage_file() {
    let dir = scratch_dir("missing");
    fs::write(dir.join("program.toml"), "[geometry]\npath = \"nope.geom\"\n").unwrap();

    let manifest = ProgramManifest::from_file(&dir.join("program.toml")).unwrap();
    let err = manifest.into_builder().unwrap_err();
    match err {
        ManifestError::Io { path, .. } => assert_eq!(path, dir.join("nope.geom")),
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_stage_requires_exactly_one_origin() {
    let both = ProgramManifest::from_toml_str(
        "[fragment]\npath = \"a.frag\"\nsource = \"void main() {}\"\n",
    )
    .unwrap();
    assert!(matches!(
        both.into_builder(),
        Err(ManifestError::InvalidStage(ShaderStage::Fragment, _))
    ));

    let neither = ProgramManifest::from_toml_str("[tess_control]\n").unwrap();
    assert!(matches!(
        neither.into_builder(),
        Err(ManifestError::InvalidStage(ShaderStage::TessControl, _))
    ));
}

#[test]
fn test_unknown_keys_rejected() {
    let result = ProgramManifest::from_toml_str("[pixel]\nsource = \"void main() {}\"\n");
    assert!(matches!(result, Err(ManifestError::TomlParse(_))));

    let result = ProgramManifest::from_toml_str("[vertex]\nfile = \"a.vert\"\n");
    assert!(matches!(result, Err(ManifestError::TomlParse(_))));
}

#[test]
fn test_empty_manifest_yields_empty_builder() {
    let manifest = ProgramManifest::from_toml_str("").unwrap();
    assert!(manifest.into_builder().unwrap().is_empty());
}

#[test]
fn test_every_stage_table_is_read() {
    let manifest = ProgramManifest::from_toml_str(
        r#"
[vertex]
source = "v"
[fragment]
source = "f"
[tess_control]
source = "tc"
[tess_evaluation]
source = "te"
[geometry]
path = "g.geom"
[compute]
source = "c"
"#,
    )
    .unwrap();

    for stage in ShaderStage::ALL {
        assert!(manifest.entry(stage).is_some(), "{stage} entry missing");
    }
    assert_eq!(
        manifest.entry(ShaderStage::Geometry),
        Some(&StageEntry {
            path: Some(PathBuf::from("g.geom")),
            source: None,
        })
    );
    assert_eq!(
        manifest.tess_evaluation.as_ref().and_then(|e| e.source.as_deref()),
        Some("te")
    );
}
