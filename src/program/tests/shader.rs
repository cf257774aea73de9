use pretty_assertions::assert_eq;

use super::super::shader::*;

#[test]
fn test_stage_order_matches_declaration() {
    let mut sorted = ShaderStage::ALL;
    sorted.sort();
    assert_eq!(sorted, ShaderStage::ALL);
    assert_eq!(ShaderStage::ALL.len(), ShaderStage::COUNT);
    assert_eq!(ShaderStage::ALL[0], ShaderStage::Vertex);
    assert_eq!(ShaderStage::ALL[ShaderStage::COUNT - 1], ShaderStage::Compute);
}

#[test]
fn test_stage_names_and_enums() {
    let names: Vec<_> = ShaderStage::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            "vertex",
            "fragment",
            "tessellation control",
            "tessellation evaluation",
            "geometry",
            "compute",
        ]
    );
    assert_eq!(ShaderStage::TessControl.gl_enum(), gl::TESS_CONTROL_SHADER);
    assert_eq!(ShaderStage::Compute.gl_enum(), gl::COMPUTE_SHADER);
}
