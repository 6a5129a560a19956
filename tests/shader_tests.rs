//! Validate the particle shader with naga, the same front end wgpu uses,
//! so a WGSL typo fails in CI instead of at first window open.

use naga::valid::{Capabilities, ValidationFlags, Validator};

#[test]
fn test_particle_shader_parses_and_validates() {
    let module = naga::front::wgsl::parse_str(tannen::shader::SHADER_SOURCE)
        .expect("shader must parse as WGSL");

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .expect("shader must pass validation");
}

#[test]
fn test_shader_exposes_both_entry_points() {
    let module = naga::front::wgsl::parse_str(tannen::shader::SHADER_SOURCE).unwrap();
    let names: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
