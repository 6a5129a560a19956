//! WGSL source for the instanced particle pass.
//!
//! One pipeline draws every category: each instance carries a shape id that
//! selects the fragment treatment — soft round sprite (foliage, snow),
//! shaded disc (ornaments, crown), or textured photo tile. Instance
//! attribute layout must match `render::RawInstance`.

/// Fragment shape ids, written into the instance stream by the renderer.
pub const SHAPE_SOFT: f32 = 0.0;
pub const SHAPE_DISC: f32 = 1.0;
pub const SHAPE_PHOTO: f32 = 2.0;

pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var photo_textures: texture_2d_array<f32>;
@group(1) @binding(1)
var photo_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) shape: f32,
    @location(3) layer: f32,
};

// Rotate v by the unit quaternion q.
fn quat_rotate(q: vec4<f32>, v: vec3<f32>) -> vec3<f32> {
    let t = 2.0 * cross(q.xyz, v);
    return v + q.w * t + cross(q.xyz, t);
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) inst_pos_shape: vec4<f32>,
    @location(1) inst_rotation: vec4<f32>,
    @location(2) inst_scale_layer: vec4<f32>,
    @location(3) inst_color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let local = vec3<f32>(quad_pos * inst_scale_layer.xy, 0.0);
    let world = inst_pos_shape.xyz + quat_rotate(inst_rotation, local);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.uv = quad_pos;
    out.color = inst_color;
    out.shape = inst_pos_shape.w;
    out.layer = inst_scale_layer.z;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);

    // Sample up front: textureSample requires uniform control flow, so it
    // cannot sit behind the per-shape branches below.
    let tex_uv = vec2<f32>(in.uv.x * 0.5 + 0.5, 0.5 - in.uv.y * 0.5);
    let sampled = textureSample(photo_textures, photo_sampler, tex_uv, i32(max(in.layer, 0.0)));

    // Soft round sprite: feathered edge, premixed alpha.
    if in.shape < 0.5 {
        if dist > 1.0 {
            discard;
        }
        let alpha = (1.0 - smoothstep(0.5, 1.0, dist)) * in.color.a;
        return vec4<f32>(in.color.rgb, alpha);
    }

    // Shaded disc: fake-sphere normal, single key light.
    if in.shape < 1.5 {
        if dist > 1.0 {
            discard;
        }
        let n = vec3<f32>(in.uv, sqrt(max(0.0, 1.0 - dist * dist)));
        let light = normalize(vec3<f32>(0.4, 0.8, 0.6));
        let diffuse = 0.35 + 0.65 * max(dot(n, light), 0.0);
        let spec = pow(max(dot(n, normalize(light + vec3<f32>(0.0, 0.0, 1.0))), 0.0), 24.0);
        return vec4<f32>(in.color.rgb * diffuse + vec3<f32>(spec * 0.4), in.color.a);
    }

    // Photo tile: white border, texture inside, plain card when untextured.
    let border = max(abs(in.uv.x), abs(in.uv.y));
    if border > 0.86 {
        return vec4<f32>(0.95, 0.94, 0.92, in.color.a);
    }
    if in.layer < 0.0 {
        return vec4<f32>(0.22, 0.2, 0.19, in.color.a);
    }
    return vec4<f32>(sampled.rgb * in.color.rgb, in.color.a);
}
"#;
