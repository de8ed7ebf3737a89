//! Ambient plus directional light shared by every pipeline (bind group 1).

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers;
use crate::options::LightingOptions;
use crate::util::color::hex_to_linear;

/// Lighting shared by the box and floor shaders.
/// NOTE: Must match the WGSL `Lighting` struct (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient color premultiplied by intensity (linear RGB).
    pub ambient: [f32; 3],
    /// 1.0 for sRGB surfaces, 1/2.2 when the shader must encode itself.
    pub output_gamma: f32,
    /// Unit vector from the scene toward the directional light.
    pub light_dir: [f32; 3],
    _pad0: f32,
    /// Directional color premultiplied by intensity (linear RGB).
    pub light_color: [f32; 3],
    _pad1: f32,
}

impl LightingUniform {
    /// Build from options. The directional light shines from its position
    /// toward the origin.
    #[must_use]
    pub fn from_options(options: &LightingOptions, srgb_surface: bool) -> Self {
        let scale = |hex: u32, intensity: f32| {
            hex_to_linear(hex).map(|c| c * intensity.max(0.0))
        };
        let light_dir = Vec3::from_array(options.directional_position)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        Self {
            ambient: scale(options.ambient_color, options.ambient_intensity),
            output_gamma: if srgb_surface { 1.0 } else { 1.0 / 2.2 },
            light_dir: light_dir.to_array(),
            _pad0: 0.0,
            light_color: scale(
                options.directional_color,
                options.directional_intensity,
            ),
            _pad1: 0.0,
        }
    }
}

/// Lighting uniform buffer and bind group (group 1).
pub struct Lighting {
    /// CPU copy of the last uploaded uniform.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Layout shared by all pipelines.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over `buffer`.
    pub bind_group: wgpu::BindGroup,
    srgb_surface: bool,
}

impl Lighting {
    /// Create the uniform for a surface of `format`.
    pub fn new(
        device: &wgpu::Device,
        options: &LightingOptions,
        format: wgpu::TextureFormat,
    ) -> Self {
        let srgb_surface = format.is_srgb();
        let uniform = LightingUniform::from_options(options, srgb_surface);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = pipeline_helpers::single_uniform_layout(
            device,
            "Lighting",
            wgpu::ShaderStages::FRAGMENT,
        );
        let bind_group = pipeline_helpers::single_uniform_bind_group(
            device, "Lighting", &layout, &buffer,
        );
        Self {
            uniform,
            buffer,
            layout,
            bind_group,
            srgb_surface,
        }
    }

    /// Re-upload after the lighting options changed.
    pub fn update(&mut self, queue: &wgpu::Queue, options: &LightingOptions) {
        self.uniform = LightingUniform::from_options(options, self.srgb_surface);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_48_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn default_light_points_from_its_position() {
        let u = LightingUniform::from_options(&LightingOptions::default(), true);
        let expected = Vec3::new(4.0, 5.0, -2.0).normalize();
        assert!(Vec3::from_array(u.light_dir).distance(expected) < 1e-6);
        assert_eq!(u.ambient, [1.0; 3]);
        assert_eq!(u.output_gamma, 1.0);
    }

    #[test]
    fn intensity_scales_color_and_degenerate_position_falls_back() {
        let options = LightingOptions {
            directional_intensity: 0.5,
            directional_position: [0.0; 3],
            ..LightingOptions::default()
        };
        let u = LightingUniform::from_options(&options, false);
        assert_eq!(u.light_color, [0.5; 3]);
        assert_eq!(u.light_dir, [0.0, 1.0, 0.0]);
        assert!((u.output_gamma - 1.0 / 2.2).abs() < 1e-6);
    }
}
