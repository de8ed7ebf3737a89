//! Textured wood box.
//!
//! One indexed mesh (the segmented unit box) drawn face by face: every
//! face shares the material maps but has its own tiling uniform, which is
//! how the six faces carry independent repeat factors.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util::{self, MeshPipelineDesc};
use crate::assets::{TextureChannel, TextureSet};
use crate::gpu::pipeline_helpers;
use crate::gpu::texture::MaterialTexture;
use crate::options::ModelOptions;
use crate::scene::box_model::{BoxModel, Face};
use crate::scene::mesh::{unit_box, BoxVertex};

/// Model transform of the box.
/// NOTE: Must match the WGSL `Model` struct (128 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Object to world.
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals and tangents.
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Uniform for `model`'s current transform.
    #[must_use]
    pub fn from_model(model: &BoxModel) -> Self {
        let m = model.model_matrix();
        Self {
            model: m.to_cols_array_2d(),
            normal: m.inverse().transpose().to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            normal: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// Per-face material parameters.
/// NOTE: Must match the WGSL `FaceParams` struct (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FaceUniform {
    /// Texture repeat along the face's u and v.
    pub repeat: [f32; 2],
    /// Strength of the ambient-occlusion map.
    pub ao_intensity: f32,
    /// Height-map displacement along the normal, in object units.
    pub displacement_scale: f32,
}

impl FaceUniform {
    /// Uniforms of all six faces in [`Face::ALL`] order.
    #[must_use]
    pub fn for_model(
        model: &BoxModel,
        ao_intensity: f32,
        displacement_scale: f32,
    ) -> [Self; 6] {
        Face::ALL.map(|face| Self {
            repeat: model.tiling().repeat(face).to_array(),
            ao_intensity,
            displacement_scale,
        })
    }
}

struct FaceBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    indices: std::ops::Range<u32>,
}

/// Pipeline and GPU resources of the box.
pub struct BoxRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    faces: Vec<FaceBinding>,
    // Bound through `material_bind_group`; kept alive with it.
    _textures: Vec<MaterialTexture>,
}

impl BoxRenderer {
    /// Upload the mesh and material maps and build the pipeline.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        textures: &TextureSet,
        model: &BoxModel,
        options: &ModelOptions,
    ) -> Self {
        let mesh = unit_box(options.segments);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Model Buffer"),
            contents: bytemuck::cast_slice(&[ModelUniform::from_model(model)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let textures: Vec<MaterialTexture> = TextureChannel::ALL
            .iter()
            .map(|&channel| {
                MaterialTexture::from_image(
                    device,
                    queue,
                    textures.image(channel),
                    channel.is_color(),
                    &format!("Wood {}", channel.label()),
                )
            })
            .collect();
        let sampler = pipeline_helpers::mirror_repeat_sampler(device, "Wood Sampler");

        let material_layout = material_layout(device);
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: model_buffer.as_entire_binding(),
        }];
        entries.extend(textures.iter().zip(1u32..).map(|(texture, binding)| {
            wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            }
        }));
        entries.push(wgpu::BindGroupEntry {
            binding: 7,
            resource: wgpu::BindingResource::Sampler(&sampler),
        });
        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Wood Material Bind Group"),
            layout: &material_layout,
            entries: &entries,
        });

        let face_layout = pipeline_helpers::single_uniform_layout(
            device,
            "Box Face",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let face_uniforms = FaceUniform::for_model(
            model,
            options.ao_intensity,
            options.displacement_scale,
        );
        let faces = Face::ALL
            .iter()
            .map(|face| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Box Face Buffer"),
                    contents: bytemuck::cast_slice(&[face_uniforms[face.index()]]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = pipeline_helpers::single_uniform_bind_group(
                    device,
                    "Box Face",
                    &face_layout,
                    &buffer,
                );
                FaceBinding {
                    buffer,
                    bind_group,
                    indices: mesh.face_ranges[face.index()].clone(),
                }
            })
            .collect();

        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/box.wgsl"));
        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "Box Pipeline",
                shader: &shader,
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Double-sided, like the wood panels seen from inside.
                cull_mode: None,
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    &material_layout,
                    &face_layout,
                ],
                vertex_layout: BoxVertex::layout(),
                format,
            },
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            model_buffer,
            material_bind_group,
            faces,
            _textures: textures,
        }
    }

    /// Upload the model transform and per-face tiling after a resize.
    pub fn update_model(
        &self,
        queue: &wgpu::Queue,
        model: &BoxModel,
        ao_intensity: f32,
        displacement_scale: f32,
    ) {
        queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&[ModelUniform::from_model(model)]),
        );
        let uniforms = FaceUniform::for_model(model, ao_intensity, displacement_scale);
        for (face, uniform) in self.faces.iter().zip(uniforms) {
            queue.write_buffer(&face.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }

    /// Draw the six faces. Camera and lighting must already be bound at
    /// groups 0 and 1.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(2, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        for face in &self.faces {
            render_pass.set_bind_group(3, &face.bind_group, &[]);
            render_pass.draw_indexed(face.indices.clone(), 0, 0..1);
        }
    }
}

fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let fragment = wgpu::ShaderStages::FRAGMENT;
    let both = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
    let mut entries = vec![pipeline_helpers::uniform_buffer(0, both)];
    entries.extend(TextureChannel::ALL.iter().zip(1u32..).map(|(&channel, binding)| {
        // The height map is read while displacing vertices.
        let visibility = if channel == TextureChannel::Displacement {
            wgpu::ShaderStages::VERTEX
        } else {
            fragment
        };
        pipeline_helpers::texture_2d(binding, visibility)
    }));
    entries.push(pipeline_helpers::filtering_sampler(7, both));
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Wood Material Bind Group Layout"),
        entries: &entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_shader() {
        assert_eq!(size_of::<ModelUniform>(), 128);
        assert_eq!(size_of::<FaceUniform>(), 16);
    }

    #[test]
    fn face_uniforms_follow_tiling() {
        let mut model = BoxModel::new(&ModelOptions::default());
        let _ = model.set_dimensions(4.0, 3.0).unwrap();
        let faces = FaceUniform::for_model(&model, 0.4, 0.001);
        assert_eq!(faces[Face::PosX.index()].repeat, [3.0, 1.0]);
        assert_eq!(faces[Face::NegY.index()].repeat, [4.0, 3.0]);
        assert_eq!(faces[Face::NegZ.index()].repeat, [4.0, 1.0]);
        assert!(faces.iter().all(|f| f.ao_intensity == 0.4));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let mut model = BoxModel::new(&ModelOptions::default());
        let _ = model.set_dimensions(5.0, 2.0).unwrap();
        let u = ModelUniform::from_model(&model);
        let normal = Mat4::from_cols_array_2d(&u.normal);
        let n = normal.transform_vector3(glam::Vec3::X).normalize();
        assert!(n.distance(glam::Vec3::X) < 1e-6);
        assert_ne!(u.model, ModelUniform::default().model);
    }
}
