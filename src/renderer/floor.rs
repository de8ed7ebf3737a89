//! Floor plane and grid helper under the box.

use wgpu::util::DeviceExt;

use super::pipeline_util::{self, MeshPipelineDesc};
use crate::options::FloorOptions;
use crate::scene::mesh::{floor_plane, grid_lines, ColorVertex};
use crate::util::color::hex_to_linear;

struct FloorMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl FloorMesh {
    fn new(device: &wgpu::Device, label: &str, vertices: &[ColorVertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// Plane (triangles) and grid (lines), each with its own pipeline.
pub struct FloorRenderer {
    plane_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    plane: FloorMesh,
    grid: FloorMesh,
    show_floor: bool,
    show_grid: bool,
}

impl FloorRenderer {
    /// Build both pipelines and the initial geometry.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        options: &FloorOptions,
    ) -> Self {
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/floor.wgsl"));
        let layouts = [camera_layout, lighting_layout];
        let pipeline = |label, topology| {
            pipeline_util::create_mesh_pipeline(
                device,
                MeshPipelineDesc {
                    label,
                    shader: &shader,
                    topology,
                    cull_mode: None,
                    bind_group_layouts: &layouts,
                    vertex_layout: ColorVertex::layout(),
                    format,
                },
            )
        };
        // The plane sits just below the grid, so both stay visible.
        let plane_pipeline =
            pipeline("Floor Plane Pipeline", wgpu::PrimitiveTopology::TriangleList);
        let grid_pipeline =
            pipeline("Floor Grid Pipeline", wgpu::PrimitiveTopology::LineList);

        let (plane, grid) = build_meshes(device, options);
        Self {
            plane_pipeline,
            grid_pipeline,
            plane,
            grid,
            show_floor: options.show_floor,
            show_grid: options.show_grid,
        }
    }

    /// Rebuild geometry after the floor options changed.
    pub fn apply_options(&mut self, device: &wgpu::Device, options: &FloorOptions) {
        let (plane, grid) = build_meshes(device, options);
        self.plane = plane;
        self.grid = grid;
        self.show_floor = options.show_floor;
        self.show_grid = options.show_grid;
    }

    /// Draw plane then grid. Camera and lighting must already be bound at
    /// groups 0 and 1.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.show_floor && self.plane.vertex_count > 0 {
            render_pass.set_pipeline(&self.plane_pipeline);
            render_pass.set_vertex_buffer(0, self.plane.buffer.slice(..));
            render_pass.draw(0..self.plane.vertex_count, 0..1);
        }
        if self.show_grid && self.grid.vertex_count > 0 {
            render_pass.set_pipeline(&self.grid_pipeline);
            render_pass.set_vertex_buffer(0, self.grid.buffer.slice(..));
            render_pass.draw(0..self.grid.vertex_count, 0..1);
        }
    }
}

fn build_meshes(device: &wgpu::Device, options: &FloorOptions) -> (FloorMesh, FloorMesh) {
    let plane = floor_plane(
        options.size,
        options.floor_height,
        hex_to_linear(options.floor_color),
    );
    let grid = grid_lines(
        options.size,
        options.divisions,
        hex_to_linear(options.center_line_color),
        hex_to_linear(options.grid_color),
    );
    (
        FloorMesh::new(device, "Floor Plane Vertices", &plane),
        FloorMesh::new(device, "Floor Grid Vertices", &grid),
    )
}
