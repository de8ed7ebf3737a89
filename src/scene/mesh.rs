//! CPU-side geometry: the segmented unit box, the floor plane and the
//! grid lines.

use glam::{Vec2, Vec3};

use super::box_model::Face;

/// Vertex of the textured box.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxVertex {
    /// Object-space position on the unit box.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
    /// Texture coordinate in `[0, 1]` per face (before tiling).
    pub uv: [f32; 2],
    /// Tangent along increasing `u`; `w` is the bitangent sign.
    pub tangent: [f32; 4],
}

impl BoxVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x4,
    ];

    /// Vertex buffer layout matching `box.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Flat-colored vertex used by the floor and grid.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl ColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching `floor.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed mesh with one contiguous index range per box face.
#[derive(Debug, Clone, Default)]
pub struct BoxMesh {
    /// Vertices of all faces.
    pub vertices: Vec<BoxVertex>,
    /// Triangle-list indices of all faces.
    pub indices: Vec<u32>,
    /// Index range of each face, in [`Face::ALL`] order.
    pub face_ranges: [std::ops::Range<u32>; 6],
}

/// Unit box centered at the origin, each face split into
/// `segments x segments` quads so the height map has vertices to displace.
#[must_use]
pub fn unit_box(segments: u32) -> BoxMesh {
    let segments = segments.max(1);
    let row = segments + 1;
    let mut mesh = BoxMesh {
        vertices: Vec::with_capacity((6 * row * row) as usize),
        indices: Vec::with_capacity((36 * segments * segments) as usize),
        face_ranges: Default::default(),
    };

    for face in Face::ALL {
        let normal = face.normal();
        let (u_axis, v_axis) = face.uv_axes();
        let base = mesh.vertices.len() as u32;
        let first_index = mesh.indices.len() as u32;

        for j in 0..=segments {
            let t = j as f32 / segments as f32;
            for i in 0..=segments {
                let s = i as f32 / segments as f32;
                let position =
                    normal * 0.5 + u_axis * (s - 0.5) + v_axis * (t - 0.5);
                mesh.vertices.push(BoxVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    // Image rows run top to bottom.
                    uv: [s, 1.0 - t],
                    tangent: u_axis.extend(1.0).to_array(),
                });
            }
        }

        for j in 0..segments {
            for i in 0..segments {
                let a = base + j * row + i;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                mesh.indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }
        mesh.face_ranges[face.index()] = first_index..mesh.indices.len() as u32;
    }
    mesh
}

/// Square floor plane of edge `size` at height `y`, as two triangles
/// facing up.
#[must_use]
pub fn floor_plane(size: f32, y: f32, color: [f32; 3]) -> Vec<ColorVertex> {
    let h = size * 0.5;
    let corner = |x: f32, z: f32| ColorVertex {
        position: [x, y, z],
        color,
    };
    vec![
        corner(-h, -h),
        corner(-h, h),
        corner(h, h),
        corner(-h, -h),
        corner(h, h),
        corner(h, -h),
    ]
}

/// Grid on the `y = 0` plane as a line list: `divisions + 1` lines along
/// each axis, the two through the origin drawn in `center_color`.
#[must_use]
pub fn grid_lines(
    size: f32,
    divisions: u32,
    center_color: [f32; 3],
    color: [f32; 3],
) -> Vec<ColorVertex> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size * 0.5;
    let center = divisions / 2;
    let mut vertices = Vec::with_capacity(4 * (divisions as usize + 1));

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let c = if divisions % 2 == 0 && i == center {
            center_color
        } else {
            color
        };
        for (a, b) in [
            (Vec2::new(-half, k), Vec2::new(half, k)),
            (Vec2::new(k, -half), Vec2::new(k, half)),
        ] {
            vertices.push(ColorVertex {
                position: Vec3::new(a.x, 0.0, a.y).to_array(),
                color: c,
            });
            vertices.push(ColorVertex {
                position: Vec3::new(b.x, 0.0, b.y).to_array(),
                color: c,
            });
        }
    }
    vertices
}
