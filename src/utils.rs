use bytemuck::NoUninit;
use wgpu::util::DeviceExt;

/// Vertex of the textured cube demo: position + texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

/// Position-only vertex for the flat rectangle demo.
#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct FlatVertex {
    pub pos: [f32; 3],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh<V: NoUninit> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V: NoUninit> Mesh<V> {
    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Unit cube centered on the origin: 6 faces, 2 triangles each, with the
/// texture repeated once per face. Vertices are unshared so the indices are
/// just sequential.
pub fn create_cube_mesh() -> Mesh<Vertex> {
    let vertices = vec![
        // back face
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 0.0] },
        Vertex { pos: [0.5, -0.5, -0.5], uv: [1.0, 0.0] },
        Vertex { pos: [0.5, 0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [0.5, 0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [-0.5, 0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 0.0] },
        // front face
        Vertex { pos: [-0.5, -0.5, 0.5], uv: [0.0, 0.0] },
        Vertex { pos: [0.5, -0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 1.0] },
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 1.0] },
        Vertex { pos: [-0.5, 0.5, 0.5], uv: [0.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, 0.5], uv: [0.0, 0.0] },
        // left face
        Vertex { pos: [-0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [-0.5, 0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, 0.5], uv: [0.0, 0.0] },
        Vertex { pos: [-0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        // right face
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [0.5, 0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [0.5, -0.5, 0.5], uv: [0.0, 0.0] },
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        // bottom face
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [0.5, -0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [0.5, -0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [0.5, -0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [-0.5, -0.5, 0.5], uv: [0.0, 0.0] },
        Vertex { pos: [-0.5, -0.5, -0.5], uv: [0.0, 1.0] },
        // top face
        Vertex { pos: [-0.5, 0.5, -0.5], uv: [0.0, 1.0] },
        Vertex { pos: [0.5, 0.5, -0.5], uv: [1.0, 1.0] },
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [0.5, 0.5, 0.5], uv: [1.0, 0.0] },
        Vertex { pos: [-0.5, 0.5, 0.5], uv: [0.0, 0.0] },
        Vertex { pos: [-0.5, 0.5, -0.5], uv: [0.0, 1.0] },
    ];
    let indices = (0..vertices.len() as u32).collect();

    Mesh { vertices, indices }
}

/// Rectangle spanning half the screen in clip space, two indexed triangles.
pub fn create_rect_mesh() -> Mesh<FlatVertex> {
    let vertices = vec![
        FlatVertex { pos: [0.5, 0.5, 0.0] },   // top right
        FlatVertex { pos: [0.5, -0.5, 0.0] },  // bottom right
        FlatVertex { pos: [-0.5, -0.5, 0.0] }, // bottom left
        FlatVertex { pos: [-0.5, 0.5, 0.0] },  // top left
    ];
    let indices = vec![0, 1, 3, 1, 2, 3];

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_mesh_shape() {
        let mesh = create_cube_mesh();
        assert_eq!(mesh.vertices.len(), 36, "6 faces of 2 triangles");
        assert_eq!(mesh.indices.len(), 36);
        // All positions on the unit cube surface
        for v in &mesh.vertices {
            for c in v.pos {
                assert!(c == 0.5 || c == -0.5);
            }
        }
    }

    #[test]
    fn test_rect_mesh_shape() {
        let mesh = create_rect_mesh();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6, "two triangles");
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
