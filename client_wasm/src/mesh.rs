//! Unit meshes for the 2D sprites
//!
//! Both meshes span -0.5..0.5 so an instance transform of
//! (centre, size) places them directly.

/// Vertex data for meshes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    fn at(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }
}

/// Unit square as two triangles
pub fn create_rectangle() -> (Vec<Vertex>, Vec<u16>) {
    let vertices = vec![
        Vertex::at(-0.5, -0.5),
        Vertex::at(0.5, -0.5),
        Vertex::at(0.5, 0.5),
        Vertex::at(-0.5, 0.5),
    ];
    (vertices, vec![0, 1, 2, 2, 3, 0])
}

/// Unit-diameter disc as a triangle fan around the centre vertex
pub fn create_circle(segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments as usize + 1);
    vertices.push(Vertex::at(0.0, 0.0));
    for i in 0..segments {
        let angle = std::f32::consts::TAU * i as f32 / segments as f32;
        vertices.push(Vertex::at(0.5 * angle.cos(), 0.5 * angle.sin()));
    }

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        indices.extend([0, 1 + i, 1 + (i + 1) % segments]);
    }
    (vertices, indices)
}

/// Mesh data with GPU buffers
#[cfg(target_arch = "wasm32")]
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[cfg(target_arch = "wasm32")]
impl Mesh {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u16]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_spans_unit_square() {
        let (vertices, indices) = create_rectangle();
        assert_eq!(indices.len(), 6);
        for v in &vertices {
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[1].abs(), 0.5);
        }
    }

    #[test]
    fn test_circle_fan() {
        let (vertices, indices) = create_circle(32);
        assert_eq!(vertices.len(), 33);
        assert_eq!(indices.len(), 96);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        for v in &vertices[1..] {
            let r = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
        // Last triangle closes back onto the first rim vertex
        assert_eq!(&indices[93..], &[0, 32, 1]);
    }
}
