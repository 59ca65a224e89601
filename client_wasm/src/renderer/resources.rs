use crate::camera::{Camera, CameraUniform};
use crate::scene::Sprite;
use wgpu::util::DeviceExt;
use wgpu::*;

/// Upper bounds on sprites per frame, per mesh
pub const MAX_RECTS: usize = 256;
pub const MAX_ELLIPSES: usize = 64;

/// Instance data for rendering (matches shader InstanceInput).
/// Must use `repr(C)` and `bytemuck` to safely cast to raw bytes for the GPU buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub transform: [f32; 4], // centre x, centre y, width, height
    pub tint: [f32; 4],      // rgba
}

impl From<&Sprite> for InstanceData {
    fn from(sprite: &Sprite) -> Self {
        Self {
            transform: [sprite.center.x, sprite.center.y, sprite.size.x, sprite.size.y],
            tint: sprite.color,
        }
    }
}

pub struct SceneBuffers {
    pub camera: Buffer,
    pub rects: Buffer,
    pub ellipses: Buffer,
}

fn instance_buffer(device: &Device, label: &str, capacity: usize) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size: (capacity * std::mem::size_of::<InstanceData>()) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub fn create_buffers(device: &Device, camera: &Camera) -> SceneBuffers {
    let mut camera_uniform = CameraUniform::new();
    camera_uniform.update_view_proj(camera);

    let camera_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[camera_uniform]),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    SceneBuffers {
        camera: camera_buffer,
        rects: instance_buffer(device, "Rect Instance Buffer", MAX_RECTS),
        ellipses: instance_buffer(device, "Ellipse Instance Buffer", MAX_ELLIPSES),
    }
}
