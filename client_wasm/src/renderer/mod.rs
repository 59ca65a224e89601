pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use crate::camera::Camera;
use crate::mesh::{create_circle, create_rectangle, Mesh};
use crate::scene::Scene;
use resources::SceneBuffers;
use wgpu::*;

const CIRCLE_SEGMENTS: u16 = 32;

pub struct Renderer {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub size: (u32, u32),
    pub camera: Camera,

    pub sprite_pipeline: RenderPipeline,
    pub camera_bind_group: BindGroup,

    pub buffers: SceneBuffers,
    pub meshes: (Mesh, Mesh), // rect, circle
}

impl Renderer {
    /// `arena` is the playfield size in game units, stretched over the canvas
    pub async fn new(canvas: web_sys::HtmlCanvasElement, arena: (f32, f32)) -> Result<Self, String> {
        let ctx = init::init_wgpu(canvas).await?;
        let camera = Camera::arena(arena.0, arena.1);

        let buffers = resources::create_buffers(&ctx.device, &camera);
        let pipes = pipeline::create_pipelines(&ctx.device, ctx.config.format);

        let (rect_vertices, rect_indices) = create_rectangle();
        let rect_mesh = Mesh::new(&ctx.device, "Rect", &rect_vertices, &rect_indices);
        let (circle_vertices, circle_indices) = create_circle(CIRCLE_SEGMENTS);
        let circle_mesh = Mesh::new(&ctx.device, "Circle", &circle_vertices, &circle_indices);

        let camera_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipes.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffers.camera.as_entire_binding(),
            }],
        });

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            size: ctx.size,
            camera,
            sprite_pipeline: pipes.sprite_pipeline,
            camera_bind_group,
            buffers,
            meshes: (rect_mesh, circle_mesh),
        })
    }

    pub fn draw(&mut self, scene: &Scene) -> Result<(), String> {
        draw::draw_frame(self, scene)
    }
}
