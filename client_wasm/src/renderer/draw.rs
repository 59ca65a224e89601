use super::resources::{InstanceData, MAX_ELLIPSES, MAX_RECTS};
use super::Renderer;
use crate::mesh::Mesh;
use crate::scene::{Scene, Shape};
use wgpu::*;

pub fn draw_frame(renderer: &mut Renderer, scene: &Scene) -> Result<(), String> {
    let rects = instances(scene, Shape::Rect, MAX_RECTS);
    let ellipses = instances(scene, Shape::Ellipse, MAX_ELLIPSES);
    renderer
        .queue
        .write_buffer(&renderer.buffers.rects, 0, bytemuck::cast_slice(&rects));
    renderer
        .queue
        .write_buffer(&renderer.buffers.ellipses, 0, bytemuck::cast_slice(&ellipses));

    let output = renderer
        .surface
        .get_current_texture()
        .map_err(|e| format!("Failed to get current texture: {:?}", e))?;
    let view = output.texture.create_view(&TextureViewDescriptor::default());
    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    let [r, g, b, a] = scene.clear_color.map(f64::from);
    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color { r, g, b, a }),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&renderer.sprite_pipeline);
        pass.set_bind_group(0, &renderer.camera_bind_group, &[]);
        // Ellipses over the centre line
        draw_batch(&mut pass, &renderer.meshes.0, &renderer.buffers.rects, rects.len());
        draw_batch(
            &mut pass,
            &renderer.meshes.1,
            &renderer.buffers.ellipses,
            ellipses.len(),
        );
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}

fn instances(scene: &Scene, shape: Shape, cap: usize) -> Vec<InstanceData> {
    scene.of_shape(shape).take(cap).map(InstanceData::from).collect()
}

fn draw_batch(pass: &mut RenderPass<'_>, mesh: &Mesh, instances: &Buffer, count: usize) {
    if count == 0 {
        return;
    }
    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    pass.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint16);
    pass.set_vertex_buffer(1, instances.slice(..));
    pass.draw_indexed(0..mesh.index_count, 0, 0..count as u32);
}
