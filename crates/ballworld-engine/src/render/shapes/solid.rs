use bytemuck::{Pod, Zeroable};

use crate::draw::{DrawCmd, DrawList};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{quad_pipeline, InstanceBuffer, QuadBuffers, ViewportUniform};

const KIND_RECT: f32 = 0.0;
const KIND_DISC: f32 = 1.0;

/// Extra logical pixels around a disc's quad so the anti-aliased edge is not clipped.
const DISC_AA_MARGIN: f32 = 1.0;

/// Renderer for `DrawCmd::Rect` and `DrawCmd::Disc`.
///
/// Both kinds share one instanced pipeline, so a single draw call keeps the
/// relative order of rects and discs exactly as recorded. Discs are shaded
/// from a signed distance with a one-pixel anti-aliased edge.
#[derive(Default)]
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    scratch: Vec<ShapeInstance>,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        collect_instances(draw_list, &mut self.scratch);
        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        let quad = self.quad.get_or_insert_with(|| QuadBuffers::new(ctx));

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));

        let Some(instance_vbo) = self.instances.upload(ctx, "ballworld shape instances", &self.scratch) else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.load_pass("ballworld shape pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, 0..self.scratch.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ballworld shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/solid.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ballworld shape bgl"),
            entries: &[ViewportUniform::layout_entry()],
        });

        let ubo = ViewportUniform::create_buffer(ctx, "ballworld shape viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ballworld shape bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        let pipeline = quad_pipeline(ctx, "ballworld shape pipeline", &shader, &bgl, ShapeInstance::layout());

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

/// Converts shape commands into GPU instances, in recording order.
fn collect_instances(draw_list: &DrawList, out: &mut Vec<ShapeInstance>) {
    out.clear();
    for cmd in draw_list.iter() {
        match cmd {
            DrawCmd::Rect { rect, color } => out.push(ShapeInstance {
                rect_min: [rect.origin.x, rect.origin.y],
                rect_max: [rect.right(), rect.bottom()],
                color: color.to_array(),
                params: [KIND_RECT, 0.0],
            }),
            DrawCmd::Disc { center, radius, color } => {
                if *radius <= 0.0 || color.a <= 0.0 {
                    continue;
                }
                let half = radius + DISC_AA_MARGIN;
                out.push(ShapeInstance {
                    rect_min: [center.x - half, center.y - half],
                    rect_max: [center.x + half, center.y + half],
                    color: color.to_array(),
                    params: [KIND_DISC, *radius],
                });
            }
            DrawCmd::Text { .. } => {}
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  rect_min  [f32; 2]   loc 1
///  offset  8  rect_max  [f32; 2]   loc 2
///  offset 16  color     [f32; 4]   loc 3  (premultiplied)
///  offset 32  params    [f32; 2]   loc 4  (.x = kind, .y = disc radius)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ShapeInstance {
    rect_min: [f32; 2],
    rect_max: [f32; 2],
    color: [f32; 4],
    params: [f32; 2],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // rect_min
        2 => Float32x2, // rect_max
        3 => Float32x4, // color
        4 => Float32x2  // params
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
