use fnv::FnvHashMap;
use smallvec::SmallVec;
use wgpu::util::DeviceExt;

use super::helpers::{create_depth_view, make_scene_pipeline, uniform_layout};
use super::{pack_frame, pack_object, physical_size, FrameRenderer, FrameUniforms, ObjectUniforms};
use crate::camera::SceneCamera;
use crate::geometry::{Geometry, Shape};
use crate::scene::{Mesh, Scene};

struct GpuGeometry {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// wgpu forward renderer shared by the web and native front-ends.
pub struct GpuRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    object_bgl: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_capacity: usize,

    geometries: FnvHashMap<Shape, GpuGeometry>,

    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl<'w> GpuRenderer<'w> {
    /// `width`/`height` are logical pixels; the surface is configured at
    /// `pixel_ratio` times that.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        pixel_ratio: f64,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        if !format.is_srgb() {
            log::warn!("no sRGB surface format, colours will look dark: {:?}", format);
        }
        let (pw, ph) = physical_size(width, height, pixel_ratio);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: pw,
            height: ph,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, pw, ph);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let frame_bgl = uniform_layout(
            &device,
            "frame_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            false,
        );
        let object_bgl = uniform_layout(
            &device,
            "object_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            true,
        );
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = make_scene_pipeline(&device, &layout, &shader, format);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let object_stride = wgpu::util::align_to(
            std::mem::size_of::<ObjectUniforms>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let object_capacity = 4;
        let (object_buffer, object_bind_group) =
            create_object_uniforms(&device, &object_bgl, object_stride, object_capacity);

        log::info!("renderer ready: {:?} {}x{}", format, pw, ph);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            depth_view,
            frame_buffer,
            frame_bind_group,
            object_bgl,
            object_buffer,
            object_bind_group,
            object_stride,
            object_capacity,
            geometries: FnvHashMap::default(),
            width,
            height,
            pixel_ratio,
        })
    }

    fn reconfigure(&mut self) {
        let (pw, ph) = physical_size(self.width, self.height, self.pixel_ratio);
        if pw == self.config.width && ph == self.config.height {
            self.surface.configure(&self.device, &self.config);
            return;
        }
        self.config.width = pw;
        self.config.height = ph;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, pw, ph);
        log::debug!("surface resized to {}x{}", pw, ph);
    }

    fn ensure_object_capacity(&mut self, count: usize) {
        if count <= self.object_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bind_group) =
            create_object_uniforms(&self.device, &self.object_bgl, self.object_stride, capacity);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_capacity = capacity;
    }

    fn upload_geometry(&mut self, geometry: &Geometry) {
        if self.geometries.contains_key(&geometry.shape) {
            return;
        }
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.geometries.insert(
            geometry.shape,
            GpuGeometry {
                buffer,
                vertex_count: geometry.vertices.len() as u32,
            },
        );
    }
}

fn create_object_uniforms(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

impl FrameRenderer for GpuRenderer<'_> {
    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        if ratio > 0.0 && ratio != self.pixel_ratio {
            self.pixel_ratio = ratio;
            self.reconfigure();
        }
    }

    fn render(&mut self, scene: &Scene, camera: &dyn SceneCamera) -> anyhow::Result<()> {
        let meshes: SmallVec<[&Mesh; 4]> = scene.meshes().map(|(_, m)| m).collect();
        self.ensure_object_capacity(meshes.len());
        for mesh in &meshes {
            self.upload_geometry(&mesh.geometry);
        }

        let frame_uniforms = pack_frame(scene, camera);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));
        let stride = self.object_stride as usize;
        let mut staging = vec![0u8; stride * meshes.len()];
        for (i, mesh) in meshes.iter().enumerate() {
            let packed = pack_object(mesh);
            let bytes = bytemuck::bytes_of(&packed);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            self.queue.write_buffer(&self.object_buffer, 0, &staging);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = scene.background.to_linear_f32();
        let clear = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (i, mesh) in meshes.iter().enumerate() {
                let Some(gpu) = self.geometries.get(&mesh.geometry.shape) else {
                    continue;
                };
                let offset = (i * stride) as wgpu::DynamicOffset;
                rpass.set_bind_group(1, &self.object_bind_group, &[offset]);
                rpass.set_vertex_buffer(0, gpu.buffer.slice(..));
                rpass.draw(0..gpu.vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
