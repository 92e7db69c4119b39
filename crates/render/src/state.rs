use std::sync::Arc;

use anyhow::{Context, Result};
use march::{RenderState, SceneConfig};
use tracing::{debug, error, info, warn};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::gpu_types::FrameUniforms;
use crate::input::PointerInput;
use crate::pipeline::{self, QuadBuffers};
use crate::shader::SdfShader;
use crate::watcher::ShaderWatcher;
use crate::RunOptions;

pub struct State {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    quad: QuadBuffers,
    scene: SceneConfig,
    render_state: RenderState,
    input: PointerInput,
    watcher: Option<ShaderWatcher>,
}

impl State {
    pub async fn new(window: Arc<Window>, options: &RunOptions) -> Result<Self> {
        let shader = match &options.shader {
            Some(path) => SdfShader::load(path, &options.scene),
            None => SdfShader::builtin(&options.scene),
        }
        .inspect_err(|e| error!("Shader compilation failed: {e}"))
        .context("failed to build the SDF shader")?;

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to get adapter")?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Renderer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to request device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // the shader writes display values directly, so skip sRGB encoding when possible
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        info!(
            "Surface configured: {}x{} {:?}, primitive {}",
            config.width, config.height, format, options.scene.primitive
        );

        let quad = pipeline::create_fullscreen_quad(&device);
        let uniform_buffer = pipeline::create_uniform_buffer(&device);
        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let bind_group = pipeline::create_bind_group(&device, &bind_group_layout, &uniform_buffer);
        let pipeline =
            pipeline::create_render_pipeline(&device, &bind_group_layout, config.format, &shader);

        let watcher = match &options.shader {
            Some(path) => match ShaderWatcher::start(path) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    error!("Failed to start shader watcher: {e:?}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            render_state: RenderState::new(config.width, config.height),
            config,
            pipeline,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            quad,
            scene: options.scene,
            input: PointerInput::new(),
            watcher,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            debug!("Resizing surface to {}x{}", new_size.width, new_size.height);
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.render_state.set_resolution(new_size.width, new_size.height);
        }
    }

    /// Feed pointer input to the orbit controller. Returns true if consumed.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match self.input.translate(event, self.window.scale_factor()) {
            Some(pointer) => {
                self.render_state.handle_pointer(pointer);
                true
            }
            None => false,
        }
    }

    /// Rebuild the pipeline if the watched shader changed and still validates.
    pub fn reload_shader_if_changed(&mut self) {
        let Some(watcher) = self.watcher.as_ref() else {
            return;
        };
        if !watcher.poll() {
            return;
        }
        let path = watcher.path().to_path_buf();

        let shader = match SdfShader::load(&path, &self.scene) {
            Ok(shader) => shader,
            Err(e) => {
                error!("Shader reload failed, keeping previous pipeline: {e}");
                return;
            }
        };

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = pipeline::create_render_pipeline(
            &self.device,
            &self.bind_group_layout,
            self.config.format,
            &shader,
        );
        if let Some(e) = pollster::block_on(self.device.pop_error_scope()) {
            error!("Pipeline rebuild failed, keeping previous pipeline: {e}");
            return;
        }

        self.pipeline = pipeline;
        info!("Reloaded shader from {:?}", path);
    }

    /// Upload this frame's uniforms, advance the frame counter and draw.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let size = self.window.inner_size();
        self.render_state.set_resolution(size.width.max(1), size.height.max(1));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = FrameUniforms::from(&self.render_state.begin_frame());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("enc") });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad.vertices.slice(..));
            rpass.set_index_buffer(self.quad.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.quad.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn surface_lost(&mut self) {
        warn!("Surface lost, reconfiguring");
        self.resize(self.window.inner_size());
    }
}
