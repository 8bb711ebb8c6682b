use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use winit::{event::*, event_loop::EventLoop, window::Window};

use cubefield::controller::{input, CameraController, FrameClock, InputState, KeyBindings};
use cubefield::model::{Camera, CubeField, CUBE_COUNT};
use cubefield::view::render::{self, CameraUniform, ModelUniform, MODEL_UNIFORM_STRIDE};
use cubefield::view::{GpuContext, Texture};
use cubefield::{logging, utils};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const TEXTURE_PATH: &str = "assets/textures/crate.png";

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    cube_mesh: utils::MeshBuffer,

    // Demo state
    camera: Camera,
    controller: CameraController,
    bindings: KeyBindings,
    input_state: InputState,
    cube_field: CubeField,
    clock: FrameClock,
    started: Instant,
}

impl App {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width.max(1), size.height.max(1)).await;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let (_, depth_view) = render::create_depth_texture(&device, config.width, config.height);

        let camera = Camera::new(config.width, config.height);

        let camera_resources = render::create_camera_resources(&device);
        let camera_uniform = CameraUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(
            &camera_resources.camera_buffer,
            0,
            bytemuck::bytes_of(&camera_uniform),
        );

        let model_resources = render::create_model_resources(&device, CUBE_COUNT);

        let texture = match std::fs::read(TEXTURE_PATH) {
            Ok(bytes) => match Texture::from_bytes(&device, &queue, &bytes, TEXTURE_PATH) {
                Ok(texture) => texture,
                Err(e) => {
                    tracing::warn!("could not decode {TEXTURE_PATH}: {e}; using checkerboard");
                    Texture::checkerboard(&device, &queue, 256, 32)
                }
            },
            Err(e) => {
                tracing::warn!("could not read {TEXTURE_PATH}: {e}; using checkerboard");
                Texture::checkerboard(&device, &queue, 256, 32)
            }
        };
        let texture_layout = render::texture_bind_group_layout(&device);
        let texture_bind_group = render::create_texture_bind_group(&device, &texture_layout, &texture);

        let pipeline = render::create_cube_pipeline(
            &device,
            config.format,
            &camera_resources.bind_group_layout,
            &model_resources.bind_group_layout,
            &texture_layout,
            depth_format,
        );

        let cube_mesh = utils::create_cube_mesh().upload(&device);

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let cube_field = CubeField::new(seed);

        Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            pipeline,
            depth_view,
            camera_buffer: camera_resources.camera_buffer,
            camera_bind_group: camera_resources.camera_bind_group,
            model_buffer: model_resources.model_buffer,
            model_bind_group: model_resources.model_bind_group,
            texture_bind_group,
            cube_mesh,
            camera,
            controller: CameraController::new(),
            bindings: KeyBindings::default(),
            input_state: InputState::new(),
            cube_field,
            clock: FrameClock::new(),
            started: Instant::now(),
        }
    }

    fn input(&mut self, event: &WindowEvent) {
        if let Some(event) = input::from_window_event(event) {
            self.input_state.process_event(&event, &self.bindings);
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (_, depth_view) =
                render::create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_view = depth_view;
            self.camera.set_aspect(new_size.width, new_size.height);
        }
    }

    fn update(&mut self, dt_ms: f32) {
        self.controller
            .update(&mut self.camera, &self.input_state, &self.bindings, dt_ms);

        let camera_uniform = CameraUniform {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_uniform));

        let elapsed = self.started.elapsed();
        for (i, cube) in self.cube_field.cubes().iter().enumerate() {
            let model_uniform = ModelUniform {
                model: cube.model_matrix(elapsed).to_cols_array_2d(),
            };
            self.queue.write_buffer(
                &self.model_buffer,
                i as wgpu::BufferAddress * MODEL_UNIFORM_STRIDE,
                bytemuck::bytes_of(&model_uniform),
            );
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.3,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(2, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.cube_mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.cube_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            // One draw per cube, each through its own model-uniform slot
            for i in 0..self.cube_field.cubes().len() {
                let offset = i as u32 * MODEL_UNIFORM_STRIDE as u32;
                render_pass.set_bind_group(1, &self.model_bind_group, &[offset]);
                render_pass.draw_indexed(0..self.cube_mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() {
    logging::init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("could not create event loop: {e}");
            std::process::exit(1);
        }
    };
    let window_attributes = Window::default_attributes()
        .with_title("cubefield")
        .with_inner_size(winit::dpi::LogicalSize::new(WIDTH, HEIGHT));
    let window = match event_loop.create_window(window_attributes) {
        Ok(window) => Arc::new(window),
        Err(e) => {
            tracing::error!("could not create window: {e}");
            std::process::exit(1);
        }
    };

    let mut app = pollster::block_on(App::new(window.clone()));

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                app.input(event);
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        app.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        let dt = app.clock.tick();

                        if app.input_state.exit_requested() {
                            elwt.exit();
                            return;
                        }

                        app.update(dt);

                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => tracing::error!("render error: {e:?}"),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .unwrap();
}
