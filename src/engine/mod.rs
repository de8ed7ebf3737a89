//! The box viewer engine: GPU resources plus the scene state they draw.
//!
//! Hosts (the winit [`Viewer`](crate::Viewer) or the browser entry point)
//! forward input and call [`BoxEngine::frame`] once per display refresh.
//! Everything the user can do arrives as a [`BoxCommand`](command::BoxCommand).

pub mod command;
mod input;
mod options;

use crate::assets::TextureSet;
use crate::error::WoodboxError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::box_pass::BoxRenderer;
use crate::renderer::camera::CameraBinding;
use crate::renderer::floor::FloorRenderer;
use crate::renderer::lighting::Lighting;
use crate::scene::state::BoxScene;
use crate::util::color::clear_color;
use crate::util::frame_timing::FrameTiming;

/// Renders the wood box scene and applies commands to it.
pub struct BoxEngine {
    context: RenderContext,
    scene: BoxScene,
    camera: CameraBinding,
    lighting: Lighting,
    box_renderer: BoxRenderer,
    floor_renderer: FloorRenderer,
    depth: DepthTarget,
    options: Options,
    input: InputProcessor,
    /// Frame clock driving flights and damping.
    pub frame_timing: FrameTiming,
}

impl BoxEngine {
    /// Bring up the GPU on `target` and build the scene.
    ///
    /// # Errors
    ///
    /// Returns [`WoodboxError::Gpu`] if the device or surface cannot be
    /// created.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        textures: &TextureSet,
        options: Options,
    ) -> Result<Self, WoodboxError> {
        let context = RenderContext::new(target, size).await?;
        Ok(Self::from_context(context, textures, options))
    }

    /// Build the scene on an existing context.
    #[must_use]
    pub fn from_context(
        context: RenderContext,
        textures: &TextureSet,
        options: Options,
    ) -> Self {
        let (width, height) = context.size();
        let format = context.format();
        let device = &context.device;

        let scene = BoxScene::new(&options, width, height);
        let camera = CameraBinding::new(device, &scene.camera().camera);
        let lighting = Lighting::new(device, scene.lighting(), format);
        let box_renderer = BoxRenderer::new(
            device,
            &context.queue,
            format,
            &camera.layout,
            &lighting.layout,
            textures,
            scene.model(),
            &options.model,
        );
        let floor_renderer = FloorRenderer::new(
            device,
            format,
            &camera.layout,
            &lighting.layout,
            &options.floor,
        );
        let depth = DepthTarget::new(device, width, height);
        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        log::info!("box engine ready at {width}x{height} ({format:?})");

        Self {
            context,
            scene,
            camera,
            lighting,
            box_renderer,
            floor_renderer,
            depth,
            options,
            input,
            frame_timing: FrameTiming::new(),
        }
    }

    /// Advance the scene by `dt` seconds and upload whatever changed.
    pub fn update(&mut self, dt: f32) {
        self.scene.tick(dt);
        self.camera
            .update(&self.context.queue, &self.scene.camera().camera);
        if self.scene.take_model_dirty() {
            self.box_renderer.update_model(
                &self.context.queue,
                self.scene.model(),
                self.options.model.ao_intensity,
                self.options.model.displacement_scale,
            );
        }
        if self.scene.take_lighting_dirty() {
            self.lighting
                .update(&self.context.queue, self.scene.lighting());
        }
    }

    /// One display refresh: measure the frame interval, update, draw.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let dt = self.frame_timing.tick();
        self.update(dt);
        self.render()
    }

    /// Draw the floor and the box to the next swapchain frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let background = clear_color(
            self.options.lighting.background,
            self.context.format().is_srgb(),
        );

        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            rp.set_bind_group(0, &self.camera.bind_group, &[]);
            rp.set_bind_group(1, &self.lighting.bind_group, &[]);
            self.floor_renderer.draw(&mut rp);
            self.box_renderer.draw(&mut rp);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface, depth target and camera projection. Zero sizes
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.scene.resize_viewport(width, height);
        log::debug!("resized to {width}x{height}");
    }

    /// Reconfigure a lost or outdated surface at its current size.
    pub fn recover_surface(&mut self) {
        log::warn!("surface lost or outdated, reconfiguring");
        self.context.reconfigure();
    }

    /// Scene state (camera, box, flight).
    #[must_use]
    pub fn scene(&self) -> &BoxScene {
        &self.scene
    }
}
