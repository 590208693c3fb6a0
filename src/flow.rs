//! Application event loop.
//!
//! [`run`] opens a window (or binds the page's canvas on the web), builds the
//! GPU [`Context`] and the [`SceneRoot`], and then drives them from winit:
//!
//! 1. Window events go to the scene root (orbit controls, paper reset)
//! 2. On every redraw the controls advance one damping step
//! 3. Camera and light uniforms are refreshed and new nodes are uploaded
//! 4. The scene graph is batched per pipeline and drawn
//! 5. The frame is presented and the next redraw requested

use std::{fmt::Debug, iter, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    logging,
    observer::LogObserver,
    render::{Drawn, Lines},
    scene_root::SceneRoot,
};

/// GPU context plus the scene it draws, and whether the surface is usable yet.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    pub root: SceneRoot,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let root = SceneRoot::new(
            config,
            ctx.config.width,
            ctx.config.height,
            Some(Box::new(LogObserver)),
        );
        Ok(Self {
            ctx,
            root,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.root.resize(width, height);
            self.ctx.resize(width, height);
            self.is_surface_configured = true;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.ctx
            .camera
            .uniform
            .update_view_proj(&self.root.camera, &self.root.projection);
        self.ctx.queue.write_buffer(
            &self.ctx.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.ctx.camera.uniform]),
        );
        self.ctx
            .light
            .write_to_buffer(&self.root.scene, &self.ctx.queue);
        self.root
            .scene
            .write_to_buffers(&self.ctx.device, &self.ctx.material_layout);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut meshes: Vec<Drawn> = Vec::new();
            let mut lines: Vec<Lines> = Vec::new();
            self.root
                .scene
                .get_render()
                .set_pipelines(&mut meshes, &mut lines);

            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);
            for drawn in meshes {
                if drawn.amount == 0 {
                    log::warn!("skipping a mesh without indices");
                    continue;
                }
                render_pass.set_pipeline(self.ctx.pipelines.for_side(drawn.side));
                render_pass.set_bind_group(2, drawn.group, &[]);
                render_pass.set_vertex_buffer(0, drawn.vertex.slice(..));
                render_pass.set_index_buffer(drawn.index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..drawn.amount, 0, 0..1);
            }

            render_pass.set_pipeline(&self.ctx.pipelines.lines);
            for line in lines {
                render_pass.set_vertex_buffer(0, line.vertex.slice(..));
                render_pass.draw(0..line.amount, 0..1);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Logs the frame rate every few seconds at debug level.
#[derive(Debug)]
struct FrameStats {
    since: Instant,
    frames: u32,
}

impl FrameStats {
    const INTERVAL: Duration = Duration::from_secs(5);

    fn new() -> Self {
        Self {
            since: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Self::INTERVAL {
            log::debug!("{:.1} fps", self.frames as f32 / elapsed.as_secs_f32());
            self.since = Instant::now();
            self.frames = 0;
        }
    }
}

pub(crate) enum FlowEvent {
    // sent by the wasm initialisation future once the GPU context is ready
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
        }
    }
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg(target_arch = "wasm32")]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    config: SceneConfig,
    state: Option<AppState>,
    frames: FrameStats,
}

impl App {
    fn new(
        #[allow(unused_variables)] event_loop: &EventLoop<FlowEvent>,
        config: SceneConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            #[cfg(target_arch = "wasm32")]
            proxy: event_loop.create_proxy(),
            config,
            state: None,
            frames: FrameStats::new(),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn find_canvas(id: &str) -> anyhow::Result<web_sys::HtmlCanvasElement> {
    use anyhow::Context as _;
    use wasm_bindgen::JsCast;

    let element = web_sys::window()
        .and_then(|window| window.document())
        .context("no document to attach to")?
        .get_element_by_id(id)
        .with_context(|| format!("no element with id '{}'", id))?;
    element
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element '{}' is not a canvas", id))
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            match find_canvas(&self.config.canvas_id) {
                Ok(canvas) => window_attributes = window_attributes.with_canvas(Some(canvas)),
                Err(e) => {
                    log::error!("cannot find the render target: {:#}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self
                .async_runtime
                .block_on(AppState::new(window, &self.config))
            {
                Ok(mut app_state) => {
                    let size = app_state.ctx.window.inner_size();
                    app_state.resize(size.width, size.height);
                    app_state.ctx.window.request_redraw();
                    self.state = Some(app_state);
                }
                Err(e) => {
                    log::error!("initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            let config = self.config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, &config).await {
                    Ok(app_state) => {
                        if proxy
                            .send_event(FlowEvent::Initialized(Box::new(app_state)))
                            .is_err()
                        {
                            log::warn!("event loop closed before initialization finished");
                        }
                    }
                    Err(e) => log::error!("initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(app_state) => {
                // This is the message from our wasm `spawn_local`
                let mut app_state = *app_state;
                // Trigger a resize and redraw now that we are initialized
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
                app_state.ctx.window.request_redraw();
                self.state = Some(app_state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.root.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                self.frames.tick();
                state.root.update();
                match state.render() {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Opens the window and runs the scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    logging::init();

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
