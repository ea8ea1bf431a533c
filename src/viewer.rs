// viewer.rs - Startup pipeline and the window event loop
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::assets::AssetLoader;
use crate::document::SceneDocument;
use crate::error::StartupError;
use crate::graph;
use crate::overlay::StatusOverlay;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::source::{FileSource, SceneSource};

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ZOOM_LINE_STEP: f32 = 1.0;
const ZOOM_PIXEL_STEP: f32 = 0.01;

/// Viewer configuration, filled in from the CLI.
#[derive(Debug, Clone)]
pub struct Options {
    /// Scene document, resolved relative to the working directory.
    pub scene: String,
    /// Directory holding flattened model assets.
    pub assets_root: String,
}

/// The viewer application. Owns the window, renderer, scene, and overlay;
/// none of them are ever torn down before process exit.
pub struct Viewer {
    options: Options,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Option<Scene>,
    overlay: StatusOverlay,
    dragging: bool,
    cursor: Option<(f64, f64)>,
}

impl Viewer {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            window: None,
            renderer: None,
            scene: None,
            overlay: StatusOverlay::new(),
            dragging: false,
            cursor: None,
        }
    }

    /// Runs the startup sequence: fetch, validate, instantiate, upload.
    /// Fatal errors land in the overlay error state; the event loop keeps
    /// running so the error stays visible, but no scene ever renders.
    fn start(&mut self) {
        self.overlay.set_loading("Loading scene...");
        self.present_frame();

        match self.build_scene() {
            Ok(scene) => {
                if let Some(renderer) = &mut self.renderer {
                    // Readiness gate: the scene renders only once every mesh
                    // is on the GPU.
                    renderer.upload_scene(&scene);
                }
                self.scene = Some(scene);
                self.overlay.hide();
            }
            Err(err) => {
                log::error!("startup failed: {err}");
                self.overlay.set_error(format!("Failed to load scene: {err}"));
            }
        }
    }

    fn build_scene(&mut self) -> Result<Scene, StartupError> {
        let source = FileSource::new(".");
        let body = source.fetch(&self.options.scene)?;
        let document = SceneDocument::parse(&body)?;

        self.overlay.set_loading("Building scene...");
        self.present_frame();

        let mut scene = Scene::new();
        let assets = AssetLoader::new(&self.options.assets_root);
        let report = graph::instantiate(&document, &mut scene, &assets);

        let failed = report.failures().count();
        if failed > 0 {
            log::warn!(
                "scene degraded: {failed} of {} nodes failed",
                document.nodes.len()
            );
        }
        log::info!(
            "instantiated {} of {} nodes",
            report.built(),
            document.nodes.len()
        );

        Ok(scene)
    }

    /// Presents one frame outside the redraw cycle. The whole startup
    /// sequence runs synchronously before the first `RedrawRequested`, so
    /// without this the loading overlay states would never reach the screen.
    fn present_frame(&mut self) {
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if let Err(err) = renderer.render(self.scene.as_ref(), &self.overlay, window) {
                log::debug!("startup frame dropped: {err}");
            }
        }
    }

    fn orbit_camera(&mut self, dx: f32, dy: f32) {
        if let Some(camera) = self.scene.as_mut().and_then(Scene::active_camera_mut) {
            camera.orbit(dx * ORBIT_SENSITIVITY, dy * ORBIT_SENSITIVITY);
        }
    }

    fn zoom_camera(&mut self, amount: f32) {
        if let Some(camera) = self.scene.as_mut().and_then(Scene::active_camera_mut) {
            camera.zoom(amount);
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        // Surface acquisition failure is console-only: there is no surface
        // to show the overlay on, so log and stop without panicking.
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Scene Viewer")
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                let err = StartupError::SurfaceMissing(e.to_string());
                log::error!("{err}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                let err = StartupError::SurfaceMissing(e.to_string());
                log::error!("{err}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);

        self.start();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui observe the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some((px, py)) = self.cursor {
                        let dx = (position.x - px) as f32;
                        let dy = (position.y - py) as f32;
                        self.orbit_camera(dx, dy);
                    }
                }
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * ZOOM_LINE_STEP,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * ZOOM_PIXEL_STEP,
                };
                self.zoom_camera(amount);
            }
            WindowEvent::RedrawRequested => {
                let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
                    return;
                };

                match renderer.render(self.scene.as_ref(), &self.overlay, window) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = renderer.size();
                        renderer.resize(size);
                    }
                    Err(e) => log::error!("render error: {e}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
