//! Windowed viewer: the render loop driver.
//!
//! One redraw equals one engine tick: drain the gesture queue, advance the
//! clock, update the scene, upload and draw. The gesture feed may be written
//! from any thread at any cadence; samples only take effect at the top of a
//! tick, never mid-frame.
//!
//! Controls: Space toggles formed/chaos (the host-UI manual toggle), left
//! drag orbits, scroll zooms.
//!
//! ```ignore
//! let viewer = Viewer::new(Scene::new(SceneConfig::default()));
//! let feed = viewer.gesture_feed(); // hand to the tracking collaborator
//! viewer.run()?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::error::SceneError;
use crate::gesture::{GestureAdapter, GestureFeed};
use crate::render::GpuState;
use crate::scene::Scene;
use crate::time::FrameClock;

pub struct Viewer {
    scene: Scene,
    adapter: GestureAdapter,
    camera: Camera,
    clock: FrameClock,
    title: String,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl Viewer {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            adapter: GestureAdapter::new(),
            camera: Camera::new(),
            clock: FrameClock::new(),
            title: "Tannen".to_string(),
            window: None,
            gpu: None,
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Producer handle for the external tracking collaborator.
    pub fn gesture_feed(&self) -> GestureFeed {
        self.adapter.feed()
    }

    /// The scene, for pre-run adjustments.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Run the viewer. Blocks until the window is closed.
    pub fn run(mut self) -> Result<(), SceneError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// One frame: inputs, engine update, draw.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(wanted) = self.adapter.drain(self.scene.target()) {
            self.scene.set_target(wanted);
        }

        let (elapsed, dt) = self.clock.tick();
        self.scene.update(dt, elapsed);
        self.camera
            .apply_pointer(self.adapter.pointer(), self.adapter.detected(), dt);

        if let Some(gpu) = &mut self.gpu {
            gpu.upload(&self.scene);
            match gpu.render(&self.camera, elapsed, dt) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                }),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, shutting down");
                    event_loop.exit();
                }
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Release the tick source and GPU resources (retained photo textures
    /// included). Safe to hit twice.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.gpu = None;
        self.window = None;
        log::info!("viewer torn down after {} frames", self.clock.frame());
        event_loop.exit();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(720, 1280));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("{}", SceneError::from(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, &self.scene)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                log::error!("{}", SceneError::from(e));
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Space)
                    && event.state == ElementState::Pressed
                    && !event.repeat
                {
                    self.scene.toggle();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;
                        self.camera.yaw -= dx as f32 * 0.005;
                        self.camera.pitch =
                            (self.camera.pitch + dy as f32 * 0.005).clamp(-1.5, 1.5);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.distance = (self.camera.distance - scroll * 0.6).clamp(4.0, 40.0);
            }
            WindowEvent::RedrawRequested => {
                self.tick(event_loop);
            }
            _ => {}
        }
    }
}
