use anyhow::{Context, Result};
use astro_input::{Direction, InputEvent};
use astro_kernel::{FrameClock, GameState};
use astro_mesh::{LightVertex, Mesh, Vertex};
use astro_render::{FrameTransforms, Projection};
use astro_render_wgpu::{GpuContext, ShaderLibrary, WgpuRenderer};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window and pacing settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

/// Scene resources loaded before the window opens.
pub struct Scene {
    pub shaders: ShaderLibrary,
    pub ship: Mesh<Vertex>,
    pub light: Mesh<LightVertex>,
}

struct Gpu {
    window: Arc<Window>,
    context: GpuContext,
    renderer: WgpuRenderer,
}

pub struct App {
    config: AppConfig,
    scene: Scene,
    state: GameState,
    clock: FrameClock,
    projection: Projection,
    gpu: Option<Gpu>,
    redraw_pending: bool,
    init_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: AppConfig, scene: Scene) -> Self {
        Self {
            clock: FrameClock::new(config.fps),
            projection: Projection::with_size(config.width, config.height),
            config,
            scene,
            state: GameState::new(),
            gpu: None,
            redraw_pending: false,
            init_error: None,
        }
    }

    /// Error that stopped the event loop during startup, if any.
    pub fn finish(self) -> Result<()> {
        match self.init_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let context = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        let renderer = WgpuRenderer::new(
            &context.device,
            context.surface_format(),
            context.size(),
            &self.scene.shaders,
            &self.scene.ship,
            &self.scene.light,
        );

        Ok(Gpu {
            window,
            context,
            renderer,
        })
    }

    fn handle(&mut self, event: InputEvent, event_loop: &ActiveEventLoop) {
        self.state.handle(event);
        if !self.state.is_running() {
            event_loop.exit();
        }
    }

    /// Update then draw one frame.
    fn frame(&mut self) {
        let ticks = self.clock.begin_frame(Instant::now());
        self.state.step(ticks);

        let Some(gpu) = &self.gpu else {
            return;
        };

        let output = match gpu.context.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.context.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let frame = FrameTransforms::from_pose(&self.state.pose, &self.projection);
        gpu.renderer
            .render(&gpu.context.device, &gpu.context.queue, &view, &frame);

        gpu.window.pre_present_notify();
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                let (width, height) = gpu.context.size();
                self.projection = Projection::with_size(width, height);
                self.clock = FrameClock::new(self.config.fps);
                self.gpu = Some(gpu);
                tracing::info!(
                    "window {}x{} ready, {:?} frame budget",
                    width,
                    height,
                    self.clock.budget()
                );
            }
            Err(err) => {
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.handle(InputEvent::Quit, event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.context.size();
                    gpu.renderer.resize(&gpu.context.device, width, height);
                    self.projection = Projection::with_size(width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(input) = map_key(key, key_state == ElementState::Pressed) {
                    self.handle(input, event_loop);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw_pending = false;
                self.frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.is_running() {
            event_loop.exit();
            return;
        }
        let Some(gpu) = &self.gpu else {
            return;
        };

        if self.redraw_pending {
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if self.clock.is_due(Instant::now()) {
            self.redraw_pending = true;
            gpu.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            // Sleep until the frame budget is spent; input still wakes us.
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));
        }
    }
}

/// WASD or the arrow keys steer; Escape quits.
fn map_key(key: KeyCode, pressed: bool) -> Option<InputEvent> {
    let direction = match key {
        KeyCode::KeyA | KeyCode::ArrowLeft => Direction::Left,
        KeyCode::KeyD | KeyCode::ArrowRight => Direction::Right,
        KeyCode::KeyW | KeyCode::ArrowUp => Direction::Up,
        KeyCode::KeyS | KeyCode::ArrowDown => Direction::Down,
        KeyCode::Escape => return pressed.then_some(InputEvent::Quit),
        _ => return None,
    };
    Some(if pressed {
        InputEvent::Pressed(direction)
    } else {
        InputEvent::Released(direction)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_steer() {
        assert_eq!(
            map_key(KeyCode::KeyA, true),
            Some(InputEvent::Pressed(Direction::Left))
        );
        assert_eq!(
            map_key(KeyCode::ArrowRight, false),
            Some(InputEvent::Released(Direction::Right))
        );
        assert_eq!(
            map_key(KeyCode::KeyW, true),
            Some(InputEvent::Pressed(Direction::Up))
        );
        assert_eq!(
            map_key(KeyCode::ArrowDown, true),
            Some(InputEvent::Pressed(Direction::Down))
        );
    }

    #[test]
    fn escape_quits_on_press_only() {
        assert_eq!(map_key(KeyCode::Escape, true), Some(InputEvent::Quit));
        assert_eq!(map_key(KeyCode::Escape, false), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Space, true), None);
        assert_eq!(map_key(KeyCode::KeyQ, false), None);
    }
}
