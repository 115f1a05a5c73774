//! Standalone fly-through window backed by winit.
//!
//! ```no_run
//! # use wormhole::{Options, Viewer};
//! Viewer::builder()
//!     .with_options(Options::default())
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::WormholeError, options::Options, InputEvent, MouseButton,
    WormholeEngine,
};

/// Pixel-delta scrolls (touchpads) per wheel step.
const PIXELS_PER_SCROLL_STEP: f64 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with the title "Wormhole" and default options.
    fn new() -> Self {
        Self {
            options: None,
            title: "Wormhole".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that flies through the tube.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), WormholeError> {
        let event_loop = EventLoop::new()
            .map_err(|e| WormholeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| WormholeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<WormholeEngine>,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
}

/// Surface size for a window's inner size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Wheel steps for a scroll event.
#[allow(clippy::cast_possible_truncation)]
fn scroll_steps(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => {
            (pos.y / PIXELS_PER_SCROLL_STEP) as f32
        }
    }
}

impl ViewerApp {
    /// Resize the engine to the window's current inner size.
    fn resize_to_window(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let (vp_w, vp_h) = viewport_size(window.inner_size());
        if let Some(engine) = &mut self.engine {
            engine.resize(vp_w, vp_h);
        }
    }

    /// Render and schedule the next frame.
    fn redraw(&mut self) {
        let result = self.engine.as_mut().map(WormholeEngine::render);
        match result {
            Some(Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost)) => {
                self.resize_to_window();
                if let Some(engine) = &self.engine {
                    engine.reconfigure_surface();
                }
            }
            Some(Err(e)) => log::error!("render error: {e:?}"),
            Some(Ok(())) | None => {}
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn forward_input(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            let _ = engine.handle_input(event);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(WormholeEngine::new(
            window.clone(),
            (vp_w, vp_h),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => self.resize_to_window(),

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                self.forward_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.forward_input(InputEvent::CursorLeft);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward_input(InputEvent::Scroll {
                    delta: scroll_steps(delta),
                });
            }

            _ => (),
        }
    }
}
