// Window module - Presents the display surface on screen
//
// The window runs on the main thread and owns the render side of a
// display channel. Every time the event loop goes idle it drains pending
// opens and frames, resizes itself when the core changes mode, and
// repaints through the pixels crate.

use super::channel::{DrainSummary, FrameReceiver};
use super::compose::FrameComposer;
use super::geometry::{Geometry, SHARP_LCD};
use crate::screenshot::{save_screenshot, ScreenshotOptions};
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// How long the event loop sleeps between checks for new frames
const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
    /// Window title
    pub title: String,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 2x scale
    pub fn new() -> Self {
        Self {
            scale: 2,
            title: "Leibniz".to_string(),
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8); // Clamp between 1x and 8x
        self
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Window size for an image of the given geometry
    pub fn window_size(&self, geometry: Geometry) -> LogicalSize<u32> {
        LogicalSize::new(
            geometry.width.saturating_mul(self.scale),
            geometry.height.saturating_mul(self.scale),
        )
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Display window fed by a frame receiver
pub struct DisplayWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    receiver: FrameReceiver,
    composer: FrameComposer,
    screenshots: ScreenshotOptions,
    /// Geometry of the pixel buffer currently allocated
    presented: Geometry,
}

impl DisplayWindow {
    /// Create a new display window (window will be created when event loop starts)
    pub fn new(
        config: WindowConfig,
        receiver: FrameReceiver,
        composer: FrameComposer,
        screenshots: ScreenshotOptions,
    ) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            receiver,
            composer,
            screenshots,
            presented: Geometry::default(),
        }
    }

    /// Geometry to present right now
    ///
    /// Before the core opens the display a blank Sharp-sized panel is shown.
    fn target_geometry(&self) -> Geometry {
        let surface = self
            .receiver
            .surface()
            .map(|s| s.geometry())
            .unwrap_or(SHARP_LCD);
        self.composer.output_geometry(surface)
    }

    /// Reallocate the pixel buffer and window if the image size changed
    fn sync_geometry(&mut self) {
        let target = self.target_geometry();
        if target == self.presented {
            return;
        }

        if let Some(pixels) = &mut self.pixels {
            if let Err(err) = pixels.resize_buffer(target.width, target.height) {
                error!("Failed to resize pixel buffer to {}: {}", target, err);
                return;
            }
        }

        if let Some(window) = &self.window {
            let _ = window.request_inner_size(self.config.window_size(target));
        }

        info!("Presenting {} image", target);
        self.presented = target;
    }

    /// Render the current surface to the window
    fn render(&mut self) -> Result<(), pixels::Error> {
        let (Some(pixels), Some(surface)) = (&mut self.pixels, self.receiver.surface_mut()) else {
            return Ok(());
        };

        // The buffer lags one resize behind if resize_buffer failed
        if self.composer.output_geometry(surface.geometry()) != self.presented {
            return Ok(());
        }

        surface.take_dirty();
        self.composer.compose_rgba(surface, pixels.frame_mut());
        pixels.render()
    }

    /// Apply pending commands and bring the buffer in line with them
    ///
    /// Geometry is re-synced on every call, so a failed buffer resize is
    /// retried rather than leaving the window stuck on the old size.
    fn refresh(&mut self) -> DrainSummary {
        let summary = self.receiver.drain();
        self.sync_geometry();
        summary
    }

    fn take_screenshot(&mut self) {
        let Some(surface) = self.receiver.surface() else {
            warn!("No display surface to capture");
            return;
        };

        let (geometry, levels) = self.composer.compose(surface);
        match save_screenshot(levels, geometry, &self.screenshots) {
            Ok(path) => info!("Screenshot saved to {}", path.display()),
            Err(err) => error!("Screenshot failed: {}", err),
        }
    }
}

impl ApplicationHandler for DisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        self.receiver.drain();
        let target = self.target_geometry();

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.window_size(target))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };
        let window_size = window.inner_size();

        // Arc<Window> gives the surface texture a 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = match Pixels::new(target.width, target.height, surface_texture) {
            Ok(pixels) => pixels,
            Err(err) => {
                error!("Failed to create pixel buffer: {}", err);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.presented = target;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        error!("Failed to resize surface: {}", err);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        ..
                    },
                ..
            } => match code {
                KeyCode::F9 => self.take_screenshot(),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    error!("Render error: {}", err);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let summary = self.refresh();

        if summary.needs_redraw() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if summary.disconnected {
            info!("Emulator core finished, closing display");
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::wait_duration(POLL_INTERVAL));
    }
}

/// Create and run the display window until it is closed or the core exits
///
/// # Arguments
/// * `config` - Window configuration
/// * `receiver` - Render side of the display channel
/// * `composer` - Orientation and silkscreen settings
/// * `screenshots` - Where F9 screenshots go
pub fn run_display(
    config: WindowConfig,
    receiver: FrameReceiver,
    composer: FrameComposer,
    screenshots: ScreenshotOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::wait_duration(POLL_INTERVAL));

    let mut display = DisplayWindow::new(config, receiver, composer, screenshots);
    event_loop.run_app(&mut display)?;

    Ok(())
}
