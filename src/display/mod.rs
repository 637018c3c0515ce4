// Display module - Host side of the emulator's display interface
//
// This module provides:
// - Geometry validation and bounded frame views into core memory
// - The host pixel store (DisplaySurface)
// - DisplayPort: the validating open/publish entry points
// - Host adapters: headless, and a channel hand-off to a render thread
// - Grayscale presentation with rotation and silkscreen, using winit + pixels

pub mod channel;
pub mod compose;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod host;
pub mod orientation;
pub mod palette;
pub mod port;
pub mod silkscreen;
pub mod surface;
pub mod window;

pub use channel::{display_channel, ChannelHost, DisplayCommand, DrainSummary, FrameReceiver};
pub use compose::FrameComposer;
pub use error::DisplayError;
pub use framebuffer::FrameBufferView;
pub use geometry::{Geometry, SHARP_LCD, SQUIRT_LCD};
pub use host::{DisplayHost, HeadlessHost};
pub use orientation::Orientation;
pub use palette::{level_to_rgb, level_to_rgba, BLACK_COLOR, SLEEP_COLOR, WHITE_COLOR};
pub use port::DisplayPort;
pub use silkscreen::{Silkscreen, SilkscreenError};
pub use surface::DisplaySurface;
pub use window::{run_display, DisplayWindow, WindowConfig};
