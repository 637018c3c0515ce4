// Newton Display Library
// Host side of the display interface used by the Newton emulator core

// Public modules
pub mod config;
pub mod demo;
pub mod display;
pub mod ffi;
pub mod logging;
pub mod screenshot;

// Re-export main types for convenience
pub use config::{ConfigError, DisplayConfig};
pub use demo::{DemoCore, TestPattern};
pub use display::{
    display_channel, ChannelHost, DisplayError, DisplayHost, DisplayPort, DisplaySurface,
    FrameBufferView, FrameComposer, FrameReceiver, Geometry, HeadlessHost, Orientation,
    Silkscreen, WindowConfig,
};
pub use ffi::{install_host, uninstall_host};
pub use screenshot::{save_screenshot, ScreenshotError, ScreenshotOptions};
