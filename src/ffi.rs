// C entry points for emulator cores written in C
//
// A C core calls `newton_display_open` and `newton_display_set_framebuffer`
// directly. Both forward to a process-wide `DisplayPort` that the embedding
// program installs with `install_host`. The C ABI has no error channel, so
// rejected calls are logged by the port and otherwise ignored.

use crate::display::{DisplayHost, DisplayPort, Geometry};
use log::warn;
use std::sync::{Mutex, PoisonError};

type SharedPort = DisplayPort<Box<dyn DisplayHost + Send>>;

static PORT: Mutex<Option<SharedPort>> = Mutex::new(None);

fn with_port<R>(f: impl FnOnce(&mut SharedPort) -> R) -> Option<R> {
    let mut guard = PORT.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_mut() {
        Some(port) => Some(f(port)),
        None => {
            warn!("Display call with no host installed");
            None
        }
    }
}

/// Route the C entry points to `host`
///
/// # Returns
/// The previously installed host, if any
pub fn install_host<H: DisplayHost + Send + 'static>(
    host: H,
) -> Option<Box<dyn DisplayHost + Send>> {
    let mut guard = PORT.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .replace(DisplayPort::new(Box::new(host)))
        .map(DisplayPort::into_host)
}

/// Detach the installed host; later C calls are ignored
pub fn uninstall_host() -> Option<Box<dyn DisplayHost + Send>> {
    let mut guard = PORT.lock().unwrap_or_else(PoisonError::into_inner);
    guard.take().map(DisplayPort::into_host)
}

/// Create or resize the display surface
#[no_mangle]
pub extern "C" fn newton_display_open(width: u32, height: u32) {
    with_port(|port| {
        let _ = port.open(width, height);
    });
}

/// Publish one frame of `width * height` bytes
///
/// # Safety
///
/// `pixels` must be null or point to at least `width * height` readable
/// bytes that stay valid and unmodified for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn newton_display_set_framebuffer(
    pixels: *const u8,
    width: u32,
    height: u32,
) {
    if pixels.is_null() {
        warn!("newton_display_set_framebuffer called with a null frame");
        return;
    }

    let geometry = Geometry::new(width, height);

    with_port(|port| {
        // Bounds the slice length before it is built
        let length = match geometry.validate_within(port.host().limits()) {
            Ok(length) => length,
            Err(err) => {
                warn!("Rejected frame: {}", err);
                return;
            }
        };

        // SAFETY: the caller guarantees `length` readable bytes at `pixels`,
        // and the length is capped by the host limits.
        let memory = unsafe { std::slice::from_raw_parts(pixels, length) };
        let _ = port.publish(memory, 0, width, height);
    });
}
