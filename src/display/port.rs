// Display Port - The two calls an emulator core makes
//
// `open` sets up the surface, `publish` pushes one frame out of the core's
// linear memory. The port validates both before the host sees them: bad
// geometry and out-of-range frames are logged and returned as errors, and
// the host state stays untouched.

use super::error::DisplayError;
use super::framebuffer::FrameBufferView;
use super::geometry::Geometry;
use super::host::DisplayHost;
use log::{debug, info, warn};

/// Validating front end to a display host
#[derive(Debug)]
pub struct DisplayPort<H> {
    host: H,
    /// Last geometry the host accepted
    geometry: Option<Geometry>,
}

impl<H: DisplayHost> DisplayPort<H> {
    /// Wrap a host
    pub fn new(host: H) -> Self {
        Self {
            host,
            geometry: None,
        }
    }

    /// Create or resize the display surface
    ///
    /// # Arguments
    /// * `width` - Surface width in pixels (must be non-zero)
    /// * `height` - Surface height in pixels (must be non-zero)
    ///
    /// # Errors
    /// `InvalidGeometry` for a zero dimension or a size above the host's
    /// limits. The previous surface is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_display::display::{DisplayPort, HeadlessHost};
    ///
    /// let mut port = DisplayPort::new(HeadlessHost::new());
    /// port.open(320, 240).unwrap();
    /// assert_eq!(port.host().geometry().map(|g| g.width), Some(320));
    /// ```
    pub fn open(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        let geometry = Geometry::new(width, height);

        let result = geometry
            .validate_within(self.host.limits())
            .and_then(|_| self.host.open(geometry));

        match result {
            Ok(()) => {
                info!("Display opened at {}", geometry);
                self.geometry = Some(geometry);
                Ok(())
            }
            Err(err) => {
                warn!("Rejected display open: {}", err);
                Err(err)
            }
        }
    }

    /// Publish one frame from the caller's linear memory
    ///
    /// Exactly `width * height` bytes starting at `offset` are read; nothing
    /// outside that range is touched.
    ///
    /// # Arguments
    /// * `memory` - The caller's linear memory
    /// * `offset` - Byte offset of the first pixel
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    ///
    /// # Errors
    /// `InvalidGeometry` or `OutOfBounds` from validation, or whatever the
    /// host reports. The host pixel store is never partially written.
    pub fn publish(
        &mut self,
        memory: &[u8],
        offset: usize,
        width: u32,
        height: u32,
    ) -> Result<(), DisplayError> {
        let view = FrameBufferView::from_memory(memory, offset, Geometry::new(width, height))
            .inspect_err(|err| warn!("Rejected frame: {}", err))?;

        self.publish_view(&view)
    }

    /// Publish a frame that has already been carved out of core memory
    pub fn publish_view(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError> {
        if let Some(expected) = self.geometry {
            if expected != frame.geometry() {
                debug!(
                    "Frame geometry {} differs from surface {}",
                    frame.geometry(),
                    expected
                );
            }
        }

        self.host
            .publish(frame)
            .inspect_err(|err| warn!("Host rejected frame: {}", err))
    }

    /// Last geometry accepted by `open`
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// The wrapped host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the wrapped host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Unwrap the host
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::host::HeadlessHost;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn test_open_sets_geometry() {
        let mut port = DisplayPort::new(HeadlessHost::new());
        port.open(336, 240).unwrap();

        assert_eq!(port.geometry(), Some(Geometry::new(336, 240)));
        assert_eq!(port.host().geometry(), Some(Geometry::new(336, 240)));
    }

    #[test]
    fn test_open_zero_keeps_previous() {
        let mut port = DisplayPort::new(HeadlessHost::new());
        port.open(320, 240).unwrap();

        assert!(port.open(0, 240).is_err());
        assert!(port.open(320, 0).is_err());
        assert_eq!(port.host().geometry(), Some(Geometry::new(320, 240)));
        assert_eq!(port.geometry(), Some(Geometry::new(320, 240)));
    }

    #[test]
    fn test_publish_copies_exact_bytes() {
        let mut port = DisplayPort::new(HeadlessHost::new());
        port.open(4, 4).unwrap();

        let mut memory = vec![0xEE; 64];
        memory[8..24].copy_from_slice(&ramp(16));

        port.publish(&memory, 8, 4, 4).unwrap();
        assert_eq!(port.host().pixels(), Some(&ramp(16)[..]));
    }

    #[test]
    fn test_publish_out_of_bounds_leaves_store() {
        let mut port = DisplayPort::new(HeadlessHost::new());
        port.open(4, 4).unwrap();
        port.publish(&ramp(16), 0, 4, 4).unwrap();

        let result = port.publish(&[0u8; 20], 5, 4, 4);

        assert_eq!(
            result,
            Err(DisplayError::OutOfBounds {
                offset: 5,
                length: 16,
                available: 20,
            })
        );
        assert_eq!(port.host().pixels(), Some(&ramp(16)[..]));
    }

    #[test]
    fn test_publish_mismatch_rejected_by_host() {
        let mut port = DisplayPort::new(HeadlessHost::new());
        port.open(4, 4).unwrap();

        let result = port.publish(&[0u8; 64], 0, 8, 8);
        assert!(matches!(result, Err(DisplayError::GeometryMismatch { .. })));
    }
}
