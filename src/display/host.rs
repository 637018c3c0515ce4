// Display hosts - Whatever actually owns and presents the surface
//
// The emulator core never touches a host directly; it goes through a
// `DisplayPort`, which validates every call before forwarding it here.

use super::error::DisplayError;
use super::framebuffer::FrameBufferView;
use super::geometry::{Geometry, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use super::surface::DisplaySurface;

/// Host-side implementation of the two display operations
///
/// Implementations must check everything they need before mutating any
/// state, so that an `Err` leaves the host exactly as it was.
pub trait DisplayHost {
    /// Create or resize the display surface
    fn open(&mut self, geometry: Geometry) -> Result<(), DisplayError>;

    /// Copy one frame into the host pixel store
    ///
    /// The view is only valid for the duration of the call.
    fn publish(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError>;

    /// Largest geometry the host accepts
    fn limits(&self) -> Geometry {
        Geometry::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT)
    }
}

impl<H: DisplayHost + ?Sized> DisplayHost for Box<H> {
    fn open(&mut self, geometry: Geometry) -> Result<(), DisplayError> {
        (**self).open(geometry)
    }

    fn publish(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError> {
        (**self).publish(frame)
    }

    fn limits(&self) -> Geometry {
        (**self).limits()
    }
}

/// In-memory host with no presentation
///
/// Used by tests, benchmarks and cores running without a window.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    surface: Option<DisplaySurface>,
    limits: Geometry,
}

impl HeadlessHost {
    /// Create a host with no surface and default limits
    pub fn new() -> Self {
        Self {
            surface: None,
            limits: Geometry::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
        }
    }

    /// Set the largest accepted geometry
    pub fn with_limits(mut self, limits: Geometry) -> Self {
        self.limits = limits;
        self
    }

    /// The current surface, if one has been opened
    pub fn surface(&self) -> Option<&DisplaySurface> {
        self.surface.as_ref()
    }

    /// Mutable access to the current surface
    pub fn surface_mut(&mut self) -> Option<&mut DisplaySurface> {
        self.surface.as_mut()
    }

    /// Current surface geometry, if one has been opened
    pub fn geometry(&self) -> Option<Geometry> {
        self.surface.as_ref().map(DisplaySurface::geometry)
    }

    /// Current pixel store, if a surface has been opened
    pub fn pixels(&self) -> Option<&[u8]> {
        self.surface.as_ref().map(DisplaySurface::pixels)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHost for HeadlessHost {
    fn open(&mut self, geometry: Geometry) -> Result<(), DisplayError> {
        geometry.validate_within(self.limits)?;

        match &mut self.surface {
            Some(surface) => surface.resize(geometry),
            None => {
                self.surface = Some(DisplaySurface::new(geometry)?);
                Ok(())
            }
        }
    }

    fn publish(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError> {
        let surface = self.surface.as_mut().ok_or(DisplayError::NotOpen)?;
        surface.write_frame(frame)
    }

    fn limits(&self) -> Geometry {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_surface() {
        let mut host = HeadlessHost::new();
        assert_eq!(host.geometry(), None);

        host.open(Geometry::new(336, 240)).unwrap();
        assert_eq!(host.geometry(), Some(Geometry::new(336, 240)));
    }

    #[test]
    fn test_publish_before_open() {
        let mut host = HeadlessHost::new();
        let memory = [0u8; 4];
        let view = FrameBufferView::from_slice(&memory, Geometry::new(2, 2)).unwrap();

        assert_eq!(host.publish(&view), Err(DisplayError::NotOpen));
    }

    #[test]
    fn test_limits_enforced() {
        let mut host = HeadlessHost::new().with_limits(Geometry::new(320, 240));
        host.open(Geometry::new(320, 240)).unwrap();

        let result = host.open(Geometry::new(336, 240));

        assert!(matches!(result, Err(DisplayError::InvalidGeometry { .. })));
        assert_eq!(host.geometry(), Some(Geometry::new(320, 240)));
    }

    #[test]
    fn test_boxed_host_forwards() {
        let mut host: Box<dyn DisplayHost> = Box::new(HeadlessHost::new());
        host.open(Geometry::new(4, 4)).unwrap();

        let memory = [9u8; 16];
        let view = FrameBufferView::from_slice(&memory, Geometry::new(4, 4)).unwrap();
        host.publish(&view).unwrap();
    }
}
