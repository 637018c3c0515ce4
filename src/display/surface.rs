// Display Surface - Host-owned pixel store
//
// The surface is the host's copy of the LCD contents. Its geometry is
// whatever the core last opened, and its store is always exactly
// width×height bytes.

use super::error::DisplayError;
use super::framebuffer::FrameBufferView;
use super::geometry::Geometry;
use super::palette::WHITE_COLOR;

/// Host-side pixel store with a current geometry
#[derive(Debug, Clone)]
pub struct DisplaySurface {
    geometry: Geometry,
    /// One byte per pixel, row-major
    pixels: Vec<u8>,
    /// Set when a frame lands, cleared when the presenter consumes it
    dirty: bool,
    /// Number of frames written since the last resize
    frames: u64,
}

impl DisplaySurface {
    /// Allocate a surface filled with white
    ///
    /// # Errors
    /// `InvalidGeometry` if either dimension is zero
    pub fn new(geometry: Geometry) -> Result<Self, DisplayError> {
        let len = geometry.validate()?;

        Ok(Self {
            geometry,
            pixels: vec![WHITE_COLOR; len],
            dirty: false,
            frames: 0,
        })
    }

    /// Current geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    /// The pixel store
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel level at the given coordinates, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.geometry.width || y >= self.geometry.height {
            return None;
        }
        let index = y as usize * self.geometry.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// Whether a frame has landed since the last `take_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of frames written since the surface was last resized
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Resize the surface, discarding its contents
    ///
    /// The store is refilled with white and the surface is marked dirty so
    /// that presenters repaint the blank panel.
    ///
    /// # Errors
    /// `InvalidGeometry` if either dimension is zero; the surface is left
    /// unchanged
    pub fn resize(&mut self, geometry: Geometry) -> Result<(), DisplayError> {
        let len = geometry.validate()?;

        self.geometry = geometry;
        self.pixels.clear();
        self.pixels.resize(len, WHITE_COLOR);
        self.dirty = true;
        self.frames = 0;
        Ok(())
    }

    /// Copy one frame into the store
    ///
    /// # Errors
    /// `GeometryMismatch` if the frame is not the surface's size; the store
    /// is left unchanged
    pub fn write_frame(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError> {
        self.write_pixels(frame.geometry(), frame.pixels())
    }

    /// Copy raw pixel bytes of the given geometry into the store
    pub fn write_pixels(&mut self, geometry: Geometry, pixels: &[u8]) -> Result<(), DisplayError> {
        if geometry != self.geometry {
            return Err(DisplayError::GeometryMismatch {
                expected: self.geometry,
                actual: geometry,
            });
        }

        if pixels.len() != self.pixels.len() {
            return Err(DisplayError::OutOfBounds {
                offset: 0,
                length: self.pixels.len(),
                available: pixels.len(),
            });
        }

        self.pixels.copy_from_slice(pixels);
        self.dirty = true;
        self.frames += 1;
        Ok(())
    }

    /// Fill the whole surface with one pixel level
    pub fn clear(&mut self, level: u8) {
        self.pixels.fill(level);
        self.dirty = true;
    }
}
