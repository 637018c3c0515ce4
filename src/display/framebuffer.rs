// Frame Buffer View - Bounded, borrowed view of one frame in core memory
//
// The emulator core owns its linear memory. For the duration of a single
// publish it lends the host a read-only slice of exactly width×height
// bytes (one byte per pixel). The lifetime ties the view to that call.

use super::error::DisplayError;
use super::geometry::Geometry;

/// Read-only view of one frame inside the emulator's memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferView<'a> {
    offset: usize,
    geometry: Geometry,
    pixels: &'a [u8],
}

impl<'a> FrameBufferView<'a> {
    /// Carve a frame out of the caller's linear memory
    ///
    /// # Arguments
    /// * `memory` - The caller's whole memory region
    /// * `offset` - Byte offset of the first pixel
    /// * `geometry` - Frame size; `width * height` bytes are viewed
    ///
    /// # Errors
    /// `InvalidGeometry` for a zero dimension, `OutOfBounds` when
    /// `[offset, offset + width*height)` is not inside `memory`
    pub fn from_memory(
        memory: &'a [u8],
        offset: usize,
        geometry: Geometry,
    ) -> Result<Self, DisplayError> {
        let length = geometry.validate()?;

        let out_of_bounds = DisplayError::OutOfBounds {
            offset,
            length,
            available: memory.len(),
        };

        let end = offset.checked_add(length).ok_or(out_of_bounds.clone())?;
        let pixels = memory.get(offset..end).ok_or(out_of_bounds)?;

        Ok(Self {
            offset,
            geometry,
            pixels,
        })
    }

    /// View a slice that holds exactly one frame
    ///
    /// # Errors
    /// `OutOfBounds` if the slice is shorter than the frame. Trailing bytes
    /// beyond the frame are ignored.
    pub fn from_slice(pixels: &'a [u8], geometry: Geometry) -> Result<Self, DisplayError> {
        Self::from_memory(pixels, 0, geometry)
    }

    /// Offset of the frame within the caller's memory
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Frame geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    /// Pixel bytes, row-major, exactly `width * height` long
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Number of bytes in the view
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`: zero-sized frames cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_is_exact() {
        let memory: Vec<u8> = (0..=255).collect();
        let view = FrameBufferView::from_memory(&memory, 16, Geometry::new(4, 2)).unwrap();

        assert_eq!(view.len(), 8);
        assert_eq!(view.pixels(), &memory[16..24]);
        assert_eq!(view.offset(), 16);
    }

    #[test]
    fn test_view_at_end_of_memory() {
        let memory = vec![0xAA; 64];
        let view = FrameBufferView::from_memory(&memory, 48, Geometry::new(4, 4)).unwrap();
        assert_eq!(view.len(), 16);
    }

    #[test]
    fn test_view_past_end_rejected() {
        let memory = vec![0; 64];
        let result = FrameBufferView::from_memory(&memory, 49, Geometry::new(4, 4));

        assert_eq!(
            result,
            Err(DisplayError::OutOfBounds {
                offset: 49,
                length: 16,
                available: 64,
            })
        );
    }

    #[test]
    fn test_offset_overflow_rejected() {
        let memory = vec![0; 64];
        let result = FrameBufferView::from_memory(&memory, usize::MAX, Geometry::new(2, 2));
        assert!(matches!(result, Err(DisplayError::OutOfBounds { .. })));
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let memory = vec![0; 64];
        let result = FrameBufferView::from_slice(&memory, Geometry::new(0, 4));
        assert!(matches!(result, Err(DisplayError::InvalidGeometry { .. })));
    }
}
