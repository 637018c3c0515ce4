// Geometry - Width/height pairs for display surfaces and frames
//
// Every frame handed to the host is described by a geometry. The pixel
// count is derived with checked arithmetic so that a hostile or buggy
// core cannot make the host compute a wrapped length.

use super::error::DisplayError;
use std::fmt;

/// Largest width accepted by hosts unless configured otherwise
pub const DEFAULT_MAX_WIDTH: u32 = 4096;

/// Largest height accepted by hosts unless configured otherwise
pub const DEFAULT_MAX_HEIGHT: u32 = 4096;

/// Sharp LCD panel resolution (Newton MessagePad 100 class devices)
pub const SHARP_LCD: Geometry = Geometry::new(336, 240);

/// Squirt LCD panel resolution
pub const SQUIRT_LCD: Geometry = Geometry::new(320, 240);

/// Size of a display surface or frame in pixels
///
/// One pixel is one byte, so the pixel count is also the byte length of a
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Geometry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Geometry {
    /// Create a geometry without validating it
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels (and bytes) covered by this geometry
    ///
    /// Returns `None` if `width * height` does not fit in `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// The same geometry with width and height swapped
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Validate that both dimensions are positive
    ///
    /// # Returns
    /// The pixel count of the geometry
    ///
    /// # Errors
    /// `InvalidGeometry` for a zero dimension, `OutOfBounds` if the pixel
    /// count overflows
    pub fn validate(&self) -> Result<usize, DisplayError> {
        if self.is_empty() {
            return Err(DisplayError::InvalidGeometry {
                geometry: *self,
                reason: "width and height must be non-zero",
            });
        }

        self.pixel_count().ok_or(DisplayError::OutOfBounds {
            offset: 0,
            length: usize::MAX,
            available: 0,
        })
    }

    /// Validate against an upper bound on each dimension
    ///
    /// # Arguments
    /// * `limits` - Largest accepted width and height
    pub fn validate_within(&self, limits: Geometry) -> Result<usize, DisplayError> {
        let count = self.validate()?;

        if self.width > limits.width || self.height > limits.height {
            return Err(DisplayError::InvalidGeometry {
                geometry: *self,
                reason: "exceeds host display limits",
            });
        }

        Ok(count)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Geometry {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        assert_eq!(Geometry::new(160, 160).pixel_count(), Some(25_600));
        assert_eq!(SHARP_LCD.pixel_count(), Some(336 * 240));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Geometry::new(0, 240).validate(),
            Err(DisplayError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            Geometry::new(320, 0).validate(),
            Err(DisplayError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_limits() {
        let limits = Geometry::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT);
        assert_eq!(Geometry::new(4096, 4096).validate_within(limits), Ok(4096 * 4096));
        assert!(Geometry::new(4097, 1).validate_within(limits).is_err());
    }

    #[test]
    fn test_transposed() {
        assert_eq!(SQUIRT_LCD.transposed(), Geometry::new(240, 320));
    }

    #[test]
    fn test_display() {
        assert_eq!(SHARP_LCD.to_string(), "336x240");
    }
}
