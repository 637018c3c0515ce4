// Display errors
//
// Every failure is detected before the host surface is touched, so an
// error always means "nothing changed".

use super::geometry::Geometry;

/// Errors returned by the display port and its hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Zero-sized geometry, or a size the host refuses to allocate
    InvalidGeometry {
        /// The rejected geometry
        geometry: Geometry,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The frame does not fit inside the caller's memory region
    OutOfBounds {
        /// Byte offset of the frame in the caller's memory
        offset: usize,
        /// Number of bytes the frame needs
        length: usize,
        /// Number of bytes in the caller's memory
        available: usize,
    },

    /// The frame size differs from the surface size
    GeometryMismatch {
        /// Current surface geometry
        expected: Geometry,
        /// Geometry of the published frame
        actual: Geometry,
    },

    /// A frame was published before any surface was opened
    NotOpen,

    /// The presenting side of a hand-off has gone away
    HostDisconnected,
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayError::InvalidGeometry { geometry, reason } => {
                write!(f, "invalid display geometry {}: {}", geometry, reason)
            }
            DisplayError::OutOfBounds {
                offset,
                length,
                available,
            } => write!(
                f,
                "frame of {} bytes at offset {:#x} exceeds {} bytes of memory",
                length, offset, available
            ),
            DisplayError::GeometryMismatch { expected, actual } => write!(
                f,
                "frame geometry {} does not match surface geometry {}",
                actual, expected
            ),
            DisplayError::NotOpen => write!(f, "display surface has not been opened"),
            DisplayError::HostDisconnected => write!(f, "display host disconnected"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl<T> From<crossbeam_channel::SendError<T>> for DisplayError {
    fn from(_: crossbeam_channel::SendError<T>) -> Self {
        DisplayError::HostDisconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = DisplayError::OutOfBounds {
            offset: 0x100,
            length: 25_600,
            available: 4096,
        };
        assert_eq!(
            err.to_string(),
            "frame of 25600 bytes at offset 0x100 exceeds 4096 bytes of memory"
        );
    }

    #[test]
    fn test_mismatch_message() {
        let err = DisplayError::GeometryMismatch {
            expected: Geometry::new(320, 240),
            actual: Geometry::new(160, 160),
        };
        assert_eq!(
            err.to_string(),
            "frame geometry 160x160 does not match surface geometry 320x240"
        );
    }
}
