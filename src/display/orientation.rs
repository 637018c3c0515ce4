// Orientation - How the LCD contents are laid out on the host window
//
// Newton panels are mounted sideways in portrait devices. The core always
// writes frames in panel order; the presenter rotates them if asked to.

use super::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// Presentation orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Present rows exactly as stored
    #[default]
    Native,
    /// Rotate a quarter turn clockwise (portrait devices)
    Rotated,
}

impl Orientation {
    /// Geometry of the presented image for a surface of `geometry`
    pub fn presented(self, geometry: Geometry) -> Geometry {
        match self {
            Orientation::Native => geometry,
            Orientation::Rotated => geometry.transposed(),
        }
    }

    /// Lay out `src` (row-major, `geometry` sized) into `dest`
    ///
    /// `dest` is resized to `width * height`. In rotated mode each source
    /// column becomes a destination row, read from the bottom of the
    /// column upwards.
    pub fn apply(self, src: &[u8], geometry: Geometry, dest: &mut Vec<u8>) {
        let width = geometry.width as usize;
        let height = geometry.height as usize;

        dest.clear();
        dest.reserve(width * height);

        match self {
            Orientation::Native => dest.extend_from_slice(&src[..width * height]),
            Orientation::Rotated => {
                for x in 0..width {
                    for y in (0..height).rev() {
                        dest.push(src[y * width + x]);
                    }
                }
            }
        }
    }
}
