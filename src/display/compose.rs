// Frame composition - Builds the image a presenter shows
//
// The presented image is the surface after orientation, with the
// silkscreen strip appended underneath when its width lines up.

use super::geometry::Geometry;
use super::orientation::Orientation;
use super::palette::levels_to_rgba;
use super::silkscreen::Silkscreen;
use super::surface::DisplaySurface;
use log::warn;

/// Turns a surface into a presentable gray image
#[derive(Debug, Clone, Default)]
pub struct FrameComposer {
    orientation: Orientation,
    silkscreen: Option<Silkscreen>,
    /// Reused between frames to avoid reallocating
    scratch: Vec<u8>,
    /// Width for which a silkscreen mismatch was already reported
    warned_width: Option<u32>,
}

impl FrameComposer {
    /// Create a composer for the given orientation
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Attach silkscreen artwork
    pub fn with_silkscreen(mut self, silkscreen: Option<Silkscreen>) -> Self {
        self.silkscreen = silkscreen;
        self
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Geometry of the composed image for a surface of `geometry`
    pub fn output_geometry(&self, geometry: Geometry) -> Geometry {
        let lcd = self.orientation.presented(geometry);
        match &self.silkscreen {
            Some(silk) if silk.geometry().width == lcd.width => {
                Geometry::new(lcd.width, lcd.height + silk.geometry().height)
            }
            _ => lcd,
        }
    }

    /// Compose the surface into a gray image
    ///
    /// # Returns
    /// The composed geometry and pixel levels
    pub fn compose(&mut self, surface: &DisplaySurface) -> (Geometry, &[u8]) {
        let lcd = self.orientation.presented(surface.geometry());
        self.orientation
            .apply(surface.pixels(), surface.geometry(), &mut self.scratch);

        let mut output = lcd;
        if let Some(silk) = &self.silkscreen {
            if silk.geometry().width == lcd.width {
                self.scratch.extend_from_slice(silk.pixels());
                output.height += silk.geometry().height;
            } else if self.warned_width != Some(lcd.width) {
                warn!(
                    "Silkscreen is {} wide but the display is {}; not drawing it",
                    silk.geometry().width,
                    lcd.width
                );
                self.warned_width = Some(lcd.width);
            }
        }

        (output, &self.scratch)
    }

    /// Compose the surface straight into an RGBA buffer
    ///
    /// # Returns
    /// The composed geometry
    pub fn compose_rgba(&mut self, surface: &DisplaySurface, rgba: &mut [u8]) -> Geometry {
        let (geometry, levels) = self.compose(surface);
        levels_to_rgba(levels, rgba);
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::FrameBufferView;
    use crate::display::palette::{BLACK_COLOR, WHITE_COLOR};

    fn surface_with(pixels: &[u8], geometry: Geometry) -> DisplaySurface {
        let mut surface = DisplaySurface::new(geometry).unwrap();
        let view = FrameBufferView::from_slice(pixels, geometry).unwrap();
        surface.write_frame(&view).unwrap();
        surface
    }

    #[test]
    fn test_compose_native() {
        let surface = surface_with(&[1, 2, 3, 4], Geometry::new(2, 2));
        let mut composer = FrameComposer::new(Orientation::Native);

        let (geometry, pixels) = composer.compose(&surface);
        assert_eq!(geometry, Geometry::new(2, 2));
        assert_eq!(pixels, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_compose_with_silkscreen() {
        let surface = surface_with(&[7; 6], Geometry::new(3, 2));
        let silk = Silkscreen::from_bits(Geometry::new(2, 1), &[0b01]).unwrap();
        let mut composer = FrameComposer::new(Orientation::Rotated).with_silkscreen(Some(silk));

        assert_eq!(
            composer.output_geometry(surface.geometry()),
            Geometry::new(2, 4)
        );

        let (geometry, pixels) = composer.compose(&surface);
        assert_eq!(geometry, Geometry::new(2, 4));
        assert_eq!(&pixels[..6], &[7; 6]);
        assert_eq!(&pixels[6..], &[BLACK_COLOR, WHITE_COLOR]);
    }

    #[test]
    fn test_mismatched_silkscreen_skipped() {
        let surface = surface_with(&[7; 6], Geometry::new(3, 2));
        let silk = Silkscreen::from_bits(Geometry::new(8, 1), &[0xFF]).unwrap();
        let mut composer = FrameComposer::new(Orientation::Native).with_silkscreen(Some(silk));

        let (geometry, pixels) = composer.compose(&surface);
        assert_eq!(geometry, Geometry::new(3, 2));
        assert_eq!(pixels.len(), 6);
    }

    #[test]
    fn test_compose_rgba() {
        let surface = surface_with(&[0x40], Geometry::new(1, 1));
        let mut composer = FrameComposer::new(Orientation::Native);
        let mut rgba = [0u8; 4];

        composer.compose_rgba(&surface, &mut rgba);
        assert_eq!(rgba, [0x40, 0x40, 0x40, 0xFF]);
    }
}
