// Presentation tests
//
// What the window would show: orientation, silkscreen, palette and
// screenshots, built from frames published through the port.

mod common;

use common::{opened_port, ramp};
use newton_display::display::{Geometry, BLACK_COLOR, WHITE_COLOR};
use newton_display::screenshot::{save_screenshot, ScreenshotOptions};
use newton_display::{FrameComposer, Orientation, Silkscreen};
use std::fs;

const SILKSCREEN_XBM: &str = "#define silk_width 8
#define silk_height 2
static unsigned char silk_bits[] = {
   0x0f, 0xf0 };
";

#[test]
fn rotated_panel_matches_portrait_layout() {
    let mut port = opened_port(4, 2);
    port.publish(&ramp(8), 0, 4, 2).unwrap();
    let surface = port.host().surface().unwrap();

    let mut composer = FrameComposer::new(Orientation::Rotated);
    let (geometry, pixels) = composer.compose(surface);

    // Source:      Presented:
    //   0 1 2 3      4 0
    //   4 5 6 7      5 1
    //                6 2
    //                7 3
    assert_eq!(geometry, Geometry::new(2, 4));
    assert_eq!(pixels, &[4, 0, 5, 1, 6, 2, 7, 3]);
}

#[test]
fn silkscreen_drawn_below_panel() {
    let silkscreen = Silkscreen::parse_xbm(SILKSCREEN_XBM).unwrap();
    let mut port = opened_port(8, 1);
    port.publish(&[0x80; 8], 0, 8, 1).unwrap();
    let surface = port.host().surface().unwrap();

    let mut composer = FrameComposer::new(Orientation::Native).with_silkscreen(Some(silkscreen));
    let (geometry, pixels) = composer.compose(surface);

    assert_eq!(geometry, Geometry::new(8, 3));
    assert_eq!(&pixels[..8], &[0x80; 8]);
    assert_eq!(&pixels[8..12], &[BLACK_COLOR; 4]);
    assert_eq!(&pixels[12..16], &[WHITE_COLOR; 4]);
    assert_eq!(&pixels[16..20], &[WHITE_COLOR; 4]);
    assert_eq!(&pixels[20..24], &[BLACK_COLOR; 4]);
}

#[test]
fn rgba_is_gray_passthrough() {
    let mut port = opened_port(16, 16);
    let frame = ramp(256);
    port.publish(&frame, 0, 16, 16).unwrap();

    let mut composer = FrameComposer::new(Orientation::Native);
    let mut rgba = vec![0u8; 256 * 4];
    composer.compose_rgba(port.host().surface().unwrap(), &mut rgba);

    for (level, pixel) in frame.iter().zip(rgba.chunks_exact(4)) {
        assert_eq!(pixel, &[*level, *level, *level, 0xFF]);
    }
}

#[test]
fn screenshot_of_composed_frame() {
    let directory = std::env::temp_dir().join(format!(
        "newton_display_presentation_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&directory);
    let options = ScreenshotOptions {
        directory: directory.clone(),
        include_timestamp: true,
    };

    let mut port = opened_port(32, 24);
    port.publish(&ramp(32 * 24), 0, 32, 24).unwrap();
    let mut composer = FrameComposer::new(Orientation::Rotated);
    let (geometry, pixels) = composer.compose(port.host().surface().unwrap());

    let path = save_screenshot(pixels, geometry, &options).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert!(path.starts_with(&directory));

    let _ = fs::remove_dir_all(&directory);
}
