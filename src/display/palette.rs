// Grayscale Palette - Pixel level to RGBA conversion
//
// Newton LCDs are 1 bpp, but the emulator core writes one byte per pixel
// so that it can show a gray level while the device sleeps. Pixel bytes
// are passed through untouched into the host store; this palette is only
// applied at presentation time, mapping level N to gray (N, N, N).

/// Pixel level for a lit (black) LCD dot
pub const BLACK_COLOR: u8 = 0x00;

/// Pixel level the core uses to show that the device is asleep
pub const SLEEP_COLOR: u8 = 0xCC;

/// Pixel level for an unlit (white) LCD dot
pub const WHITE_COLOR: u8 = 0xFF;

/// Convert a pixel level to a 32-bit RGB color (0xRRGGBB)
#[inline]
pub fn level_to_rgb(level: u8) -> u32 {
    let level = level as u32;
    (level << 16) | (level << 8) | level
}

/// Convert a pixel level to RGBA bytes expected by the pixels crate
#[inline]
pub fn level_to_rgba(level: u8) -> [u8; 4] {
    [level, level, level, 0xFF]
}

/// Expand a buffer of pixel levels into RGBA
///
/// # Arguments
/// * `levels` - One byte per pixel
/// * `output` - RGBA output (must be at least `levels.len() * 4` bytes)
///
/// # Panics
/// Panics if output buffer is too small
pub fn levels_to_rgba(levels: &[u8], output: &mut [u8]) {
    assert!(
        output.len() >= levels.len() * 4,
        "Output buffer too small for RGBA conversion"
    );

    for (&level, rgba) in levels.iter().zip(output.chunks_exact_mut(4)) {
        rgba.copy_from_slice(&level_to_rgba(level));
    }
}
