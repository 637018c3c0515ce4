// Common test utilities for display integration tests
//
// Builds "core memory" images with known contents so tests can check
// exactly which bytes reached the host.

#![allow(dead_code)]

use newton_display::{DisplayPort, HeadlessHost};

/// Byte placed around frames to detect reads or writes outside the view
pub const SENTINEL: u8 = 0xA5;

/// Repeating 0x00..=0xFF pattern of the given length
pub fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Core memory with `frame` at `offset`, surrounded by sentinel bytes
///
/// # Arguments
///
/// * `frame` - Frame bytes to place
/// * `offset` - Where the frame starts
/// * `trailing` - Sentinel bytes after the frame
pub fn memory_with_frame(frame: &[u8], offset: usize, trailing: usize) -> Vec<u8> {
    let mut memory = vec![SENTINEL; offset + frame.len() + trailing];
    memory[offset..offset + frame.len()].copy_from_slice(frame);
    memory
}

/// A port over a fresh headless host, already opened at `width`×`height`
pub fn opened_port(width: u32, height: u32) -> DisplayPort<HeadlessHost> {
    let mut port = DisplayPort::new(HeadlessHost::new());
    port.open(width, height).expect("Failed to open display");
    port
}

/// Pixel store of the port's host
pub fn store(port: &DisplayPort<HeadlessHost>) -> Vec<u8> {
    port.host()
        .pixels()
        .expect("Display has not been opened")
        .to_vec()
}
