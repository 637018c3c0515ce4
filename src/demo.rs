// Demo core - A stand-in emulator core that drives the display
//
// It keeps a small linear memory with the LCD frame at a fixed offset,
// draws a test pattern into it each frame, and publishes through a
// DisplayPort exactly the way a real core would.

use crate::display::{DisplayError, DisplayHost, DisplayPort, Geometry, SLEEP_COLOR};
use log::info;
use std::thread;
use std::time::Duration;

/// Where the demo core keeps its frame inside its memory
pub const FRAME_OFFSET: usize = 0x1000;

/// Synthetic frame contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TestPattern {
    /// Repeating 0x00..=0xFF ramp, scrolling one pixel per frame
    #[default]
    Ramp,
    /// 8×8 black and white checkerboard, scrolling diagonally
    Checkerboard,
    /// A black vertical bar sweeping across a white panel
    Sweep,
    /// The gray level shown while the device sleeps
    Sleep,
}

impl TestPattern {
    /// Draw frame number `frame` into `out` (one byte per pixel)
    pub fn render(self, geometry: Geometry, frame: u64, out: &mut [u8]) {
        let width = geometry.width as usize;

        match self {
            TestPattern::Ramp => {
                for (i, pixel) in out.iter_mut().enumerate() {
                    *pixel = (i as u64).wrapping_add(frame) as u8;
                }
            }
            TestPattern::Checkerboard => {
                for (i, pixel) in out.iter_mut().enumerate() {
                    let x = (i % width) as u64 + frame;
                    let y = (i / width) as u64 + frame;
                    *pixel = if (x / 8 + y / 8) % 2 == 0 { 0x00 } else { 0xFF };
                }
            }
            TestPattern::Sweep => {
                let bar = (frame % width as u64) as usize;
                for (i, pixel) in out.iter_mut().enumerate() {
                    let x = i % width;
                    *pixel = if x.abs_diff(bar) < 4 { 0x00 } else { 0xFF };
                }
            }
            TestPattern::Sleep => out.fill(SLEEP_COLOR),
        }
    }
}

/// Minimal core: linear memory plus a frame counter
#[derive(Debug, Clone)]
pub struct DemoCore {
    memory: Vec<u8>,
    geometry: Geometry,
    pattern: TestPattern,
    frame: u64,
}

impl DemoCore {
    /// Allocate memory for one frame of `geometry` at `FRAME_OFFSET`
    pub fn new(geometry: Geometry, pattern: TestPattern) -> Result<Self, DisplayError> {
        let length = geometry.validate()?;

        Ok(Self {
            memory: vec![0; FRAME_OFFSET + length],
            geometry,
            pattern,
            frame: 0,
        })
    }

    /// The core's linear memory
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Frames produced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Open the display at the core's resolution
    pub fn start<H: DisplayHost>(&self, port: &mut DisplayPort<H>) -> Result<(), DisplayError> {
        port.open(self.geometry.width, self.geometry.height)
    }

    /// Draw the next frame and publish it
    pub fn step<H: DisplayHost>(&mut self, port: &mut DisplayPort<H>) -> Result<(), DisplayError> {
        self.pattern
            .render(self.geometry, self.frame, &mut self.memory[FRAME_OFFSET..]);
        self.frame += 1;

        port.publish(
            &self.memory,
            FRAME_OFFSET,
            self.geometry.width,
            self.geometry.height,
        )
    }

    /// Run until the host goes away or `max_frames` have been published
    ///
    /// # Arguments
    /// * `port` - Where frames go
    /// * `interval` - Sleep between frames
    /// * `max_frames` - Stop after this many frames (`None` = forever)
    pub fn run<H: DisplayHost>(
        mut self,
        mut port: DisplayPort<H>,
        interval: Duration,
        max_frames: Option<u64>,
    ) -> Result<u64, DisplayError> {
        match self.start(&mut port) {
            Ok(()) => {}
            Err(DisplayError::HostDisconnected) => return Ok(0),
            Err(err) => return Err(err),
        }

        while max_frames.is_none_or(|max| self.frame < max) {
            match self.step(&mut port) {
                Ok(()) => {}
                Err(DisplayError::HostDisconnected) => {
                    info!("Display closed after {} frames", self.frame);
                    break;
                }
                Err(err) => return Err(err),
            }
            thread::sleep(interval);
        }

        Ok(self.frame)
    }
}
