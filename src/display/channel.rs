// Channel hand-off - Emulation thread to render thread
//
// The core runs on its own thread and publishes through a `ChannelHost`.
// Opens travel over a bounded channel and are never lost. Frames are
// copied into an owned buffer and parked in a single latest-frame slot;
// a newer frame replaces one the render side has not picked up yet, so
// the window always ends on the core's last frame. Each slot entry is
// tagged with the number of opens before it, which keeps a frame from an
// old mode off a newer surface.

use super::error::DisplayError;
use super::framebuffer::FrameBufferView;
use super::geometry::{Geometry, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use super::host::DisplayHost;
use super::surface::DisplaySurface;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Default number of commands that may be in flight
pub const DEFAULT_CHANNEL_CAPACITY: usize = 3;

/// A message from the emulation thread to the render thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Create or resize the surface
    Open(Geometry),
    /// A frame is waiting in the latest-frame slot
    FrameReady,
}

/// A frame waiting for the render thread
#[derive(Debug)]
struct PendingFrame {
    /// Opens sent before this frame
    epoch: u64,
    geometry: Geometry,
    pixels: Vec<u8>,
}

type FrameSlot = Arc<Mutex<Option<PendingFrame>>>;

fn lock_slot(slot: &FrameSlot) -> MutexGuard<'_, Option<PendingFrame>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create a connected host/receiver pair
///
/// # Arguments
/// * `capacity` - Commands that may queue before `open` blocks
pub fn display_channel(capacity: usize) -> (ChannelHost, FrameReceiver) {
    let (sender, receiver) = bounded(capacity.max(1));
    let slot = FrameSlot::default();
    (
        ChannelHost::new(sender, slot.clone()),
        FrameReceiver::new(receiver, slot),
    )
}

/// Emulation-thread side of the hand-off
#[derive(Debug)]
pub struct ChannelHost {
    sender: Sender<DisplayCommand>,
    slot: FrameSlot,
    epoch: u64,
    geometry: Option<Geometry>,
    limits: Geometry,
    replaced: u64,
}

impl ChannelHost {
    fn new(sender: Sender<DisplayCommand>, slot: FrameSlot) -> Self {
        Self {
            sender,
            slot,
            epoch: 0,
            geometry: None,
            limits: Geometry::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT),
            replaced: 0,
        }
    }

    /// Set the largest accepted geometry
    pub fn with_limits(mut self, limits: Geometry) -> Self {
        self.limits = limits;
        self
    }

    /// Frames replaced by a newer one before the render side saw them
    pub fn dropped_frames(&self) -> u64 {
        self.replaced
    }
}

impl DisplayHost for ChannelHost {
    fn open(&mut self, geometry: Geometry) -> Result<(), DisplayError> {
        geometry.validate_within(self.limits)?;

        // Opens must never be coalesced away, so block until there is room.
        self.sender.send(DisplayCommand::Open(geometry))?;
        self.epoch += 1;
        self.geometry = Some(geometry);
        Ok(())
    }

    fn publish(&mut self, frame: &FrameBufferView<'_>) -> Result<(), DisplayError> {
        let expected = self.geometry.ok_or(DisplayError::NotOpen)?;
        if expected != frame.geometry() {
            return Err(DisplayError::GeometryMismatch {
                expected,
                actual: frame.geometry(),
            });
        }

        // Only this host holds the slot once the receiver is gone
        if Arc::strong_count(&self.slot) == 1 {
            return Err(DisplayError::HostDisconnected);
        }

        let pending = PendingFrame {
            epoch: self.epoch,
            geometry: frame.geometry(),
            pixels: frame.pixels().to_vec(),
        };
        if lock_slot(&self.slot).replace(pending).is_some() {
            self.replaced += 1;
            debug!(
                "Render side busy, replaced pending frame ({} total)",
                self.replaced
            );
        }

        // A full queue already guarantees a drain that will see the slot
        match self.sender.try_send(DisplayCommand::FrameReady) {
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err(DisplayError::HostDisconnected),
        }
    }

    fn limits(&self) -> Geometry {
        self.limits
    }
}

/// Result of draining pending commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// The surface was created or resized
    pub resized: bool,
    /// Number of frames written to the surface
    pub frames: usize,
    /// The emulation side has gone away and nothing is left to read
    pub disconnected: bool,
}

impl DrainSummary {
    /// Whether anything visible changed
    pub fn needs_redraw(&self) -> bool {
        self.resized || self.frames > 0
    }
}

/// Render-thread side of the hand-off
#[derive(Debug)]
pub struct FrameReceiver {
    receiver: Receiver<DisplayCommand>,
    slot: FrameSlot,
    /// Opens applied so far
    epoch: u64,
    surface: Option<DisplaySurface>,
}

impl FrameReceiver {
    fn new(receiver: Receiver<DisplayCommand>, slot: FrameSlot) -> Self {
        Self {
            receiver,
            slot,
            epoch: 0,
            surface: None,
        }
    }

    /// The surface built from received commands
    pub fn surface(&self) -> Option<&DisplaySurface> {
        self.surface.as_ref()
    }

    /// Mutable access to the surface
    pub fn surface_mut(&mut self) -> Option<&mut DisplaySurface> {
        self.surface.as_mut()
    }

    /// Apply every queued open and the latest frame, without blocking
    pub fn drain(&mut self) -> DrainSummary {
        let mut summary = DrainSummary::default();

        loop {
            match self.receiver.try_recv() {
                Ok(command) => self.apply(command, &mut summary),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    summary.disconnected = true;
                    break;
                }
            }
        }

        self.take_frame(&mut summary);
        summary
    }

    /// Wait up to `timeout` for one command, then pick up the latest frame
    pub fn wait(&mut self, timeout: Duration) -> DrainSummary {
        let mut summary = DrainSummary::default();

        match self.receiver.recv_timeout(timeout) {
            Ok(command) => self.apply(command, &mut summary),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => summary.disconnected = true,
        }

        self.take_frame(&mut summary);
        summary
    }

    fn apply(&mut self, command: DisplayCommand, summary: &mut DrainSummary) {
        let DisplayCommand::Open(geometry) = command else {
            return;
        };

        self.epoch += 1;
        let result = match &mut self.surface {
            Some(surface) => surface.resize(geometry),
            None => DisplaySurface::new(geometry).map(|s| self.surface = Some(s)),
        };
        match result {
            Ok(()) => summary.resized = true,
            Err(err) => warn!("Ignoring display open: {}", err),
        }
    }

    fn take_frame(&mut self, summary: &mut DrainSummary) {
        let frame = {
            let mut slot = lock_slot(&self.slot);
            // Leave frames whose open has not been received yet
            if !slot.as_ref().is_some_and(|pending| pending.epoch <= self.epoch) {
                return;
            }
            slot.take()
        };
        let Some(frame) = frame else {
            return;
        };

        if frame.epoch < self.epoch {
            debug!("Discarding frame from before the last open");
            return;
        }

        let Some(surface) = self.surface.as_mut() else {
            warn!("Frame received before display was opened");
            return;
        };
        match surface.write_pixels(frame.geometry, &frame.pixels) {
            Ok(()) => summary.frames += 1,
            Err(err) => warn!("Ignoring frame: {}", err),
        }
    }
}
