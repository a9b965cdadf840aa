//! FrameSink trait and the headless no-op sink.
//!
//! A sink is handed one owned snapshot per frame. The headless sink only
//! counts them, which is all benchmarks and CI need.

use weft_solver::ClothSnapshot;
use weft_types::WeftResult;

/// Consumer of simulation snapshots.
///
/// # Implementations
/// - [`HeadlessSink`]: Counts and discards frames
/// - [`JsonFrameExporter`](crate::JsonFrameExporter): Writes the run to a JSON file
pub trait FrameSink: Send {
    /// Called once with the pre-simulation snapshot. Topology (index
    /// buffer, colors) is taken from here.
    fn init(&mut self, first: &ClothSnapshot) -> WeftResult<()>;

    /// Submit a frame.
    fn submit(&mut self, frame: &ClothSnapshot) -> WeftResult<()>;

    /// Flush buffers, write files.
    fn finalize(&mut self) -> WeftResult<()>;

    fn name(&self) -> &str;

    /// Frames submitted so far.
    fn frame_count(&self) -> u32;
}

/// Discards all frames.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    frames: u32,
    last_tick: Option<u64>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick of the most recent frame.
    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }
}

impl FrameSink for HeadlessSink {
    fn init(&mut self, _first: &ClothSnapshot) -> WeftResult<()> {
        Ok(())
    }

    fn submit(&mut self, frame: &ClothSnapshot) -> WeftResult<()> {
        self.frames += 1;
        self.last_tick = Some(frame.tick);
        Ok(())
    }

    fn finalize(&mut self) -> WeftResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
