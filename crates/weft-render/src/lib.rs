//! # weft-render
//!
//! The renderer side of the snapshot boundary.
//!
//! Provides a [`FrameSink`] trait with a [`HeadlessSink`] no-op, a
//! [`JsonFrameExporter`] that writes the animation to JSON, and a
//! [`SnapshotChannel`] that carries owned snapshots from the simulation
//! thread to a render thread.

pub mod channel;
pub mod json_exporter;
pub mod sink;

pub use channel::{SnapshotChannel, SnapshotReceiver, SnapshotSender};
pub use json_exporter::JsonFrameExporter;
pub use sink::{FrameSink, HeadlessSink};
