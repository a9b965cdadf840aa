//! Snapshot hand-off between the simulation and render threads.
//!
//! The simulation thread publishes an owned [`ClothSnapshot`] after every
//! tick; that publication is the "tick completed" notification. The render
//! thread drains whatever has arrived and usually keeps only the newest.

use std::sync::mpsc;

use weft_solver::ClothSnapshot;
use weft_types::WeftResult;

use crate::sink::FrameSink;

/// Constructor for a connected sender/receiver pair.
pub struct SnapshotChannel;

impl SnapshotChannel {
    pub fn open() -> (SnapshotSender, SnapshotReceiver) {
        let (sender, receiver) = mpsc::channel();
        (SnapshotSender { sender }, SnapshotReceiver { receiver })
    }
}

/// Simulation-side half. Cheap to clone.
#[derive(Clone)]
pub struct SnapshotSender {
    sender: mpsc::Sender<ClothSnapshot>,
}

impl SnapshotSender {
    /// Publishes a snapshot. Returns `false` once the receiver is gone.
    pub fn publish(&self, snapshot: ClothSnapshot) -> bool {
        self.sender.send(snapshot).is_ok()
    }
}

/// Render-side half.
pub struct SnapshotReceiver {
    receiver: mpsc::Receiver<ClothSnapshot>,
}

impl SnapshotReceiver {
    /// Drains pending snapshots and returns the newest, if any.
    pub fn latest(&self) -> Option<ClothSnapshot> {
        self.receiver.try_iter().last()
    }

    /// Blocks until the next snapshot. `None` once every sender is dropped.
    pub fn wait(&self) -> Option<ClothSnapshot> {
        self.receiver.recv().ok()
    }

    /// Submits every pending snapshot to `sink`, oldest first.
    pub fn drain_into(&self, sink: &mut dyn FrameSink) -> WeftResult<u32> {
        let mut count = 0;
        for snapshot in self.receiver.try_iter() {
            sink.submit(&snapshot)?;
            count += 1;
        }
        Ok(count)
    }
}
