//! JSON frame exporter: writes per-frame cloth data for visual inspection.
//!
//! Captures positions and normals at each frame, then serializes the whole
//! run on `finalize()`. Topology and colors are written once.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use weft_solver::ClothSnapshot;
use weft_types::{WeftError, WeftResult};

use crate::sink::FrameSink;

/// A single frame of captured cloth data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub tick: u64,
    pub sim_time: f64,
    /// Interleaved `[x0, y0, z0, x1, ...]`.
    pub positions: Vec<f32>,
    /// Interleaved like `positions`.
    pub normals: Vec<f32>,
}

/// Complete animation data as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub indices: Vec<u32>,
    /// RGBA8 per vertex.
    pub colors: Vec<[u8; 4]>,
    pub frames: Vec<FrameData>,
}

/// Exports submitted frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json");
/// exporter.init(&cloth.snapshot())?;
/// // ... tick, then exporter.submit(&cloth.snapshot())? ...
/// exporter.finalize()?; // writes the file
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    data: AnimationData,
    submitted: u32,
}

impl JsonFrameExporter {
    /// Creates an exporter that will write to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            data: AnimationData::default(),
            submitted: 0,
        }
    }

    /// Serializes everything captured so far.
    pub fn to_json(&self) -> WeftResult<String> {
        serde_json::to_string(&self.data)
            .map_err(|e| WeftError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Reads an exported file back.
    pub fn load(path: impl AsRef<std::path::Path>) -> WeftResult<AnimationData> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| WeftError::Serialization(format!("JSON deserialization failed: {e}")))
    }
}

impl FrameSink for JsonFrameExporter {
    fn init(&mut self, first: &ClothSnapshot) -> WeftResult<()> {
        self.data.vertex_count = first.vertex_count();
        self.data.triangle_count = first.triangle_count();
        self.data.indices = first.indices.clone();
        self.data.colors = first.vertices.iter().map(|v| v.color).collect();
        Ok(())
    }

    fn submit(&mut self, frame: &ClothSnapshot) -> WeftResult<()> {
        if frame.vertex_count() != self.data.vertex_count {
            return Err(WeftError::InvalidMesh(format!(
                "frame at tick {} has {} vertices, exporter was initialised with {}",
                frame.tick,
                frame.vertex_count(),
                self.data.vertex_count
            )));
        }
        self.data.frames.push(FrameData {
            tick: frame.tick,
            sim_time: frame.sim_time,
            positions: frame.interleaved_positions(),
            normals: frame.vertices.iter().flat_map(|v| v.normal).collect(),
        });
        self.submitted += 1;
        Ok(())
    }

    fn finalize(&mut self) -> WeftResult<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = self.data.frames.len(),
            "wrote frame export"
        );
        self.data.frames.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.submitted
    }
}
