//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    pub vertex_count: usize,
    pub spring_count: usize,
    pub triangle_count: usize,
    /// Number of ticks executed.
    pub ticks: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy after the last tick.
    pub final_kinetic_energy: f64,
    /// Kinetic + spring + gravitational energy after the last tick.
    pub final_total_energy: f64,
    /// Largest distance any vertex moved from its starting position.
    pub max_displacement: f32,
    /// Largest relative spring extension after the last tick.
    pub max_strain: f32,
    /// Degenerate springs skipped, summed over all ticks.
    pub degenerate_springs: u64,
    /// Velocity clamps, summed over all ticks.
    pub clamped_vertices: u64,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,vertex_count,spring_count,triangle_count,ticks,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,final_energy,max_displacement,max_strain,degenerate_springs,clamped_vertices".to_string()
    }

    /// One CSV row; step times in milliseconds.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6},{:.6},{},{}",
            self.scenario,
            self.vertex_count,
            self.spring_count,
            self.triangle_count,
            self.ticks,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.final_total_energy,
            self.max_displacement,
            self.max_strain,
            self.degenerate_springs,
            self.clamped_vertices,
        )
    }

    /// Header plus one row per run, newline-separated.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        std::iter::once(Self::to_csv_header())
            .chain(metrics.iter().map(Self::to_csv_row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
