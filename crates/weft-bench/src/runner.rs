//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use weft_math::Vec3;
use weft_solver::ClothState;
use weft_telemetry::{EventBus, EventKind, SimulationEvent};
use weft_types::WeftResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// When `bus` is given, a `Rebuild` event is emitted up front and
    /// `TickBegin`/`TickEnd`/`Energy` around every tick; the bus is flushed
    /// once at the end.
    pub fn run(scenario: &Scenario, mut bus: Option<&mut EventBus>) -> WeftResult<BenchmarkMetrics> {
        let mut cloth = ClothState::new(scenario.config.clone())?;
        if scenario.initial_stretch != 1.0 {
            stretch_about_centre(&mut cloth, scenario.initial_stretch)?;
        }

        if let Some(bus) = bus.as_deref() {
            bus.emit(SimulationEvent::new(
                0,
                EventKind::Rebuild {
                    vertices: cloth.vertex_count() as u32,
                    springs: cloth.springs().len() as u32,
                    triangles: (cloth.indices().len() / 3) as u32,
                },
            ));
        }

        let initial: Vec<Vec3> = cloth.positions().to_vec();
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.ticks as usize);
        let mut degenerate_springs = 0u64;
        let mut clamped_vertices = 0u64;

        let total_start = Instant::now();

        for _ in 0..scenario.ticks {
            if let Some(bus) = bus.as_deref() {
                bus.emit(SimulationEvent::new(
                    cloth.tick_count(),
                    EventKind::TickBegin {
                        sim_time: cloth.sim_time(),
                    },
                ));
            }

            let report = cloth.tick(scenario.dt)?;
            step_times.push(report.wall_time);
            degenerate_springs += report.degenerate_springs as u64;
            clamped_vertices += report.clamped_vertices as u64;

            if let Some(bus) = bus.as_deref() {
                bus.emit(SimulationEvent::new(
                    report.tick,
                    EventKind::TickEnd {
                        wall_time: report.wall_time,
                        max_speed: report.max_speed,
                        clamped_vertices: report.clamped_vertices,
                    },
                ));
                if report.degenerate_springs > 0 {
                    bus.emit(SimulationEvent::new(
                        report.tick,
                        EventKind::DegenerateSpring {
                            count: report.degenerate_springs,
                        },
                    ));
                }
                bus.emit(SimulationEvent::new(
                    report.tick,
                    EventKind::Energy {
                        kinetic: cloth.kinetic_energy(),
                        spring: cloth.spring_potential_energy(),
                        gravitational: cloth.gravitational_potential_energy(),
                    },
                ));
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        if let Some(bus) = bus.as_deref_mut() {
            bus.flush();
        }

        let max_displacement = cloth
            .positions()
            .iter()
            .zip(&initial)
            .map(|(p, q)| p.distance(*q))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            vertex_count: cloth.vertex_count(),
            spring_count: cloth.springs().len(),
            triangle_count: cloth.indices().len() / 3,
            ticks: scenario.ticks,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            final_kinetic_energy: cloth.kinetic_energy(),
            final_total_energy: cloth.total_energy(),
            max_displacement,
            max_strain: cloth.springs().max_strain(cloth.positions()),
            degenerate_springs,
            clamped_vertices,
        };

        tracing::info!(
            scenario = %metrics.scenario,
            ticks = metrics.ticks,
            avg_step_ms = metrics.avg_step_time * 1000.0,
            "benchmark complete"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(mut bus: Option<&mut EventBus>) -> WeftResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            results.push(Self::run(&scenario, bus.as_deref_mut())?);
        }
        Ok(results)
    }
}

fn stretch_about_centre(cloth: &mut ClothState, factor: f32) -> WeftResult<()> {
    let n = cloth.vertex_count();
    if n == 0 {
        return Ok(());
    }
    let centre = cloth.positions().iter().copied().sum::<Vec3>() / n as f32;
    for i in 0..n {
        if cloth.is_pinned(i) {
            continue;
        }
        let p = cloth.positions()[i];
        cloth.set_position(i, centre + (p - centre) * factor)?;
    }
    Ok(())
}
