//! CLI command implementations.

use std::thread;

use weft_bench::metrics::BenchmarkMetrics;
use weft_bench::runner::BenchmarkRunner;
use weft_bench::scenarios::{Scenario, ScenarioKind};
use weft_render::{FrameSink, HeadlessSink, JsonFrameExporter, SnapshotChannel};
use weft_solver::{ClothConfig, ClothState};
use weft_telemetry::{EventBus, EventKind, SimulationEvent, TracingSink};
use weft_types::{WeftError, WeftResult};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Reads and validates a cloth config.
pub fn load_config(path: &str) -> WeftResult<ClothConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ClothConfig = toml::from_str(&content)
        .map_err(|e| WeftError::Serialization(format!("{path}: {e}")))?;
    config.validate()?;
    tracing::debug!(path, ?config, "loaded cloth config");
    Ok(config)
}

/// Run a simulation. Snapshots cross to a render thread over a
/// [`SnapshotChannel`]; the sink there is the JSON exporter when `output`
/// is given, headless otherwise.
pub fn simulate(config_path: Option<&str>, ticks: u32, dt: f32, output: Option<&str>) -> CliResult {
    println!("Weft Simulation");
    println!("───────────────");

    let config = match config_path {
        Some(path) => {
            println!("Config:   {path}");
            load_config(path)?
        }
        None => {
            println!("Config:   defaults");
            ClothConfig::default()
        }
    };

    let mut cloth = ClothState::new(config)?;
    println!(
        "Lattice:  {}x{} ({} verts, {} springs, {} tris)",
        cloth.grid().columns,
        cloth.grid().rows,
        cloth.vertex_count(),
        cloth.springs().len(),
        cloth.indices().len() / 3
    );
    println!("Ticks:    {ticks} @ dt={dt}");
    println!();

    let mut bus = EventBus::new().with_sink(TracingSink::default());

    let mut sink: Box<dyn FrameSink> = match output {
        Some(path) => Box::new(JsonFrameExporter::new(path)),
        None => Box::new(HeadlessSink::new()),
    };
    sink.init(&cloth.snapshot())?;

    let (sender, receiver) = SnapshotChannel::open();
    let render = thread::spawn(move || -> WeftResult<Box<dyn FrameSink>> {
        while let Some(snapshot) = receiver.wait() {
            sink.submit(&snapshot)?;
        }
        sink.finalize()?;
        Ok(sink)
    });

    let mut degenerate = 0u64;
    for _ in 0..ticks {
        let report = cloth.tick(dt)?;
        degenerate += report.degenerate_springs as u64;
        bus.emit(SimulationEvent::new(
            report.tick,
            EventKind::TickEnd {
                wall_time: report.wall_time,
                max_speed: report.max_speed,
                clamped_vertices: report.clamped_vertices,
            },
        ));
        if !sender.publish(cloth.snapshot()) {
            break;
        }
        bus.flush();
    }
    drop(sender);
    bus.finalize();

    let sink = render
        .join()
        .map_err(|_| "render thread panicked")??;

    println!("Sim time:       {:.3}s", cloth.sim_time());
    println!("Kinetic energy: {:.6e}", cloth.kinetic_energy());
    println!("Total energy:   {:.6e}", cloth.total_energy());
    println!("Max strain:     {:.4}", cloth.springs().max_strain(cloth.positions()));
    if degenerate > 0 {
        println!("Skipped springs: {degenerate}");
    }
    println!("Frames ({}):   {}", sink.name(), sink.frame_count());
    if let Some(path) = output {
        println!("Frames written to: {path}");
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CliResult {
    println!("Weft Benchmark Suite");
    println!("════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![ScenarioKind::from_name(scenario_name)?]
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({}x{} verts, {} ticks)",
            kind.name(),
            scenario.config.columns,
            scenario.config.rows,
            scenario.ticks,
        );

        let metrics = BenchmarkRunner::run(&scenario, None)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Max strain:    {:.4}", metrics.max_strain);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a cloth config or a frame export.
pub fn validate(path: &str) -> CliResult {
    println!("Weft Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match load_config(path) {
            Ok(config) => {
                // Building exercises the lattice checks too
                let cloth = ClothState::new(config)?;
                println!(
                    "✅ Config is valid ({} verts, {} springs).",
                    cloth.vertex_count(),
                    cloth.springs().len()
                );
            }
            Err(e) => {
                println!("❌ Config validation failed: {e}");
                return Err(e.into());
            }
        }
    } else if path.ends_with(".json") {
        println!("Validating frame export: {path}");
        let data = JsonFrameExporter::load(path)?;
        let expected = data.vertex_count * 3;
        let bad = data
            .frames
            .iter()
            .filter(|f| f.positions.len() != expected || f.positions.iter().any(|p| !p.is_finite()))
            .count();
        if bad == 0 && data.indices.len() == data.triangle_count * 3 {
            println!(
                "✅ Export is valid ({} verts, {} tris, {} frames).",
                data.vertex_count,
                data.triangle_count,
                data.frames.len()
            );
        } else {
            println!("❌ Export has {bad} malformed frame(s).");
            return Err("malformed frame export".into());
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (frame export).");
    }

    Ok(())
}
