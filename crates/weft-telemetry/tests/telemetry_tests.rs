//! Integration tests for weft-telemetry.

use weft_telemetry::bus::EventBus;
use weft_telemetry::events::{EventKind, SimulationEvent};
use weft_telemetry::sinks::{TracingSink, VecSink};

// ─── EventBus Tests ───────────────────────────────────────────

#[test]
fn emit_and_flush() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());

    bus.emit(SimulationEvent::new(0, EventKind::TickBegin { sim_time: 0.0 }));
    bus.emit(SimulationEvent::new(
        1,
        EventKind::TickEnd {
            wall_time: 0.001,
            max_speed: 0.2,
            clamped_vertices: 0,
        },
    ));
    assert!(sink.is_empty(), "nothing dispatched before flush");

    assert_eq!(bus.flush(), 2);
    let events = sink.collected();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].label(), "tick_begin");
    assert_eq!(events[1].tick, 1);
}

#[test]
fn disabled_bus_drops_events() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());
    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(SimulationEvent::new(0, EventKind::TickBegin { sim_time: 0.0 }));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let a = VecSink::new();
    let b = VecSink::new();
    let mut bus = EventBus::new()
        .with_sink(a.clone())
        .with_sink(b.clone())
        .with_sink(TracingSink::default());
    assert_eq!(bus.sink_count(), 3);
    assert_eq!(bus.sink_names(), vec!["vec_sink", "vec_sink", "tracing_sink"]);

    bus.emit(SimulationEvent::new(3, EventKind::DegenerateSpring { count: 2 }));
    bus.finalize();
    assert_eq!(a.len(), 1);
    assert_eq!(b.collected(), a.collected());
}

#[test]
fn sender_works_across_threads() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());
    let sender = bus.sender();
    std::thread::spawn(move || {
        for tick in 0..5 {
            sender
                .send(SimulationEvent::new(tick, EventKind::TickBegin { sim_time: 0.0 }))
                .unwrap();
        }
    })
    .join()
    .unwrap();
    assert_eq!(bus.flush(), 5);
    assert_eq!(sink.len(), 5);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Energy {
            kinetic: 1.0,
            spring: 2.0,
            gravitational: -0.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn rebuild_event_fields() {
    let event = SimulationEvent::new(
        0,
        EventKind::Rebuild {
            vertices: 256,
            springs: 930,
            triangles: 450,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("springs"));
    assert_eq!(event.label(), "rebuild");
}

#[test]
fn custom_event_label() {
    let event = SimulationEvent::new(
        7,
        EventKind::Custom {
            label: "wind_gust".into(),
            payload: "{\"strength\":2.0}".into(),
        },
    );
    assert_eq!(event.label(), "wind_gust");
}
