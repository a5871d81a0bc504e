/// Simple custom benchmarking without criterion
/// Drives the pure controllers directly, no ECS involved
use std::time::Instant;

use bevy::color::{Hsla, Srgba};
use bevy::prelude::*;
use flask_mix::config::ContainerConfig;
use flask_mix::core::{MixPartner, PourMixController, normalize_tilt};
use flask_mix::FlaskMixSettings;

const DT: f32 = 1.0 / 90.0;

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn create_flasks(count: usize) -> Vec<PourMixController> {
    (0..count)
        .map(|i| {
            let hue = (i % 360) as f32;
            PourMixController::new(
                ContainerConfig::default()
                    .with_final_color(Srgba::from(Hsla::hsl(hue, 0.8, 0.5))),
            )
        })
        .collect()
}

fn main() {
    println!("\n=== Flask Mix Benchmarks ===\n");

    println!("--- Tilt Folding ---");
    time_it("normalize_tilt x 100000", 100, || {
        let mut acc = 0.0;
        for i in 0..100_000 {
            acc += normalize_tilt(i as f32 * 0.37 - 1800.0);
        }
        std::hint::black_box(acc);
    });

    println!("\n--- Idle Polling ---");
    for &count in &[1000, 10000, 50000] {
        let mut flasks = create_flasks(count);
        time_it(&format!("poll_tilt ({} idle flasks)", count), 50, || {
            for flask in &mut flasks {
                std::hint::black_box(flask.poll_tilt(10.0));
            }
        });
    }

    println!("\n--- Pour Timers ---");
    for &count in &[1000, 10000, 50000] {
        let mut flasks = create_flasks(count);
        for flask in &mut flasks {
            flask.poll_tilt(90.0);
        }
        time_it(&format!("advance ({} pouring flasks)", count), 50, || {
            for flask in &mut flasks {
                std::hint::black_box(flask.advance(0.0));
            }
        });
    }

    println!("\n--- Blends ---");
    let settings = FlaskMixSettings::default();
    let mut world = World::new();
    for &count in &[1000, 10000] {
        let partner = world.spawn_empty().id();
        time_it(&format!("full mix ({} flasks)", count), 10, || {
            let mut flasks = create_flasks(count);
            for flask in &mut flasks {
                flask.poll_tilt(90.0);
                flask.on_contact(
                    Some("Matraz"),
                    Some(MixPartner {
                        entity: partner,
                        final_color: Srgba::new(1.0, 0.0, 0.0, 1.0),
                        surface_color: Some(Srgba::new(0.0, 0.0, 1.0, 1.0)),
                    }),
                    Some(Srgba::new(0.0, 0.0, 1.0, 1.0)),
                    &settings,
                    DT,
                );
            }
            while flasks.iter().any(|flask| flask.pending_tasks() > 0) {
                for flask in &mut flasks {
                    std::hint::black_box(flask.advance(DT));
                }
            }
        });
    }
}
