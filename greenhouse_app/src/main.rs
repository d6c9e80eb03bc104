//! Greenhouse Flux Demo
//!
//! Drives the flux engine over a small greenhouse scene:
//! - A directional sun plus pendant lamps hung over a row of plants
//! - Each plant canopy is a flux volume; shelves act as occluders
//! - Ticks the simulation, nudges the sun between passes, and prints a
//!   per-plant light indicator

use std::sync::Arc;

use flux_engine::foundation::math::Vector3;
use flux_engine::prelude::*;
use log::info;
use rand::Rng;

// The scene layer, not the engine, caps simultaneous lights
const MAX_LIGHTS: usize = 8;

const NUM_PLANTS: usize = 5;
const PLANT_SPACING: f64 = 3.0;
const PENDANT_HEIGHT: f64 = 4.0;
const PENDANT_INTENSITY: f64 = 50.0;

struct Plant {
    name: String,
    volume: Arc<FluxVolume>,
}

fn band_label(band: FluxBand) -> &'static str {
    match band {
        FluxBand::Low => "low",
        FluxBand::Medium => "ok",
        FluxBand::High => "high",
    }
}

fn register_light(simulation: &Simulation, light: Arc<Light>) {
    if simulation.light_count() >= MAX_LIGHTS {
        info!("light cap ({MAX_LIGHTS}) reached, skipping registration");
        return;
    }
    simulation.register_light(light);
}

fn main() {
    flux_engine::foundation::logging::init();
    let mut rng = rand::thread_rng();

    // Optional greenhouse.toml next to the binary overrides the defaults
    let config = SimulationConfig::load_from_file("greenhouse.toml").unwrap_or_default();
    let simulation = Simulation::new(config);

    // Morning sun, tilted off vertical
    let sun = Arc::new(Light::directional(
        Quat::from_axis_angle(&Vector3::x_axis(), 0.4),
        Vec3::new(1.0, 0.95, 0.85),
        1.2,
    ));
    register_light(&simulation, sun.clone());

    // A row of plants with a pendant lamp over every second one
    let mut plants = Vec::with_capacity(NUM_PLANTS);
    for i in 0..NUM_PLANTS {
        let x = i as f64 * PLANT_SPACING;
        let jitter: f64 = rng.gen_range(-0.2..0.2);

        let volume = Arc::new(FluxVolume::new(Transform::from_position(Vec3::new(
            x + jitter,
            0.0,
            0.0,
        ))));
        simulation.register_flux_volume(volume.clone());
        plants.push(Plant {
            name: format!("plant-{i}"),
            volume,
        });

        if i % 2 == 0 {
            register_light(
                &simulation,
                Arc::new(Light::pendant(
                    Vec3::new(x + 0.5, PENDANT_HEIGHT, 0.5),
                    PENDANT_INTENSITY,
                )),
            );
        }
    }

    // A storage shelf shading the last plant
    let shelf = Arc::new(OccluderBox::new(Transform::from_position_scale(
        Vec3::new((NUM_PLANTS - 1) as f64 * PLANT_SPACING - 0.5, 1.5, -0.5),
        Vec3::new(2.0, 0.5, 2.0),
    )));
    simulation.register_box(shelf);

    // Tick the simulation, wheeling the sun a little each pass
    for tick in 1..=10u64 {
        sun.update(|d| {
            d.rotation = Quat::from_axis_angle(&Vector3::x_axis(), 0.4 + 0.05 * tick as f64);
        });
        simulation.calculate(tick);

        println!("tick {tick}");
        for plant in &plants {
            let flux = plant.volume.flux_value();
            println!(
                "  {:<9} flux {:>7.2} [{}]",
                plant.name,
                flux,
                band_label(FluxBand::classify(flux))
            );
        }
    }
}
