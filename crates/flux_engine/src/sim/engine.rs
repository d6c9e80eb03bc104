//! Simulation engine orchestration

use std::sync::{Arc, Mutex};

use log::{debug, trace};

use super::photometry::diffuse_contribution;
use super::{PassScheduler, SimulationConfig};
use crate::foundation::math::Vec3;
use crate::foundation::sync::lock;
use crate::geometry::Aabb;
use crate::scene::{BoundingVolume, FluxVolume, Light, OccluderBox, SceneObject};
use crate::spatial::Octree;

/// Registered scene objects, snapshotted at the start of every pass so
/// registrations arriving mid-pass cannot corrupt the traversal.
#[derive(Debug, Default, Clone)]
struct Registry {
    volumes: Vec<Arc<FluxVolume>>,
    lights: Vec<Arc<Light>>,
    boxes: Vec<Arc<OccluderBox>>,
}

/// Illumination flux simulation engine
///
/// Tracks externally-owned flux volumes, lights, and occluder boxes,
/// and per pass rebuilds a fresh octree over them, evaluates the
/// photometric model at every sample point, and writes one averaged
/// flux scalar back onto each volume.
///
/// `calculate()` is non-reentrant: a call while a pass is in flight is
/// dropped or, when it carries a newer tick, coalesced into exactly one
/// trailing re-run.
#[derive(Debug)]
pub struct Simulation {
    registry: Mutex<Registry>,
    scheduler: PassScheduler,
    config: SimulationConfig,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            scheduler: PassScheduler::new(),
            config,
        }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Track a flux volume
    pub fn register_flux_volume(&self, volume: Arc<FluxVolume>) {
        lock(&self.registry).volumes.push(volume);
    }

    /// Track a light
    pub fn register_light(&self, light: Arc<Light>) {
        lock(&self.registry).lights.push(light);
    }

    /// Track an occluder box
    pub fn register_box(&self, occluder: Arc<OccluderBox>) {
        lock(&self.registry).boxes.push(occluder);
    }

    /// Stop tracking a flux volume
    pub fn remove_flux_volume(&self, volume: &Arc<FluxVolume>) {
        let id = volume.id();
        lock(&self.registry).volumes.retain(|v| v.id() != id);
    }

    /// Stop tracking a light
    pub fn remove_light(&self, light: &Arc<Light>) {
        let id = light.id();
        lock(&self.registry).lights.retain(|l| l.id() != id);
    }

    /// Stop tracking an occluder box
    pub fn remove_box(&self, occluder: &Arc<OccluderBox>) {
        let id = occluder.id();
        lock(&self.registry).boxes.retain(|b| b.id() != id);
    }

    /// Drop all tracked objects
    pub fn clear(&self) {
        *lock(&self.registry) = Registry::default();
    }

    /// Number of tracked lights
    #[must_use]
    pub fn light_count(&self) -> usize {
        lock(&self.registry).lights.len()
    }

    /// Run a simulation pass for `tick`
    ///
    /// May be invoked every frame with a monotonically increasing tick.
    /// If a pass is already in flight the call returns immediately; a
    /// newer tick arriving mid-pass triggers exactly one follow-up pass
    /// once the current one completes, so the final flux values always
    /// reflect the latest request.
    pub fn calculate(&self, tick: u64) {
        if !self.scheduler.try_begin(tick) {
            trace!("flux pass for tick {tick} coalesced");
            return;
        }

        let mut current = tick;
        loop {
            // Single cooperative scheduling point per pass
            std::thread::yield_now();

            self.run_pass(current);

            match self.scheduler.finish() {
                Some(next) => {
                    debug!("flux pass superseded mid-run, re-running for tick {next}");
                    current = next;
                }
                None => break,
            }
        }
    }

    fn run_pass(&self, tick: u64) {
        let snapshot = lock(&self.registry).clone();

        let bounds =
            Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(self.config.world_extent));
        let mut octree = Octree::new(bounds, self.config.octree);
        for occluder in &snapshot.boxes {
            octree.insert(SceneObject::Occluder(occluder.clone()));
        }
        for volume in &snapshot.volumes {
            octree.insert(SceneObject::Volume(volume.clone()));
        }

        debug!(
            "flux pass tick {tick}: {} volumes, {} lights, {} boxes, {} octree nodes",
            snapshot.volumes.len(),
            snapshot.lights.len(),
            snapshot.boxes.len(),
            octree.node_count()
        );

        let lights: Vec<_> = snapshot.lights.iter().map(|l| l.descriptor()).collect();

        for volume in &snapshot.volumes {
            let samples = volume.sampling_points();
            if samples.is_empty() {
                volume.store_flux(0.0);
                continue;
            }

            let mut total_intensity = 0.0;
            for sample in &samples {
                for light in &lights {
                    total_intensity += diffuse_contribution(
                        light,
                        sample,
                        volume.id(),
                        &octree,
                        self.config.attenuation_coefficient,
                    );
                }
            }

            #[allow(clippy::cast_precision_loss)]
            let flux = total_intensity / samples.len() as f64;
            volume.store_flux(flux);
            trace!("volume flux updated to {flux:.3}");
        }
    }
}
