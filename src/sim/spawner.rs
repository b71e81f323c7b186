//! Pickup spawn scheduling
//!
//! One pickup spawns immediately at round start; every spawn schedules the
//! next through the timer queue. Per round the schedule runs
//! Idle -> Scheduled -> (fires) -> Scheduled -> ... -> Cancelled at round end.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::consts::SPAWN_DELAY_DIFFICULTY_SCALE;

use super::state::{Pickup, PickupId, PickupRegistry};
use super::timer::{TimerKind, TimerQueue, TimerToken};

/// Spawn cadence state for one round
#[derive(Debug, Clone)]
pub struct Spawner {
    half_extent: f32,
    spawn_height: f32,
    min_delay: f32,
    max_delay: f32,
    pending: Option<TimerToken>,
    next_id: u32,
}

impl Spawner {
    pub fn new(config: &Config) -> Self {
        Self {
            half_extent: config.spawn_half_extent,
            spawn_height: config.pickup_height,
            min_delay: config.min_spawn_delay,
            max_delay: config.max_spawn_delay,
            pending: None,
            next_id: 1,
        }
    }

    /// Create one pickup at a uniformly random horizontal position, keeping
    /// the prefab's vertical offset, and schedule the next spawn. Higher
    /// difficulty shrinks the whole delay window, down to half.
    pub fn spawn(
        &mut self,
        registry: &mut PickupRegistry,
        timers: &mut TimerQueue,
        rng: &mut Pcg32,
        now: f32,
        difficulty: f32,
    ) -> Pickup {
        let id = PickupId(self.next_id);
        self.next_id += 1;

        let x = rng.random_range(-self.half_extent..=self.half_extent);
        let z = rng.random_range(-self.half_extent..=self.half_extent);
        let pickup = Pickup {
            id,
            pos: Vec3::new(x, self.spawn_height, z),
        };
        registry.insert(pickup);
        log::debug!("spawned pickup {id:?} at ({x:.2}, {z:.2})");

        let scale = 1.0 - difficulty * SPAWN_DELAY_DIFFICULTY_SCALE;
        let delay = rng.random_range(self.min_delay..=self.max_delay) * scale;
        self.pending = Some(timers.schedule(now, delay, TimerKind::SpawnPickup));

        pickup
    }

    /// Forget the pending token once its timer has fired
    pub(crate) fn mark_fired(&mut self) {
        self.pending = None;
    }

    /// Stop future spawns. Idempotent; required once the round is over so
    /// no pickup appears post-victory or post-defeat.
    pub fn cancel_pending(&mut self, timers: &mut TimerQueue) {
        if let Some(token) = self.pending.take() {
            timers.cancel(token);
            log::debug!("cancelled pending spawn");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fixture() -> (Spawner, PickupRegistry, TimerQueue, Pcg32) {
        let config = Config::default();
        (
            Spawner::new(&config),
            PickupRegistry::new(),
            TimerQueue::new(),
            Pcg32::seed_from_u64(7),
        )
    }

    #[test]
    fn test_spawn_lands_inside_region_at_prefab_height() {
        let (mut spawner, mut registry, mut timers, mut rng) = fixture();

        for _ in 0..64 {
            let pickup = spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 0.0);
            assert!(pickup.pos.x.abs() <= 5.0);
            assert!(pickup.pos.z.abs() <= 5.0);
            assert_eq!(pickup.pos.y, 0.5);
        }
        assert_eq!(registry.len(), 64);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let (mut spawner, mut registry, mut timers, mut rng) = fixture();
        let a = spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 0.0);
        let b = spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 0.0);
        assert!(a.id < b.id);
    }

    #[test]
    fn test_next_spawn_delay_window() {
        let (mut spawner, mut registry, mut timers, mut rng) = fixture();

        spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 0.0);
        let deadline = timers.next_deadline().unwrap();
        assert!((5.0..=10.0).contains(&deadline));
        assert!(spawner.has_pending());
    }

    #[test]
    fn test_full_difficulty_halves_delay_window() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..32 {
            let mut spawner = Spawner::new(&config);
            let mut registry = PickupRegistry::new();
            let mut timers = TimerQueue::new();
            spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 1.0);
            let deadline = timers.next_deadline().unwrap();
            assert!((2.5..=5.0).contains(&deadline));
        }
    }

    #[test]
    fn test_cancel_pending_stops_the_schedule() {
        let (mut spawner, mut registry, mut timers, mut rng) = fixture();

        spawner.spawn(&mut registry, &mut timers, &mut rng, 0.0, 0.0);
        spawner.cancel_pending(&mut timers);
        assert!(!spawner.has_pending());
        assert_eq!(timers.pop_due(f32::MAX), None);

        // Idempotent
        spawner.cancel_pending(&mut timers);
        assert_eq!(timers.pending(), 0);
    }
}
