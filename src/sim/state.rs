//! Round state and core simulation types

use glam::Vec3;

use super::movement::MoveInput;

/// Stable identifier for a spawned pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PickupId(pub u32);

/// A collectible entity, removed from play on contact with the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub id: PickupId,
    pub pos: Vec3,
}

/// Live pickups for the current round, ordered by id.
///
/// Replaces tag-based scene queries: spawn inserts, collection removes,
/// and the win condition is an O(1) emptiness check.
#[derive(Debug, Clone, Default)]
pub struct PickupRegistry {
    pickups: Vec<Pickup>,
}

impl PickupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly spawned pickup. Ids are allocated monotonically by
    /// the spawner, so pushing keeps the registry ordered.
    pub fn insert(&mut self, pickup: Pickup) {
        debug_assert!(self.pickups.last().is_none_or(|p| p.id < pickup.id));
        self.pickups.push(pickup);
    }

    /// Remove a pickup, returning it if it was still live
    pub fn remove(&mut self, id: PickupId) -> Option<Pickup> {
        let idx = self.pickups.iter().position(|p| p.id == id)?;
        Some(self.pickups.remove(idx))
    }

    pub fn get(&self, id: PickupId) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }
}

/// Per-round scalars
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Pickups collected this round
    pub score: u32,
    /// Seconds left on the countdown, clamped to [0, time_allowed]
    pub time_remaining: f32,
    /// Round time budget in seconds
    pub time_allowed: f32,
    /// Current campaign level, 1-based
    pub level: u32,
    /// Campaign length
    pub num_levels: u32,
}

impl RoundState {
    pub fn new(time_allowed: f32, level: u32, num_levels: u32) -> Self {
        Self {
            score: 0,
            time_remaining: time_allowed,
            time_allowed,
            level,
            num_levels,
        }
    }

    /// Normalized campaign progress in [0, 1], scaling timer decay, spawn
    /// cadence, and the pickup time bonus. A single-level campaign has no
    /// progression, so 0.
    pub fn difficulty(&self) -> f32 {
        if self.num_levels <= 1 {
            return 0.0;
        }
        (self.level - 1) as f32 / (self.num_levels - 1) as f32
    }
}

/// Host callbacks, redesigned as an explicit event stream consumed by
/// [`super::GameRound::handle_event`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// Per-frame tick with elapsed seconds
    Frame { dt: f32 },
    /// Per-physics-step tick with the sampled input axes
    PhysicsStep { input: MoveInput },
    /// The player's trigger volume intersected a pickup
    PickupContact { id: PickupId },
}

/// Presentation and host requests emitted by the round.
///
/// The round never touches UI, physics, or the scene directly; the host
/// drains these each frame and carries them out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the score/level display text
    ScoreText(String),
    /// Replace the game-over message text (empty string clears it)
    MessageText(String),
    /// Rescale the timer bar, normalized to [0, 1]
    TimerScale(f32),
    /// Spawn the explosion prefab at a world position
    SpawnExplosion(Vec3),
    /// Apply a force to the player body this physics step
    ApplyForce(Vec3),
    /// Tear down the round and reload with advanced campaign progress
    ReloadLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_endpoints() {
        assert_eq!(RoundState::new(30.0, 1, 5).difficulty(), 0.0);
        assert_eq!(RoundState::new(30.0, 5, 5).difficulty(), 1.0);
        assert_eq!(RoundState::new(30.0, 3, 5).difficulty(), 0.5);
    }

    #[test]
    fn test_difficulty_single_level_campaign() {
        // num_levels == 1 must not divide by zero
        assert_eq!(RoundState::new(30.0, 1, 1).difficulty(), 0.0);
    }

    #[test]
    fn test_registry_remove_is_single_shot() {
        let mut registry = PickupRegistry::new();
        registry.insert(Pickup {
            id: PickupId(1),
            pos: Vec3::new(1.0, 0.5, -2.0),
        });
        registry.insert(Pickup {
            id: PickupId(2),
            pos: Vec3::ZERO,
        });

        assert_eq!(registry.len(), 2);
        let removed = registry.remove(PickupId(1)).unwrap();
        assert_eq!(removed.pos, Vec3::new(1.0, 0.5, -2.0));
        assert!(registry.remove(PickupId(1)).is_none());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.remove(PickupId(2)).is_some());
        assert!(registry.is_empty());
    }

    proptest! {
        #[test]
        fn difficulty_stays_in_unit_range(num_levels in 1u32..=64, offset in 0u32..64) {
            let level = 1 + offset.min(num_levels - 1);
            let state = RoundState::new(30.0, level, num_levels);
            let d = state.difficulty();
            prop_assert!((0.0..=1.0).contains(&d));
            if level == 1 {
                prop_assert_eq!(d, 0.0);
            }
            if num_levels > 1 && level == num_levels {
                prop_assert_eq!(d, 1.0);
            }
        }
    }
}
