//! Round orchestration: win/loss resolution, score, timer, level progression

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::consts::{BONUS_DIFFICULTY_SCALE, LEVEL_ADVANCE_DELAY, PICKUP_TIME_BONUS};

use super::movement::{self, MoveInput};
use super::spawner::Spawner;
use super::state::{Effect, PickupId, PickupRegistry, RoundEvent, RoundState};
use super::timer::{TimerKind, TimerQueue};

/// Game-over message shown when the timer empties
pub const LOSE_MESSAGE: &str = "You Lose :(";
/// Terminal message for winning the final level
pub const CAMPAIGN_WON_MESSAGE: &str = "YOU DID IT!!!";

/// One playthrough of a single level, from reset to win/loss resolution.
///
/// Consumes [`RoundEvent`]s delivered by the host and accumulates
/// [`Effect`]s for it to drain. All randomness comes from the seeded
/// per-round RNG, so an identical seed and event sequence replays
/// identically.
#[derive(Debug, Clone)]
pub struct GameRound {
    state: RoundState,
    registry: PickupRegistry,
    spawner: Spawner,
    timers: TimerQueue,
    rng: Pcg32,
    player_speed: f32,
    /// Round clock in seconds, advanced by frame events
    clock: f32,
    effects: Vec<Effect>,
}

impl GameRound {
    /// Start a round: zero score, a full timer, a cleared game-over
    /// message, and the first pickup spawned (which schedules the next).
    pub fn new(config: &Config, level: u32, seed: u64) -> Self {
        let mut round = Self {
            state: RoundState::new(config.time_allowed, level, config.num_levels),
            registry: PickupRegistry::new(),
            spawner: Spawner::new(config),
            timers: TimerQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            player_speed: config.player_speed,
            clock: 0.0,
            effects: Vec::new(),
        };
        round.effects.push(Effect::MessageText(String::new()));
        round.push_score_text();
        round.spawn_pickup();
        log::info!("round start: level {}/{}", level, config.num_levels);
        round
    }

    /// Single entry point for host callbacks
    pub fn handle_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::Frame { dt } => self.on_frame(dt),
            RoundEvent::PhysicsStep { input } => self.on_physics_step(input),
            RoundEvent::PickupContact { id } => self.on_pickup_contact(id),
        }
    }

    /// Take the presentation requests accumulated since the last drain
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// True iff the round is not lost and no pickups remain
    pub fn is_won(&self) -> bool {
        !self.is_lost() && self.registry.is_empty()
    }

    /// True iff no time is remaining
    pub fn is_lost(&self) -> bool {
        self.state.time_remaining <= 0.0
    }

    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn registry(&self) -> &PickupRegistry {
        &self.registry
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    fn on_frame(&mut self, dt: f32) {
        self.clock += dt;

        if self.is_over() {
            // Stop the spawn schedule; the level-advance timer (if any)
            // still has to fire, so keep pumping the queue.
            self.spawner.cancel_pending(&mut self.timers);
            self.pump_timers();
            return;
        }

        self.pump_timers();

        // Timer burns faster at higher difficulty
        let decay = dt * (self.state.difficulty() + 1.0);
        self.state.time_remaining = (self.state.time_remaining - decay).max(0.0);
        self.effects.push(Effect::TimerScale(
            self.state.time_remaining / self.state.time_allowed,
        ));

        if self.is_lost() {
            self.spawner.cancel_pending(&mut self.timers);
            self.effects.push(Effect::MessageText(LOSE_MESSAGE.to_string()));
            log::info!("round lost at score {}", self.state.score);
        }
    }

    fn on_physics_step(&mut self, input: MoveInput) {
        self.effects.push(Effect::ApplyForce(movement::drive_force(
            input,
            self.player_speed,
        )));
    }

    fn on_pickup_contact(&mut self, id: PickupId) {
        // A contact can arrive for a pickup collected the same step
        let Some(pickup) = self.registry.remove(id) else {
            return;
        };

        self.effects.push(Effect::SpawnExplosion(pickup.pos));
        self.state.score += 1;
        self.push_score_text();

        // The winning (or post-defeat) pickup grants no boost
        if !self.is_over() {
            let bonus = PICKUP_TIME_BONUS - self.state.difficulty() * BONUS_DIFFICULTY_SCALE;
            self.state.time_remaining =
                (self.state.time_remaining + bonus).min(self.state.time_allowed);
        }

        if self.is_won() {
            self.spawner.cancel_pending(&mut self.timers);
            if self.state.level >= self.state.num_levels {
                self.effects
                    .push(Effect::MessageText(CAMPAIGN_WON_MESSAGE.to_string()));
                log::info!("campaign complete at score {}", self.state.score);
            } else {
                self.effects.push(Effect::MessageText(format!(
                    "You Win! Beat level {}",
                    self.state.level
                )));
                self.timers
                    .schedule(self.clock, LEVEL_ADVANCE_DELAY, TimerKind::AdvanceLevel);
                log::info!("level {} won, advancing shortly", self.state.level);
            }
        }
    }

    fn pump_timers(&mut self) {
        while let Some(kind) = self.timers.pop_due(self.clock) {
            match kind {
                TimerKind::SpawnPickup => {
                    self.spawner.mark_fired();
                    if !self.is_over() {
                        self.spawn_pickup();
                    }
                }
                TimerKind::AdvanceLevel => {
                    self.effects.push(Effect::ReloadLevel);
                }
            }
        }
    }

    fn spawn_pickup(&mut self) {
        let difficulty = self.state.difficulty();
        self.spawner.spawn(
            &mut self.registry,
            &mut self.timers,
            &mut self.rng,
            self.clock,
            difficulty,
        );
    }

    fn push_score_text(&mut self) {
        self.effects.push(Effect::ScoreText(format!(
            "Count: {}  Level: {}/{}",
            self.state.score, self.state.level, self.state.num_levels
        )));
    }
}
