//! Pickup Rush entry point
//!
//! Headless demo driver: runs a campaign at a fixed timestep with an
//! autopilot chasing the nearest pickup. Effects that would normally reach
//! the UI and physics host are rendered as log lines and a toy integrator.
//!
//! Usage: `pickup-rush [config.json] [seed]`

use std::path::Path;

use glam::Vec3;

use pickup_rush::consts::SIM_DT;
use pickup_rush::sim::{CAMPAIGN_WON_MESSAGE, Effect, GameRound, MoveInput, RoundEvent};
use pickup_rush::{Campaign, Config};

/// Contact distance standing in for the player's trigger volume
const PICKUP_RADIUS: f32 = 0.7;
/// Per-frame velocity damping for the toy body
const DRAG: f32 = 0.98;
/// Give up after half an hour of simulated time (60 Hz)
const MAX_FRAMES: u64 = 108_000;

/// Toy stand-in for the host physics body: unit mass, light drag
struct DemoPlayer {
    pos: Vec3,
    vel: Vec3,
}

impl DemoPlayer {
    fn new(height: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, height, 0.0),
            vel: Vec3::ZERO,
        }
    }
}

/// Steer toward the nearest live pickup, full tilt
fn autopilot_input(round: &GameRound, pos: Vec3) -> MoveInput {
    let nearest = round
        .registry()
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .total_cmp(&b.pos.distance_squared(pos))
        })
        .map(|p| p.pos);

    match nearest {
        Some(target) => {
            let to_target = (target - pos) * Vec3::new(1.0, 0.0, 1.0);
            let dir = to_target.normalize_or_zero();
            MoveInput {
                horizontal: dir.x,
                vertical: dir.z,
            }
        }
        None => MoveInput::default(),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::load(Path::new(&path)),
        None => Config::default(),
    };
    let seed: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let pickup_height = config.pickup_height;
    let mut campaign = Campaign::new(config);
    let mut round = campaign.start_round(seed ^ u64::from(campaign.level()));
    let mut player = DemoPlayer::new(pickup_height);

    for _ in 0..MAX_FRAMES {
        let input = autopilot_input(&round, player.pos);
        round.handle_event(RoundEvent::PhysicsStep { input });
        round.handle_event(RoundEvent::Frame { dt: SIM_DT });

        let mut reload = false;
        let mut campaign_won = false;
        for effect in round.drain_effects() {
            match effect {
                Effect::ApplyForce(force) => player.vel += force * SIM_DT,
                Effect::ScoreText(text) => log::debug!("[score] {text}"),
                Effect::MessageText(text) if !text.is_empty() => {
                    log::info!("[message] {text}");
                    campaign_won = text == CAMPAIGN_WON_MESSAGE;
                }
                Effect::MessageText(_) => {}
                Effect::TimerScale(_) => {}
                Effect::SpawnExplosion(pos) => log::debug!("[fx] explosion at {pos}"),
                Effect::ReloadLevel => reload = true,
            }
        }

        if campaign_won {
            log::info!("campaign finished with score {}", round.state().score);
            return;
        }
        if round.is_lost() {
            log::info!(
                "out of time on level {} with score {}",
                round.state().level,
                round.state().score
            );
            return;
        }
        if reload {
            campaign.advance_level();
            round = campaign.start_round(seed ^ u64::from(campaign.level()));
            player = DemoPlayer::new(pickup_height);
            continue;
        }

        player.vel *= DRAG;
        player.pos += player.vel * SIM_DT;

        let contact = round
            .registry()
            .iter()
            .find(|p| {
                let delta = (p.pos - player.pos) * Vec3::new(1.0, 0.0, 1.0);
                delta.length_squared() <= PICKUP_RADIUS * PICKUP_RADIUS
            })
            .map(|p| p.id);
        if let Some(id) = contact {
            round.handle_event(RoundEvent::PickupContact { id });
        }
    }

    log::warn!("demo frame budget exhausted before the campaign resolved");
}
