//! Chase policy driving the AI farmer
//!
//! Decisions happen on a fixed reaction interval rather than every frame so
//! the AI doesn't visibly jitter between equidistant crops. Between decision
//! ticks the velocity and facing stay frozen; the shared movement resolver
//! still runs every frame with the frozen velocity.
//!
//! A small stuck detector breaks obstacle deadlocks: when the AI intends to
//! move but barely displaces for a while, it sidesteps perpendicular to its
//! facing for a short burst before resuming the chase.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use super::actor::{Actor, Facing};
use super::crops::Crop;

/// Nearest-crop targeting with reaction-interval smoothing
#[derive(Debug, Clone)]
pub struct ChasePolicy {
    /// Seconds between target re-evaluations
    pub reaction_every: f32,
    react_timer: f32,
    stuck_time: f32,
    avoid_timer: f32,
    avoid_dir: f32,
}

impl ChasePolicy {
    pub fn new(reaction_every: f32) -> Self {
        Self {
            reaction_every,
            react_timer: 0.0,
            stuck_time: 0.0,
            avoid_timer: 0.0,
            avoid_dir: 0.0,
        }
    }

    /// Forget all transient timers (round reset)
    pub fn reset(&mut self) {
        self.react_timer = 0.0;
        self.stuck_time = 0.0;
        self.avoid_timer = 0.0;
        self.avoid_dir = 0.0;
    }

    /// Whether a sidestep maneuver is currently overriding the chase
    pub fn avoiding(&self) -> bool {
        self.avoid_timer > 0.0
    }

    /// Re-evaluate the target if the reaction interval elapsed, writing the
    /// actor's velocity and facing. Call once per frame, before movement.
    pub fn decide(&mut self, dt: f32, actor: &mut Actor, crops: &[Crop]) {
        self.react_timer -= dt;
        self.avoid_timer = (self.avoid_timer - dt).max(0.0);

        if self.react_timer > 0.0 {
            return;
        }
        self.react_timer = self.reaction_every;

        if self.avoid_timer > 0.0 {
            // Keep sidestepping perpendicular to the current facing
            let f = actor.facing.as_vec();
            let perp = Vec2::new(-f.y, f.x) * self.avoid_dir;
            actor.vel = perp * actor.speed;
            return;
        }

        let Some(to_target) = nearest_crop_delta(actor.center(), crops) else {
            actor.vel = Vec2::ZERO;
            return;
        };

        // Fallback length of 1 keeps a zero-distance target from dividing
        // by zero; the direction degrades to the zero vector.
        let len = to_target.length();
        let dir = to_target / if len > 0.0 { len } else { 1.0 };
        actor.vel = dir * actor.speed;

        if let Some(facing) = Facing::from_velocity(actor.vel) {
            actor.facing = facing;
        }
    }

    /// Feed back the frame's net displacement. Call once per frame, after
    /// movement, with the actor's pre-movement position. Triggers a sidestep
    /// once the actor has intended to move but not displaced for
    /// `AI_STUCK_AFTER` seconds.
    pub fn observe_displacement(
        &mut self,
        dt: f32,
        actor: &Actor,
        pre_move: Vec2,
        rng: &mut Pcg32,
    ) {
        let moved = (actor.rect.pos() - pre_move).length();
        let trying = actor.vel.x.abs() + actor.vel.y.abs() > AI_MOVE_EPSILON;

        if trying && moved < AI_STUCK_DISPLACEMENT {
            self.stuck_time += dt;
            if self.stuck_time > AI_STUCK_AFTER && self.avoid_timer <= 0.0 {
                self.avoid_timer = AI_SIDESTEP_FOR;
                self.stuck_time = 0.0;
                self.avoid_dir = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
            }
        } else {
            self.stuck_time = 0.0;
        }
    }
}

/// Vector from `from` to the center of the closest crop (squared Euclidean
/// distance, first minimum wins), or None when no crops exist.
fn nearest_crop_delta(from: Vec2, crops: &[Crop]) -> Option<Vec2> {
    let mut best: Option<Vec2> = None;
    let mut best_d2 = f32::INFINITY;
    for crop in crops {
        let delta = crop.rect.center() - from;
        let d2 = delta.length_squared();
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some(delta);
        }
    }
    best
}
