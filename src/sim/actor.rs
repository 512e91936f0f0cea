//! Movable farmers and the shared movement/collision resolver
//!
//! Player and AI use the same `Actor` type and the same movement routine;
//! they differ only in how velocity gets decided each frame (held keys vs.
//! the chase policy). Collision resolution is axis-separated: move x, revert
//! on obstacle overlap, then move y from the post-x box. That lets an actor
//! slide along a wall when only one axis is blocked.

use glam::Vec2;

use crate::consts::*;
use super::rect::Rect;
use super::state::Obstacle;
use super::tick::TickInput;

/// Four-way facing, from the dominant axis of the last non-zero velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit vector for this facing (screen coordinates, +y is down)
    pub fn as_vec(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing from a velocity: horizontal wins ties (|vx| >= |vy|)
    pub fn from_velocity(vel: Vec2) -> Option<Self> {
        if vel == Vec2::ZERO {
            return None;
        }
        Some(if vel.x.abs() >= vel.y.abs() {
            if vel.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if vel.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        })
    }
}

/// A farmer on the field
#[derive(Debug, Clone)]
pub struct Actor {
    pub rect: Rect,
    pub vel: Vec2,
    /// Current movement speed (units/sec), eased down as the actor grows
    pub speed: f32,
    pub facing: Facing,
    /// True iff either axis velocity was non-zero after the last resolution.
    /// Consumed by the animation subsystem; no gameplay effect.
    pub moving: bool,
    base_size: f32,
    base_speed: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ACTOR_SIZE, ACTOR_SIZE),
            vel: Vec2::ZERO,
            speed,
            facing: Facing::default(),
            moving: false,
            base_size: ACTOR_SIZE,
            base_speed: speed,
        }
    }

    /// Replace the speed baseline (level changes adjust AI speed)
    pub fn set_speed(&mut self, speed: f32) {
        self.base_speed = speed;
        self.speed = speed;
        self.apply_growth_slowdown();
    }

    /// Derive velocity and facing from the currently-held movement keys
    pub fn apply_input(&mut self, input: &TickInput) {
        let dx = (input.right as i8 - input.left as i8) as f32;
        let dy = (input.down as i8 - input.up as i8) as f32;
        self.vel = Vec2::new(dx, dy) * self.speed;
        if let Some(facing) = Facing::from_velocity(self.vel) {
            self.facing = facing;
        }
    }

    /// Move one axis at a time: clamp the candidate position to the field,
    /// then revert it and zero that axis's velocity if the new box overlaps
    /// any obstacle. The y pass runs against the post-x box.
    pub fn update_movement(&mut self, dt: f32, obstacles: &[Obstacle]) {
        let old_x = self.rect.x;
        self.rect.x = (self.rect.x + self.vel.x * dt).clamp(0.0, FIELD_WIDTH - self.rect.w);
        if obstacles.iter().any(|o| self.rect.overlaps(&o.rect)) {
            self.rect.x = old_x;
            self.vel.x = 0.0;
        }

        let old_y = self.rect.y;
        self.rect.y = (self.rect.y + self.vel.y * dt).clamp(0.0, FIELD_HEIGHT - self.rect.h);
        if obstacles.iter().any(|o| self.rect.overlaps(&o.rect)) {
            self.rect.y = old_y;
            self.vel.y = 0.0;
        }

        self.moving = self.vel.x != 0.0 || self.vel.y != 0.0;
    }

    /// Grow the hitbox by `amount` units on each axis, capped at
    /// `GROWTH_MAX_SCALE` times the base box, with a gentle speed slowdown.
    pub fn grow_by(&mut self, amount: f32) {
        let max = (self.base_size * GROWTH_MAX_SCALE).floor();
        self.rect.w = (self.rect.w + amount).min(max);
        self.rect.h = (self.rect.h + amount).min(max);
        self.apply_growth_slowdown();
    }

    fn apply_growth_slowdown(&mut self) {
        let scale = self.rect.w / self.base_size;
        self.speed = (self.base_speed - (scale - 1.0) * GROWTH_SLOWDOWN).max(ACTOR_MIN_SPEED);
    }

    /// Center of the actor's bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}
