/// All game entity types — pure data, no logic.

use glam::Vec2;

use crate::consts::{MAX_BULLETS, MAX_ENEMIES};

/// Display attribute only; the simulation never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Black,
    White,
    Grey,
    Blue,
    Yellow,
    Red,
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// Shared shape of the player, every bullet and every enemy.
///
/// `active` is slot liveness for the pooled kinds. The player is always
/// active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub active: bool,
    pub colour: Colour,
}

impl Entity {
    /// An active entity at rest.
    pub fn at_rest(position: Vec2, radius: f32, colour: Colour) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            active: true,
            colour,
        }
    }

    /// A free pool slot.
    pub fn inactive(radius: f32, colour: Colour) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            active: false,
            colour,
        }
    }

    /// True when the two circles overlap (touching is not a hit).
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Pools are fixed-size arrays; a slot is occupied
/// iff its `active` flag is set.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Entity,
    pub bullets: [Entity; MAX_BULLETS],
    pub enemies: [Entity; MAX_ENEMIES],
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn active_bullets(&self) -> usize {
        self.bullets.iter().filter(|b| b.active).count()
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }
}
