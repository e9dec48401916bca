//! YAR - Yet Another Raider
//!
//! - `entities`: pure game data (entities, pools, game state)
//! - `compute`: per-frame simulation systems
//! - `random`: injectable random source
//! - `input`: key/pointer tracking for the terminal front end
//! - `display`: renderer abstraction and the terminal renderer

pub mod compute;
pub mod display;
pub mod entities;
pub mod input;
pub mod random;

/// Fixed game rules. Nothing here is configurable at runtime.
pub mod consts {
    /// Logical playing field, in field units.
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    pub const PLAYER_SPEED: f32 = 200.0;
    pub const BULLET_SPEED: f32 = 400.0;
    pub const ENEMY_SPEED: f32 = 100.0;

    pub const MAX_BULLETS: usize = 20;
    pub const MAX_ENEMIES: usize = 10;

    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const ENEMY_RADIUS: f32 = 15.0;

    pub const SCORE_PER_KILL: u32 = 10;

    /// Distance beyond the field edge at which a killed enemy reappears.
    pub const RESPAWN_OFFSET: f32 = 50.0;

    /// Applied to both axes when moving diagonally (≈ 1/√2).
    pub const DIAGONAL_FACTOR: f32 = 0.707_106_78;

    /// 60 FPS target.
    pub const TARGET_FRAME_SECS: f32 = 1.0 / 60.0;
}
