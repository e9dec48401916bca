/// Game-logic systems.
///
/// Every function takes exclusive access to the one `GameState` and mutates
/// it in place. Side effects are limited to the injected random source.

use glam::Vec2;

use crate::consts::*;
use crate::entities::{Colour, Entity, GameState};
use crate::input::{FrameInput, HeldDirections};
use crate::random::RandomSource;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh game: player centred, bullet pool empty, every enemy
/// active somewhere inside the field.
pub fn init_game<R: RandomSource + ?Sized>(rng: &mut R) -> GameState {
    let player = Entity::at_rest(
        Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
        PLAYER_RADIUS,
        Colour::Blue,
    );

    let mut enemies = [Entity::inactive(ENEMY_RADIUS, Colour::Red); MAX_ENEMIES];
    for enemy in enemies.iter_mut() {
        let x = rng.uniform(0, FIELD_WIDTH as i32);
        let y = rng.uniform(0, FIELD_HEIGHT as i32);
        *enemy = Entity::at_rest(Vec2::new(x as f32, y as f32), ENEMY_RADIUS, Colour::Red);
    }

    GameState {
        player,
        bullets: [Entity::inactive(BULLET_RADIUS, Colour::Yellow); MAX_BULLETS],
        enemies,
        score: 0,
        game_over: false,
    }
}

// ── Player controller ────────────────────────────────────────────────────────

/// Each held direction adds ±1 on its axis, so opposite keys cancel.
pub fn movement_vector(held: &HeldDirections) -> Vec2 {
    let mut movement = Vec2::ZERO;
    if held.up {
        movement.y -= 1.0;
    }
    if held.down {
        movement.y += 1.0;
    }
    if held.left {
        movement.x -= 1.0;
    }
    if held.right {
        movement.x += 1.0;
    }

    if movement.x != 0.0 && movement.y != 0.0 {
        movement *= DIAGONAL_FACTOR;
    }
    movement
}

pub fn update_player(state: &mut GameState, held: &HeldDirections, dt: f32) {
    let player = &mut state.player;
    player.position += movement_vector(held) * PLAYER_SPEED * dt;

    // Hard clamp, not a bounce.
    let r = player.radius;
    player.position.x = player.position.x.max(r).min(FIELD_WIDTH - r);
    player.position.y = player.position.y.max(r).min(FIELD_HEIGHT - r);
}

// ── Projectile system ────────────────────────────────────────────────────────

/// Unit vector from `from` towards `to`, or zero if they coincide.
fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let direction = to - from;
    let length = direction.length();
    if length > 0.0 {
        direction / length
    } else {
        direction
    }
}

/// Fire from the player towards `target` into the lowest free bullet slot.
///
/// Returns the slot used, or `None` when the pool is full and the shot was
/// dropped. Aiming at the player itself yields a stationary bullet.
pub fn fire_bullet(state: &mut GameState, target: Vec2) -> Option<usize> {
    let origin = state.player.position;
    let velocity = direction_to(origin, target) * BULLET_SPEED;

    let (slot, bullet) = state
        .bullets
        .iter_mut()
        .enumerate()
        .find(|(_, b)| !b.active)?;

    bullet.position = origin;
    bullet.velocity = velocity;
    bullet.active = true;
    Some(slot)
}

fn outside_field(p: Vec2) -> bool {
    p.x < 0.0 || p.x > FIELD_WIDTH || p.y < 0.0 || p.y > FIELD_HEIGHT
}

/// Advance every active bullet and free any whose centre has left the field.
pub fn update_bullets(state: &mut GameState, dt: f32) {
    for bullet in state.bullets.iter_mut().filter(|b| b.active) {
        bullet.position += bullet.velocity * dt;
        if outside_field(bullet.position) {
            bullet.active = false;
        }
    }
}

// ── Enemy AI ─────────────────────────────────────────────────────────────────

/// Every active enemy homes straight at the player at constant speed.
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.position;
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        enemy.position += direction_to(enemy.position, target) * ENEMY_SPEED * dt;
    }
}

// ── Collision & scoring ──────────────────────────────────────────────────────

/// Move an enemy just outside a random field edge. It stays active.
pub fn respawn_enemy<R: RandomSource + ?Sized>(enemy: &mut Entity, rng: &mut R) {
    let w = FIELD_WIDTH as i32;
    let h = FIELD_HEIGHT as i32;

    enemy.position = match rng.uniform(0, 3) {
        // Top
        0 => Vec2::new(rng.uniform(0, w) as f32, -RESPAWN_OFFSET),
        // Right
        1 => Vec2::new(FIELD_WIDTH + RESPAWN_OFFSET, rng.uniform(0, h) as f32),
        // Bottom
        2 => Vec2::new(rng.uniform(0, w) as f32, FIELD_HEIGHT + RESPAWN_OFFSET),
        // Left
        _ => Vec2::new(-RESPAWN_OFFSET, rng.uniform(0, h) as f32),
    };
    enemy.active = true;
}

/// Bullet × enemy, then player × enemy.
///
/// A bullet is consumed by the first enemy it overlaps (lowest index) and
/// is not tested further that frame. Returns the number of kills.
pub fn check_collisions<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> u32 {
    let mut kills = 0;

    for bullet in state.bullets.iter_mut().filter(|b| b.active) {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.active && bullet.overlaps(e))
        else {
            continue;
        };

        bullet.active = false;
        respawn_enemy(enemy, rng);
        state.score += SCORE_PER_KILL;
        kills += 1;
        log::debug!(
            "kill: enemy respawned at ({:.0}, {:.0}), score {}",
            enemy.position.x,
            enemy.position.y,
            state.score
        );
    }

    let player = state.player;
    let touched = state
        .enemies
        .iter()
        .filter(|e| e.active && player.overlaps(e))
        .count();
    if touched > 0 && !state.game_over {
        state.game_over = true;
        log::info!("game over: final score {}", state.score);
    }

    kills
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// One simulation frame. While playing: player, fire, bullets, enemies,
/// collisions. While game over nothing moves; a restart request rebuilds
/// the state.
pub fn update<R: RandomSource + ?Sized>(
    state: &mut GameState,
    input: &FrameInput,
    dt: f32,
    rng: &mut R,
) {
    if state.game_over {
        if input.restart {
            *state = init_game(rng);
            log::info!("restart");
        }
        return;
    }

    update_player(state, &input.held, dt);
    if input.fire && fire_bullet(state, input.pointer).is_none() {
        log::debug!("fire dropped: bullet pool full");
    }
    update_bullets(state, dt);
    update_enemies(state, dt);
    check_collisions(state, rng);
}
