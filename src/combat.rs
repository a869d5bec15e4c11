//! Firing cadence, bullet spawning, bullet advance and culling.

use glam::Vec2;
use log::{debug, trace};

use crate::accumulator::TickEnd;
use crate::collision::{self, HitOutcome};
use crate::consts::*;
use crate::entities::{Bullet, Destroyable, Enemy, Player};

// ── Firing ────────────────────────────────────────────────────────────────────

/// Fire the player's gun if the trigger is held, the cooldown has elapsed and
/// the previous shot is gone.  Returns `true` when a bullet was spawned.
///
/// The cooldown runs under `Keep`: once elapsed it stays armed until a shot
/// actually leaves, and the spawn restarts it.
pub fn player_fire(player: &mut Player, fire_held: bool, dt: f32) -> bool {
    if !fire_held {
        return false;
    }
    if !player.shooting.tick(dt, TickEnd::Keep) {
        return false;
    }
    if !player.bullet.is_destroyed() {
        return false;
    }

    player.shooting.reset();
    player.bullet = Bullet::spawn(player.position);
    true
}

/// Tick every live enemy's gun and append a bullet for each one that fires.
/// Returns the number of shots.
pub fn enemies_fire(enemies: &mut [Enemy], bullets: &mut Vec<Bullet>, dt: f32) -> usize {
    let mut shots = 0;
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if enemy.shooting.tick(dt, TickEnd::Restart) {
            trace!("enemy at {} fired", enemy.position);
            bullets.push(Bullet::spawn(enemy.position));
            shots += 1;
        }
    }
    shots
}

// ── Advance ───────────────────────────────────────────────────────────────────

/// Per-frame gravity displacement.
pub fn gravity(dt: f32) -> Vec2 {
    Vec2::new(0.0, GRAVITY * dt)
}

/// Enemy bullets fall one gravity step whenever their own timer fires; the
/// player's bullet rises one step every frame it is in flight.
pub fn advance_bullets(enemy_bullets: &mut [Bullet], player_bullet: &mut Bullet, dt: f32) {
    let g = gravity(dt);

    for bullet in enemy_bullets.iter_mut().filter(|b| !b.is_destroyed()) {
        if bullet.timing.tick(dt, TickEnd::Restart) {
            bullet.position += g;
            bullet.frame ^= 1;
        }
    }

    if !player_bullet.is_destroyed() {
        player_bullet.position -= g;
        if player_bullet.timing.tick(dt, TickEnd::Restart) {
            player_bullet.frame ^= 1;
        }
    }
}

// ── Resolution & culling ──────────────────────────────────────────────────────

pub fn enemy_bullet_out_of_bounds(bullet: &Bullet) -> bool {
    bullet.position.y > GAME_ROWS as f32
}

pub fn player_bullet_out_of_bounds(bullet: &Bullet) -> bool {
    bullet.position.y <= 0.0
}

/// Resolve every in-flight enemy bullet.  Bullets below the play area are
/// destroyed without a collision check.  Returns `true` if the player was
/// hit.
pub fn settle_enemy_bullets(
    bullets: &mut [Bullet],
    destroyables: &mut [Destroyable],
    player: &mut Player,
) -> bool {
    let mut player_hit = false;

    for bullet in bullets.iter_mut().filter(|b| !b.is_destroyed()) {
        if enemy_bullet_out_of_bounds(bullet) {
            bullet.destroy();
            continue;
        }
        match collision::resolve_enemy_bullet(bullet, destroyables, player) {
            HitOutcome::Player => {
                debug!("enemy bullet hit the player at {}", player.position);
                player_hit = true;
            }
            HitOutcome::Destroyable(i) => {
                debug!("enemy bullet chipped cover fragment {i}");
            }
            HitOutcome::None | HitOutcome::Enemy(_) => {}
        }
    }

    player_hit
}

/// Resolve the player's bullet.  Reaching the top of the play area destroys
/// it without a collision check.
pub fn settle_player_bullet(
    bullet: &mut Bullet,
    enemies: &mut [Enemy],
    destroyables: &mut [Destroyable],
) -> HitOutcome {
    if bullet.is_destroyed() {
        return HitOutcome::None;
    }
    if player_bullet_out_of_bounds(bullet) {
        bullet.destroy();
        return HitOutcome::None;
    }

    let outcome = collision::resolve_player_bullet(bullet, enemies, destroyables);
    if outcome != HitOutcome::None {
        debug!("player bullet: {outcome:?}");
    }
    outcome
}
