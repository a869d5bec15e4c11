//! Enemy swarm movement: lockstep horizontal sweep, with a direction flip and
//! one row of descent whenever any live enemy would leave `[0, COLUMNS]`.

use crate::consts::*;
use crate::entities::Enemy;

/// Horizontal distance the formation covers this frame.
pub fn enemy_speed(dt: f32) -> f32 {
    ENEMY_SPEED * dt
}

/// Move every live enemy one frame.  Returns `true` on a wall contact, i.e.
/// when the direction flipped and the formation dropped a row this frame.
pub fn advance(enemies: &mut [Enemy], going_right: &mut bool, dt: f32) -> bool {
    let speed = enemy_speed(dt);
    let step = |right: bool| if right { speed } else { -speed };

    // Pass 1: look ahead only, nothing is moved.
    let reached_wall = enemies.iter().filter(|e| e.is_alive()).any(|e| {
        let next_x = e.position.x + step(*going_right);
        next_x < 0.0 || next_x > COLUMNS as f32
    });

    // Pass 2: flip first so this frame already moves the new way.
    if reached_wall {
        *going_right = !*going_right;
    }
    let dx = step(*going_right);
    let dy = if reached_wall { ENEMY_ROW_STEP } else { 0.0 };

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.position.x += dx;
        enemy.position.y += dy;
    }

    reached_wall
}

/// Advance the sprite frame of every live enemy.
pub fn animate(enemies: &mut [Enemy], dt: f32) {
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.animate(dt);
    }
}

pub fn reached_game_over_row(enemies: &[Enemy]) -> bool {
    enemies
        .iter()
        .any(|e| e.is_alive() && e.position.y >= ENEMIES_GAME_OVER_ROW)
}

pub fn all_destroyed(enemies: &[Enemy]) -> bool {
    enemies.iter().all(|e| !e.is_alive())
}
