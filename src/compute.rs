//! Game state machine and per-frame step.
//!
//! `step` is the only entry point the frame loop needs.  It takes the state
//! by mutable reference, the held inputs, the frame's `dt` in seconds and an
//! injected RNG (used only when a finished round is restarted), so callers
//! fully control determinism.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::accumulator::TickEnd;
use crate::collision::HitOutcome;
use crate::consts::*;
use crate::entities::{remove_destroyed, Destroyable, Enemy, GameState, GameStatus, Player};
use crate::{combat, formation};

/// Inputs held during this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    pub fn directional(&self) -> bool {
        self.left || self.right
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Build a fresh game in the WAITING state.
pub fn new_game(rng: &mut impl Rng) -> GameState {
    let mut state = GameState::empty();
    setup(&mut state, rng);
    state
}

/// Reinitialise every collection and scalar of `state` for a new round.
///
/// Collections are cleared rather than reallocated, so their capacity carries
/// over from round to round.  Randomness decides each enemy's fire cadence
/// and where the barriers sit; the number of every entity is fixed.
pub fn setup(state: &mut GameState, rng: &mut impl Rng) {
    state.enemy_bullets.clear();
    state.enemies.clear();
    state.destroyables.clear();

    state.enemies_going_right = true;
    state.player = Player::new();
    state.score = 0;
    state.status = GameStatus::Waiting;
    state.restart_delay.reset();

    for column in 0..COLUMNS {
        for row in 0..ENEMY_ROWS {
            let fire_every_ms = rng.gen_range(ENEMY_FIRE_MIN_MS..=ENEMY_FIRE_MAX_MS);
            state
                .enemies
                .push(Enemy::new(Vec2::new(column as f32, row as f32), fire_every_ms));
        }
    }

    let half_x = (BARRIER_PIECES_X / 2) as i32;
    let half_y = (BARRIER_PIECES_Y / 2) as i32;
    for _ in 0..BARRIER_COUNT {
        let anchor = Vec2::new(
            rng.gen_range(0..=COLUMNS - 1) as f32,
            (ENEMY_ROWS + rng.gen_range(1..=EMPTY_ROWS - 1)) as f32,
        );
        for offset_x in -half_x..=half_x {
            for offset_y in -half_y..=half_y {
                let offset = Vec2::new(offset_x as f32, offset_y as f32) * DESTROYABLE_SIZE;
                state.destroyables.push(Destroyable::new(anchor + offset));
            }
        }
    }

    debug!(
        "setup: {} enemies, {} cover fragments",
        state.enemies.len(),
        state.destroyables.len()
    );
}

// ── Player movement ───────────────────────────────────────────────────────────

/// Move horizontally, right winning over left, clamped to the grid.
pub fn move_player(player: &mut Player, input: &TickInput, dt: f32) {
    let dx = if input.right {
        PLAYER_SPEED * dt
    } else if input.left {
        -PLAYER_SPEED * dt
    } else {
        return;
    };
    player.position.x = (player.position.x + dx).clamp(0.0, COLUMNS as f32);
}

// ── Per-frame step ────────────────────────────────────────────────────────────

/// Advance the game by one frame.
pub fn step(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut impl Rng) {
    match state.status {
        GameStatus::Waiting if input.directional() => {
            info!("round started");
            state.status = GameStatus::Playing;
            play(state, input, dt);
        }
        GameStatus::Waiting => formation::animate(&mut state.enemies, dt),
        GameStatus::Playing => play(state, input, dt),
        GameStatus::Won | GameStatus::Lost => {
            // Ticked unconditionally so the delay also elapses with no keys held.
            let ready = state.restart_delay.tick(dt, TickEnd::Keep);
            if ready && input.directional() {
                info!("restarting after {:?} with score {}", state.status, state.score);
                setup(state, rng);
            }
        }
    }
}

fn finish(state: &mut GameState, status: GameStatus) {
    info!("round over: {:?}, score {}", status, state.score);
    state.status = status;
    state.restart_delay.reset();
}

/// One PLAYING frame: movement, firing, advance, collisions, culling.
fn play(state: &mut GameState, input: &TickInput, dt: f32) {
    move_player(&mut state.player, input, dt);
    combat::player_fire(&mut state.player, input.fire, dt);

    formation::animate(&mut state.enemies, dt);
    if formation::advance(&mut state.enemies, &mut state.enemies_going_right, dt) {
        debug!("formation reversed, now going right: {}", state.enemies_going_right);
    }
    if formation::reached_game_over_row(&state.enemies) {
        finish(state, GameStatus::Lost);
        return;
    }

    combat::enemies_fire(&mut state.enemies, &mut state.enemy_bullets, dt);
    combat::advance_bullets(&mut state.enemy_bullets, &mut state.player.bullet, dt);

    let player_hit = combat::settle_enemy_bullets(
        &mut state.enemy_bullets,
        &mut state.destroyables,
        &mut state.player,
    );
    if player_hit {
        remove_destroyed(&mut state.enemy_bullets);
        finish(state, GameStatus::Lost);
        return;
    }

    let outcome = combat::settle_player_bullet(
        &mut state.player.bullet,
        &mut state.enemies,
        &mut state.destroyables,
    );
    if let HitOutcome::Enemy(i) = outcome {
        if !state.enemies[i].is_alive() {
            state.score = state.score.saturating_add(SCORE_PER_ENEMY);
        }
    }

    remove_destroyed(&mut state.enemy_bullets);

    // The last kill ends the round at once; nothing else needs to land.
    if formation::all_destroyed(&state.enemies) {
        finish(state, GameStatus::Won);
    }
}
