//! All game entity types and the state that owns them.
//!
//! Entities are plain values owned by their collection; nothing holds a
//! reference back into `GameState`.

use glam::Vec2;

use crate::accumulator::{Accumulator, TickEnd};
use crate::consts::*;

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first move: only decorative animation runs.
    Waiting,
    Playing,
    Won,
    Lost,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A projectile.  Which side fired it is given by the slot it lives in:
/// `GameState::enemy_bullets` or `Player::bullet`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Gates enemy-bullet steps and the animation frame of every bullet.
    pub timing: Accumulator,
    pub frame: u8,
    /// One-way flag: a destroyed bullet stays destroyed until it is removed
    /// or its slot is overwritten by a fresh spawn.
    destroyed: bool,
}

impl Bullet {
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            timing: Accumulator::new(BULLET_TIMING_MS),
            frame: 0,
            destroyed: false,
        }
    }

    /// An empty slot: the player's bullet before the first shot.
    pub fn spent() -> Self {
        Self {
            position: Vec2::ZERO,
            timing: Accumulator::default(),
            frame: 0,
            destroyed: true,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// A formation member.  Dead enemies stay in the collection with zero health
/// so indices remain stable for the whole round.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Vec2,
    pub shooting: Accumulator,
    pub health: u8,
    pub animation: Accumulator,
    pub frame: u8,
}

impl Enemy {
    pub fn new(position: Vec2, fire_every_ms: u16) -> Self {
        Self {
            position,
            shooting: Accumulator::new(fire_every_ms),
            health: ENEMY_MAX_HEALTH,
            animation: Accumulator::new(ENEMY_ANIMATION_MS),
            frame: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(BULLET_DAMAGE);
    }

    /// Flip between the two sprite frames on each animation tick.
    pub fn animate(&mut self, dt: f32) {
        if self.animation.tick(dt, TickEnd::Restart) {
            self.frame ^= 1;
        }
    }
}

// ── Destroyable ───────────────────────────────────────────────────────────────

/// Visible wear of a cover fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageStage {
    Full,
    ThreeQuarters,
    Half,
    Quarter,
    Destroyed,
}

impl DamageStage {
    /// Panics on any health outside the five legal steps: that can only
    /// happen if damage was applied with the wrong amount.
    pub fn from_health(health: u8) -> Self {
        const FULL: u8 = DESTROYABLE_MAX_HEALTH;
        const THREE_QUARTERS: u8 = DESTROYABLE_MAX_HEALTH / 4 * 3;
        const HALF: u8 = DESTROYABLE_MAX_HEALTH / 2;
        const QUARTER: u8 = DESTROYABLE_MAX_HEALTH / 4;

        match health {
            FULL => DamageStage::Full,
            THREE_QUARTERS => DamageStage::ThreeQuarters,
            HALF => DamageStage::Half,
            QUARTER => DamageStage::Quarter,
            0 => DamageStage::Destroyed,
            other => unreachable!("destroyable health {other} is not a quarter step"),
        }
    }
}

/// One fragment of a cover barrier.  Each fragment is collided independently.
#[derive(Clone, Debug, PartialEq)]
pub struct Destroyable {
    pub position: Vec2,
    health: u8,
}

impl Destroyable {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            health: DESTROYABLE_MAX_HEALTH,
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn stage(&self) -> DamageStage {
        DamageStage::from_health(self.health)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Remove one bullet's worth of health.
    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(BULLET_DAMAGE);
        // Validates the new value.
        self.stage();
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub shooting: Accumulator,
    /// Single slot: a new shot is only possible once this one is destroyed.
    pub bullet: Bullet,
    pub health: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Vec2::new((COLUMNS / 2) as f32, (GAME_ROWS - 1) as f32),
            shooting: Accumulator::new(PLAYER_SHOT_COOLDOWN_MS),
            bullet: Bullet::spent(),
            health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(BULLET_DAMAGE);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The single authoritative game.  Rebuilt in place by `compute::setup`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Bullet>,
    pub destroyables: Vec<Destroyable>,
    pub player: Player,
    pub enemies_going_right: bool,
    pub score: u16,
    pub status: GameStatus,
    /// Holds the WON/LOST screen before directional input may restart.
    pub restart_delay: Accumulator,
}

impl GameState {
    /// Empty collections sized for a full round.  Call `compute::setup` to
    /// populate them.
    pub fn empty() -> Self {
        Self {
            enemies: Vec::with_capacity(COLUMNS * ENEMY_ROWS),
            enemy_bullets: Vec::with_capacity(COLUMNS * ENEMY_ROWS),
            destroyables: Vec::with_capacity(
                BARRIER_COUNT * BARRIER_PIECES_X * BARRIER_PIECES_Y,
            ),
            player: Player::new(),
            enemies_going_right: true,
            score: 0,
            status: GameStatus::Waiting,
            restart_delay: Accumulator::new(RESTART_DELAY_MS),
        }
    }

    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

// ── Collection helpers ────────────────────────────────────────────────────────

/// Drop every destroyed bullet in O(n) without preserving order.
///
/// Walks from the back: `swap_remove(i)` moves the last element into slot
/// `i`, and that element has already been visited, so nothing is skipped.
pub fn remove_destroyed(bullets: &mut Vec<Bullet>) {
    for i in (0..bullets.len()).rev() {
        if bullets[i].is_destroyed() {
            bullets.swap_remove(i);
        }
    }
}
