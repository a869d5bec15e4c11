//! Ray Invaders — a fixed-timestep arcade shooter core.
//!
//! The library is the simulation only: every function takes the game state
//! (and, where needed, an injected RNG) explicitly, so several games can run
//! side by side and tests stay deterministic.  Terminal drawing and input
//! polling live in the binary.

pub mod accumulator;
pub mod collision;
pub mod combat;
pub mod compute;
pub mod entities;
pub mod formation;
pub mod mapper;
pub mod snapshot;

/// Tunables shared by every subsystem.  Positions are in world-grid units:
/// one cell is roughly one enemy wide.
pub mod consts {
    use glam::Vec2;

    // ── Grid ──────────────────────────────────────────────────────────────────

    pub const COLUMNS: usize = 8;
    pub const ENEMY_ROWS: usize = 3;
    pub const EMPTY_ROWS: usize = 4;
    pub const GAME_ROWS: usize = ENEMY_ROWS + EMPTY_ROWS + 1;

    /// A live enemy whose row reaches this value ends the round.
    pub const ENEMIES_GAME_OVER_ROW: f32 = (GAME_ROWS - 1) as f32;

    // ── Collision boxes (top-left anchored) ───────────────────────────────────

    pub const BULLET_SIZE: Vec2 = Vec2::new(0.1, 0.1);
    pub const DESTROYABLE_SIZE: Vec2 = Vec2::new(0.1, 0.1);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 1.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(1.0, 1.0);

    // ── Motion (world units per second) ───────────────────────────────────────

    pub const ENEMY_SPEED: f32 = 0.5;
    /// Vertical drop applied to the whole formation on each wall contact.
    pub const ENEMY_ROW_STEP: f32 = 0.25;
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const GRAVITY: f32 = 10.0;

    // ── Timers (milliseconds) ─────────────────────────────────────────────────

    pub const PLAYER_SHOT_COOLDOWN_MS: u16 = 200;
    pub const BULLET_TIMING_MS: u16 = 200;
    pub const ENEMY_FIRE_MIN_MS: u16 = 5000;
    pub const ENEMY_FIRE_MAX_MS: u16 = 30000;
    pub const ENEMY_ANIMATION_MS: u16 = 500;
    /// Minimum time the WON/LOST screen stays up before input restarts.
    pub const RESTART_DELAY_MS: u16 = 1000;

    // ── Damage & scoring ──────────────────────────────────────────────────────

    pub const BULLET_DAMAGE: u8 = 25;
    pub const DESTROYABLE_MAX_HEALTH: u8 = 100;
    pub const ENEMY_MAX_HEALTH: u8 = 25;
    pub const PLAYER_MAX_HEALTH: u8 = 25;
    pub const SCORE_PER_ENEMY: u16 = 10;

    // ── Barriers ──────────────────────────────────────────────────────────────

    pub const BARRIER_COUNT: usize = 6;
    /// Fragments per barrier along each axis (odd, so the anchor is centred).
    pub const BARRIER_PIECES_X: usize = 5;
    pub const BARRIER_PIECES_Y: usize = 3;
}
