//! Read-only view of a frame for renderers.
//!
//! Copying what is needed into a `RenderSnapshot` keeps drawing code from
//! ever touching `GameState`.

use glam::Vec2;

use crate::consts::*;
use crate::entities::{DamageStage, GameState, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Enemy,
    Cover(DamageStage),
    EnemyBullet,
    Player,
    PlayerBullet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner in world units.
    pub position: Vec2,
    pub size: Vec2,
    /// Animation frame index.
    pub frame: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    /// Back-to-front draw order: cover, enemies, bullets, player.
    pub sprites: Vec<Sprite>,
    pub score: u16,
    pub status: GameStatus,
    pub live_enemies: usize,
}

pub fn build(state: &GameState) -> RenderSnapshot {
    let mut sprites = Vec::with_capacity(
        state.destroyables.len() + state.enemies.len() + state.enemy_bullets.len() + 2,
    );

    for d in state.destroyables.iter().filter(|d| !d.is_destroyed()) {
        sprites.push(Sprite {
            kind: SpriteKind::Cover(d.stage()),
            position: d.position,
            size: DESTROYABLE_SIZE,
            frame: 0,
        });
    }

    for e in state.enemies.iter().filter(|e| e.is_alive()) {
        sprites.push(Sprite {
            kind: SpriteKind::Enemy,
            position: e.position,
            size: ENEMY_SIZE,
            frame: e.frame,
        });
    }

    for b in state.enemy_bullets.iter().filter(|b| !b.is_destroyed()) {
        sprites.push(Sprite {
            kind: SpriteKind::EnemyBullet,
            position: b.position,
            size: BULLET_SIZE,
            frame: b.frame,
        });
    }

    let player = &state.player;
    if !player.bullet.is_destroyed() {
        sprites.push(Sprite {
            kind: SpriteKind::PlayerBullet,
            position: player.bullet.position,
            size: BULLET_SIZE,
            frame: player.bullet.frame,
        });
    }
    if player.is_alive() {
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            position: player.position,
            size: PLAYER_SIZE,
            frame: 0,
        });
    }

    RenderSnapshot {
        sprites,
        score: state.score,
        status: state.status,
        live_enemies: state.live_enemies(),
    }
}
