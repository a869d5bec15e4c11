//! Bullet-versus-target resolution.
//!
//! A bullet is tested against one collection at a time, in collection order;
//! the first live target whose box overlaps takes the hit and the bullet is
//! destroyed.  A bullet can therefore damage at most one target per check.

use glam::Vec2;

use crate::consts::*;
use crate::entities::{Bullet, Destroyable, Enemy, Player};

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn at(position: Vec2, size: Vec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.x,
            h: size.y,
        }
    }

    /// Strict inequalities: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Anything a bullet can damage.
pub trait Target {
    const SIZE: Vec2;

    fn position(&self) -> Vec2;
    fn is_hittable(&self) -> bool;
    fn take_hit(&mut self);

    fn collision_box(&self) -> Rect {
        Rect::at(self.position(), Self::SIZE)
    }
}

impl Target for Enemy {
    const SIZE: Vec2 = ENEMY_SIZE;

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_hittable(&self) -> bool {
        self.is_alive()
    }

    fn take_hit(&mut self) {
        Enemy::take_hit(self);
    }
}

impl Target for Destroyable {
    const SIZE: Vec2 = DESTROYABLE_SIZE;

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_hittable(&self) -> bool {
        !self.is_destroyed()
    }

    fn take_hit(&mut self) {
        Destroyable::take_hit(self);
    }
}

impl Target for Player {
    const SIZE: Vec2 = PLAYER_SIZE;

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_hittable(&self) -> bool {
        self.is_alive()
    }

    fn take_hit(&mut self) {
        Player::take_hit(self);
    }
}

/// What a bullet struck this frame, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    None,
    Enemy(usize),
    Destroyable(usize),
    Player,
}

/// Test `bullet` against `targets`; on the first overlap damage that target,
/// destroy the bullet and return the target's index.
pub fn resolve<T: Target>(bullet: &mut Bullet, targets: &mut [T]) -> Option<usize> {
    if bullet.is_destroyed() {
        return None;
    }
    let bullet_box = Rect::at(bullet.position, BULLET_SIZE);

    for (i, target) in targets.iter_mut().enumerate() {
        if !target.is_hittable() {
            continue;
        }
        if target.collision_box().overlaps(&bullet_box) {
            target.take_hit();
            bullet.destroy();
            return Some(i);
        }
    }
    None
}

/// Player shots: enemies first, then cover.
pub fn resolve_player_bullet(
    bullet: &mut Bullet,
    enemies: &mut [Enemy],
    destroyables: &mut [Destroyable],
) -> HitOutcome {
    if let Some(i) = resolve(bullet, enemies) {
        return HitOutcome::Enemy(i);
    }
    if let Some(i) = resolve(bullet, destroyables) {
        return HitOutcome::Destroyable(i);
    }
    HitOutcome::None
}

/// Enemy shots: cover first, then the player.
pub fn resolve_enemy_bullet(
    bullet: &mut Bullet,
    destroyables: &mut [Destroyable],
    player: &mut Player,
) -> HitOutcome {
    if let Some(i) = resolve(bullet, destroyables) {
        return HitOutcome::Destroyable(i);
    }
    if resolve(bullet, std::slice::from_mut(player)).is_some() {
        return HitOutcome::Player;
    }
    HitOutcome::None
}
