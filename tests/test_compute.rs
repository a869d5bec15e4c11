use glam::Vec2;
use ray_invaders::compute::*;
use ray_invaders::consts::*;
use ray_invaders::entities::*;
use ray_invaders::snapshot::{self, SpriteKind};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

const IDLE: TickInput = TickInput {
    left: false,
    right: false,
    fire: false,
};
const RIGHT: TickInput = TickInput {
    left: false,
    right: true,
    fire: false,
};
const FIRE: TickInput = TickInput {
    left: false,
    right: false,
    fire: true,
};

/// A game already in PLAYING, started with a zero-length frame.
fn playing(rng: &mut StdRng) -> GameState {
    let mut s = new_game(rng);
    step(&mut s, &RIGHT, 0.0, rng);
    assert_eq!(s.status, GameStatus::Playing);
    s
}

/// Put the player's bullet in the middle of enemy `i` and run a still frame.
fn shoot_enemy(s: &mut GameState, i: usize, rng: &mut StdRng) {
    s.player.bullet = Bullet::spawn(s.enemies[i].position + Vec2::splat(0.45));
    step(s, &IDLE, 0.0, rng);
}

// ── new_game / setup ──────────────────────────────────────────────────────────

#[test]
fn new_game_is_waiting_with_full_formation() {
    let mut rng = seeded_rng();
    let s = new_game(&mut rng);

    assert_eq!(s.status, GameStatus::Waiting);
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), COLUMNS * ENEMY_ROWS);
    assert!(s.enemies.iter().all(|e| e.health == ENEMY_MAX_HEALTH));
    assert_eq!(
        s.destroyables.len(),
        BARRIER_COUNT * BARRIER_PIECES_X * BARRIER_PIECES_Y
    );
    assert!(s.enemy_bullets.is_empty());
    assert!(s.player.bullet.is_destroyed());
    assert!(s.enemies_going_right);
}

#[test]
fn enemy_cadence_is_jittered_within_bounds() {
    let mut rng = seeded_rng();
    let s = new_game(&mut rng);

    let cadences: Vec<u16> = s.enemies.iter().map(|e| e.shooting.ms_to_trigger).collect();
    assert!(cadences
        .iter()
        .all(|&ms| (ENEMY_FIRE_MIN_MS..=ENEMY_FIRE_MAX_MS).contains(&ms)));
    assert!(cadences.iter().any(|&ms| ms != cadences[0]));
}

#[test]
fn cover_sits_between_formation_and_player() {
    let mut rng = seeded_rng();
    let s = new_game(&mut rng);

    for d in &s.destroyables {
        assert!(d.position.y > (ENEMY_ROWS - 1) as f32);
        assert!(d.position.y + DESTROYABLE_SIZE.y < s.player.position.y);
    }
}

#[test]
fn same_seed_same_game() {
    let a = new_game(&mut StdRng::seed_from_u64(7));
    let b = new_game(&mut StdRng::seed_from_u64(7));
    assert_eq!(a.enemies, b.enemies);
    assert_eq!(a.destroyables, b.destroyables);
}

// ── WAITING ───────────────────────────────────────────────────────────────────

#[test]
fn waiting_only_animates() {
    let mut rng = seeded_rng();
    let mut s = new_game(&mut rng);
    let before: Vec<Vec2> = s.enemies.iter().map(|e| e.position).collect();

    step(&mut s, &FIRE, 0.6, &mut rng);

    assert_eq!(s.status, GameStatus::Waiting);
    assert!(s.player.bullet.is_destroyed());
    let after: Vec<Vec2> = s.enemies.iter().map(|e| e.position).collect();
    assert_eq!(before, after);
    assert!(s.enemies.iter().all(|e| e.frame == 1));
}

#[test]
fn moving_right_starts_the_round() {
    let mut rng = seeded_rng();
    let mut s = new_game(&mut rng);
    let x = s.player.position.x;

    step(&mut s, &RIGHT, 0.1, &mut rng);

    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.player.position.x > x);
}

// ── PLAYING ───────────────────────────────────────────────────────────────────

#[test]
fn player_is_clamped_to_the_grid() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    let left = TickInput { left: true, ..IDLE };

    for _ in 0..30 {
        step(&mut s, &left, 0.1, &mut rng);
    }
    assert_eq!(s.player.position.x, 0.0);
}

#[test]
fn second_shot_is_blocked_while_first_is_in_flight() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.destroyables.clear();

    step(&mut s, &FIRE, 0.25, &mut rng);
    assert!(!s.player.bullet.is_destroyed());
    let first_y = s.player.bullet.position.y;
    assert!(first_y < s.player.position.y);

    step(&mut s, &FIRE, 0.01, &mut rng);
    assert!(!s.player.bullet.is_destroyed());
    assert!(s.player.bullet.position.y < first_y);
}

#[test]
fn killing_every_enemy_wins_with_ten_points_each() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    let total = s.enemies.len();

    for i in 0..total {
        assert_eq!(s.status, GameStatus::Playing);
        shoot_enemy(&mut s, i, &mut rng);
        assert_eq!(s.live_enemies(), total - i - 1);
    }

    assert_eq!(s.status, GameStatus::Won);
    assert_eq!(s.score, 240);
}

#[test]
fn player_bullet_moves_before_it_is_checked() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    // Enemy 2 is column 0, row 2; start the shot just under its box.
    let target = s.enemies[2].position;
    s.player.bullet = Bullet::spawn(target + Vec2::new(0.45, ENEMY_SIZE.y + 0.05));

    step(&mut s, &IDLE, 1.0 / 60.0, &mut rng);

    assert!(!s.enemies[2].is_alive());
    assert_eq!(s.score, SCORE_PER_ENEMY);
    assert!(s.player.bullet.is_destroyed());
}

#[test]
fn enemy_bullet_falls_onto_player_in_the_same_frame() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    // Above the player's box; its timer fires on the next 50 ms tick and the
    // half-unit drop lands it on the player.
    let mut bullet = Bullet::spawn(s.player.position + Vec2::new(0.45, -0.2));
    bullet.timing.ms_accumulated = bullet.timing.ms_to_trigger - 10;
    s.enemy_bullets.push(bullet);

    step(&mut s, &IDLE, 0.05, &mut rng);

    assert_eq!(s.status, GameStatus::Lost);
    assert!(!s.player.is_alive());
}

#[test]
fn enemy_bullet_on_player_loses() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemy_bullets
        .push(Bullet::spawn(s.player.position + Vec2::splat(0.45)));

    step(&mut s, &IDLE, 0.0, &mut rng);

    assert_eq!(s.status, GameStatus::Lost);
    assert!(s.enemy_bullets.is_empty());
}

#[test]
fn formation_reaching_the_bottom_loses() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemies[5].position.y = ENEMIES_GAME_OVER_ROW;

    step(&mut s, &IDLE, 0.0, &mut rng);
    assert_eq!(s.status, GameStatus::Lost);
}

#[test]
fn spent_enemy_bullets_are_compacted_each_frame() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemy_bullets
        .push(Bullet::spawn(Vec2::new(0.0, GAME_ROWS as f32 + 1.0)));
    s.enemy_bullets.push(Bullet::spawn(Vec2::new(0.5, 3.5)));

    step(&mut s, &IDLE, 0.0, &mut rng);

    assert_eq!(s.enemy_bullets.len(), 1);
    assert_eq!(s.enemy_bullets[0].position, Vec2::new(0.5, 3.5));
}

// ── WON / LOST → restart ──────────────────────────────────────────────────────

#[test]
fn restart_waits_for_the_display_delay() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemies[0].position.y = ENEMIES_GAME_OVER_ROW;
    step(&mut s, &IDLE, 0.0, &mut rng);
    assert_eq!(s.status, GameStatus::Lost);

    step(&mut s, &RIGHT, 0.5, &mut rng);
    step(&mut s, &RIGHT, 0.5, &mut rng); // exactly 1000 ms
    assert_eq!(s.status, GameStatus::Lost);

    step(&mut s, &RIGHT, 0.25, &mut rng);
    assert_eq!(s.status, GameStatus::Waiting);
}

#[test]
fn delay_elapses_without_input() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemies[0].position.y = ENEMIES_GAME_OVER_ROW;
    step(&mut s, &IDLE, 0.0, &mut rng);

    for _ in 0..5 {
        step(&mut s, &IDLE, 0.5, &mut rng);
    }
    assert_eq!(s.status, GameStatus::Lost);

    step(&mut s, &RIGHT, 0.0, &mut rng);
    assert_eq!(s.status, GameStatus::Waiting);
}

fn restart(s: &mut GameState, rng: &mut StdRng) {
    step(s, &IDLE, 1.5, rng);
    step(s, &RIGHT, 0.0, rng);
}

#[test]
fn setup_after_won_or_lost_yields_the_same_structure() {
    let mut rng = seeded_rng();

    let mut won = playing(&mut rng);
    for i in 0..won.enemies.len() {
        shoot_enemy(&mut won, i, &mut rng);
    }
    assert_eq!(won.status, GameStatus::Won);
    let capacity = won.enemies.capacity();
    restart(&mut won, &mut rng);

    let mut lost = playing(&mut rng);
    lost.enemy_bullets.push(Bullet::spawn(Vec2::new(1.0, 1.0)));
    lost.enemies[0].position.y = ENEMIES_GAME_OVER_ROW;
    step(&mut lost, &IDLE, 0.0, &mut rng);
    assert_eq!(lost.status, GameStatus::Lost);
    restart(&mut lost, &mut rng);

    for s in [&won, &lost] {
        assert_eq!(s.status, GameStatus::Waiting);
        assert_eq!(s.score, 0);
        assert_eq!(s.enemies.len(), COLUMNS * ENEMY_ROWS);
        assert_eq!(s.live_enemies(), COLUMNS * ENEMY_ROWS);
        assert_eq!(
            s.destroyables.len(),
            BARRIER_COUNT * BARRIER_PIECES_X * BARRIER_PIECES_Y
        );
        assert!(s.enemy_bullets.is_empty());
        assert!(s.player.bullet.is_destroyed());
        assert!(s.player.is_alive());
        assert!(s.enemies_going_right);
    }
    assert_eq!(won.enemies.capacity(), capacity);
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_lists_every_live_entity() {
    let mut rng = seeded_rng();
    let mut s = playing(&mut rng);
    s.enemies[0].health = 0;
    s.enemy_bullets.push(Bullet::spawn(Vec2::new(2.0, 4.0)));

    let frame = snapshot::build(&s);
    let count = |kind: SpriteKind| frame.sprites.iter().filter(|s| s.kind == kind).count();

    assert_eq!(count(SpriteKind::Enemy), COLUMNS * ENEMY_ROWS - 1);
    assert_eq!(count(SpriteKind::EnemyBullet), 1);
    assert_eq!(count(SpriteKind::Player), 1);
    assert_eq!(count(SpriteKind::PlayerBullet), 0);
    assert_eq!(
        count(SpriteKind::Cover(DamageStage::Full)),
        BARRIER_COUNT * BARRIER_PIECES_X * BARRIER_PIECES_Y
    );
    assert_eq!(frame.status, GameStatus::Playing);
    assert_eq!(frame.live_enemies, COLUMNS * ENEMY_ROWS - 1);
}
