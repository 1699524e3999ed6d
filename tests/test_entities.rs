use bomb_buster::entities::*;
use bomb_buster::geometry::*;

const VIEW: Viewport = Viewport::new(1100, 650);

fn keys(up: bool, down: bool, left: bool, right: bool) -> HeldKeys {
    HeldKeys { up, down, left, right }
}

fn player_at(x: i32, y: i32) -> Player {
    Player::new(Vector2i::new(x, y), 90, 90)
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[test]
fn direction_from_keys_covers_all_combinations() {
    assert_eq!(Direction::from_keys(&keys(false, false, false, false)), Direction::Idle);
    assert_eq!(Direction::from_keys(&keys(false, false, false, true)), Direction::Right);
    assert_eq!(Direction::from_keys(&keys(true, false, false, true)), Direction::UpRight);
    assert_eq!(Direction::from_keys(&keys(true, false, true, false)), Direction::UpLeft);
    assert_eq!(Direction::from_keys(&keys(false, true, true, false)), Direction::DownLeft);
    assert_eq!(Direction::from_keys(&keys(false, true, false, true)), Direction::DownRight);
    // Opposites cancel
    assert_eq!(Direction::from_keys(&keys(true, true, false, false)), Direction::Idle);
    assert_eq!(Direction::from_keys(&keys(true, true, true, true)), Direction::Idle);
    assert_eq!(Direction::from_keys(&keys(true, true, false, true)), Direction::Right);
}

#[test]
fn direction_unit_round_trips() {
    for dir in Direction::PRINCIPAL {
        assert_eq!(Direction::from_unit(dir.unit()), Some(dir));
    }
    assert_eq!(Direction::from_unit(Vector2i::ZERO), Some(Direction::Idle));
}

#[test]
fn direction_rejects_undefined_vectors() {
    assert_eq!(Direction::from_unit(Vector2i::new(5, 0)), None);
    assert_eq!(Direction::from_unit(Vector2i::new(2, -1)), None);
}

#[test]
fn sprite_index_is_counter_clockwise_from_right() {
    assert_eq!(Direction::Right.sprite_index(), Some(0));
    assert_eq!(Direction::UpRight.sprite_index(), Some(1));
    assert_eq!(Direction::Up.sprite_index(), Some(2));
    assert_eq!(Direction::Left.sprite_index(), Some(4));
    assert_eq!(Direction::DownRight.sprite_index(), Some(7));
    assert_eq!(Direction::Idle.sprite_index(), None);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_defaults_to_facing_right() {
    let p = player_at(300, 200);
    assert_eq!(p.facing, Direction::Right);
    assert_eq!(p.pose, PlayerPose::Normal);
    assert_eq!(p.body.center(), Vector2i::new(300, 200));
}

#[test]
fn player_moves_diagonally_with_two_keys() {
    let mut p = player_at(300, 200);
    p.move_by(&keys(true, false, true, false), 5, &VIEW);
    assert_eq!(p.body.center(), Vector2i::new(295, 195));
    assert_eq!(p.facing, Direction::UpLeft);
}

#[test]
fn idle_move_keeps_position_and_facing() {
    let mut p = player_at(300, 200);
    p.facing = Direction::Down;
    p.move_by(&HeldKeys::default(), 5, &VIEW);
    assert_eq!(p.body.center(), Vector2i::new(300, 200));
    assert_eq!(p.facing, Direction::Down);
}

#[test]
fn move_out_of_bounds_is_reverted_on_both_axes() {
    // left edge at 0: moving up-left would only be illegal on x, but the
    // whole move is rejected (no sliding along the wall)
    let mut p = player_at(45, 200);
    assert_eq!(p.body.bounds.left(), 0);
    p.move_by(&keys(true, false, true, false), 5, &VIEW);
    assert_eq!(p.body.center(), Vector2i::new(45, 200));
    // facing still follows the attempted move
    assert_eq!(p.facing, Direction::UpLeft);
}

#[test]
fn moving_clears_cheer_pose() {
    let mut p = player_at(300, 200);
    p.pose = PlayerPose::Cheer;
    p.move_by(&HeldKeys::default(), 5, &VIEW);
    assert_eq!(p.pose, PlayerPose::Cheer);
    p.move_by(&keys(false, true, false, false), 5, &VIEW);
    assert_eq!(p.pose, PlayerPose::Normal);
}

// ── Hazard ────────────────────────────────────────────────────────────────────

#[test]
fn hazard_starts_moving_down_right() {
    let h = Hazard::new(Vector2i::new(500, 300), 10, 5);
    assert_eq!(h.body.velocity, Vector2i::new(5, 5));
    assert_eq!(h.body.bounds.width, 20);
}

#[test]
fn hazard_moves_freely_inside() {
    let mut h = Hazard::new(Vector2i::new(500, 300), 10, 5);
    h.advance(&VIEW);
    assert_eq!(h.body.center(), Vector2i::new(505, 305));
    assert_eq!(h.body.velocity, Vector2i::new(5, 5));
}

#[test]
fn hazard_flips_both_axes_in_a_corner() {
    let mut h = Hazard::new(Vector2i::new(1095, 645), 10, 5);
    h.advance(&VIEW);
    assert_eq!(h.body.velocity, Vector2i::new(-5, -5));
    assert_eq!(h.body.center(), Vector2i::new(1090, 640));
}

#[test]
fn hazard_may_overlap_edge_by_one_step() {
    // right edge exactly at the wall: still inside, so it keeps going out
    let mut h = Hazard::new(Vector2i::new(1090, 300), 10, 5);
    h.advance(&VIEW);
    assert_eq!(h.body.bounds.right(), 1105);
    assert_eq!(h.body.velocity.x, 5);
    // next step sees the overflow and comes back
    h.advance(&VIEW);
    assert_eq!(h.body.velocity.x, -5);
    assert_eq!(h.body.bounds.right(), 1100);
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_spawns_ahead_of_player_along_facing() {
    let mut p = player_at(300, 200);
    p.facing = Direction::UpRight;
    let proj = Projectile::fire(&p, 5, 20, 20).expect("facing is set");
    assert_eq!(proj.body.center(), Vector2i::new(390, 110));
    assert_eq!(proj.body.velocity, Vector2i::new(5, -5));
    assert_eq!(proj.heading, Direction::UpRight);
}

#[test]
fn idle_facing_fires_nothing() {
    let mut p = player_at(300, 200);
    p.facing = Direction::Idle;
    assert!(Projectile::fire(&p, 5, 20, 20).is_none());
}

#[test]
fn projectile_expires_without_moving_once_outside() {
    let p = player_at(300, 200);
    let mut proj = Projectile::fire(&p, 5, 20, 20).unwrap();
    proj.body.bounds = Rect::new(1085, 100, 20, 20); // right = 1105
    let before = proj.body.bounds;
    assert_eq!(proj.advance(&VIEW), ProjectileStatus::Expired);
    assert_eq!(proj.body.bounds, before);
}

#[test]
fn projectile_at_edge_still_moves() {
    let p = player_at(300, 200);
    let mut proj = Projectile::fire(&p, 5, 20, 20).unwrap();
    proj.body.bounds = Rect::new(1080, 100, 20, 20); // right = 1100
    assert_eq!(proj.advance(&VIEW), ProjectileStatus::Alive);
    assert_eq!(proj.body.bounds.x, 1085);
}

// ── Effect ────────────────────────────────────────────────────────────────────

#[test]
fn effect_expires_after_exactly_its_lifetime() {
    let mut e = Effect::new(Vector2i::new(100, 100), 60, 60, 3);
    assert_eq!(e.advance(), EffectStatus::Alive);
    assert_eq!(e.advance(), EffectStatus::Alive);
    assert_eq!(e.advance(), EffectStatus::Expired);
    assert_eq!(e.remaining_life, 0);
}

#[test]
fn effect_flips_every_other_frame() {
    let mut e = Effect::new(Vector2i::new(100, 100), 60, 60, 10);
    let mut flips = Vec::new();
    for _ in 0..4 {
        e.advance();
        flips.push(e.flipped);
    }
    // life 9 (odd) keep, 8 flip, 7 keep, 6 flip
    assert_eq!(flips, vec![false, true, true, false]);
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[test]
fn score_counts_up_by_one() {
    let mut s = Score::default();
    assert_eq!(s.value(), 0);
    s.increment();
    s.increment();
    assert_eq!(s.value(), 2);
}

#[test]
fn entity_clone_is_independent() {
    let original = player_at(300, 200);
    let mut cloned = original.clone();
    cloned.body.bounds.translate(Vector2i::new(10, 0));
    cloned.facing = Direction::Left;
    assert_eq!(original.body.center(), Vector2i::new(300, 200));
    assert_eq!(original.facing, Direction::Right);
}
