use musou_shooter::compute::*;
use musou_shooter::entities::*;
use musou_shooter::geometry::{Rect, Vec2};
use musou_shooter::input::*;
use musou_shooter::score::Score;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Tick 1, so no enemy spawns until tick 200.
fn make_state() -> GameState {
    let mut s = init_state();
    s.tick = 1;
    s
}

fn with_score(score: u32) -> GameState {
    let mut s = make_state();
    s.score = Score::new(score);
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputFrame {
    InputFrame::idle()
}

fn bomb_on(rect: &Rect) -> Bomb {
    Bomb {
        rect: Rect::from_center(rect.center(), 20.0, 20.0),
        direction: Vec2::new(0.0, 1.0),
        speed: 6.0,
        radius: 10,
        color: 0,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_character_position() {
    let s = init_state();
    assert_eq!(s.character.rect.center(), Vec2::new(900.0, 400.0));
    assert_eq!(s.character.facing, Direction::Right);
    assert_eq!(s.character.mode, Mode::Normal);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state();
    assert!(s.enemies.is_empty());
    assert!(s.bombs.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.fields.is_empty());
    assert!(s.shield.is_none());
    assert!(s.explosions.is_empty());
    assert_eq!(s.score.value(), 0);
    assert_eq!(s.tick, 0);
    assert_eq!(s.status, GameStatus::Running);
}

// ── Abilities ─────────────────────────────────────────────────────────────────

#[test]
fn fire_beam_follows_facing() {
    let mut s = make_state();
    s.character.facing = Direction::Down;
    let s2 = fire_beam(&s);
    assert_eq!(s2.beams.len(), 1);
    assert_eq!(s2.beams[0].facing, Direction::Down);
    assert!(s.beams.is_empty());
}

#[test]
fn gravity_rejected_below_threshold() {
    let s = with_score(49);
    let s2 = activate_gravity(&s);
    assert_eq!(s2.score.value(), 49);
    assert!(s2.fields.is_empty());
}

#[test]
fn gravity_accepted_at_threshold() {
    let s = with_score(50);
    let s2 = activate_gravity(&s);
    assert_eq!(s2.score.value(), 0);
    assert_eq!(s2.fields.len(), 1);
    assert!(s2.fields[0].is_point());
    assert_eq!(s2.fields[0].rect.center(), s.character.rect.center());
}

#[test]
fn shield_rejected_below_threshold() {
    let s = with_score(49);
    let s2 = activate_shield(&s);
    assert_eq!(s2.score.value(), 49);
    assert!(s2.shield.is_none());
}

#[test]
fn only_one_shield_at_a_time() {
    let s = with_score(200);
    let s2 = activate_shield(&activate_shield(&s));
    assert_eq!(s2.score.value(), 150);
    assert!(s2.shield.is_some());
}

#[test]
fn hyper_needs_strictly_more_than_cost() {
    let s = with_score(100);
    let s2 = activate_hyper(&s);
    assert_eq!(s2.score.value(), 100);
    assert_eq!(s2.character.mode, Mode::Normal);

    let s = with_score(101);
    let s2 = activate_hyper(&s);
    assert_eq!(s2.score.value(), 1);
    assert_eq!(s2.character.mode, Mode::Hyper { life: 500 });
}

#[test]
fn neo_gravity_threshold() {
    let s2 = activate_neo_gravity(&with_score(199));
    assert_eq!(s2.score.value(), 199);
    assert!(s2.fields.is_empty());

    let s2 = activate_neo_gravity(&with_score(200));
    assert_eq!(s2.score.value(), 0);
    assert_eq!(s2.fields[0].kind, GravityKind::FullScreen);
}

#[test]
fn abilities_do_not_mutate_original() {
    let s = with_score(500);
    let _ = activate_gravity(&s);
    let _ = activate_shield(&s);
    let _ = fire_beam(&s);
    assert_eq!(s.score.value(), 500);
    assert!(s.fields.is_empty());
    assert!(s.shield.is_none());
    assert!(s.beams.is_empty());
}

// ── tick — counters & input ──────────────────────────────────────────────────

#[test]
fn tick_increments_tick() {
    let mut s = make_state();
    s.tick = 5;
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.tick, 6);
}

#[test]
fn one_press_fires_one_beam() {
    let s = make_state();
    let s2 = tick(&s, &InputFrame::with_presses(vec![Action::FireBeam]), &mut seeded_rng());
    assert_eq!(s2.beams.len(), 1);
    let s3 = tick(&s2, &idle(), &mut seeded_rng());
    assert_eq!(s3.beams.len(), 1);
}

#[test]
fn beam_fired_facing_left_moves_left() {
    let s = make_state();
    let left = HeldKeys { left: true, ..HeldKeys::default() };
    let s = tick(&s, &InputFrame::with_held(left), &mut seeded_rng());
    assert_eq!(s.character.facing, Direction::Left);

    let s = tick(&s, &InputFrame::with_presses(vec![Action::FireBeam]), &mut seeded_rng());
    assert_eq!(s.beams[0].velocity(), Vec2::new(-10.0, 0.0));
}

#[test]
fn boost_doubles_speed() {
    let s = make_state();
    let x = s.character.rect.x;
    let keys = HeldKeys { right: true, boost: true, ..HeldKeys::default() };
    let s2 = tick(&s, &InputFrame::with_held(keys), &mut seeded_rng());
    assert_eq!(s2.character.rect.x, x + 20.0);

    let keys = HeldKeys { right: true, ..HeldKeys::default() };
    let s3 = tick(&s2, &InputFrame::with_held(keys), &mut seeded_rng());
    assert_eq!(s3.character.rect.x, x + 30.0);
}

#[test]
fn rejected_press_in_tick_leaves_score() {
    let s = with_score(49);
    let s2 = tick(
        &s,
        &InputFrame::with_presses(vec![Action::Shield, Action::Gravity, Action::Hyper]),
        &mut seeded_rng(),
    );
    assert_eq!(s2.score.value(), 49);
    assert!(s2.shield.is_none());
    assert!(s2.fields.is_empty());
    assert_eq!(s2.character.mode, Mode::Normal);
}

// ── tick — spawning ──────────────────────────────────────────────────────────

#[test]
fn tick_spawns_enemy_on_period() {
    let s = init_state();
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
    // Spawned at the top and already descended once.
    assert_eq!(s2.enemies[0].rect.center().y, 6.0);

    let mut s = make_state();
    s.tick = 200;
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
}

#[test]
fn tick_no_spawn_off_period() {
    let s = make_state();
    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert!(s2.enemies.is_empty());
}

#[test]
fn same_seed_same_session() {
    let a = tick(&init_state(), &idle(), &mut StdRng::seed_from_u64(7));
    let b = tick(&init_state(), &idle(), &mut StdRng::seed_from_u64(7));
    assert_eq!(a.enemies[0].rect, b.enemies[0].rect);
    assert_eq!(a.enemies[0].stop_altitude, b.enemies[0].stop_altitude);
    assert_eq!(a.enemies[0].interval, b.enemies[0].interval);
}

#[test]
fn enemy_stops_then_bombs_on_interval() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(800.0, 100.0, 7, 0));
    let mut rng = seeded_rng();

    let mut stopped_on = None;
    let mut first_bomb_on = None;
    while s.tick < 30 {
        let t = s.tick;
        s = tick(&s, &idle(), &mut rng);
        let enemy = &s.enemies[0];
        if enemy.is_stopped() && stopped_on.is_none() {
            stopped_on = Some(t);
            assert_eq!(enemy.velocity, Vec2::ZERO);
        }
        if stopped_on.is_some() {
            assert_eq!(enemy.state, EnemyState::Stopped);
        }
        if !s.bombs.is_empty() && first_bomb_on.is_none() {
            first_bomb_on = Some(t);
        }
    }
    assert_eq!(stopped_on, Some(17));
    assert_eq!(first_bomb_on, Some(21));
    assert_eq!(s.status, GameStatus::Running);
}

// ── tick — loss & hyper ──────────────────────────────────────────────────────

#[test]
fn bomb_on_normal_character_ends_game_that_tick() {
    let mut s = make_state();
    s.tick = 40;
    let bomb = bomb_on(&s.character.rect);
    s.bombs.push(bomb);
    let beam = Beam::fired_by(&s.character);
    let beam_rect = beam.rect;
    s.beams.push(beam);

    let s2 = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Ended);
    assert_eq!(s2.tick, 40);
    assert_eq!(s2.character.mood, Mood::Sad);
    // No entity updates ran.
    assert_eq!(s2.beams[0].rect, beam_rect);

    let s3 = tick(&s2, &idle(), &mut seeded_rng());
    assert_eq!(s3.tick, 40);
    assert_eq!(s3.beams[0].rect, beam_rect);
}

#[test]
fn hyper_absorbs_bomb_then_expires() {
    let mut s = make_state();
    s.character.enter_hyper(1);
    let bomb = bomb_on(&s.character.rect);
    s.bombs.push(bomb);

    let s = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s.status, GameStatus::Running);
    assert!(s.bombs.is_empty());
    assert_eq!(s.score.value(), 1);
    assert_eq!(s.explosions.len(), 1);
    // Spawned at 50, already updated once this tick.
    assert_eq!(s.explosions[0].life, 49);
    assert_eq!(s.character.mode, Mode::Hyper { life: 0 });

    let s = tick(&s, &idle(), &mut seeded_rng());
    assert_eq!(s.character.mode, Mode::Normal);
}

// ── tick — lifetimes ─────────────────────────────────────────────────────────

#[test]
fn shield_life_drops_by_one_per_tick_until_removed() {
    let s = with_score(50);
    let mut s = tick(&s, &InputFrame::with_presses(vec![Action::Shield]), &mut seeded_rng());
    let mut rng = seeded_rng();
    let mut expected = 399;
    while let Some(shield) = &s.shield {
        assert_eq!(shield.life, expected);
        expected -= 1;
        s.enemies.clear();
        s = tick(&s, &idle(), &mut rng);
    }
    assert_eq!(expected, -1);
}

#[test]
fn gravity_field_outlives_its_hits() {
    let s = with_score(50);
    let mut s = tick(&s, &InputFrame::with_presses(vec![Action::Gravity]), &mut seeded_rng());
    let mut rng = seeded_rng();
    let center = s.character.rect.center();
    for i in 0..5 {
        s.bombs.push(bomb_on(&Rect::from_center(
            Vec2::new(center.x - 150.0, center.y - 100.0 + i as f32 * 40.0),
            20.0,
            20.0,
        )));
        s = tick(&s, &idle(), &mut rng);
        assert!(s.bombs.is_empty());
        assert_eq!(s.fields.len(), 1);
    }
    assert_eq!(s.score.value(), 5);
    assert_eq!(s.fields[0].life, 499 - 5);
}
