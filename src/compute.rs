//! Game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::resolve;
use crate::constants::{
    CHARACTER_BOOST_SPEED, CHARACTER_SPEED, ENEMY_SPAWN_PERIOD, GRAVITY_COST, GRAVITY_LIFE,
    GRAVITY_RADIUS, HYPER_COST, HYPER_LIFE, NEO_GRAVITY_COST, NEO_GRAVITY_LIFE, SHIELD_COST,
    SHIELD_LIFE,
};
use crate::entities::{Beam, Bomb, Character, Enemy, GameState, GameStatus, GravityField, Shield};
use crate::input::{Action, InputFrame};
use crate::score::{Score, Threshold};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session: character at its start point, nothing else alive.
pub fn init_state() -> GameState {
    GameState {
        character: Character::at_start(),
        enemies: Vec::new(),
        bombs: Vec::new(),
        beams: Vec::new(),
        fields: Vec::new(),
        shield: None,
        explosions: Vec::new(),
        score: Score::default(),
        status: GameStatus::Running,
        tick: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a beam along the character's facing. Free and unlimited.
pub fn fire_beam(state: &GameState) -> GameState {
    let mut beams = state.beams.clone();
    beams.push(Beam::fired_by(&state.character));
    GameState {
        beams,
        ..state.clone()
    }
}

/// Enter hyper mode if the score is strictly above the cost.
pub fn activate_hyper(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !next.score.try_spend(HYPER_COST, Threshold::Above(HYPER_COST)) {
        debug!(score = state.score.value(), "hyper rejected");
        return next;
    }
    next.character.enter_hyper(HYPER_LIFE);
    info!(tick = state.tick, score = next.score.value(), "hyper mode");
    next
}

/// Open a point gravity field on the character.
pub fn activate_gravity(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !next.score.try_spend(GRAVITY_COST, Threshold::AtLeast(GRAVITY_COST)) {
        debug!(score = state.score.value(), "gravity rejected");
        return next;
    }
    next.fields
        .push(GravityField::point(&next.character, GRAVITY_RADIUS, GRAVITY_LIFE));
    info!(tick = state.tick, score = next.score.value(), "gravity field");
    next
}

/// Cover the whole play area with a gravity field.
pub fn activate_neo_gravity(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !next
        .score
        .try_spend(NEO_GRAVITY_COST, Threshold::AtLeast(NEO_GRAVITY_COST))
    {
        debug!(score = state.score.value(), "neo gravity rejected");
        return next;
    }
    next.fields.push(GravityField::full_screen(NEO_GRAVITY_LIFE));
    info!(tick = state.tick, score = next.score.value(), "neo gravity field");
    next
}

/// Raise a shield, unless one is already up.
pub fn activate_shield(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.shield.is_some() {
        debug!("shield already active");
        return next;
    }
    if !next.score.try_spend(SHIELD_COST, Threshold::AtLeast(SHIELD_COST)) {
        debug!(score = state.score.value(), "shield rejected");
        return next;
    }
    next.shield = Some(Shield::raised_by(&next.character, SHIELD_LIFE));
    info!(tick = state.tick, score = next.score.value(), "shield raised");
    next
}

pub fn apply_action(state: &GameState, action: Action) -> GameState {
    match action {
        Action::FireBeam => fire_beam(state),
        Action::Hyper => activate_hyper(state),
        Action::Gravity => activate_gravity(state),
        Action::NeoGravity => activate_neo_gravity(state),
        Action::Shield => activate_shield(state),
    }
}

// ── Per-tick scheduler (nearly pure — RNG is injected) ──────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Order: trigger actions, speed modifier, enemy spawn, bomb drops,
/// collisions, then one update per live entity.  A loss ends the tick right
/// after collisions; an ended state is returned unchanged.
pub fn tick(state: &GameState, input: &InputFrame, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Ended {
        return state.clone();
    }

    // ── 1. Discrete key presses ──────────────────────────────────────────────
    let mut next = input
        .presses
        .iter()
        .fold(state.clone(), |s, &action| apply_action(&s, action));

    next.character.speed = if input.held.boost {
        CHARACTER_BOOST_SPEED
    } else {
        CHARACTER_SPEED
    };

    // ── 2. Spawn a new enemy ─────────────────────────────────────────────────
    if next.tick % ENEMY_SPAWN_PERIOD == 0 {
        let enemy = Enemy::spawn(rng);
        debug!(tick = next.tick, x = enemy.rect.center().x, "enemy spawned");
        next.enemies.push(enemy);
    }

    // ── 3. Stopped enemies drop bombs on their own interval ─────────────────
    let drops: Vec<Bomb> = next
        .enemies
        .iter()
        .filter(|e| e.drops_bomb_on(next.tick))
        .map(|e| Bomb::dropped_by(e, &next.character, &mut *rng))
        .collect();
    if !drops.is_empty() {
        debug!(tick = next.tick, count = drops.len(), "bombs dropped");
    }
    next.bombs.extend(drops);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let resolution = resolve(&mut next);
    if resolution.lost {
        next.status = GameStatus::Ended;
        info!(tick = next.tick, score = next.score.value(), "character hit, game over");
        return next;
    }

    // ── 5. Update every live entity once ─────────────────────────────────────
    next.fields.retain_mut(GravityField::update);
    next.character.update(&input.held);
    next.beams.retain_mut(Beam::update);
    for enemy in &mut next.enemies {
        enemy.update();
    }
    next.bombs.retain_mut(Bomb::update);
    next.explosions.retain_mut(|x| x.update());
    if next.shield.as_mut().is_some_and(|s| !s.update()) {
        next.shield = None;
    }

    next.tick += 1;
    next
}
