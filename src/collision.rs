//! Per-tick interaction resolver.
//!
//! Category pairs are tested in a fixed order. Each step takes every live
//! member of one category against every live member of the other, and
//! anything consumed by an earlier step is gone for the later ones.

use tracing::trace;

use crate::constants::{EXPLOSION_LIFE, EXPLOSION_LIFE_ENEMY, SCORE_BOMB, SCORE_ENEMY};
use crate::entities::{Explosion, GameState, GravityField, Mood};
use crate::geometry::Rect;

/// What a single resolved contact was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionEvent {
    EnemyShot,
    BombShot,
    BombCaughtByGravity,
    EnemyCaughtByGravity,
    BombCaughtByNeoGravity,
    EnemyCaughtByNeoGravity,
    BombAbsorbedByHyper,
    BombBlockedByShield,
    CharacterHit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub events: Vec<CollisionEvent>,
    /// A normal-mode character was struck; the session is over.
    pub lost: bool,
}

/// Remove from `targets` every member that touches any of `weapons`, and
/// return the removed ones in their original order. When `consume` is set the
/// weapons a target touched are removed too, so they cannot hit a later target.
fn collide<A, B>(
    targets: &mut Vec<A>,
    weapons: &mut Vec<B>,
    consume: bool,
    hit: impl Fn(&A, &B) -> bool,
) -> Vec<A> {
    let mut destroyed = Vec::new();
    let mut survivors = Vec::with_capacity(targets.len());
    for target in targets.drain(..) {
        let touched: Vec<usize> = weapons
            .iter()
            .enumerate()
            .filter(|(_, w)| hit(&target, w))
            .map(|(i, _)| i)
            .collect();
        if touched.is_empty() {
            survivors.push(target);
            continue;
        }
        if consume {
            for i in touched.into_iter().rev() {
                weapons.remove(i);
            }
        }
        destroyed.push(target);
    }
    *targets = survivors;
    destroyed
}

/// Same as [`collide`] against weapons that are never consumed.
fn collide_persistent<A, B>(
    targets: &mut Vec<A>,
    weapons: &[B],
    hit: impl Fn(&A, &B) -> bool,
) -> Vec<A> {
    let (destroyed, survivors): (Vec<A>, Vec<A>) = targets
        .drain(..)
        .partition(|t| weapons.iter().any(|w| hit(t, w)));
    *targets = survivors;
    destroyed
}

/// Record one kill: explosion, score, event.
fn blow_up(
    state: &mut GameState,
    events: &mut Vec<CollisionEvent>,
    rect: &Rect,
    life: i32,
    reward: u32,
    event: CollisionEvent,
) {
    state.explosions.push(Explosion::at(rect, life));
    state.score.credit(reward);
    events.push(event);
}

/// Run every interaction rule once, mutating `state` in place.
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut events = Vec::new();

    // 1. Enemy × Beam
    let shot = collide(&mut state.enemies, &mut state.beams, true, |e, b| {
        e.rect.intersects(&b.rect)
    });
    if !shot.is_empty() {
        state.character.mood = Mood::Joy;
    }
    for enemy in &shot {
        blow_up(
            state,
            &mut events,
            &enemy.rect,
            EXPLOSION_LIFE_ENEMY,
            SCORE_ENEMY,
            CollisionEvent::EnemyShot,
        );
    }

    // 2. Bomb × Beam
    for bomb in collide(&mut state.bombs, &mut state.beams, true, |b, beam| {
        b.rect.intersects(&beam.rect)
    }) {
        blow_up(
            state,
            &mut events,
            &bomb.rect,
            EXPLOSION_LIFE,
            SCORE_BOMB,
            CollisionEvent::BombShot,
        );
    }

    let (points, screens): (Vec<GravityField>, Vec<GravityField>) =
        state.fields.iter().cloned().partition(GravityField::is_point);

    // 3. Bomb × point gravity
    for bomb in collide_persistent(&mut state.bombs, &points, |b, f| f.touches(&b.rect)) {
        blow_up(
            state,
            &mut events,
            &bomb.rect,
            EXPLOSION_LIFE,
            SCORE_BOMB,
            CollisionEvent::BombCaughtByGravity,
        );
    }

    // 4. Enemy × point gravity
    for enemy in collide_persistent(&mut state.enemies, &points, |e, f| f.touches(&e.rect)) {
        blow_up(
            state,
            &mut events,
            &enemy.rect,
            EXPLOSION_LIFE,
            SCORE_ENEMY,
            CollisionEvent::EnemyCaughtByGravity,
        );
    }

    // 5. Bomb × full-screen gravity
    for bomb in collide_persistent(&mut state.bombs, &screens, |b, f| f.touches(&b.rect)) {
        blow_up(
            state,
            &mut events,
            &bomb.rect,
            EXPLOSION_LIFE,
            SCORE_BOMB,
            CollisionEvent::BombCaughtByNeoGravity,
        );
    }

    // 6. Enemy × full-screen gravity
    for enemy in collide_persistent(&mut state.enemies, &screens, |e, f| f.touches(&e.rect)) {
        blow_up(
            state,
            &mut events,
            &enemy.rect,
            EXPLOSION_LIFE,
            SCORE_ENEMY,
            CollisionEvent::EnemyCaughtByNeoGravity,
        );
    }

    // 7. Bomb × character
    let character = state.character.rect;
    let struck = collide_persistent(&mut state.bombs, std::slice::from_ref(&character), |b, c| {
        b.rect.intersects(c)
    });
    if !struck.is_empty() {
        if !state.character.is_hyper() {
            state.character.mood = Mood::Sad;
            events.push(CollisionEvent::CharacterHit);
            trace!(tick = state.tick, ?events, "collisions resolved");
            return Resolution { events, lost: true };
        }
        for bomb in &struck {
            blow_up(
                state,
                &mut events,
                &bomb.rect,
                EXPLOSION_LIFE,
                SCORE_BOMB,
                CollisionEvent::BombAbsorbedByHyper,
            );
        }
    }

    // 8. Bomb × shield
    if let Some(shield) = state.shield.clone() {
        for bomb in collide_persistent(&mut state.bombs, std::slice::from_ref(&shield), |b, s| {
            b.rect.intersects(&s.rect)
        }) {
            blow_up(
                state,
                &mut events,
                &bomb.rect,
                EXPLOSION_LIFE,
                SCORE_BOMB,
                CollisionEvent::BombBlockedByShield,
            );
        }
    }

    if !events.is_empty() {
        trace!(tick = state.tick, ?events, "collisions resolved");
    }
    Resolution { events, lost: false }
}
