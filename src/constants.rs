//! Fixed tunables. All distances are in play-area pixels, all durations in ticks.

// ── Play area & pacing ────────────────────────────────────────────────────────

pub const WIDTH: f32 = 1600.0;
pub const HEIGHT: f32 = 900.0;
pub const TICKS_PER_SECOND: u64 = 50;

/// How long the final (lost) screen stays up before the program exits.
pub const LOSS_FREEZE_MS: u64 = 2_000;

// ── Character ─────────────────────────────────────────────────────────────────

pub const CHARACTER_START: (f32, f32) = (900.0, 400.0);
pub const CHARACTER_SIZE: (f32, f32) = (100.0, 100.0);
pub const CHARACTER_SPEED: f32 = 10.0;
pub const CHARACTER_BOOST_SPEED: f32 = 20.0;

// ── Enemy ─────────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (80.0, 60.0);
pub const ENEMY_SPAWN_PERIOD: u64 = 200;
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_STOP_MIN: i32 = 50;
/// Half the play height.
pub const ENEMY_STOP_MAX: i32 = 450;
pub const ENEMY_INTERVAL_MIN: u64 = 50;
pub const ENEMY_INTERVAL_MAX: u64 = 300;
pub const ENEMY_VARIANTS: u8 = 3;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BOMB_SPEED: f32 = 6.0;
pub const BOMB_RADIUS_MIN: u8 = 10;
pub const BOMB_RADIUS_MAX: u8 = 50;
pub const BOMB_COLORS: u8 = 6;

pub const BEAM_SPEED: f32 = 10.0;
/// Beam box when fired to the right; other facings use the rotated extent.
pub const BEAM_SIZE: (f32, f32) = (100.0, 20.0);

// ── Abilities ─────────────────────────────────────────────────────────────────

pub const HYPER_COST: u32 = 100;
pub const HYPER_LIFE: i32 = 500;

pub const GRAVITY_COST: u32 = 50;
pub const GRAVITY_RADIUS: f32 = 200.0;
pub const GRAVITY_LIFE: i32 = 500;

pub const NEO_GRAVITY_COST: u32 = 200;
pub const NEO_GRAVITY_LIFE: i32 = 400;

pub const SHIELD_COST: u32 = 50;
pub const SHIELD_LIFE: i32 = 400;
pub const SHIELD_WIDTH: f32 = 20.0;
pub const SHIELD_OFFSET_X: f32 = 40.0;

// ── Explosions & scoring ──────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: (f32, f32) = (100.0, 100.0);
pub const EXPLOSION_LIFE_ENEMY: i32 = 100;
pub const EXPLOSION_LIFE: i32 = 50;
/// Ticks each of the two explosion frames stays on screen.
pub const EXPLOSION_FRAME_TICKS: i32 = 10;

pub const SCORE_BOMB: u32 = 1;
pub const SCORE_ENEMY: u32 = 10;
