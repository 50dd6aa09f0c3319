//! All game entity types and their per-tick update rules.
//!
//! Transient entities (`Bomb`, `Beam`, `Shield`, `GravityField`, `Explosion`)
//! expose `update(&mut self) -> bool`; `false` means the entity has expired
//! and the owning collection must drop it.

use rand::Rng;

use crate::constants::{
    BEAM_SIZE, BEAM_SPEED, BOMB_COLORS, BOMB_RADIUS_MAX, BOMB_RADIUS_MIN, BOMB_SPEED,
    CHARACTER_SIZE, CHARACTER_SPEED, CHARACTER_START, ENEMY_DESCENT_SPEED, ENEMY_INTERVAL_MAX,
    ENEMY_INTERVAL_MIN, ENEMY_SIZE, ENEMY_STOP_MAX, ENEMY_STOP_MIN, ENEMY_VARIANTS,
    EXPLOSION_FRAME_TICKS, EXPLOSION_SIZE, SHIELD_OFFSET_X, SHIELD_WIDTH, WIDTH,
};
use crate::geometry::{calc_orientation, in_bounds, Rect, Vec2};
use crate::input::HeldKeys;
use crate::score::Score;

// ── Facing ────────────────────────────────────────────────────────────────────

/// One of the eight octant directions the character can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Octant for a net movement step; `None` when the step is zero.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (0, -1) => Some(Direction::Up),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, 1) => Some(Direction::DownLeft),
            (0, 1) => Some(Direction::Down),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpRight => (1, -1),
            Direction::Up => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Down => (0, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Unit-length vector for this facing.
    pub fn unit(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
            .normalized()
            .unwrap_or(Vec2::new(1.0, 0.0))
    }
}

// ── Character ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Immune to bombs; `life` counts down once per tick.
    Hyper { life: i32 },
}

/// Cosmetic expression; has no effect on the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Neutral,
    Joy,
    Sad,
}

#[derive(Clone, Debug)]
pub struct Character {
    pub rect: Rect,
    pub speed: f32,
    pub facing: Direction,
    pub mode: Mode,
    pub mood: Mood,
}

impl Character {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, CHARACTER_SIZE.0, CHARACTER_SIZE.1),
            speed: CHARACTER_SPEED,
            facing: Direction::Right,
            mode: Mode::Normal,
            mood: Mood::Neutral,
        }
    }

    pub fn at_start() -> Self {
        Self::new(Vec2::new(CHARACTER_START.0, CHARACTER_START.1))
    }

    pub fn is_hyper(&self) -> bool {
        matches!(self.mode, Mode::Hyper { .. })
    }

    pub fn enter_hyper(&mut self, life: i32) {
        self.mode = Mode::Hyper { life };
    }

    /// Move by the held keys, then tick the hyper countdown.
    ///
    /// The displacement is all-or-nothing: if the moved box leaves the play
    /// area on either axis the whole step is undone.
    pub fn update(&mut self, held: &HeldKeys) {
        let (dx, dy) = held.net();
        let step = Vec2::new(dx as f32 * self.speed, dy as f32 * self.speed);
        self.rect.translate(step);
        if !in_bounds(&self.rect) {
            self.rect.translate(step.scale(-1.0));
        }

        if let Some(facing) = Direction::from_delta(dx, dy) {
            self.facing = facing;
            self.mood = Mood::Neutral;
        }

        if let Mode::Hyper { life } = &mut self.mode {
            *life -= 1;
            if *life < 0 {
                self.mode = Mode::Normal;
            }
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Centre y at which the enemy halts for good.
    pub stop_altitude: f32,
    pub state: EnemyState,
    /// Ticks between bomb drops once stopped.
    pub interval: u64,
    pub variant: u8,
}

impl Enemy {
    pub fn new(center_x: f32, stop_altitude: f32, interval: u64, variant: u8) -> Self {
        Self {
            rect: Rect::from_center(Vec2::new(center_x, 0.0), ENEMY_SIZE.0, ENEMY_SIZE.1),
            velocity: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
            stop_altitude,
            state: EnemyState::Descending,
            interval: interval.max(1),
            variant,
        }
    }

    /// A fresh enemy at a random column along the top edge.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let center_x = rng.gen_range(0..=WIDTH as i32) as f32;
        let stop_altitude = rng.gen_range(ENEMY_STOP_MIN..=ENEMY_STOP_MAX) as f32;
        let interval = rng.gen_range(ENEMY_INTERVAL_MIN..=ENEMY_INTERVAL_MAX);
        let variant = rng.gen_range(0..ENEMY_VARIANTS);
        Self::new(center_x, stop_altitude, interval, variant)
    }

    pub fn is_stopped(&self) -> bool {
        self.state == EnemyState::Stopped
    }

    /// Whether a stopped enemy releases a bomb on `tick`.
    pub fn drops_bomb_on(&self, tick: u64) -> bool {
        self.is_stopped() && tick % self.interval == 0
    }

    pub fn update(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.rect.translate(self.velocity);
        if self.rect.center().y >= self.stop_altitude {
            self.velocity = Vec2::ZERO;
            self.state = EnemyState::Stopped;
        }
    }
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    /// Unit vector fixed at the moment of the drop.
    pub direction: Vec2,
    pub speed: f32,
    pub radius: u8,
    pub color: u8,
}

impl Bomb {
    /// Drop a bomb from `enemy`'s underside, aimed at where `target` is now.
    pub fn dropped_by(enemy: &Enemy, target: &Character, rng: &mut impl Rng) -> Self {
        let radius = rng.gen_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX);
        let color = rng.gen_range(0..BOMB_COLORS);
        let origin = enemy.rect.center();
        let center = Vec2::new(origin.x, origin.y + enemy.rect.h / 2.0);
        let size = 2.0 * radius as f32;
        Self {
            rect: Rect::from_center(center, size, size),
            direction: calc_orientation(&enemy.rect, &target.rect),
            speed: BOMB_SPEED,
            radius,
            color,
        }
    }

    pub fn update(&mut self) -> bool {
        self.rect.translate(self.direction.scale(self.speed));
        in_bounds(&self.rect)
    }
}

// ── Beam ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub direction: Vec2,
    pub speed: f32,
    pub facing: Direction,
}

impl Beam {
    /// A beam leaving the character along its current facing.
    pub fn fired_by(character: &Character) -> Self {
        let facing = character.facing;
        let direction = facing.unit();
        let (bw, bh) = BEAM_SIZE;
        // Bounding box of the base beam rotated onto `direction`.
        let w = (bw * direction.x).abs() + (bh * direction.y).abs();
        let h = (bw * direction.y).abs() + (bh * direction.x).abs();
        let origin = character.rect.center();
        let center = Vec2::new(
            origin.x + character.rect.w * direction.x,
            origin.y + character.rect.h * direction.y,
        );
        Self {
            rect: Rect::from_center(center, w, h),
            direction,
            speed: BEAM_SPEED,
            facing,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction.scale(self.speed)
    }

    pub fn update(&mut self) -> bool {
        self.rect.translate(self.velocity());
        in_bounds(&self.rect)
    }
}

// ── Shield ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Shield {
    pub rect: Rect,
    pub life: i32,
}

impl Shield {
    /// Frozen next to the character; it does not follow later movement.
    pub fn raised_by(character: &Character, life: i32) -> Self {
        let anchor = character.rect.center();
        let center = Vec2::new(anchor.x + SHIELD_OFFSET_X, anchor.y);
        Self {
            rect: Rect::from_center(center, SHIELD_WIDTH, character.rect.h * 2.0),
            life,
        }
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

// ── Gravity fields ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GravityKind {
    Point { radius: f32 },
    FullScreen,
}

/// Area weapon. Destroys what it touches and is never consumed by contact.
#[derive(Clone, Debug)]
pub struct GravityField {
    pub kind: GravityKind,
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn point(character: &Character, radius: f32, life: i32) -> Self {
        Self {
            kind: GravityKind::Point { radius },
            rect: Rect::from_center(character.rect.center(), 2.0 * radius, 2.0 * radius),
            life,
        }
    }

    pub fn full_screen(life: i32) -> Self {
        Self {
            kind: GravityKind::FullScreen,
            rect: Rect::screen(),
            life,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self.kind, GravityKind::Point { .. })
    }

    pub fn touches(&self, rect: &Rect) -> bool {
        match self.kind {
            GravityKind::Point { radius } => rect.intersects_circle(self.rect.center(), radius),
            GravityKind::FullScreen => rect.intersects(&self.rect),
        }
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Cosmetic only; takes part in no collisions.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub life: i32,
}

impl Explosion {
    /// Centred on the box of whatever just died.
    pub fn at(rect: &Rect, life: i32) -> Self {
        Self {
            rect: Rect::from_center(rect.center(), EXPLOSION_SIZE.0, EXPLOSION_SIZE.1),
            life,
        }
    }

    /// Which of the two alternating frames to show.
    pub fn frame(&self) -> u8 {
        (self.life.div_euclid(EXPLOSION_FRAME_TICKS) % 2) as u8
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

// ── Render snapshot ───────────────────────────────────────────────────────────

/// Kind and variant tag the presentation layer maps to visuals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpriteKind {
    Character { facing: Direction, hyper: bool, mood: Mood },
    Enemy { variant: u8 },
    Bomb { radius: u8, color: u8 },
    Beam { facing: Direction },
    Shield,
    Gravity { radius: f32 },
    NeoGravity,
    Explosion { frame: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: a normal-mode character was hit.
    Ended,
}

/// Everything one session owns. Cloneable so the update functions in
/// `compute` can hand back a new state without mutating the caller's.
#[derive(Clone, Debug)]
pub struct GameState {
    pub character: Character,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    /// Point and full-screen fields together, in creation order.
    pub fields: Vec<GravityField>,
    pub shield: Option<Shield>,
    pub explosions: Vec<Explosion>,
    pub score: Score,
    pub status: GameStatus,
    pub tick: u64,
}

impl GameState {
    /// Every live entity in back-to-front draw order.
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut out = Vec::new();
        for field in &self.fields {
            let kind = match field.kind {
                GravityKind::FullScreen => SpriteKind::NeoGravity,
                GravityKind::Point { radius } => SpriteKind::Gravity { radius },
            };
            out.push(Sprite { kind, rect: field.rect });
        }
        out.push(Sprite {
            kind: SpriteKind::Character {
                facing: self.character.facing,
                hyper: self.character.is_hyper(),
                mood: self.character.mood,
            },
            rect: self.character.rect,
        });
        out.extend(self.beams.iter().map(|b| Sprite {
            kind: SpriteKind::Beam { facing: b.facing },
            rect: b.rect,
        }));
        out.extend(self.enemies.iter().map(|e| Sprite {
            kind: SpriteKind::Enemy { variant: e.variant },
            rect: e.rect,
        }));
        out.extend(self.bombs.iter().map(|b| Sprite {
            kind: SpriteKind::Bomb { radius: b.radius, color: b.color },
            rect: b.rect,
        }));
        out.extend(self.explosions.iter().map(|x| Sprite {
            kind: SpriteKind::Explosion { frame: x.frame() },
            rect: x.rect,
        }));
        if let Some(shield) = &self.shield {
            out.push(Sprite { kind: SpriteKind::Shield, rect: shield.rect });
        }
        out
    }
}
