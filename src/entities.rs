//! Game entity types and their per-entity motion rules.
//!
//! Entities share a `Body` by composition; the simulation owns every
//! collection and entities never refer back to one another.

use crate::geometry::{classify_bounds, Rect, Vector2i, Viewport};

// ── Input snapshot ────────────────────────────────────────────────────────────

/// Movement keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// The eight principal directions plus `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Idle,
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
    /// The eight moving directions, counter-clockwise from `Right`.
    pub const PRINCIPAL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Opposite keys cancel out on their axis.
    pub fn from_keys(keys: &HeldKeys) -> Direction {
        let dx = keys.right as i32 - keys.left as i32;
        let dy = keys.down as i32 - keys.up as i32;
        // dx, dy ∈ {-1, 0, 1}, so this cannot miss.
        Direction::from_unit(Vector2i::new(dx, dy)).unwrap_or(Direction::Idle)
    }

    /// Inverse of `unit`; `None` for anything outside the enumerated set.
    pub fn from_unit(v: Vector2i) -> Option<Direction> {
        let dir = match (v.x, v.y) {
            (0, 0) => Direction::Idle,
            (1, 0) => Direction::Right,
            (1, -1) => Direction::UpRight,
            (0, -1) => Direction::Up,
            (-1, -1) => Direction::UpLeft,
            (-1, 0) => Direction::Left,
            (-1, 1) => Direction::DownLeft,
            (0, 1) => Direction::Down,
            (1, 1) => Direction::DownRight,
            _ => return None,
        };
        Some(dir)
    }

    pub fn unit(self) -> Vector2i {
        match self {
            Direction::Idle => Vector2i::new(0, 0),
            Direction::Right => Vector2i::new(1, 0),
            Direction::UpRight => Vector2i::new(1, -1),
            Direction::Up => Vector2i::new(0, -1),
            Direction::UpLeft => Vector2i::new(-1, -1),
            Direction::Left => Vector2i::new(-1, 0),
            Direction::DownLeft => Vector2i::new(-1, 1),
            Direction::Down => Vector2i::new(0, 1),
            Direction::DownRight => Vector2i::new(1, 1),
        }
    }

    /// Orientation sprite slot, counter-clockwise from `Right = 0`.
    pub fn sprite_index(self) -> Option<usize> {
        Direction::PRINCIPAL.iter().position(|d| *d == self)
    }

    pub fn is_idle(self) -> bool {
        self == Direction::Idle
    }
}

// ── Shared shape ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub bounds: Rect,
    pub velocity: Vector2i,
}

impl Body {
    pub fn new(bounds: Rect, velocity: Vector2i) -> Self {
        Self { bounds, velocity }
    }

    pub fn center(&self) -> Vector2i {
        self.bounds.center()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerPose {
    Normal,
    /// Shown after destroying a hazard, until the player moves again.
    Cheer,
    Defeated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Never `Idle`; only updated from a nonzero move.
    pub facing: Direction,
    pub pose: PlayerPose,
}

impl Player {
    pub fn new(center: Vector2i, width: i32, height: i32) -> Self {
        Self {
            body: Body::new(Rect::from_center(center, width, height), Vector2i::ZERO),
            facing: Direction::Right,
            pose: PlayerPose::Normal,
        }
    }

    /// Apply the net displacement of `keys`, reverting it entirely when the
    /// result would leave the viewport on either axis.
    pub fn move_by(&mut self, keys: &HeldKeys, speed: i32, viewport: &Viewport) {
        let direction = Direction::from_keys(keys);
        let delta = direction.unit() * speed;

        self.body.bounds.translate(delta);
        if classify_bounds(&self.body.bounds, viewport) != (true, true) {
            self.body.bounds.translate(-delta);
        }

        if !direction.is_idle() {
            self.facing = direction;
            if self.pose == PlayerPose::Cheer {
                self.pose = PlayerPose::Normal;
            }
        }
    }
}

// ── Hazard ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    pub body: Body,
}

impl Hazard {
    pub fn new(center: Vector2i, radius: i32, speed: i32) -> Self {
        Self {
            body: Body::new(
                Rect::from_center(center, 2 * radius, 2 * radius),
                Vector2i::new(speed, speed),
            ),
        }
    }

    /// Reflect on every axis that is out of bounds *before* the move, then
    /// move unconditionally.  A hazard may overlap an edge by one step.
    pub fn advance(&mut self, viewport: &Viewport) {
        let (inside_x, inside_y) = classify_bounds(&self.body.bounds, viewport);
        if !inside_x {
            self.body.velocity.x = -self.body.velocity.x;
        }
        if !inside_y {
            self.body.velocity.y = -self.body.velocity.y;
        }
        self.body.bounds.translate(self.body.velocity);
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileStatus {
    Alive,
    Expired,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub heading: Direction,
}

impl Projectile {
    /// Launch from `player` along its facing.  `None` if the facing is idle.
    pub fn fire(player: &Player, speed: i32, width: i32, height: i32) -> Option<Projectile> {
        let heading = player.facing;
        if heading.is_idle() {
            log::warn!("fire ignored: player has no facing");
            return None;
        }
        let unit = heading.unit();
        let origin = player.body.bounds;
        let offset = Vector2i::new(origin.width * unit.x, origin.height * unit.y);
        Some(Projectile {
            body: Body::new(
                Rect::from_center(origin.center() + offset, width, height),
                unit * speed,
            ),
            heading,
        })
    }

    /// Expire without moving once outside the viewport on either axis.
    pub fn advance(&mut self, viewport: &Viewport) -> ProjectileStatus {
        if classify_bounds(&self.body.bounds, viewport) != (true, true) {
            return ProjectileStatus::Expired;
        }
        self.body.bounds.translate(self.body.velocity);
        ProjectileStatus::Alive
    }
}

// ── Effect ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    Alive,
    Expired,
}

/// A short-lived explosion left behind by a destroyed hazard.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub bounds: Rect,
    pub remaining_life: u32,
    /// Cosmetic mirror flag, toggled every other frame.
    pub flipped: bool,
}

impl Effect {
    pub fn new(center: Vector2i, width: i32, height: i32, lifetime: u32) -> Self {
        Self {
            bounds: Rect::from_center(center, width, height),
            remaining_life: lifetime,
            flipped: false,
        }
    }

    pub fn advance(&mut self) -> EffectStatus {
        self.remaining_life = self.remaining_life.saturating_sub(1);
        if self.remaining_life == 0 {
            return EffectStatus::Expired;
        }
        if self.remaining_life % 2 == 0 {
            self.flipped = !self.flipped;
        }
        EffectStatus::Alive
    }
}

// ── Score ─────────────────────────────────────────────────────────────────────

/// Hazards destroyed so far.  Only ever goes up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// One-way: nothing moves and no input is processed after this.
    Terminal,
}

/// Things that happened during the last frame, for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    HazardDestroyed { center: Vector2i },
    GameOver { score: u32 },
}

/// The entire simulation.  Cloneable so `tick` can return a new copy.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub hazards: Vec<Hazard>,
    /// In spawn order.
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<Effect>,
    pub score: Score,
    pub status: GameStatus,
    pub frame: u64,
    pub viewport: Viewport,
    /// Events raised by the most recent `tick` only.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::Terminal
    }
}
