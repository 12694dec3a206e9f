/// All arena objects and the grid they live on.
///
/// The ship is the only controllable object; everything else moves on its
/// own each tick and is held by the model in one `Vec<SpaceObject>`.

use std::fmt;

use crate::error::BoundaryError;

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector. Row 0 is the top edge, so `Up` decreases `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// The playable rectangle `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

// ── Capability shared by every object ────────────────────────────────────────

pub trait SpaceEntity {
    fn position(&self) -> Position;

    /// Advance internal state by one simulation step.
    fn tick(&mut self, tick: u64);

    /// Single-glyph symbol used by renderers.
    fn render(&self) -> char;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Ship,
    Bullet,
    Asteroid,
    Enemy,
    ShieldPowerUp,
    HealthPowerUp,
}

/// What a renderer needs to draw one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub position: Position,
    pub symbol: char,
    pub kind: ObjectKind,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    position: Position,
    health: i32,
    max_health: i32,
    score: u32,
}

impl Ship {
    pub fn new(position: Position, max_health: i32) -> Self {
        Self {
            position,
            health: max_health,
            max_health,
            score: 0,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Move one cell. The position only changes when the destination is
    /// inside `arena`.
    pub fn move_in(&mut self, direction: Direction, arena: &Arena) -> Result<Position, BoundaryError> {
        let target = self.position.step(direction);
        if !arena.contains(target) {
            return Err(BoundaryError { direction });
        }
        self.position = target;
        Ok(target)
    }

    /// Health never drops below zero.
    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage).max(0);
    }

    /// Health never exceeds the starting maximum.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position,
            symbol: self.render(),
            kind: ObjectKind::Ship,
        }
    }
}

impl SpaceEntity for Ship {
    fn position(&self) -> Position {
        self.position
    }

    /// The ship only moves on player input.
    fn tick(&mut self, _tick: u64) {}

    fn render(&self) -> char {
        '▲'
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player bullet, travelling one row upward every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Position,
}

impl Bullet {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl SpaceEntity for Bullet {
    fn position(&self) -> Position {
        self.position
    }

    fn tick(&mut self, _tick: u64) {
        self.position = self.position.step(Direction::Up);
    }

    fn render(&self) -> char {
        '║'
    }
}

// ── Falling objects ───────────────────────────────────────────────────────────

/// Shared downward motion for asteroids, enemies and power-ups.
#[derive(Clone, Debug, PartialEq)]
pub struct Faller {
    pub position: Position,
    /// Rows advance on ticks divisible by this value.
    pub fall_interval: u64,
}

impl Faller {
    pub fn new(position: Position, fall_interval: u64) -> Self {
        Self {
            position,
            fall_interval: fall_interval.max(1),
        }
    }

    fn tick(&mut self, tick: u64) {
        if tick % self.fall_interval.max(1) == 0 {
            self.position = self.position.step(Direction::Down);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub body: Faller,
}

impl Asteroid {
    pub fn new(position: Position, fall_interval: u64) -> Self {
        Self {
            body: Faller::new(position, fall_interval),
        }
    }
}

impl SpaceEntity for Asteroid {
    fn position(&self) -> Position {
        self.body.position
    }

    fn tick(&mut self, tick: u64) {
        self.body.tick(tick);
    }

    fn render(&self) -> char {
        '●'
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Faller,
}

impl Enemy {
    pub fn new(position: Position, fall_interval: u64) -> Self {
        Self {
            body: Faller::new(position, fall_interval),
        }
    }
}

impl SpaceEntity for Enemy {
    fn position(&self) -> Position {
        self.body.position
    }

    fn tick(&mut self, tick: u64) {
        self.body.tick(tick);
    }

    fn render(&self) -> char {
        '▼'
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Grants bonus score points.
    Shield { points: u32 },
    /// Restores health, capped at the ship's maximum.
    Health { amount: i32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub body: Faller,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(position: Position, fall_interval: u64, kind: PowerUpKind) -> Self {
        Self {
            body: Faller::new(position, fall_interval),
            kind,
        }
    }

    pub fn apply_effect(&self, ship: &mut Ship) {
        match self.kind {
            PowerUpKind::Shield { points } => ship.add_points(points),
            PowerUpKind::Health { amount } => ship.heal(amount),
        }
    }
}

impl SpaceEntity for PowerUp {
    fn position(&self) -> Position {
        self.body.position
    }

    fn tick(&mut self, tick: u64) {
        self.body.tick(tick);
    }

    fn render(&self) -> char {
        match self.kind {
            PowerUpKind::Shield { .. } => '◆',
            PowerUpKind::Health { .. } => '♥',
        }
    }
}

// ── Live collection element ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum SpaceObject {
    Bullet(Bullet),
    Asteroid(Asteroid),
    Enemy(Enemy),
    PowerUp(PowerUp),
}

impl SpaceObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SpaceObject::Bullet(_) => ObjectKind::Bullet,
            SpaceObject::Asteroid(_) => ObjectKind::Asteroid,
            SpaceObject::Enemy(_) => ObjectKind::Enemy,
            SpaceObject::PowerUp(p) => match p.kind {
                PowerUpKind::Shield { .. } => ObjectKind::ShieldPowerUp,
                PowerUpKind::Health { .. } => ObjectKind::HealthPowerUp,
            },
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, SpaceObject::Bullet(_))
    }

    /// Asteroids and enemies: the objects a bullet can destroy.
    pub fn is_target(&self) -> bool {
        matches!(self, SpaceObject::Asteroid(_) | SpaceObject::Enemy(_))
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position(),
            symbol: self.render(),
            kind: self.kind(),
        }
    }
}

impl SpaceEntity for SpaceObject {
    fn position(&self) -> Position {
        match self {
            SpaceObject::Bullet(b) => b.position(),
            SpaceObject::Asteroid(a) => a.position(),
            SpaceObject::Enemy(e) => e.position(),
            SpaceObject::PowerUp(p) => p.position(),
        }
    }

    fn tick(&mut self, tick: u64) {
        match self {
            SpaceObject::Bullet(b) => b.tick(tick),
            SpaceObject::Asteroid(a) => a.tick(tick),
            SpaceObject::Enemy(e) => e.tick(tick),
            SpaceObject::PowerUp(p) => p.tick(tick),
        }
    }

    fn render(&self) -> char {
        match self {
            SpaceObject::Bullet(b) => b.render(),
            SpaceObject::Asteroid(a) => a.render(),
            SpaceObject::Enemy(e) => e.render(),
            SpaceObject::PowerUp(p) => p.render(),
        }
    }
}

impl From<Bullet> for SpaceObject {
    fn from(b: Bullet) -> Self {
        SpaceObject::Bullet(b)
    }
}

impl From<Asteroid> for SpaceObject {
    fn from(a: Asteroid) -> Self {
        SpaceObject::Asteroid(a)
    }
}

impl From<Enemy> for SpaceObject {
    fn from(e: Enemy) -> Self {
        SpaceObject::Enemy(e)
    }
}

impl From<PowerUp> for SpaceObject {
    fn from(p: PowerUp) -> Self {
        SpaceObject::PowerUp(p)
    }
}
