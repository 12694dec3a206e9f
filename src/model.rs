/// The game simulation.
///
/// `GameModel` owns the ship, every live object, the level / spawn-rate pair
/// and the seeded RNG. Each step is a separate method so the controller can
/// sequence them: `update_game` → `check_collisions` → `spawn_objects` →
/// `level_up`. Anything worth telling the player is queued as a `GameEvent`.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::entities::{
    Arena, Asteroid, Bullet, Direction, Enemy, Position, PowerUp, PowerUpKind, Ship, SpaceEntity,
    SpaceObject, Sprite,
};
use crate::error::BoundaryError;
use crate::stats::PlayerStatsTracker;

/// Something that happened inside the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    BulletFired,
    LevelUp { level: u32, spawn_rate: u32 },
    PowerUpCollected { symbol: char },
    HitByAsteroid { damage: i32 },
    HitByEnemy { damage: i32 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BulletFired => write!(f, "Bullet fired!"),
            Self::LevelUp { level, spawn_rate } => write!(
                f,
                "Level Up! Welcome to Level {level}. Spawn rate increased to {spawn_rate}%."
            ),
            Self::PowerUpCollected { symbol } => write!(f, "PowerUp collected: {symbol}"),
            Self::HitByAsteroid { damage } => {
                write!(f, "Hit by asteroid! Health reduced by {damage}.")
            }
            Self::HitByEnemy { damage } => write!(f, "Hit by enemy! Health reduced by {damage}."),
        }
    }
}

pub struct GameModel {
    config: GameConfig,
    arena: Arena,
    ship: Ship,
    objects: Vec<SpaceObject>,
    level: u32,
    spawn_rate: u32,
    rng: StdRng,
    stats: PlayerStatsTracker,
    events: Vec<GameEvent>,
}

impl GameModel {
    pub fn new(config: GameConfig, stats: PlayerStatsTracker) -> Self {
        Self {
            arena: config.arena(),
            ship: Ship::new(config.ship_start(), config.ship_max_health),
            objects: Vec::new(),
            level: config.start_level,
            spawn_rate: config.start_spawn_rate,
            rng: StdRng::from_entropy(),
            stats,
            events: Vec::new(),
            config,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn space_objects(&self) -> &[SpaceObject] {
        &self.objects
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawn_rate(&self) -> u32 {
        self.spawn_rate
    }

    pub fn stats(&self) -> &PlayerStatsTracker {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PlayerStatsTracker {
        &mut self.stats
    }

    pub fn add_object(&mut self, object: impl Into<SpaceObject>) {
        self.objects.push(object.into());
    }

    /// Reseed the spawn RNG so runs can be reproduced.
    pub fn set_random_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Drain events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ship first, then every live object.
    pub fn sprites(&self) -> Vec<Sprite> {
        std::iter::once(self.ship.sprite())
            .chain(self.objects.iter().map(SpaceObject::sprite))
            .collect()
    }

    // ── Input-driven transitions ─────────────────────────────────────────────

    pub fn move_ship(&mut self, direction: Direction) -> Result<Position, BoundaryError> {
        self.ship.move_in(direction, &self.arena)
    }

    /// One bullet at the ship's cell per call, with no cooldown.
    pub fn fire_bullet(&mut self) {
        self.objects.push(Bullet::new(self.ship.position()).into());
        self.events.push(GameEvent::BulletFired);
    }

    // ── Per-tick steps ───────────────────────────────────────────────────────

    /// Advance every object, then drop the ones now outside the arena.
    pub fn update_game(&mut self, tick: u64) {
        for object in &mut self.objects {
            object.tick(tick);
        }
        let arena = self.arena;
        let before = self.objects.len();
        self.objects.retain(|o| arena.contains(o.position()));
        let culled = before - self.objects.len();
        if culled > 0 {
            log::trace!("tick {tick}: culled {culled} out-of-bounds objects");
        }
    }

    /// Roll each category in a fixed order: asteroid, enemy, power-up.
    ///
    /// All random draws happen first (roll and column per category, then the
    /// power-up coin flip) so the draw sequence for a seed never depends on
    /// the outcome. Additions happen immediately, so an earlier category
    /// claims a contested cell.
    pub fn spawn_objects(&mut self) {
        let width = self.arena.width;
        if width <= 0 {
            return;
        }
        let rate = f64::from(self.spawn_rate);

        let spawn_asteroid = f64::from(self.rng.gen_range(0..100u32)) < rate;
        let asteroid_x = self.rng.gen_range(0..width);

        let spawn_enemy =
            f64::from(self.rng.gen_range(0..100u32)) < rate * self.config.enemy_spawn_factor;
        let enemy_x = self.rng.gen_range(0..width);

        let spawn_power_up =
            f64::from(self.rng.gen_range(0..100u32)) < rate * self.config.power_up_spawn_factor;
        let power_up_x = self.rng.gen_range(0..width);

        let is_shield = self.rng.gen_bool(0.5);

        let fall = self.config.fall_interval;

        if spawn_asteroid && !self.is_position_occupied(Position::new(asteroid_x, 0)) {
            self.objects
                .push(Asteroid::new(Position::new(asteroid_x, 0), fall).into());
        }

        if spawn_enemy && !self.is_position_occupied(Position::new(enemy_x, 0)) {
            self.objects.push(Enemy::new(Position::new(enemy_x, 0), fall).into());
        }

        if spawn_power_up && !self.is_position_occupied(Position::new(power_up_x, 0)) {
            let kind = if is_shield {
                PowerUpKind::Shield {
                    points: self.config.shield_bonus_points,
                }
            } else {
                PowerUpKind::Health {
                    amount: self.config.health_restore,
                }
            };
            self.objects
                .push(PowerUp::new(Position::new(power_up_x, 0), fall, kind).into());
        }
    }

    fn is_position_occupied(&self, pos: Position) -> bool {
        self.ship.position() == pos || self.objects.iter().any(|o| o.position() == pos)
    }

    /// Resolve ship contacts and bullet hits against the positions at the
    /// start of the call. Removals are batched and applied once at the end;
    /// an object already marked is not matched again.
    pub fn check_collisions(&mut self) {
        let mut removed: HashSet<usize> = HashSet::new();
        let ship_pos = self.ship.position();

        // ── 1. Ship ↔ asteroids, enemies, power-ups ──────────────────────────
        for (i, object) in self.objects.iter().enumerate() {
            if object.is_bullet() || object.position() != ship_pos {
                continue;
            }
            match object {
                SpaceObject::PowerUp(power_up) => {
                    power_up.apply_effect(&mut self.ship);
                    self.events.push(GameEvent::PowerUpCollected {
                        symbol: power_up.render(),
                    });
                }
                SpaceObject::Asteroid(_) => {
                    let damage = self.config.asteroid_damage;
                    self.ship.take_damage(damage);
                    self.events.push(GameEvent::HitByAsteroid { damage });
                }
                SpaceObject::Enemy(_) => {
                    let damage = self.config.enemy_damage;
                    self.ship.take_damage(damage);
                    self.events.push(GameEvent::HitByEnemy { damage });
                }
                SpaceObject::Bullet(_) => continue,
            }
            removed.insert(i);
        }

        // ── 2. Bullets ↔ asteroids, enemies ──────────────────────────────────
        for (bi, bullet) in self.objects.iter().enumerate() {
            if !bullet.is_bullet() || removed.contains(&bi) {
                continue;
            }
            let hit = self.objects.iter().enumerate().find(|(ti, target)| {
                target.is_target()
                    && !removed.contains(ti)
                    && target.position() == bullet.position()
            });
            if let Some((ti, target)) = hit {
                // Only enemy kills count towards accuracy.
                if matches!(target, SpaceObject::Enemy(_)) {
                    self.stats.record_shot_hit();
                }
                removed.insert(bi);
                removed.insert(ti);
            }
        }

        if !removed.is_empty() {
            self.objects = std::mem::take(&mut self.objects)
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !removed.contains(i))
                .map(|(_, o)| o)
                .collect();
        }
    }

    /// At most one level per call: when the score reaches `level * threshold`.
    pub fn level_up(&mut self) {
        let threshold = u64::from(self.level) * u64::from(self.config.score_threshold);
        if u64::from(self.ship.score()) < threshold {
            return;
        }
        self.level += 1;
        self.spawn_rate += self.config.spawn_rate_increase;
        log::info!("Level {} reached, spawn rate {}%", self.level, self.spawn_rate);
        self.events.push(GameEvent::LevelUp {
            level: self.level,
            spawn_rate: self.spawn_rate,
        });
    }

    pub fn check_game_over(&self) -> bool {
        self.ship.health() <= 0
    }
}
