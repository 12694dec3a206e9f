/// Tick sequencing and input handling.
///
/// The controller owns the model, the achievement manager and the screen.
/// One `on_tick` runs the simulation steps, refreshes achievements, renders,
/// and finally checks for game over, in that order.

use std::fmt;

use crate::achievements::{Achievement, AchievementManager, EventLog, Tier};
use crate::entities::Direction;
use crate::error::GameError;
use crate::model::GameModel;
use crate::screen::Screen;

pub const SURVIVOR: &str = "Survivor";
pub const ENEMY_EXTERMINATOR: &str = "Enemy Exterminator";
pub const SHARP_SHOOTER: &str = "Sharp Shooter";

/// Seconds survived for full Survivor progress.
const SURVIVOR_SECONDS: f64 = 120.0;
/// Enemy hits for full Enemy Exterminator progress.
const EXTERMINATOR_HITS: f64 = 20.0;
/// Accuracy for full Sharp Shooter progress.
const SHARP_SHOOTER_ACCURACY: f64 = 0.99;
/// Sharp Shooter stays at zero until more shots than this were fired.
const SHARP_SHOOTER_MIN_SHOTS: u32 = 10;
/// Verbose achievement dumps happen on ticks divisible by this.
const ACHIEVEMENT_LOG_INTERVAL: u64 = 100;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Use W, A, S, D, F, or P.";

// ── Progress formulas ─────────────────────────────────────────────────────────

pub fn survivor_progress(elapsed_seconds: u64) -> f64 {
    (elapsed_seconds as f64 / SURVIVOR_SECONDS).min(1.0)
}

pub fn exterminator_progress(shots_hit: u32) -> f64 {
    (f64::from(shots_hit) / EXTERMINATOR_HITS).min(1.0)
}

pub fn sharp_shooter_progress(shots_fired: u32, accuracy: f64) -> f64 {
    if shots_fired <= SHARP_SHOOTER_MIN_SHOTS {
        return 0.0;
    }
    (accuracy / SHARP_SHOOTER_ACCURACY).min(1.0)
}

/// The achievements every controller starts with.
pub fn default_achievements() -> Vec<(&'static str, &'static str)> {
    vec![
        (SURVIVOR, "Survive for 120 seconds"),
        (ENEMY_EXTERMINATOR, "Hit 20 shots"),
        (SHARP_SHOOTER, "Achieve 99% accuracy"),
    ]
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Fire,
    Pause,
}

impl Command {
    /// Single-character, case-insensitive: W/A/S/D move, F fires, P pauses.
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        match c.to_ascii_uppercase() {
            'W' => Some(Command::Move(Direction::Up)),
            'A' => Some(Command::Move(Direction::Left)),
            'S' => Some(Command::Move(Direction::Down)),
            'D' => Some(Command::Move(Direction::Right)),
            'F' => Some(Command::Fire),
            'P' => Some(Command::Pause),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Running,
    Paused,
    GameOver,
}

// ── Game-over summary ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub enemies_destroyed: u32,
    pub survival_seconds: u64,
    pub score: u32,
    pub level: u32,
    pub achievements: Vec<Achievement>,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shots Fired: {}", self.shots_fired)?;
        writeln!(f, "Shots Hit: {}", self.shots_hit)?;
        writeln!(f, "Enemies Destroyed: {}", self.enemies_destroyed)?;
        writeln!(f, "Survival Time: {} seconds", self.survival_seconds)?;
        writeln!(f, "Final Score: {}", self.score)?;
        writeln!(f, "Level Reached: {}", self.level)?;
        writeln!(f)?;
        writeln!(f, "=== Achievements ===")?;
        for a in &self.achievements {
            writeln!(
                f,
                "{} - {} ({:.0}% complete, Tier: {})",
                a.name(),
                a.description(),
                a.progress() * 100.0,
                a.tier()
            )?;
        }
        Ok(())
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct GameController<S: Screen, E: EventLog> {
    screen: S,
    model: GameModel,
    achievements: AchievementManager<E>,
    state: ControllerState,
    /// Gates supplementary log lines; never changes outcomes.
    verbose: bool,
}

impl<S: Screen, E: EventLog> GameController<S, E> {
    /// Start the screen and register the default achievements unless the
    /// manager already holds some.
    pub fn new(
        mut screen: S,
        model: GameModel,
        mut achievements: AchievementManager<E>,
    ) -> Result<Self, GameError> {
        screen.start();
        if achievements.is_empty() {
            for (name, description) in default_achievements() {
                achievements.add_achievement(Achievement::new(name, description)?)?;
            }
        }
        Ok(Self {
            screen,
            model,
            achievements,
            state: ControllerState::Running,
            verbose: false,
        })
    }

    pub fn model(&self) -> &GameModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GameModel {
        &mut self.model
    }

    pub fn achievements(&self) -> &AchievementManager<E> {
        &self.achievements
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == ControllerState::Paused
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Run one full tick. Does nothing unless the game is running.
    pub fn on_tick(&mut self, tick: u64) -> Result<(), GameError> {
        if self.state != ControllerState::Running {
            return Ok(());
        }

        self.model.update_game(tick);
        self.model.check_collisions();
        self.model.spawn_objects();
        self.model.level_up();
        self.flush_events();

        self.refresh_achievements(tick)?;
        self.render_game();

        if self.model.check_game_over() {
            log::info!("Game over at tick {tick}");
            self.pause_game();
            self.state = ControllerState::GameOver;
            let summary = self.summary();
            self.screen.show_game_over(&summary);
        }
        Ok(())
    }

    /// Recompute every achievement from the stats tracker, persist new
    /// masteries, and push progress to the screen.
    pub fn refresh_achievements(&mut self, tick: u64) -> Result<(), GameError> {
        let stats = self.model.stats();
        let survivor = survivor_progress(stats.elapsed_seconds());
        let exterminator = exterminator_progress(stats.shots_hit());
        let sharp_shooter = sharp_shooter_progress(stats.shots_fired(), stats.accuracy());

        self.achievements.update_achievement(SURVIVOR, survivor)?;
        self.achievements
            .update_achievement(ENEMY_EXTERMINATOR, exterminator)?;
        self.achievements
            .update_achievement(SHARP_SHOOTER, sharp_shooter)?;

        self.achievements.log_achievement_mastered()?;

        let snapshot = self.achievements.achievements();
        for achievement in &snapshot {
            self.screen
                .set_achievement_progress_stat(achievement.name(), achievement.progress());
        }

        if self.verbose && tick % ACHIEVEMENT_LOG_INTERVAL == 0 {
            self.screen.log_achievements(&snapshot);
        }
        Ok(())
    }

    pub fn render_game(&mut self) {
        let ship = self.model.ship();
        self.screen.set_stat("Score", &ship.score().to_string());
        self.screen.set_stat("Health", &ship.health().to_string());
        self.screen.set_stat("Level", &self.model.level().to_string());
        self.screen.set_stat(
            "Time Survived",
            &format!("{} seconds", self.model.stats().elapsed_seconds()),
        );
        self.screen.render(&self.model.sprites());
    }

    /// Apply one player command. Only `P` is honoured while paused, and
    /// nothing after game over. Recoverable failures go to the screen log.
    pub fn handle_player_input(&mut self, input: &str) {
        let command = Command::parse(input);
        match self.state {
            ControllerState::GameOver => return,
            ControllerState::Paused if command != Some(Command::Pause) => return,
            _ => {}
        }

        match command {
            Some(Command::Move(direction)) => match self.model.move_ship(direction) {
                Ok(pos) => {
                    if self.verbose {
                        self.screen.log(&format!("Ship moved to {pos}"));
                    }
                }
                Err(err) => {
                    log::debug!("Rejected move: {err}");
                    self.screen.log(&err.to_string());
                }
            },
            Some(Command::Fire) => {
                self.model.fire_bullet();
                self.model.stats_mut().record_shot_fired();
                self.flush_events();
            }
            Some(Command::Pause) => self.pause_game(),
            None => self.screen.log(INVALID_INPUT_MESSAGE),
        }
    }

    /// Toggle between running and paused. Always notifies the screen and
    /// always logs, whatever the verbose setting.
    pub fn pause_game(&mut self) {
        let message = match self.state {
            ControllerState::Running => {
                self.state = ControllerState::Paused;
                "Game paused."
            }
            ControllerState::Paused => {
                self.state = ControllerState::Running;
                "Game unpaused."
            }
            ControllerState::GameOver => return,
        };
        self.screen.pause();
        self.screen.log(message);
    }

    pub fn summary(&self) -> GameSummary {
        let stats = self.model.stats();
        GameSummary {
            shots_fired: stats.shots_fired(),
            shots_hit: stats.shots_hit(),
            enemies_destroyed: stats.shots_hit(),
            survival_seconds: stats.elapsed_seconds(),
            score: self.model.ship().score(),
            level: self.model.level(),
            achievements: self.achievements.achievements(),
        }
    }

    /// Names of achievements currently at the Master tier.
    pub fn mastered(&self) -> Vec<String> {
        self.achievements
            .achievements()
            .into_iter()
            .filter(|a| a.tier() == Tier::Master)
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn shutdown(&mut self) {
        self.screen.stop();
    }

    fn flush_events(&mut self) {
        for event in self.model.take_events() {
            log::debug!("{event}");
            if self.verbose {
                self.screen.log(&event.to_string());
            }
        }
    }
}
