use crate::achievements::Achievement;
use crate::controller::GameSummary;
use crate::entities::Sprite;

/// Everything the controller needs from a presentation surface.
///
/// Calls are synchronous and infallible from the game's point of view; an
/// implementation that does I/O deals with its own failures.
pub trait Screen {
    fn start(&mut self);

    fn stop(&mut self);

    /// Toggle the frozen/paused presentation.
    fn pause(&mut self);

    /// Draw one frame. The ship is always the first sprite.
    fn render(&mut self, sprites: &[Sprite]);

    /// Named scalar stat such as "Score" or "Time Survived".
    fn set_stat(&mut self, label: &str, value: &str);

    fn set_achievement_progress_stat(&mut self, name: &str, progress: f64);

    fn log_achievements(&mut self, achievements: &[Achievement]);

    /// One human-readable status line.
    fn log(&mut self, message: &str);

    fn show_game_over(&mut self, summary: &GameSummary);
}
