//! Sorting visualizer TUI application state and logic.
//!
//! Controls are disabled while a session runs, except speed (which only
//! applies to the next run), stop and quit.

use crossterm::event::KeyCode;

use crate::config::{VizConfig, MAX_ARRAY_SIZE, MAX_DELAY_MS, MIN_ARRAY_SIZE, MIN_DELAY_MS};
use crate::engine::{PlayTime, SnapshotRng};
use crate::playback::{BarChart, PlaybackHandle, Player, SessionOutcome};
use crate::trace::{generate, Algorithm};

/// Step for the size controls.
pub const SIZE_STEP: usize = 10;
/// Step for the speed controls.
pub const DELAY_STEP: u64 = 10;

/// Application state for the visualizer.
#[derive(Debug)]
pub struct SortApp {
    /// Current settings.
    pub config: VizConfig,
    /// Bars as currently displayed.
    pub chart: BarChart,
    /// Playback scheduler.
    pub player: Player,
    /// Handle of the running session, if any.
    pub handle: Option<PlaybackHandle>,
    /// Outcome of the last finished session.
    pub last_outcome: Option<SessionOutcome>,
    /// Whether the app should quit.
    pub should_quit: bool,
    run_started: PlayTime,
    rng: SnapshotRng,
}

impl SortApp {
    /// Create the app with a random array drawn from `config`.
    #[must_use]
    pub fn new(config: VizConfig) -> Self {
        let mut rng = config.rng();
        let values = config.snapshot(&mut rng);
        Self {
            chart: BarChart::from_values(&values),
            player: Player::new(),
            handle: None,
            last_outcome: None,
            should_quit: false,
            run_started: PlayTime::ZERO,
            config,
            rng,
        }
    }

    /// Whether a session is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.player.is_running()
    }

    /// Whether the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw a new random array.
    pub fn randomize(&mut self) {
        if self.is_running() {
            return;
        }
        let values = self.config.snapshot(&mut self.rng);
        self.chart.reset(&values);
        self.last_outcome = None;
    }

    /// Select the next algorithm.
    pub fn cycle_algorithm(&mut self) {
        if !self.is_running() {
            self.config.algorithm = self.config.algorithm.next();
        }
    }

    /// Select a specific algorithm.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if !self.is_running() {
            self.config.algorithm = algorithm;
        }
    }

    /// Generate a trace from the bars on screen and start playing it.
    pub fn start(&mut self) {
        if self.is_running() || self.chart.is_empty() {
            return;
        }
        let trace = generate(self.config.algorithm, &self.chart.heights());
        self.chart.clear_colors();

        match self.player.play(trace, self.config.delay_ms) {
            Ok(handle) => {
                self.run_started = self.player.now();
                self.handle = Some(handle);
            }
            Err(e) => tracing::warn!(target: "sortscope.tui", error = %e, "play rejected"),
        }
    }

    /// Cancel the running session.
    pub fn stop(&mut self) {
        if let Some(outcome) = self.player.stop() {
            self.finish(outcome);
        }
    }

    /// Shorter per-step delay for the next run.
    pub fn faster(&mut self) {
        self.config.delay_ms = self.config.delay_ms.saturating_sub(DELAY_STEP).max(MIN_DELAY_MS);
    }

    /// Longer per-step delay for the next run.
    pub fn slower(&mut self) {
        self.config.delay_ms = (self.config.delay_ms + DELAY_STEP).min(MAX_DELAY_MS);
    }

    /// More bars (redraws the array).
    pub fn grow(&mut self) {
        self.resize((self.config.array_size + SIZE_STEP).min(MAX_ARRAY_SIZE));
    }

    /// Fewer bars (redraws the array).
    pub fn shrink(&mut self) {
        self.resize(self.config.array_size.saturating_sub(SIZE_STEP).max(MIN_ARRAY_SIZE));
    }

    fn resize(&mut self, size: usize) {
        if self.is_running() || size == self.config.array_size {
            return;
        }
        self.config.array_size = size;
        self.randomize();
    }

    /// Advance playback to `now`.
    pub fn tick(&mut self, now: PlayTime) {
        let report = self.player.advance_to(now, &mut self.chart);
        if let Some(outcome) = report.completed {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.handle = None;
        self.last_outcome = Some(outcome);
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') | KeyCode::Enter => self.start(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('r') => self.randomize(),
            KeyCode::Char('a') | KeyCode::Tab => self.cycle_algorithm(),
            KeyCode::Char('1') => self.select_algorithm(Algorithm::Bubble),
            KeyCode::Char('2') => self.select_algorithm(Algorithm::Selection),
            KeyCode::Char('3') => self.select_algorithm(Algorithm::Insertion),
            KeyCode::Char('+' | '=') => self.faster(),
            KeyCode::Char('-') => self.slower(),
            KeyCode::Char(']') => self.grow(),
            KeyCode::Char('[') => self.shrink(),
            _ => {}
        }
    }

    /// One-line status for the footer.
    #[must_use]
    pub fn status_line(&self) -> String {
        let state = match (self.player.progress(), &self.last_outcome) {
            (Some((done, total)), _) => format!("Running {done}/{total}"),
            (None, Some(outcome)) if outcome.cancelled => {
                format!("Stopped after {} steps", outcome.steps_applied)
            }
            (None, Some(outcome)) => format!("Done in {}", outcome.finished_at - self.run_started),
            (None, None) => "Ready".to_string(),
        };
        format!(
            "{state} | {} | {} bars | {}ms/step",
            self.config.algorithm.display_name(),
            self.chart.len(),
            self.config.delay_ms
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn app() -> SortApp {
        SortApp::new(VizConfig::builder().array_size(10).delay_ms(10).seed(1).build())
    }

    fn is_sorted(values: &[u32]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_new_app() {
        let app = app();
        assert_eq!(app.chart.len(), 10);
        assert!(!app.is_running());
        assert!(!app.should_quit());
        assert!(app.status_line().starts_with("Ready"));
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = self::app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_start_and_finish_sorts_bars() {
        for algo in Algorithm::ALL {
            let mut app = app();
            app.select_algorithm(algo);
            app.handle_key(KeyCode::Char(' '));
            assert!(app.is_running());
            assert!(app.status_line().starts_with("Running 0/"));

            let end = app.handle.as_ref().map(PlaybackHandle::ends_at).unwrap();
            app.tick(end);

            assert!(!app.is_running());
            assert!(app.handle.is_none());
            assert!(is_sorted(&app.chart.heights()), "{algo}");
            assert!(app.last_outcome.is_some_and(|o| !o.cancelled));
        }
    }

    #[test]
    fn test_controls_locked_while_running() {
        let mut app = app();
        let before = app.chart.heights();
        app.start();

        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char(']'));

        assert_eq!(app.chart.heights(), before);
        assert_eq!(app.config.algorithm, Algorithm::Bubble);
        assert_eq!(app.config.array_size, 10);
    }

    #[test]
    fn test_speed_change_does_not_affect_running_session() {
        let mut app = app();
        app.start();
        let end = app.handle.as_ref().map(PlaybackHandle::ends_at).unwrap();

        app.slower();
        assert_eq!(app.config.delay_ms, 20);

        app.tick(end);
        assert!(!app.is_running());
    }

    #[test]
    fn test_stop_cancels() {
        let mut app = app();
        app.start();
        app.tick(PlayTime::from_millis(15));
        app.handle_key(KeyCode::Char('s'));

        assert!(!app.is_running());
        let outcome = app.last_outcome.unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.steps_applied, 2);
        assert!(app.status_line().starts_with("Stopped after 2 steps"));
    }

    #[test]
    fn test_randomize_and_cycle_when_idle() {
        let mut app = app();
        let before = app.chart.heights();
        app.randomize();
        assert_ne!(app.chart.heights(), before);

        app.cycle_algorithm();
        assert_eq!(app.config.algorithm, Algorithm::Selection);
    }

    #[test]
    fn test_size_bounds() {
        let mut app = app();
        app.shrink();
        assert_eq!(app.config.array_size, MIN_ARRAY_SIZE);

        app.grow();
        assert_eq!(app.config.array_size, 20);
        assert_eq!(app.chart.len(), 20);
    }

    #[test]
    fn test_speed_bounds() {
        let mut app = app();
        app.faster();
        assert_eq!(app.config.delay_ms, MIN_DELAY_MS);

        for _ in 0..100 {
            app.slower();
        }
        assert_eq!(app.config.delay_ms, MAX_DELAY_MS);
    }

    #[test]
    fn test_second_run_on_sorted_bars() {
        let mut app = app();
        app.start();
        app.tick(PlayTime::from_millis(1_000_000));
        let sorted = app.chart.heights();

        app.start();
        assert!(app.is_running());
        app.tick(PlayTime::from_millis(2_000_000));
        assert_eq!(app.chart.heights(), sorted);
    }
}
