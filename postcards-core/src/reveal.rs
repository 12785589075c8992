//! Staged reveal choreography, as data.
//!
//! Screens fade their elements in on a fixed schedule (title, then
//! subtitle, then controls). The schedule is pure state driven by
//! cooperative ticks: the owner advances elapsed time, resets on every node
//! change so stale stages never bleed into the next screen, and a
//! reduced-motion mode shows everything immediately.

use std::time::Duration;

/// An ordered reveal schedule over stage markers of type `S`.
#[derive(Debug, Clone)]
pub struct StagedReveal<S> {
    stages: Vec<(Duration, S)>,
    elapsed: Duration,
    reduce_motion: bool,
}

impl<S: Copy + Eq> StagedReveal<S> {
    /// Build a schedule from (delay, stage) pairs. Delays are measured from
    /// the moment the schedule starts (or was last reset).
    pub fn new(stages: impl IntoIterator<Item = (Duration, S)>) -> Self {
        let mut stages: Vec<(Duration, S)> = stages.into_iter().collect();
        stages.sort_by_key(|(delay, _)| *delay);
        Self {
            stages,
            elapsed: Duration::ZERO,
            reduce_motion: false,
        }
    }

    /// Show every stage immediately, now and after any reset.
    pub fn with_reduced_motion(mut self) -> Self {
        self.reduce_motion = true;
        self
    }

    /// Advance the schedule by a tick.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Re-arm the schedule from zero. Call on every node change.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Jump past all delays (e.g. on a key press that skips the fade).
    pub fn skip_to_end(&mut self) {
        if let Some((delay, _)) = self.stages.last() {
            self.elapsed = *delay;
        }
    }

    /// Whether a stage is currently visible.
    pub fn is_visible(&self, stage: S) -> bool {
        self.reduce_motion
            || self
                .stages
                .iter()
                .find(|(_, s)| *s == stage)
                .map(|(delay, _)| self.elapsed >= *delay)
                .unwrap_or(false)
    }

    /// Whether every stage has been revealed.
    pub fn all_visible(&self) -> bool {
        self.reduce_motion
            || self
                .stages
                .last()
                .map(|(delay, _)| self.elapsed >= *delay)
                .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        Title,
        Subtitle,
        Button,
    }

    fn schedule() -> StagedReveal<Stage> {
        StagedReveal::new([
            (Duration::from_millis(350), Stage::Title),
            (Duration::from_millis(650), Stage::Subtitle),
            (Duration::from_millis(950), Stage::Button),
        ])
    }

    #[test]
    fn test_stages_reveal_in_order() {
        let mut reveal = schedule();
        assert!(!reveal.is_visible(Stage::Title));

        reveal.tick(Duration::from_millis(400));
        assert!(reveal.is_visible(Stage::Title));
        assert!(!reveal.is_visible(Stage::Subtitle));

        reveal.tick(Duration::from_millis(300));
        assert!(reveal.is_visible(Stage::Subtitle));
        assert!(!reveal.is_visible(Stage::Button));

        reveal.tick(Duration::from_millis(300));
        assert!(reveal.all_visible());
    }

    #[test]
    fn test_reset_rearms_the_schedule() {
        let mut reveal = schedule();
        reveal.tick(Duration::from_secs(5));
        assert!(reveal.all_visible());

        reveal.reset();
        assert!(!reveal.is_visible(Stage::Title));
    }

    #[test]
    fn test_reduced_motion_shows_everything() {
        let reveal = schedule().with_reduced_motion();
        assert!(reveal.is_visible(Stage::Title));
        assert!(reveal.all_visible());
    }

    #[test]
    fn test_skip_to_end() {
        let mut reveal = schedule();
        reveal.skip_to_end();
        assert!(reveal.all_visible());
    }

    #[test]
    fn test_unknown_stage_is_never_visible() {
        let mut reveal = StagedReveal::new([(Duration::from_millis(10), Stage::Title)]);
        reveal.tick(Duration::from_secs(1));
        assert!(!reveal.is_visible(Stage::Button));
    }

    #[test]
    fn test_empty_schedule_is_trivially_complete() {
        let reveal: StagedReveal<Stage> = StagedReveal::new([]);
        assert!(reveal.all_visible());
    }
}
