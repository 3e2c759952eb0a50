use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::session::result::{LiveStats, PracticeStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Complete,
}

/// Display state of one reference character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Current,
    Pending,
}

/// Compares the user's raw input buffer against a fixed reference text.
///
/// Mistakes are sticky: a position that was ever typed wrong stays counted
/// for the rest of the run, even after the user corrects it.
pub struct PracticeScorer {
    reference: Vec<char>,
    input: Vec<char>,
    mistakes: HashSet<usize>,
    state: RunState,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    final_stats: Option<PracticeStats>,
}

impl PracticeScorer {
    pub fn new(text: &str) -> Self {
        Self {
            reference: text.chars().collect(),
            input: Vec::new(),
            mistakes: HashSet::new(),
            state: RunState::Idle,
            started_at: None,
            finished_at: None,
            final_stats: None,
        }
    }

    pub fn reference(&self) -> &[char] {
        &self.reference
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn mistakes(&self) -> &HashSet<usize> {
        &self.mistakes
    }

    pub fn final_stats(&self) -> Option<&PracticeStats> {
        self.final_stats.as_ref()
    }

    pub fn submit_input(&mut self, buffer: &str) -> Option<PracticeStats> {
        self.submit_input_at(buffer, Instant::now())
    }

    /// Replace the input buffer with `buffer` as observed at `now`.
    ///
    /// Returns the final statistics exactly once, on the call that completes
    /// the run. Input after completion is ignored.
    pub fn submit_input_at(&mut self, buffer: &str, now: Instant) -> Option<PracticeStats> {
        if self.state == RunState::Complete {
            return None;
        }

        let typed: Vec<char> = buffer.chars().collect();
        if self.state == RunState::Idle {
            if typed.is_empty() {
                return None;
            }
            self.state = RunState::Running;
            self.started_at = Some(now);
        }

        for (pos, (actual, expected)) in typed.iter().zip(&self.reference).enumerate() {
            if actual != expected {
                self.mistakes.insert(pos);
            }
        }
        self.input = typed;

        if self.input.len() >= self.reference.len() {
            let stats = self.compute_final_stats(now);
            self.state = RunState::Complete;
            self.finished_at = Some(now);
            self.final_stats = Some(stats.clone());
            return Some(stats);
        }
        None
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.mistakes.clear();
        self.state = RunState::Idle;
        self.started_at = None;
        self.finished_at = None;
        self.final_stats = None;
    }

    /// Input length clamped to the reference length.
    pub fn current_index(&self) -> usize {
        self.input.len().min(self.reference.len())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn live_stats(&self) -> LiveStats {
        self.live_stats_at(Instant::now())
    }

    pub fn live_stats_at(&self, now: Instant) -> LiveStats {
        let current = self.current_index();
        let elapsed = self.elapsed_at(now);
        let mistakes_before = self.mistakes.iter().filter(|&&pos| pos < current).count();

        LiveStats {
            wpm: words_per_minute(current, elapsed),
            accuracy: accuracy_percent(current - mistakes_before, current),
            elapsed,
        }
    }

    fn compute_final_stats(&self, now: Instant) -> PracticeStats {
        let elapsed = self.elapsed_at(now);
        let total = self.reference.len();
        // Only positions inside the reference are ever recorded.
        let correct = total - self.mistakes.len();

        PracticeStats {
            wpm: words_per_minute(total, elapsed),
            accuracy: accuracy_percent(correct, total),
            time_elapsed_ms: elapsed.as_millis() as u64,
            total_strokes: total,
            correct_strokes: correct,
        }
    }

    pub fn char_state(&self, pos: usize) -> CharState {
        if pos < self.input.len() {
            if self.mistakes.contains(&pos) {
                CharState::Incorrect
            } else {
                CharState::Correct
            }
        } else if pos == self.current_index() {
            CharState::Current
        } else {
            CharState::Pending
        }
    }

    pub fn progress(&self) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        self.current_index() as f64 / self.reference.len() as f64
    }
}

/// Standard five-characters-per-word rate. Zero elapsed time yields zero.
pub fn words_per_minute(chars: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    ((chars as f64 / 5.0) / minutes).round() as u32
}

pub fn accuracy_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// `m:ss` clock used by the practice header.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_new_scorer_is_idle() {
        let scorer = PracticeScorer::new("hello");
        assert_eq!(scorer.state(), RunState::Idle);
        assert_eq!(scorer.reference().len(), 5);
        assert_eq!(scorer.progress(), 0.0);
        assert_eq!(scorer.live_stats().accuracy, 100);
        assert_eq!(scorer.live_stats().wpm, 0);
    }

    #[test]
    fn test_empty_submit_while_idle_stays_idle() {
        let mut scorer = PracticeScorer::new("cat");
        assert!(scorer.submit_input("").is_none());
        assert_eq!(scorer.state(), RunState::Idle);
        assert_eq!(scorer.elapsed_at(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_first_keystroke_starts_run() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("cat");
        scorer.submit_input_at("c", t0);
        assert_eq!(scorer.state(), RunState::Running);
        assert_eq!(scorer.elapsed_at(at(t0, 1500)), Duration::from_millis(1500));
    }

    #[test]
    fn test_prefix_input_has_no_mistakes() {
        let text = "Stenography is the practice of writing in shorthand.";
        let mut scorer = PracticeScorer::new(text);
        let t0 = Instant::now();
        for end in 1..text.len() {
            scorer.submit_input_at(&text[..end], at(t0, end as u64 * 100));
            assert!(scorer.mistakes().is_empty());
            assert_eq!(scorer.live_stats_at(at(t0, end as u64 * 100)).accuracy, 100);
        }
    }

    #[test]
    fn test_live_accuracy_counts_mismatches() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("abcdefgh");
        // Two mismatches out of six compared positions.
        scorer.submit_input_at("axcdyf", t0);
        let live = scorer.live_stats_at(at(t0, 1000));
        assert_eq!(scorer.mistakes().len(), 2);
        assert_eq!(live.accuracy, 67);
    }

    #[test]
    fn test_live_accuracy_ignores_mistakes_past_current_index() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("abcdef");
        scorer.submit_input_at("abcdx", t0);
        scorer.submit_input_at("ab", at(t0, 500));
        // Position 4 is still recorded, but sits beyond the two typed chars.
        assert!(scorer.mistakes().contains(&4));
        assert_eq!(scorer.live_stats_at(at(t0, 600)).accuracy, 100);
    }

    #[test]
    fn test_mistakes_are_sticky_after_correction() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("catalog");
        scorer.submit_input_at("cb", t0);
        scorer.submit_input_at("c", at(t0, 100));
        scorer.submit_input_at("ca", at(t0, 200));
        assert!(scorer.mistakes().contains(&1));
        assert_eq!(scorer.char_state(1), CharState::Incorrect);
        assert_eq!(scorer.live_stats_at(at(t0, 300)).accuracy, 50);
    }

    #[test]
    fn test_repeated_errors_at_one_position_count_once() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("abc");
        scorer.submit_input_at("x", t0);
        scorer.submit_input_at("", at(t0, 50));
        scorer.submit_input_at("y", at(t0, 100));
        scorer.submit_input_at("", at(t0, 150));
        scorer.submit_input_at("a", at(t0, 200));
        assert_eq!(scorer.mistakes().len(), 1);
    }

    #[test]
    fn test_cat_in_six_seconds() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("cat");
        assert!(scorer.submit_input_at("c", t0).is_none());
        assert!(scorer.submit_input_at("ca", at(t0, 3000)).is_none());
        let stats = scorer.submit_input_at("cat", at(t0, 6000)).unwrap();
        assert_eq!(stats.wpm, 6);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.time_elapsed_ms, 6000);
        assert_eq!(stats.total_strokes, 3);
        assert_eq!(stats.correct_strokes, 3);
        assert_eq!(scorer.state(), RunState::Complete);
    }

    #[test]
    fn test_corrected_typo_still_costs_final_accuracy() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("cat");
        scorer.submit_input_at("c", t0);
        scorer.submit_input_at("cb", at(t0, 100));
        scorer.submit_input_at("c", at(t0, 200));
        scorer.submit_input_at("ca", at(t0, 300));
        let stats = scorer.submit_input_at("cat", at(t0, 400)).unwrap();
        assert_eq!(scorer.mistakes().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(stats.accuracy, 67);
        assert_eq!(stats.correct_strokes, 2);
    }

    #[test]
    fn test_typed_all_wrong_in_one_go() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("cbt");
        scorer.submit_input_at("c", t0);
        let stats = scorer.submit_input_at("cat", at(t0, 1000)).unwrap();
        assert_eq!(stats.accuracy, 67);
        assert_eq!(stats.correct_strokes, 2);
    }

    #[test]
    fn test_completion_reported_once() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("ab");
        scorer.submit_input_at("a", t0);
        assert!(scorer.submit_input_at("ab", at(t0, 1000)).is_some());
        assert!(scorer.submit_input_at("abc", at(t0, 2000)).is_none());
        assert!(scorer.submit_input_at("", at(t0, 3000)).is_none());
        assert_eq!(scorer.input(), &['a', 'b']);
        assert_eq!(scorer.final_stats().unwrap().time_elapsed_ms, 1000);
    }

    #[test]
    fn test_overlong_input_completes_and_extra_chars_ignored() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("ab");
        scorer.submit_input_at("a", t0);
        let stats = scorer.submit_input_at("abzzz", at(t0, 1000)).unwrap();
        assert!(scorer.mistakes().is_empty());
        assert_eq!(stats.accuracy, 100);
        assert_eq!(scorer.current_index(), 2);
    }

    #[test]
    fn test_elapsed_frozen_after_completion() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("ab");
        scorer.submit_input_at("a", t0);
        scorer.submit_input_at("ab", at(t0, 2000));
        let later = scorer.live_stats_at(at(t0, 60_000));
        assert_eq!(later.elapsed, Duration::from_millis(2000));
        assert_eq!(later.wpm, 12);
    }

    #[test]
    fn test_instant_completion_guards_divide_by_zero() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("hi");
        let stats = scorer.submit_input_at("hi", t0).unwrap();
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.time_elapsed_ms, 0);
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn test_live_stats_idempotent() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("the quick brown fox");
        scorer.submit_input_at("the quack", t0);
        let now = at(t0, 4200);
        assert_eq!(scorer.live_stats_at(now), scorer.live_stats_at(now));
    }

    #[test]
    fn test_live_wpm() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("the quick brown fox");
        scorer.submit_input_at("t", t0);
        scorer.submit_input_at("the quick ", at(t0, 6000));
        // 10 chars = 2 words in 0.1 minutes
        assert_eq!(scorer.live_stats_at(at(t0, 6000)).wpm, 20);
        assert_eq!(scorer.live_stats_at(t0).wpm, 0);
    }

    #[test]
    fn test_reset_matches_fresh_scorer() {
        let t0 = Instant::now();
        let mut used = PracticeScorer::new("cat");
        used.submit_input_at("cb", t0);
        used.submit_input_at("cbt", at(t0, 500));
        used.reset();
        assert_eq!(used.state(), RunState::Idle);
        assert!(used.final_stats().is_none());

        let mut fresh = PracticeScorer::new("cat");
        let t1 = at(t0, 10_000);
        used.submit_input_at("cx", t1);
        fresh.submit_input_at("cx", t1);
        assert_eq!(used.mistakes(), fresh.mistakes());
        assert_eq!(used.state(), fresh.state());
        assert_eq!(used.live_stats_at(at(t1, 900)), fresh.live_stats_at(at(t1, 900)));
    }

    #[test]
    fn test_char_states() {
        let t0 = Instant::now();
        let mut scorer = PracticeScorer::new("abcd");
        scorer.submit_input_at("ax", t0);
        assert_eq!(scorer.char_state(0), CharState::Correct);
        assert_eq!(scorer.char_state(1), CharState::Incorrect);
        assert_eq!(scorer.char_state(2), CharState::Current);
        assert_eq!(scorer.char_state(3), CharState::Pending);
        assert!((scorer.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_reference() {
        let mut scorer = PracticeScorer::new("");
        assert_eq!(scorer.progress(), 0.0);
        let stats = scorer.submit_input("x").unwrap();
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.total_strokes, 0);
        assert!(scorer.mistakes().is_empty());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
        assert_eq!(format_clock(Duration::from_millis(9_999)), "0:09");
        assert_eq!(format_clock(Duration::from_secs(125)), "2:05");
    }

    #[test]
    fn test_accuracy_percent_rounding() {
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(0, 0), 100);
    }
}
