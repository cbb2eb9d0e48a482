//! Descending probability schedule for the adaptive controller variant.

/// An ordered, non-increasing sequence of fixing probabilities plus a cursor
/// and a stagnation counter.
///
/// The cursor only advances, never retreats. Advancing while already at the
/// last position marks the schedule exhausted, which is the adaptive
/// variant's termination signal; until then the last (lowest) probability
/// keeps being reused.
#[derive(Debug, Clone)]
pub struct ProbabilitySchedule {
    probabilities: Vec<f64>,
    cursor: usize,
    stagnation: u32,
    stagnation_limit: u32,
    exhausted: bool,
}

impl ProbabilitySchedule {
    /// Creates a schedule. `probabilities` must be non-empty and validated
    /// by the caller (configuration layer).
    pub fn new(probabilities: Vec<f64>, stagnation_limit: u32) -> Self {
        Self {
            probabilities,
            cursor: 0,
            stagnation: 0,
            stagnation_limit,
            exhausted: false,
        }
    }

    /// The round's fixing probability.
    pub fn current(&self) -> f64 {
        self.probabilities[self.cursor]
    }

    /// Records a round with sufficient improvement: stagnation resets.
    pub fn note_improved(&mut self) {
        self.stagnation = 0;
    }

    /// Records a stagnated round. Past the configured limit the cursor
    /// advances by one (never past the end) and the counter resets;
    /// advancing at the last position exhausts the schedule.
    pub fn note_stagnated(&mut self) {
        self.stagnation += 1;
        if self.stagnation < self.stagnation_limit {
            return;
        }
        self.stagnation = 0;
        if self.cursor + 1 < self.probabilities.len() {
            self.cursor += 1;
        } else {
            self.exhausted = true;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }
}
