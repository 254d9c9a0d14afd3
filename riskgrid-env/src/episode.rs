//! Step budget of an episode.

/// Step counter and the step limit of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeState {
    step_count: usize,
    max_steps: usize,
    done: bool,
}

impl EpisodeState {
    /// Starts an episode with the given step limit.
    pub fn new(max_steps: usize) -> Self {
        Self {
            step_count: 0,
            max_steps,
            done: false,
        }
    }

    /// Zeroes the counter and clears the done flag.
    pub fn reset(&mut self) {
        self.step_count = 0;
        self.done = false;
    }

    /// Counts a step. Must be called before the step is evaluated.
    pub fn tick(&mut self) {
        self.step_count += 1;
    }

    /// Returns `true` once the step limit is reached.
    pub fn is_truncated(&self) -> bool {
        self.step_count >= self.max_steps
    }

    /// Records the end of the step, returning `(terminated, truncated)`.
    pub fn finish_step(&mut self, terminated: bool) -> (bool, bool) {
        let truncated = self.is_truncated();
        self.done = terminated || truncated;
        (terminated, truncated)
    }

    /// Steps taken in this episode, including the current one.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Step limit.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Whether the last step ended the episode.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
