//! Frame timing

use std::time::Instant;

/// Frame clock: measures the time between `tick`s and keeps running totals
#[derive(Debug)]
pub struct Timer {
    last_tick: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start measuring from now
    #[must_use]
    pub fn new() -> Self {
        Self { last_tick: Instant::now(), delta_time: 0.0, total_time: 0.0, frame_count: 0 }
    }

    /// Close the current frame at the wall-clock time
    pub fn update(&mut self) {
        let now = Instant::now();
        let seconds = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.advance(seconds);
    }

    /// Close a frame that lasted `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Length of the last frame in seconds
    #[must_use]
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Seconds summed over every frame
    #[must_use]
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Frames closed so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the whole run, 0 before any time has passed
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        self.frame_count as f32 / self.total_time
    }
}

/// Accumulator that turns variable frame times into whole fixed steps.
///
/// Steps beyond `max_steps` in one frame are dropped so a long stall does not
/// snowball into ever longer frames.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedStep {
    /// Create an accumulator producing steps of `step` seconds
    #[must_use]
    pub const fn new(step: f32, max_steps: u32) -> Self {
        Self {
            step,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Length of one step in seconds
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps are due
    pub fn accumulate(&mut self, delta_time: f32) -> u32 {
        if self.step <= 0.0 {
            return 0;
        }

        self.accumulator += delta_time;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
            if steps == self.max_steps {
                self.accumulator = 0.0;
                break;
            }
        }
        steps
    }

    /// Fraction of a step left over after the last [`FixedStep::accumulate`]
    #[must_use]
    pub fn alpha(&self) -> f32 {
        if self.step > 0.0 { self.accumulator / self.step } else { 0.0 }
    }
}
