//! Fixed-timestep frame clock.

use crate::tracking::UpdateClock;

/// One scheduler callback: which clock fired, and its timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Clock context this tick runs under.
    pub clock: UpdateClock,
    /// Rendered frame counter this tick belongs to.
    pub frame: u64,
    /// Clock time in seconds (fixed time for Fixed ticks).
    pub time: f64,
    /// Seconds since the previous tick on the same clock.
    pub delta_time: f32,
}

/// Fixed-timestep accumulator producing the tick sequence a game loop would
/// deliver: zero or more Fixed steps followed by one Normal tick per frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Fixed step length in seconds
    fixed_delta_time: f32,
    /// Upper bound on fixed steps per frame (spiral-of-death guard)
    max_fixed_steps: u32,
    /// Unconsumed frame time
    accumulator: f64,
    /// Frame time
    time: f64,
    /// Fixed time (never ahead of `time`)
    fixed_time: f64,
    /// Frames completed
    frame: u64,
}

impl FrameClock {
    /// Create a clock with the given fixed step (seconds).
    #[must_use]
    pub fn new(fixed_delta_time: f32) -> Self {
        Self {
            fixed_delta_time: fixed_delta_time.max(1e-4),
            max_fixed_steps: 8,
            accumulator: 0.0,
            time: 0.0,
            fixed_time: 0.0,
            frame: 0,
        }
    }

    /// Override the per-frame fixed step cap.
    #[must_use]
    pub fn with_max_fixed_steps(mut self, steps: u32) -> Self {
        self.max_fixed_steps = steps.max(1);
        self
    }

    /// Advance by one rendered frame of `frame_delta` seconds and return the
    /// ticks for it, Fixed steps first.
    pub fn advance(&mut self, frame_delta: f32) -> Vec<FrameTick> {
        let frame_delta = frame_delta.max(0.0);
        self.frame += 1;
        self.time += f64::from(frame_delta);
        self.accumulator += f64::from(frame_delta);

        let step = f64::from(self.fixed_delta_time);
        let mut ticks = Vec::new();
        let mut steps = 0;
        while self.accumulator >= step && steps < self.max_fixed_steps {
            self.accumulator -= step;
            self.fixed_time += step;
            steps += 1;
            ticks.push(FrameTick {
                clock: UpdateClock::Fixed,
                frame: self.frame,
                time: self.fixed_time,
                delta_time: self.fixed_delta_time,
            });
        }
        if steps == self.max_fixed_steps {
            // Drop the backlog rather than falling further behind.
            self.accumulator = self.accumulator.min(step);
        }
        ticks.push(FrameTick {
            clock: UpdateClock::Normal,
            frame: self.frame,
            time: self.time,
            delta_time: frame_delta,
        });
        ticks
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frame time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Fixed step length in seconds.
    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }
}
