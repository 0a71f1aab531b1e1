//! Time management utilities

use std::time::Duration;

/// Frame timer accumulating the elapsed time fed by the driver
pub struct Timer {
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the timer by one frame of `elapsed` time
    pub fn advance(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f64();
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

/// Format a duration as `HH:MM:SS`, rounding to the nearest second
pub fn format_time(elapsed: Duration) -> String {
    let seconds = (elapsed.as_millis() + 500) / 1000;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds % 60)
}
