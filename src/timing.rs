//! Frame pacing.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// Fixed-rate frame limiter with a rolling FPS average.
///
/// `finish_frame` sleeps out whatever is left of the frame interval and
/// returns the seconds elapsed since the previous call.
pub struct FrameLimiter {
    interval: Duration,
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    last_busy: Duration,
    sample_count: usize,
}

impl FrameLimiter {
    pub fn new(target_fps: u32, sample_count: usize) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            last_busy: Duration::ZERO,
            sample_count: sample_count.max(1),
        }
    }

    /// Wait for the rest of the frame interval; returns delta time in seconds
    pub fn finish_frame(&mut self) -> f32 {
        let busy = self.last_frame.elapsed();
        self.last_busy = busy;
        if busy < self.interval {
            thread::sleep(self.interval - busy);
        }

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        dt
    }

    /// Time spent working (before sleeping) in the last frame
    pub fn last_busy(&self) -> Duration {
        self.last_busy
    }

    /// True when the last frame's work took more than twice the interval
    pub fn overran(&self) -> bool {
        self.last_busy > self.interval * 2
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    pub fn avg_fps(&self) -> f32 {
        let ms = self.avg_frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_frame_waits_out_interval() {
        let mut limiter = FrameLimiter::new(100, 10);
        let dt = limiter.finish_frame();
        assert!(dt >= 0.0099, "dt {} shorter than interval", dt);
        assert!(!limiter.overran());
    }

    #[test]
    fn test_rolling_window_is_bounded() {
        let mut limiter = FrameLimiter::new(1000, 3);
        for _ in 0..6 {
            limiter.finish_frame();
        }
        assert_eq!(limiter.frame_count(), 3);
        assert!(limiter.avg_fps() > 0.0);
        assert!(limiter.avg_fps() <= 1000.5);
    }

    #[test]
    fn test_overrun_detection() {
        let mut limiter = FrameLimiter::new(1000, 4);
        thread::sleep(Duration::from_millis(5));
        limiter.finish_frame();
        assert!(limiter.overran());
        assert!(limiter.last_busy() >= Duration::from_millis(5));
    }

    #[test]
    fn test_empty_average() {
        let limiter = FrameLimiter::new(60, 60);
        assert_eq!(limiter.avg_frame_time_ms(), 0.0);
        assert_eq!(limiter.avg_fps(), 0.0);
    }
}
