/// Game loop timing
///
/// One tick runs per display refresh; there is no fixed timestep, so the
/// game's speed follows the refresh rate. This keeps the bookkeeping around
/// that: tick numbers, frame deltas and a rolling FPS figure for logging.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often (in frames) the FPS figure is recomputed
const FPS_UPDATE_INTERVAL: u64 = 10;

/// How often (in frames) the FPS figure is logged at debug level
const FPS_LOG_INTERVAL: u64 = 600;

/// Game loop timing state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when game loop started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Time between the last two frames, in seconds
    frame_delta: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame, returning its tick number (starting at 1)
    pub fn begin_frame(&mut self) -> u64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.record_frame(frame_time);
        self.last_frame_time = now;
        self.frame_count
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.frame_count += 1;
        self.frame_delta = frame_time.as_secs_f32();

        // Store frame time for FPS calculation
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        if self.frame_count % FPS_UPDATE_INTERVAL == 0 {
            self.update_fps();
        }

        if self.frame_count % FPS_LOG_INTERVAL == 0 {
            log::debug!(
                "Frame {}: {:.1} FPS over the last {} frames",
                self.frame_count,
                self.current_fps,
                self.frame_times.len()
            );
        }
    }

    /// Get the delta time since the previous frame (in seconds)
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.begin_frame(), 1);
        assert_eq!(game_loop.begin_frame(), 2);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_elapsed_time() {
        let game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(10));
        assert!(game_loop.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_frame_delta() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(5));
        game_loop.begin_frame();
        assert!(game_loop.frame_delta() >= 0.005);
    }

    #[test]
    fn test_fps_from_steady_frames() {
        let mut game_loop = GameLoop::new();
        for _ in 0..FPS_UPDATE_INTERVAL {
            game_loop.record_frame(Duration::from_millis(20));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_fps_window_is_bounded() {
        let mut game_loop = GameLoop::new();
        for _ in 0..(FPS_WINDOW_SIZE * 2) {
            game_loop.record_frame(Duration::from_millis(10));
        }
        assert_eq!(game_loop.frame_times.len(), FPS_WINDOW_SIZE);
        assert_relative_eq!(game_loop.fps(), 100.0, epsilon = 0.01);
    }
}
