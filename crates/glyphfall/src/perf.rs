//! Frame-rate and system-load measurement driving auto motion resolution.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use glyphfall_core::FrameTier;
use sysinfo::System;

/// Rolling frame clock classifying recent frame rate into a tier.
#[derive(Debug)]
pub struct FrameClock {
    /// Wall time of the previously rendered frame.
    last_frame: Instant,
    /// Exponentially smoothed frame duration in seconds.
    smoothed_secs: f32,
}

impl FrameClock {
    /// Create a clock primed at 60fps.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_secs: 1.0 / 60.0,
        }
    }

    /// Note a rendered frame and return the current tier. Smoothing keeps a
    /// single slow frame from dropping the tier.
    pub fn note_frame(&mut self) -> FrameTier {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.smoothed_secs = self.smoothed_secs * 0.9 + dt * 0.1;
        FrameTier::from_fps(1.0 / self.smoothed_secs.max(1e-6))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// CPU sampler polling overall load in a background thread.
#[derive(Debug)]
pub struct CpuSampler {
    /// Shared load (0.0-1.0) updated by the background thread.
    load: Arc<RwLock<f32>>,
    /// Cached load for when the lock is contended.
    cached: Arc<RwLock<f32>>,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl CpuSampler {
    /// Create a new sampler.
    pub fn new() -> Self {
        Self {
            load: Arc::new(RwLock::new(0.0)),
            cached: Arc::new(RwLock::new(0.0)),
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background sampling thread.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return; // Already running
            }
            *running = true;
        }

        let load = self.load.clone();
        let cached = self.cached.clone();
        let running = self.running.clone();

        thread::spawn(move || {
            let mut sys = System::new_all();
            sys.refresh_cpu_all();
            thread::sleep(Duration::from_millis(500));

            loop {
                if let Ok(is_running) = running.read()
                    && !*is_running
                {
                    break;
                }

                sys.refresh_cpu_all();
                let usage = sys.cpus().iter().map(|c| c.cpu_usage()).sum::<f32>()
                    / sys.cpus().len().max(1) as f32
                    / 100.0;
                let usage = usage.clamp(0.0, 1.0);

                if let Ok(mut l) = load.write() {
                    *l = usage;
                }
                if let Ok(mut c) = cached.write() {
                    *c = usage;
                }

                thread::sleep(Duration::from_secs(1));
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// Current CPU load (0.0-1.0).
    /// Uses try_read with fallback to cached values to avoid blocking.
    pub fn load(&self) -> f32 {
        if let Ok(l) = self.load.try_read() {
            return *l;
        }
        if let Ok(c) = self.cached.read() {
            return *c;
        }
        0.0
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpuSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
