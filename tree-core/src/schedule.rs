/// Fixed-cadence pacing for hosts that run a render loop.
///
/// The host passes its own monotonic clock (seconds) to [`Metronome::due`]
/// every frame; the metronome answers whether a tick should fire now.
/// Restarting it discards any tick that was pending under the old cadence.
#[derive(Debug, Clone)]
pub struct Metronome {
    last: Option<f64>,
    /// Actual time between the last two ticks, for status displays.
    pub last_dt: f64,
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new()
    }
}

impl Metronome {
    pub fn new() -> Self {
        Self {
            last: None,
            last_dt: 0.0,
        }
    }

    /// Forgets the previous tick; the next one is due `interval` after `now`.
    pub fn restart(&mut self, now: f64) {
        self.last = Some(now);
        self.last_dt = 0.0;
    }

    pub fn stop(&mut self) {
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Returns `true` (and records the tick) once `interval` seconds have
    /// passed since the last tick. A stopped metronome is never due.
    pub fn due(&mut self, now: f64, interval: f64) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        let elapsed = now - last;
        if elapsed < interval {
            return false;
        }
        self.last_dt = elapsed;
        self.last = Some(now);
        true
    }

    /// Seconds until the next tick, if running.
    pub fn remaining(&self, now: f64, interval: f64) -> Option<f64> {
        self.last.map(|last| (interval - (now - last)).max(0.0))
    }
}
