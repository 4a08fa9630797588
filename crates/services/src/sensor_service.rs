use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use hydro_core::Clock;

/// The reservoir pump runs at a fixed rate; only the probes fluctuate.
pub const FLOW_RATE_LPM: f64 = 2.1;

const WINDOW_LEN: usize = 16;
const SAMPLE_SPACING_SECS: i64 = 5;

const PH_RANGE: (f64, f64) = (5.0, 7.5);
const TEMP_RANGE: (f64, f64) = (20.0, 30.0);
const PPM_RANGE: (f64, f64) = (1000.0, 1400.0);

/// One mock probe sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub at: DateTime<Utc>,
    pub ph: f64,
    pub water_temp_c: f64,
    pub nutrient_ppm: f64,
}

/// Simulated reservoir telemetry for the monitor view.
///
/// Holds a sliding window of samples spaced five seconds apart. `advance`
/// drops the oldest sample and appends a new one produced by a clamped
/// random walk from the latest values, which keeps the traces plausible
/// instead of jumping around.
pub struct SensorFeedService {
    clock: Clock,
    window: Mutex<Vec<SensorReading>>,
}

impl SensorFeedService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        let now = clock.now();
        let mut rng = rand::rng();
        let mut window = Vec::with_capacity(WINDOW_LEN);
        for i in (0..WINDOW_LEN).rev() {
            let offset = i64::try_from(i).unwrap_or(0) * SAMPLE_SPACING_SECS;
            window.push(SensorReading {
                at: now - Duration::seconds(offset),
                ph: 5.5 + rng.random_range(0.0..1.5),
                water_temp_c: 24.0 + rng.random_range(0.0..4.0),
                nutrient_ppm: 1200.0 + rng.random_range(0.0..100.0),
            });
        }

        Self {
            clock,
            window: Mutex::new(window),
        }
    }

    /// The current sample window, oldest first.
    #[must_use]
    pub fn window(&self) -> Vec<SensorReading> {
        self.lock().clone()
    }

    /// The most recent sample.
    #[must_use]
    pub fn latest(&self) -> SensorReading {
        let window = self.lock();
        window[window.len() - 1]
    }

    /// Produces the next sample and slides the window.
    pub fn advance(&self) -> SensorReading {
        let mut rng = rand::rng();
        let mut window = self.lock();
        let last = window[window.len() - 1];

        let next = SensorReading {
            at: self.clock.now(),
            ph: walk(last.ph, 0.1, PH_RANGE, &mut rng),
            water_temp_c: walk(last.water_temp_c, 0.2, TEMP_RANGE, &mut rng),
            nutrient_ppm: walk(last.nutrient_ppm, 20.0, PPM_RANGE, &mut rng),
        };

        window.remove(0);
        window.push(next);
        next
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SensorReading>> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn walk(value: f64, step: f64, (min, max): (f64, f64), rng: &mut impl Rng) -> f64 {
    let delta = (rng.random_range(0.0..1.0) - 0.5) * step;
    (value + delta).clamp(min, max)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::time::fixed_clock;

    #[test]
    fn seed_window_has_sixteen_spaced_samples() {
        let feed = SensorFeedService::new(fixed_clock());
        let window = feed.window();

        assert_eq!(window.len(), WINDOW_LEN);
        for pair in window.windows(2) {
            assert_eq!((pair[1].at - pair[0].at).num_seconds(), SAMPLE_SPACING_SECS);
        }
    }

    #[test]
    fn advance_keeps_the_window_length_and_bounds() {
        let feed = SensorFeedService::new(fixed_clock());
        for _ in 0..100 {
            let reading = feed.advance();
            assert!((PH_RANGE.0..=PH_RANGE.1).contains(&reading.ph));
            assert!((TEMP_RANGE.0..=TEMP_RANGE.1).contains(&reading.water_temp_c));
            assert!((PPM_RANGE.0..=PPM_RANGE.1).contains(&reading.nutrient_ppm));
        }
        assert_eq!(feed.window().len(), WINDOW_LEN);
    }

    #[test]
    fn latest_matches_the_window_tail() {
        let feed = SensorFeedService::new(fixed_clock());
        let advanced = feed.advance();
        assert_eq!(feed.latest(), advanced);
        assert_eq!(*feed.window().last().unwrap(), advanced);
    }
}
