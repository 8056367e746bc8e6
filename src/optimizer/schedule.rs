use crate::config::SearchParams;
use serde::{Deserialize, Serialize};

/// Exponential cooling: `T(i) = temp_max * exp(-tau * i)`.
///
/// The temperature is recomputed from the iteration count every time
/// instead of being decayed in place, so rounding never accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolingSchedule {
    pub temp_max: f64,
    pub temp_min: f64,
    pub tau: f64,
}

impl CoolingSchedule {
    pub fn new(temp_max: f64, temp_min: f64, tau: f64) -> Self {
        Self {
            temp_max,
            temp_min,
            tau,
        }
    }

    #[inline(always)]
    pub fn temperature(&self, iteration: u64) -> f64 {
        self.temp_max * (-self.tau * iteration as f64).exp()
    }

    #[inline(always)]
    pub fn is_cold(&self, temperature: f64) -> bool {
        temperature <= self.temp_min
    }

    /// Iterations until the schedule reaches `temp_min`.
    pub fn planned_iterations(&self) -> u64 {
        ((self.temp_max / self.temp_min).ln() / self.tau).ceil() as u64
    }
}

impl From<&SearchParams> for CoolingSchedule {
    fn from(params: &SearchParams) -> Self {
        Self::new(params.temp_max, params.temp_min, params.tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hot_and_decays_monotonically() {
        let s = CoolingSchedule::new(100.0, 1.0, 0.01);
        assert_eq!(s.temperature(0), 100.0);
        let mut last = f64::INFINITY;
        for i in 0..1000 {
            let t = s.temperature(i);
            assert!(t < last);
            last = t;
        }
    }

    #[test]
    fn planned_iterations_reach_the_floor() {
        let s = CoolingSchedule::new(1000.0, 1.0, 1.5e-4);
        let planned = s.planned_iterations();
        assert!(s.is_cold(s.temperature(planned)));
        assert!(!s.is_cold(s.temperature(planned - 2)));
    }
}
