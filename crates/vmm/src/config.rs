use pagesim_error::errinput;

use crate::replacer::PolicyKind;
use crate::Result;

/// Everything needed to set up one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub policy: PolicyKind,
    /// Every `clock_frequency`-th access is a clock tick.
    pub clock_frequency: usize,
    pub num_pages: usize,
    pub num_frames: usize,
    /// Seed for the random policy; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Validates and builds a configuration.
    pub fn new(
        policy: PolicyKind,
        clock_frequency: usize,
        num_pages: usize,
        num_frames: usize,
    ) -> Result<Self> {
        if clock_frequency == 0 {
            return errinput!("clock frequency must be at least 1");
        }
        if num_pages == 0 {
            return errinput!("number of pages must be positive");
        }
        if num_frames == 0 {
            return errinput!("number of frames must be positive");
        }
        Ok(Self {
            policy,
            clock_frequency,
            num_pages,
            num_frames,
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Whether the 0-based `access_index` falls on a clock tick.
    pub fn is_clock_tick(&self, access_index: usize) -> bool {
        (access_index + 1) % self.clock_frequency == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesim_error::Error;

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(matches!(
            SimConfig::new(PolicyKind::Fifo, 0, 4, 2),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            SimConfig::new(PolicyKind::Fifo, 1, 0, 2),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            SimConfig::new(PolicyKind::Fifo, 1, 4, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_clock_tick_every_nth_access() {
        let config = SimConfig::new(PolicyKind::Nru, 3, 4, 2).unwrap();
        let ticks: Vec<usize> = (0..9).filter(|&i| config.is_clock_tick(i)).collect();
        assert_eq!(vec![2, 5, 8], ticks);

        let every = SimConfig::new(PolicyKind::Nru, 1, 4, 2).unwrap();
        assert!((0..5).all(|i| every.is_clock_tick(i)));
    }

    #[test]
    fn test_with_seed() {
        let config = SimConfig::new(PolicyKind::Random, 1, 4, 2)
            .unwrap()
            .with_seed(Some(9));
        assert_eq!(Some(9), config.seed);
    }
}
