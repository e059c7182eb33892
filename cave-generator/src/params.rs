//! Generator parameters, fixed for the lifetime of a generator.

use crate::error::{CaveError, Result};
use cave_grid::GridSize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaveParams {
    pub width: u32,
    pub height: u32,
    /// Probability that a cell starts out alive.
    pub birth_chance: f64,
    /// A dead cell comes alive when it has more live neighbors than this.
    pub birth_limit: i32,
    /// A live cell dies when it has fewer live neighbors than this.
    pub death_limit: i32,
}

impl CaveParams {
    pub fn new(
        width: u32,
        height: u32,
        birth_chance: f64,
        birth_limit: i32,
        death_limit: i32,
    ) -> Self {
        Self {
            width,
            height,
            birth_chance,
            birth_limit,
            death_limit,
        }
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Rejects what the generator cannot honor. Limits are not checked: any integer
    /// works, only `0..=8` makes a difference.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.birth_chance) {
            return Err(CaveError::BirthChanceOutOfRange(self.birth_chance));
        }
        Ok(())
    }
}

impl Default for CaveParams {
    fn default() -> Self {
        Self::new(80, 60, 0.45, 4, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CaveParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            CaveParams::new(0, 10, 0.5, 4, 3).validate(),
            Err(CaveError::EmptyGrid {
                width: 0,
                height: 10
            })
        );
        assert!(CaveParams::new(10, 0, 0.5, 4, 3).validate().is_err());
    }

    #[test]
    fn test_rejects_birth_chance_out_of_range() {
        assert_eq!(
            CaveParams::new(10, 10, 1.5, 4, 3).validate(),
            Err(CaveError::BirthChanceOutOfRange(1.5))
        );
        assert!(CaveParams::new(10, 10, -0.01, 4, 3).validate().is_err());
        assert!(CaveParams::new(10, 10, f64::NAN, 4, 3).validate().is_err());
    }

    #[test]
    fn test_accepts_birth_chance_bounds_and_odd_limits() {
        assert!(CaveParams::new(1, 1, 0.0, -3, 12).validate().is_ok());
        assert!(CaveParams::new(1, 1, 1.0, 0, 0).validate().is_ok());
    }
}
