use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::*;

/// Parameters of a numbered-coverage puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageConfig {
    pub grid_size: Coord,
    pub waypoint_count: CellCount,
    #[serde(default)]
    pub obstacle_count: CellCount,
}

impl CoverageConfig {
    pub fn new(
        grid_size: Coord,
        waypoint_count: CellCount,
        obstacle_count: CellCount,
    ) -> Result<Self> {
        let config = Self {
            grid_size,
            waypoint_count,
            obstacle_count,
        };
        config.validate()?;
        Ok(config)
    }

    pub const fn easy() -> Self {
        Self {
            grid_size: 6,
            waypoint_count: 5,
            obstacle_count: 2,
        }
    }

    pub const fn medium() -> Self {
        Self {
            grid_size: 6,
            waypoint_count: 5,
            obstacle_count: 4,
        }
    }

    pub const fn hard() -> Self {
        Self {
            grid_size: 6,
            waypoint_count: 5,
            obstacle_count: 6,
        }
    }

    pub const fn expert() -> Self {
        Self {
            grid_size: 6,
            waypoint_count: 5,
            obstacle_count: 8,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }

    pub fn validate(&self) -> Result<()> {
        validate_grid_size(self.grid_size)?;
        if self.waypoint_count < 2 {
            return Err(GameError::TooFewWaypoints(self.waypoint_count));
        }
        if self.waypoint_count > self.total_cells() {
            return Err(GameError::TooManyWaypoints {
                requested: self.waypoint_count,
                capacity: self.total_cells(),
            });
        }
        Ok(())
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self::medium()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    pub const fn config(self) -> CoverageConfig {
        match self {
            Self::Easy => CoverageConfig::easy(),
            Self::Medium => CoverageConfig::medium(),
            Self::Hard => CoverageConfig::hard(),
            Self::Expert => CoverageConfig::expert(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Hazard grids need distinct start and goal quadrants.
pub const MIN_HAZARD_GRID_SIZE: Coord = 3;

/// Number of sets in one hazard level.
pub const HAZARD_SET_COUNT: u8 = 5;

/// Parameters of one hazard-avoidance set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardConfig {
    pub grid_size: Coord,
    pub hazard_count: CellCount,
    #[serde(default = "HazardConfig::default_reveal_ms")]
    pub hazard_reveal_duration_ms: u32,
    #[serde(default = "HazardConfig::default_lives")]
    pub lives_total: u8,
}

impl HazardConfig {
    const fn default_reveal_ms() -> u32 {
        1000
    }

    const fn default_lives() -> u8 {
        3
    }

    /// Standard progression: sets 1 to 4 on a 5x5 grid with 2 to 5 hazards, set 5 on 6x6
    /// with 6. Values outside `1..=5` are clamped.
    pub fn for_set(set: u8) -> Self {
        let clamped = set.clamp(1, HAZARD_SET_COUNT);
        if clamped != set {
            log::warn!("Hazard set {set} out of range, using set {clamped}");
        }
        let set = clamped;
        let (grid_size, hazard_count) = if set < HAZARD_SET_COUNT {
            (5, CellCount::from(set) + 1)
        } else {
            (6, 6)
        };
        Self {
            grid_size,
            hazard_count,
            hazard_reveal_duration_ms: Self::default_reveal_ms(),
            lives_total: Self::default_lives(),
        }
    }

    pub fn standard_sets() -> Vec<Self> {
        (1..=HAZARD_SET_COUNT).map(Self::for_set).collect()
    }

    pub const fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.hazard_reveal_duration_ms as u64)
    }

    pub fn validate(&self) -> Result<()> {
        validate_grid_size(self.grid_size)?;
        if self.grid_size < MIN_HAZARD_GRID_SIZE {
            return Err(GameError::GridTooSmall(self.grid_size));
        }
        if self.lives_total == 0 {
            return Err(GameError::NoLives);
        }
        Ok(())
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self::for_set(1)
    }
}

/// Seed shared by everyone playing on `date`: a 31-multiplier hash of `YYYY-MM-DD`.
pub fn daily_seed(date: NaiveDate) -> Seed {
    let formatted = format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day());
    let hash = formatted.chars().fold(0i32, |hash, c| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32)
    });
    Seed::from(hash.unsigned_abs())
}
