//! Home (asset) model: the property a maintenance plan is generated for.
//!
//! Homes are read-only inputs to a scheduling pass; only the owning profile
//! subsystem mutates them.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type HomeId = u64;
pub type UserId = u64;

/// Homes older than this many years count as "old" for applicability.
pub const OLD_HOME_YEARS: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Tropical,
    Dry,
    Temperate,
    Continental,
    Polar,
    Midwest,
    Northeast,
    Southeast,
    Southwest,
    Northwest,
}

/// Boolean feature flags that gate task applicability.
///
/// Grouped the way the profile form groups them: core systems, advanced
/// systems, property features, equipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeFeatures {
    pub basement: bool,
    pub attic: bool,
    pub garage: bool,
    pub hvac: bool,
    pub septic: bool,
    pub well: bool,

    pub solar_panels: bool,
    pub generator: bool,
    pub battery_bank: bool,
    pub wood_stove: bool,
    pub sump_pump: bool,
    pub composting_toilet: bool,
    pub rainwater_collection: bool,
    pub irrigation_system: bool,

    pub fencing: bool,
    pub barn_outbuilding: bool,
    pub greenhouse: bool,
    pub fruit_trees: bool,
    pub garden_beds: bool,
    pub pasture: bool,

    pub tractor: bool,
    pub riding_mower: bool,
    pub chainsaw: bool,
    pub farm_implements: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub id: HomeId,
    pub owner: UserId,
    pub name: String,
    pub year_built: i32,
    pub climate_zone: ClimateZone,
    pub features: HomeFeatures,
}

impl Home {
    pub fn new(id: HomeId, owner: UserId, name: impl Into<String>, year_built: i32) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            year_built,
            climate_zone: ClimateZone::Temperate,
            features: HomeFeatures::default(),
        }
    }

    pub fn with_climate(mut self, zone: ClimateZone) -> Self {
        self.climate_zone = zone;
        self
    }

    pub fn with_features(mut self, features: HomeFeatures) -> Self {
        self.features = features;
        self
    }

    /// Age in whole years as of `today`.
    pub fn age(&self, today: NaiveDate) -> i32 {
        today.year() - self.year_built
    }

    pub fn is_old(&self, today: NaiveDate) -> bool {
        self.age(today) > OLD_HOME_YEARS
    }
}

/// Ownership guard for lifecycle calls. The engine assumes callers run this
/// (or an equivalent) before mutating any schedule state.
pub fn ensure_owner(home: &Home, user: UserId) -> Result<()> {
    if home.owner != user {
        bail!(
            "user {user} does not own home {} ({})",
            home.id,
            home.name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_from_build_year() {
        let home = Home::new(1, 10, "Main House", 1990);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(home.age(today), 34);
        assert!(home.is_old(today));

        let newer = Home::new(2, 10, "New Build", 2010);
        assert!(!newer.is_old(today));
    }

    #[test]
    fn owner_check() {
        let home = Home::new(1, 10, "Main House", 1990);
        assert!(ensure_owner(&home, 10).is_ok());
        assert!(ensure_owner(&home, 11).is_err());
    }
}
