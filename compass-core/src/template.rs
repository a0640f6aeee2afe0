//! Task template model: reusable maintenance task definitions.
//!
//! Templates are catalog data, read-only to the engine. The catalog
//! collaborator owns creation and editing.

use serde::{Deserialize, Serialize};

use crate::calendar::Season;
use crate::home::HomeFeatures;

pub type TemplateId = u64;

/// How often a task recurs. Closed set: an unknown frequency is a
/// construction-time error, not a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Biannual,
    Annual,
    Biennial,
    /// No natural cadence. Deliberately treated as annual (365-day base
    /// interval) wherever an interval is needed.
    AsNeeded,
}

impl Frequency {
    /// Base recurrence interval in days, before climate adjustment.
    pub fn base_interval_days(self) -> i64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Quarterly => 90,
            Frequency::Biannual => 180,
            Frequency::Annual => 365,
            Frequency::Biennial => 730,
            Frequency::AsNeeded => 365,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hvac,
    Plumbing,
    Electrical,
    Exterior,
    Interior,
    Appliances,
    Yard,
    Safety,
    Seasonal,
    General,
}

/// The season a task is best done in, or `Any` for season-free tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalAffinity {
    Spring,
    Summer,
    Fall,
    Winter,
    Any,
}

impl SeasonalAffinity {
    pub fn season(self) -> Option<Season> {
        match self {
            SeasonalAffinity::Spring => Some(Season::Spring),
            SeasonalAffinity::Summer => Some(Season::Summer),
            SeasonalAffinity::Fall => Some(Season::Fall),
            SeasonalAffinity::Winter => Some(Season::Winter),
            SeasonalAffinity::Any => None,
        }
    }

    /// Calendar months this affinity prefers. `Any` prefers all twelve.
    pub fn months(self) -> &'static [u32] {
        match self.season() {
            Some(season) => season.months(),
            None => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        }
    }

    pub fn matches(self, season: Season) -> bool {
        self.season() == Some(season)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

/// A home capability a task depends on. Matched directly against
/// `HomeFeatures`; replaces the old free-text keyword sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SolarPanels,
    Generator,
    BatteryBank,
    WoodStove,
    SumpPump,
    Well,
    RainwaterCollection,
    IrrigationSystem,
    CompostingToilet,
    Fencing,
    BarnOutbuilding,
    Greenhouse,
    FruitTrees,
    GardenBeds,
    Pasture,
    Garage,
    Tractor,
    RidingMower,
    Chainsaw,
    FarmImplements,
}

impl Capability {
    pub fn satisfied_by(self, features: &HomeFeatures) -> bool {
        match self {
            Capability::SolarPanels => features.solar_panels,
            Capability::Generator => features.generator,
            Capability::BatteryBank => features.battery_bank,
            Capability::WoodStove => features.wood_stove,
            Capability::SumpPump => features.sump_pump,
            Capability::Well => features.well,
            Capability::RainwaterCollection => features.rainwater_collection,
            Capability::IrrigationSystem => features.irrigation_system,
            Capability::CompostingToilet => features.composting_toilet,
            Capability::Fencing => features.fencing,
            Capability::BarnOutbuilding => features.barn_outbuilding,
            Capability::Greenhouse => features.greenhouse,
            Capability::FruitTrees => features.fruit_trees,
            Capability::GardenBeds => features.garden_beds,
            Capability::Pasture => features.pasture,
            Capability::Garage => features.garage,
            Capability::Tractor => features.tractor,
            Capability::RidingMower => features.riding_mower,
            Capability::Chainsaw => features.chainsaw,
            Capability::FarmImplements => features.farm_implements,
        }
    }
}

/// Legacy keyword table mapping free-text fragments to capabilities.
///
/// Migration seed only: used to derive tags for catalog entries authored
/// before explicit capability tagging. Not a scheme to extend.
const KEYWORD_CAPABILITIES: &[(&str, Capability)] = &[
    ("solar", Capability::SolarPanels),
    ("generator", Capability::Generator),
    ("battery bank", Capability::BatteryBank),
    ("wood stove", Capability::WoodStove),
    ("chimney", Capability::WoodStove),
    ("sump pump", Capability::SumpPump),
    ("well water", Capability::Well),
    ("well pump", Capability::Well),
    ("rainwater", Capability::RainwaterCollection),
    ("cistern", Capability::RainwaterCollection),
    ("irrigation", Capability::IrrigationSystem),
    ("sprinkler", Capability::IrrigationSystem),
    ("composting toilet", Capability::CompostingToilet),
    ("fence", Capability::Fencing),
    ("barn", Capability::BarnOutbuilding),
    ("outbuilding", Capability::BarnOutbuilding),
    ("greenhouse", Capability::Greenhouse),
    ("fruit tree", Capability::FruitTrees),
    ("orchard", Capability::FruitTrees),
    ("garden bed", Capability::GardenBeds),
    ("vegetable garden", Capability::GardenBeds),
    ("pasture", Capability::Pasture),
    ("garage", Capability::Garage),
    ("tractor", Capability::Tractor),
    ("riding mower", Capability::RidingMower),
    ("chainsaw", Capability::Chainsaw),
    ("farm implement", Capability::FarmImplements),
];

/// Derive capability tags from legacy title/description text
/// (case-insensitive substring match over the keyword table).
pub fn capabilities_from_text(title: &str, description: &str) -> Vec<Capability> {
    let haystack = format!("{} {}", title.to_lowercase(), description.to_lowercase());
    let mut caps: Vec<Capability> = KEYWORD_CAPABILITIES
        .iter()
        .filter(|(kw, _)| haystack.contains(kw))
        .map(|(_, cap)| *cap)
        .collect();
    caps.sort();
    caps.dedup();
    caps
}

/// A maintenance task template.
///
/// Kept small + serializable; catalog storage is the collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: TemplateId,
    pub title: String,
    pub description: String,

    pub category: Category,
    pub frequency: Frequency,
    pub affinity: SeasonalAffinity,
    pub difficulty: Difficulty,

    /// Minutes. None = no estimate.
    pub estimated_minutes: Option<i32>,

    // Hard requirement flags, matched against the same-named home flags.
    pub requires_basement: bool,
    pub requires_attic: bool,
    pub requires_hvac: bool,
    pub requires_septic: bool,

    /// Relevant for homes older than 20 years.
    pub applies_to_old: bool,
    /// Relevant for newer homes.
    pub applies_to_new: bool,

    /// Capabilities the home must have for this task to apply.
    pub capabilities: Vec<Capability>,

    pub active: bool,
}

impl TaskTemplate {
    pub fn new(
        id: TemplateId,
        title: impl Into<String>,
        category: Category,
        frequency: Frequency,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category,
            frequency,
            affinity: SeasonalAffinity::Any,
            difficulty: Difficulty::Beginner,
            estimated_minutes: None,
            requires_basement: false,
            requires_attic: false,
            requires_hvac: false,
            requires_septic: false,
            applies_to_old: true,
            applies_to_new: true,
            capabilities: Vec::new(),
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_affinity(mut self, affinity: SeasonalAffinity) -> Self {
        self.affinity = affinity;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_minutes(mut self, minutes: i32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn needs_basement(mut self) -> Self {
        self.requires_basement = true;
        self
    }

    pub fn needs_attic(mut self) -> Self {
        self.requires_attic = true;
        self
    }

    pub fn needs_hvac(mut self) -> Self {
        self.requires_hvac = true;
        self
    }

    pub fn needs_septic(mut self) -> Self {
        self.requires_septic = true;
        self
    }

    pub fn old_homes_only(mut self) -> Self {
        self.applies_to_old = true;
        self.applies_to_new = false;
        self
    }

    pub fn new_homes_only(mut self) -> Self {
        self.applies_to_new = true;
        self.applies_to_old = false;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_seed_finds_capabilities() {
        let caps = capabilities_from_text(
            "Clean Solar Panels",
            "Rinse panels and check the battery bank connections.",
        );
        assert_eq!(caps, vec![Capability::SolarPanels, Capability::BatteryBank]);
    }

    #[test]
    fn keyword_seed_is_case_insensitive_and_deduped() {
        let caps = capabilities_from_text("FENCE check", "Walk the fence line.");
        assert_eq!(caps, vec![Capability::Fencing]);
    }

    #[test]
    fn keyword_seed_empty_for_plain_tasks() {
        assert!(capabilities_from_text("Change HVAC Filter", "Swap the filter.").is_empty());
    }

    #[test]
    fn as_needed_defaults_to_annual_interval() {
        assert_eq!(Frequency::AsNeeded.base_interval_days(), 365);
        assert_eq!(Frequency::Biennial.base_interval_days(), 730);
    }

    #[test]
    fn template_serde_round_trip() {
        let t = TaskTemplate::new(7, "Test Sump Pump", Category::Plumbing, Frequency::Annual)
            .with_affinity(SeasonalAffinity::Spring)
            .with_capability(Capability::SumpPump)
            .needs_basement();
        let json = serde_json::to_string(&t).unwrap();
        let back: TaskTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
