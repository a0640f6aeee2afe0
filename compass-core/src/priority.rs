//! Priority scorer: 0-100 urgency per (template, home).
//!
//! Additive bonuses over a frequency base, clamped to 100. Deterministic for
//! a fixed `today`; all history inputs arrive as an explicit snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Season;
use crate::distribute::climate_multiplier;
use crate::home::Home;
use crate::template::{Category, Frequency, TaskTemplate};

/// What the scorer needs to know about this (home, template) pair's past.
///
/// Computed by the store (or any history source) before scoring; the scorer
/// itself never touches persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistory {
    /// An incomplete schedule instance for this pair exists strictly before
    /// today.
    pub overdue: bool,
    /// A completion record for this pair exists anywhere in history.
    pub completed_before: bool,
}

fn frequency_base(frequency: Frequency) -> i32 {
    match frequency {
        Frequency::Weekly => 40,
        Frequency::Monthly => 50,
        Frequency::Quarterly => 60,
        Frequency::Biannual => 70,
        Frequency::Annual => 75,
        Frequency::Biennial => 60,
        Frequency::AsNeeded => 50,
    }
}

fn category_bonus(category: Category) -> i32 {
    match category {
        Category::Safety => 30,
        Category::Hvac | Category::Plumbing | Category::Electrical => 20,
        Category::Exterior => 15,
        Category::Yard | Category::Appliances => 5,
        _ => 0,
    }
}

/// Urgency score in [0, 100] for scheduling `template` on `home`.
pub fn score(template: &TaskTemplate, home: &Home, history: TaskHistory, today: NaiveDate) -> u8 {
    let mut score = frequency_base(template.frequency);

    score += category_bonus(template.category);

    let season = Season::for_date(today);
    if template.affinity.matches(season) {
        score += 15;
    } else if template.affinity.season().is_none() {
        score += 3;
    }

    // Age bands: only the first matching band applies.
    let age = home.age(today);
    if age > 50 && template.applies_to_old {
        score += 8;
    } else if age > 20 && template.applies_to_old {
        score += 5;
    } else if age <= 20 && template.applies_to_new {
        score += 3;
    }

    if history.overdue {
        score += 40;
    }
    if !history.completed_before {
        score += 5;
    }
    if climate_multiplier(home.climate_zone) > 1.2 {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

/// Display tier for a score. Presentation convenience, not part of the
/// scoring contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=100 => PriorityTier::Critical,
            70..=84 => PriorityTier::High,
            55..=69 => PriorityTier::Medium,
            _ => PriorityTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityTier::Critical => "critical",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}
