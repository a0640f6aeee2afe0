//! compass-core: the maintenance scheduling engine.
//!
//! Pure computation + state transitions: applicability filtering, priority
//! scoring, date distribution, and the schedule lifecycle. Presentation and
//! catalog administration live elsewhere; persistence plugs in through
//! `ScheduleStore`.

pub mod applicability;
pub mod calendar;
pub mod distribute;
pub mod home;
pub mod lifecycle;
pub mod priority;
pub mod schedule;
pub mod store;
pub mod template;

pub use applicability::{applicable_tasks, is_applicable};
pub use calendar::{HORIZON_DAYS, Season, preferred_months};
pub use distribute::{climate_multiplier, distribute, next_due, place};
pub use home::{ClimateZone, Home, HomeFeatures, HomeId, UserId, ensure_owner};
pub use lifecycle::{
    AnnualPlan, CompleteResult, CompleteStatus, RescheduleRequest, RescheduleResult,
    UncompleteResult, UncompleteStatus, complete, complete_instance, generate_annual,
    instructions_for, recommended, reschedule, schedule_manual, uncomplete,
};
pub use priority::{PriorityTier, TaskHistory, score};
pub use schedule::{InstanceId, ScheduleInstance, TaskCompletion, TaskCustomization};
pub use store::{MemoryStore, ScheduleStore};
pub use template::{
    Capability, Category, Difficulty, Frequency, SeasonalAffinity, TaskTemplate, TemplateId,
    capabilities_from_text,
};
