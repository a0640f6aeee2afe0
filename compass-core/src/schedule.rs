//! Schedule records: instances, per-task completions, customizations.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::home::{HomeId, UserId};
use crate::template::TemplateId;

pub type InstanceId = u64;

/// One calendar date for one home, holding every task due that day.
///
/// At most one instance exists per (home, date); tasks landing on an
/// occupied date merge into the existing instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInstance {
    pub id: InstanceId,
    pub home: HomeId,
    pub date: NaiveDate,
    pub tasks: BTreeSet<TemplateId>,
    pub notes: String,

    /// Legacy whole-instance flag. Superseded by per-task completion
    /// records but still honored by overdue checks.
    pub completed: bool,

    /// Average priority of the tasks placed here by annual generation,
    /// for human review. None for manually created instances.
    pub priority_hint: Option<u8>,
}

impl ScheduleInstance {
    pub fn new(id: InstanceId, home: HomeId, date: NaiveDate) -> Self {
        Self {
            id,
            home,
            date,
            tasks: BTreeSet::new(),
            notes: String::new(),
            completed: false,
            priority_hint: None,
        }
    }

    pub fn has_task(&self, template: TemplateId) -> bool {
        self.tasks.contains(&template)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Durable evidence that one task on one instance was finished.
/// At most one record exists per (instance, template) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub instance: InstanceId,
    pub template: TemplateId,
    pub completed_by: UserId,
    pub completed_on: NaiveDate,
    /// The follow-up due date computed at completion time. Undo uses this
    /// to find the auto-generated follow-up.
    pub next_due: NaiveDate,
}

/// Per (instance, template) instruction override. Created lazily on first
/// access, seeded from the template's own text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCustomization {
    pub instance: InstanceId,
    pub template: TemplateId,
    pub instructions: String,
}
