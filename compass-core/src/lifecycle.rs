//! Schedule lifecycle manager: completion, undo, reschedule, annual
//! generation.
//!
//! Every operation is synchronous and runs under the caller's transaction
//! boundary. Ownership checks (`home::ensure_owner`) are the calling
//! layer's job; operations here assume the actor is already authorized.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::applicability::applicable_tasks;
use crate::distribute::{distribute, next_due};
use crate::home::{Home, UserId};
use crate::priority::{TaskHistory, score};
use crate::schedule::{InstanceId, TaskCompletion};
use crate::store::ScheduleStore;
use crate::template::{TaskTemplate, TemplateId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompleteStatus {
    Completed {
        next_due: NaiveDate,
        follow_up: InstanceId,
        /// The follow-up landed on an instance that already existed.
        merged: bool,
    },
    /// Informational no-op: a record for this pair already exists.
    AlreadyCompleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteResult {
    pub status: CompleteStatus,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UncompleteStatus {
    Uncompleted {
        /// The auto-generated follow-up instance was deleted because this
        /// task was its only content.
        follow_up_deleted: bool,
    },
    /// Informational no-op: nothing was completed for this pair.
    NotCompleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncompleteResult {
    pub status: UncompleteStatus,
    pub summary: String,
}

/// Where to move a schedule instance: a quick delta or an explicit date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescheduleRequest {
    /// +7 days.
    NextWeek,
    /// +30 days.
    NextMonth,
    On(NaiveDate),
}

impl RescheduleRequest {
    /// Parse a request string: `+7`, `+30`, or an ISO date (`YYYY-MM-DD`).
    /// Rejected before any mutation happens.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "+7" => Ok(RescheduleRequest::NextWeek),
            "+30" => Ok(RescheduleRequest::NextMonth),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(RescheduleRequest::On)
                .with_context(|| format!("invalid reschedule date '{other}'")),
        }
    }

    fn resolve(self, from: NaiveDate) -> NaiveDate {
        match self {
            RescheduleRequest::NextWeek => from + Duration::days(7),
            RescheduleRequest::NextMonth => from + Duration::days(30),
            RescheduleRequest::On(date) => date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleResult {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// The move collided with an existing instance and merged into it.
    pub merged_into: Option<InstanceId>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualPlan {
    pub instances: Vec<InstanceId>,
    pub task_count: usize,
    pub summary: String,
}

/// Mark one task on one instance complete and schedule its next occurrence.
///
/// Idempotent: a second call for the same pair reports `AlreadyCompleted`
/// and changes nothing.
pub fn complete<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    template: &TaskTemplate,
    instance_id: InstanceId,
    actor: UserId,
    today: NaiveDate,
) -> Result<CompleteResult> {
    let instance = store
        .instance(instance_id)
        .with_context(|| format!("no schedule instance {instance_id}"))?;
    if instance.home != home.id {
        bail!("instance {instance_id} does not belong to home {}", home.id);
    }
    if !instance.has_task(template.id) {
        bail!(
            "task '{}' is not on the schedule for {}",
            template.title,
            instance.date
        );
    }
    let instance_date = instance.date;

    if store.completion(instance_id, template.id).is_some() {
        return Ok(CompleteResult {
            status: CompleteStatus::AlreadyCompleted,
            summary: format!("'{}' was already completed on this date", template.title),
        });
    }

    let due = next_due(template, home, instance_date);
    let inserted = store.try_insert_completion(TaskCompletion {
        instance: instance_id,
        template: template.id,
        completed_by: actor,
        completed_on: today,
        next_due: due,
    });
    if !inserted {
        // Lost the race against a concurrent completion.
        return Ok(CompleteResult {
            status: CompleteStatus::AlreadyCompleted,
            summary: format!("'{}' was already completed on this date", template.title),
        });
    }

    let merged = store.find_by_date(home.id, due).is_some();
    let follow_up = store.get_or_create_instance(home.id, due);
    store.attach_task(follow_up, template.id)?;

    Ok(CompleteResult {
        status: CompleteStatus::Completed {
            next_due: due,
            follow_up,
            merged,
        },
        summary: format!("'{}' completed; next due {due}", template.title),
    })
}

/// Undo a completion: delete the record and unwind the auto-generated
/// follow-up, removing the follow-up instance if it held only this task.
pub fn uncomplete<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    template: &TaskTemplate,
    instance_id: InstanceId,
) -> Result<UncompleteResult> {
    let instance = store
        .instance(instance_id)
        .with_context(|| format!("no schedule instance {instance_id}"))?;
    if instance.home != home.id {
        bail!("instance {instance_id} does not belong to home {}", home.id);
    }

    let Some(record) = store.delete_completion(instance_id, template.id) else {
        return Ok(UncompleteResult {
            status: UncompleteStatus::NotCompleted,
            summary: format!("'{}' is not completed on this date", template.title),
        });
    };

    let mut follow_up_deleted = false;
    if let Some(follow_up) = store.find_by_date(home.id, record.next_due)
        && follow_up != instance_id
    {
        store.remove_task(follow_up, template.id)?;
        let now_empty = store.instance(follow_up).is_some_and(|i| i.is_empty());
        if now_empty {
            store.delete_instance(follow_up)?;
            follow_up_deleted = true;
        }
    }

    Ok(UncompleteResult {
        status: UncompleteStatus::Uncompleted { follow_up_deleted },
        summary: format!("'{}' is pending again", template.title),
    })
}

/// Move an instance to a new date. Past dates are permitted (explicit user
/// override). Landing on an occupied date merges into that instance and
/// deletes the moved one.
pub fn reschedule<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    instance_id: InstanceId,
    request: RescheduleRequest,
    reason: &str,
) -> Result<RescheduleResult> {
    let instance = store
        .instance(instance_id)
        .with_context(|| format!("no schedule instance {instance_id}"))?;
    if instance.home != home.id {
        bail!("instance {instance_id} does not belong to home {}", home.id);
    }
    let from = instance.date;
    let to = request.resolve(from);

    if to == from {
        return Ok(RescheduleResult {
            from,
            to,
            merged_into: None,
            summary: format!("schedule already on {to}"),
        });
    }

    let note = if reason.is_empty() {
        format!("Rescheduled from {from} to {to}")
    } else {
        format!("Rescheduled from {from} to {to}: {reason}")
    };

    let merged_into = match store.find_by_date(home.id, to) {
        Some(target) if target != instance_id => {
            let tasks: Vec<TemplateId> = store
                .instance(instance_id)
                .map(|i| i.tasks.iter().copied().collect())
                .unwrap_or_default();
            for t in tasks {
                store.attach_task(target, t)?;
            }
            store.delete_instance(instance_id)?;
            store.append_note(target, &note)?;
            Some(target)
        }
        _ => {
            store.set_date(instance_id, to)?;
            store.append_note(instance_id, &note)?;
            None
        }
    };

    Ok(RescheduleResult {
        from,
        to,
        merged_into,
        summary: note,
    })
}

/// Manually schedule a set of tasks on one date, merging into any existing
/// instance for that date.
pub fn schedule_manual<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    date: NaiveDate,
    templates: &[TemplateId],
    notes: &str,
) -> Result<InstanceId> {
    if templates.is_empty() {
        bail!("a schedule needs at least one task");
    }
    let id = store.get_or_create_instance(home.id, date);
    for t in templates {
        store.attach_task(id, *t)?;
    }
    if !notes.is_empty() {
        store.append_note(id, notes)?;
    }
    Ok(id)
}

/// Applicable templates scored best-first. Ties break on template id so the
/// ordering is stable.
pub fn recommended<'a, S: ScheduleStore>(
    store: &S,
    home: &Home,
    catalog: &'a [TaskTemplate],
    today: NaiveDate,
    limit: Option<usize>,
) -> Vec<(&'a TaskTemplate, u8)> {
    let mut scored: Vec<(&TaskTemplate, u8)> = applicable_tasks(home, catalog, today)
        .into_iter()
        .map(|t| {
            let history = TaskHistory {
                overdue: store.has_overdue(home.id, t.id, today),
                completed_before: store.has_completion(home.id, t.id),
            };
            (t, score(t, home, history, today))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
    if let Some(n) = limit {
        scored.truncate(n);
    }
    scored
}

/// Run the full pipeline for one home: filter, score, distribute, persist.
/// One instance per distinct date, annotated with the average priority of
/// the tasks placed there.
pub fn generate_annual<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    catalog: &[TaskTemplate],
    today: NaiveDate,
) -> Result<AnnualPlan> {
    let ranked = recommended(store, home, catalog, today, None);
    let templates: Vec<&TaskTemplate> = ranked.iter().map(|(t, _)| *t).collect();
    let scores: BTreeMap<TemplateId, u8> = ranked.iter().map(|(t, s)| (t.id, *s)).collect();

    let placements = distribute(&templates, home, today);

    // Group by date; one instance per distinct day.
    let mut by_date: BTreeMap<NaiveDate, Vec<TemplateId>> = BTreeMap::new();
    for (template_id, dates) in &placements {
        for date in dates {
            by_date.entry(*date).or_default().push(*template_id);
        }
    }

    let mut instances = Vec::new();
    let mut task_count = 0usize;
    for (date, template_ids) in &by_date {
        let id = store.get_or_create_instance(home.id, *date);
        for t in template_ids {
            store.attach_task(id, *t)?;
        }
        task_count += template_ids.len();

        let total: u32 = template_ids.iter().map(|t| scores[t] as u32).sum();
        let avg = (total / template_ids.len() as u32) as u8;
        store.set_priority_hint(id, avg)?;
        instances.push(id);
    }

    Ok(AnnualPlan {
        task_count,
        summary: format!(
            "planned {} task occurrences across {} days for {}",
            task_count,
            instances.len(),
            home.name
        ),
        instances,
    })
}

/// Instruction text for a task on an instance: the customization if one
/// exists, otherwise one lazily created from the template's description.
pub fn instructions_for<S: ScheduleStore>(
    store: &mut S,
    instance_id: InstanceId,
    template: &TaskTemplate,
) -> Result<String> {
    if store.instance(instance_id).is_none() {
        bail!("no schedule instance {instance_id}");
    }
    Ok(store
        .get_or_create_customization(instance_id, template.id, &template.description)
        .instructions
        .clone())
}

/// Legacy whole-instance completion: complete every task on the instance
/// and set the superseded instance-level flag.
pub fn complete_instance<S: ScheduleStore>(
    store: &mut S,
    home: &Home,
    catalog: &[TaskTemplate],
    instance_id: InstanceId,
    actor: UserId,
    today: NaiveDate,
) -> Result<Vec<CompleteResult>> {
    let tasks: Vec<TemplateId> = store
        .instance(instance_id)
        .with_context(|| format!("no schedule instance {instance_id}"))?
        .tasks
        .iter()
        .copied()
        .collect();

    let mut results = Vec::new();
    for task_id in tasks {
        let template = catalog
            .iter()
            .find(|t| t.id == task_id)
            .with_context(|| format!("template {task_id} missing from catalog"))?;
        results.push(complete(store, home, template, instance_id, actor, today)?);
    }
    store.set_completed_flag(instance_id, true)?;
    Ok(results)
}
