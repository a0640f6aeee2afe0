//! Persistence seam for schedule state.
//!
//! The engine talks to storage through `ScheduleStore`. The get-or-create
//! operations must be atomic in a real backend (unique constraint on
//! (home, date) and on (instance, template)); `MemoryStore` satisfies this
//! trivially since every call holds `&mut self`.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::home::HomeId;
use crate::schedule::{InstanceId, ScheduleInstance, TaskCompletion, TaskCustomization};
use crate::template::TemplateId;

pub trait ScheduleStore {
    fn instance(&self, id: InstanceId) -> Option<&ScheduleInstance>;

    fn find_by_date(&self, home: HomeId, date: NaiveDate) -> Option<InstanceId>;

    /// Find the instance for (home, date) or create an empty one.
    /// This is the merge-by-date primitive; it never produces a second
    /// instance for an occupied date.
    fn get_or_create_instance(&mut self, home: HomeId, date: NaiveDate) -> InstanceId;

    fn attach_task(&mut self, id: InstanceId, template: TemplateId) -> Result<()>;

    /// Remove a task; returns whether it was present.
    fn remove_task(&mut self, id: InstanceId, template: TemplateId) -> Result<bool>;

    /// Delete an instance and cascade its completions and customizations.
    fn delete_instance(&mut self, id: InstanceId) -> Result<()>;

    /// Move an instance to a date not already held by another instance of
    /// the same home. Callers handle occupied targets by merging first.
    fn set_date(&mut self, id: InstanceId, date: NaiveDate) -> Result<()>;

    fn append_note(&mut self, id: InstanceId, note: &str) -> Result<()>;

    fn set_priority_hint(&mut self, id: InstanceId, hint: u8) -> Result<()>;

    fn set_completed_flag(&mut self, id: InstanceId, completed: bool) -> Result<()>;

    fn instances_for_home(&self, home: HomeId) -> Vec<&ScheduleInstance>;

    fn completion(&self, instance: InstanceId, template: TemplateId) -> Option<&TaskCompletion>;

    /// Insert unless a record for the pair already exists. Returns whether
    /// the insert happened.
    fn try_insert_completion(&mut self, record: TaskCompletion) -> bool;

    fn delete_completion(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
    ) -> Option<TaskCompletion>;

    /// Any completion record for this (home, template) pair, on any instance.
    fn has_completion(&self, home: HomeId, template: TemplateId) -> bool;

    /// An instance for this (home, template) pair dated strictly before
    /// `today` whose task is still unfinished.
    fn has_overdue(&self, home: HomeId, template: TemplateId, today: NaiveDate) -> bool;

    fn customization(
        &self,
        instance: InstanceId,
        template: TemplateId,
    ) -> Option<&TaskCustomization>;

    /// Idempotent lazy creation: returns the existing customization or
    /// creates one holding `default_text`.
    fn get_or_create_customization(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
        default_text: &str,
    ) -> &TaskCustomization;

    fn set_customization(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
        text: &str,
    ) -> Result<()>;
}

/// In-memory reference store. Deterministic iteration (BTreeMap keyed by
/// instance id) so generation output is stable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    instances: BTreeMap<InstanceId, ScheduleInstance>,
    by_date: HashMap<(HomeId, NaiveDate), InstanceId>,
    completions: HashMap<(InstanceId, TemplateId), TaskCompletion>,
    customizations: HashMap<(InstanceId, TemplateId), TaskCustomization>,
    next_id: InstanceId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl ScheduleStore for MemoryStore {
    fn instance(&self, id: InstanceId) -> Option<&ScheduleInstance> {
        self.instances.get(&id)
    }

    fn find_by_date(&self, home: HomeId, date: NaiveDate) -> Option<InstanceId> {
        self.by_date.get(&(home, date)).copied()
    }

    fn get_or_create_instance(&mut self, home: HomeId, date: NaiveDate) -> InstanceId {
        if let Some(id) = self.by_date.get(&(home, date)) {
            return *id;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.instances.insert(id, ScheduleInstance::new(id, home, date));
        self.by_date.insert((home, date), id);
        id
    }

    fn attach_task(&mut self, id: InstanceId, template: TemplateId) -> Result<()> {
        let Some(inst) = self.instances.get_mut(&id) else {
            bail!("no schedule instance {id}");
        };
        inst.tasks.insert(template);
        Ok(())
    }

    fn remove_task(&mut self, id: InstanceId, template: TemplateId) -> Result<bool> {
        let Some(inst) = self.instances.get_mut(&id) else {
            bail!("no schedule instance {id}");
        };
        Ok(inst.tasks.remove(&template))
    }

    fn delete_instance(&mut self, id: InstanceId) -> Result<()> {
        let Some(inst) = self.instances.remove(&id) else {
            bail!("no schedule instance {id}");
        };
        self.by_date.remove(&(inst.home, inst.date));
        self.completions.retain(|(i, _), _| *i != id);
        self.customizations.retain(|(i, _), _| *i != id);
        Ok(())
    }

    fn set_date(&mut self, id: InstanceId, date: NaiveDate) -> Result<()> {
        let Some(inst) = self.instances.get(&id) else {
            bail!("no schedule instance {id}");
        };
        let home = inst.home;
        let old = inst.date;
        if let Some(other) = self.by_date.get(&(home, date))
            && *other != id
        {
            bail!("home {home} already has instance {other} on {date}");
        }
        self.by_date.remove(&(home, old));
        self.by_date.insert((home, date), id);
        if let Some(inst) = self.instances.get_mut(&id) {
            inst.date = date;
        }
        Ok(())
    }

    fn append_note(&mut self, id: InstanceId, note: &str) -> Result<()> {
        let Some(inst) = self.instances.get_mut(&id) else {
            bail!("no schedule instance {id}");
        };
        if !inst.notes.is_empty() {
            inst.notes.push('\n');
        }
        inst.notes.push_str(note);
        Ok(())
    }

    fn set_priority_hint(&mut self, id: InstanceId, hint: u8) -> Result<()> {
        let Some(inst) = self.instances.get_mut(&id) else {
            bail!("no schedule instance {id}");
        };
        inst.priority_hint = Some(hint);
        Ok(())
    }

    fn set_completed_flag(&mut self, id: InstanceId, completed: bool) -> Result<()> {
        let Some(inst) = self.instances.get_mut(&id) else {
            bail!("no schedule instance {id}");
        };
        inst.completed = completed;
        Ok(())
    }

    fn instances_for_home(&self, home: HomeId) -> Vec<&ScheduleInstance> {
        self.instances.values().filter(|i| i.home == home).collect()
    }

    fn completion(&self, instance: InstanceId, template: TemplateId) -> Option<&TaskCompletion> {
        self.completions.get(&(instance, template))
    }

    fn try_insert_completion(&mut self, record: TaskCompletion) -> bool {
        let key = (record.instance, record.template);
        if self.completions.contains_key(&key) {
            return false;
        }
        self.completions.insert(key, record);
        true
    }

    fn delete_completion(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
    ) -> Option<TaskCompletion> {
        self.completions.remove(&(instance, template))
    }

    fn has_completion(&self, home: HomeId, template: TemplateId) -> bool {
        self.completions.values().any(|c| {
            c.template == template
                && self
                    .instances
                    .get(&c.instance)
                    .is_some_and(|i| i.home == home)
        })
    }

    fn has_overdue(&self, home: HomeId, template: TemplateId, today: NaiveDate) -> bool {
        self.instances.values().any(|i| {
            i.home == home
                && i.date < today
                && !i.completed
                && i.has_task(template)
                && !self.completions.contains_key(&(i.id, template))
        })
    }

    fn customization(
        &self,
        instance: InstanceId,
        template: TemplateId,
    ) -> Option<&TaskCustomization> {
        self.customizations.get(&(instance, template))
    }

    fn get_or_create_customization(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
        default_text: &str,
    ) -> &TaskCustomization {
        self.customizations
            .entry((instance, template))
            .or_insert_with(|| TaskCustomization {
                instance,
                template,
                instructions: default_text.to_string(),
            })
    }

    fn set_customization(
        &mut self,
        instance: InstanceId,
        template: TemplateId,
        text: &str,
    ) -> Result<()> {
        let entry = self
            .customizations
            .entry((instance, template))
            .or_insert_with(|| TaskCustomization {
                instance,
                template,
                instructions: String::new(),
            });
        entry.instructions = text.to_string();
        Ok(())
    }
}
