//! Applicability filter: which catalog templates are relevant to a home.

use chrono::NaiveDate;

use crate::home::Home;
use crate::template::TaskTemplate;

/// True when every applicability rule passes for this template on this home.
///
/// Rules: active flag, age band, hard requirement flags, capability tags.
pub fn is_applicable(template: &TaskTemplate, home: &Home, today: NaiveDate) -> bool {
    if !template.active {
        return false;
    }

    if home.is_old(today) {
        if !template.applies_to_old {
            return false;
        }
    } else if !template.applies_to_new {
        return false;
    }

    let f = &home.features;
    if template.requires_basement && !f.basement {
        return false;
    }
    if template.requires_attic && !f.attic {
        return false;
    }
    if template.requires_hvac && !f.hvac {
        return false;
    }
    if template.requires_septic && !f.septic {
        return false;
    }

    template
        .capabilities
        .iter()
        .all(|cap| cap.satisfied_by(&home.features))
}

/// Filter a catalog down to the templates applicable to `home`.
///
/// Output order carries no meaning; callers wanting priority order run the
/// scorer next.
pub fn applicable_tasks<'a>(
    home: &Home,
    catalog: &'a [TaskTemplate],
    today: NaiveDate,
) -> Vec<&'a TaskTemplate> {
    catalog
        .iter()
        .filter(|t| is_applicable(t, home, today))
        .collect()
}
