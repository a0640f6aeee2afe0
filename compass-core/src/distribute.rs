//! Date distributor: turns templates into concrete dates on a one-year
//! horizon, and computes single next-due dates for recurrence.
//!
//! Harsher climates divide the recurrence interval, so tasks come due
//! sooner. Placement is deterministic for a fixed start date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::calendar::{HORIZON_DAYS, month_day, preferred_months};
use crate::home::{ClimateZone, Home};
use crate::template::{Frequency, TaskTemplate, TemplateId};

/// Climate difficulty multiplier. >1.0 means more frequent maintenance.
pub fn climate_multiplier(zone: ClimateZone) -> f64 {
    match zone {
        ClimateZone::Tropical => 1.3,
        ClimateZone::Dry => 1.1,
        ClimateZone::Temperate => 1.0,
        ClimateZone::Continental => 1.2,
        ClimateZone::Polar => 1.5,
        ClimateZone::Midwest => 1.2,
        ClimateZone::Northeast => 1.3,
        ClimateZone::Southeast => 1.3,
        ClimateZone::Southwest => 1.1,
        ClimateZone::Northwest => 1.1,
    }
}

/// Next due date for one task: base interval divided by the climate
/// multiplier (truncated to whole days), added to `from`.
pub fn next_due(template: &TaskTemplate, home: &Home, from: NaiveDate) -> NaiveDate {
    let base = template.frequency.base_interval_days();
    let adjusted = (base as f64 / climate_multiplier(home.climate_zone)) as i64;
    from + Duration::days(adjusted)
}

/// Distribute each template's occurrences across the year starting at
/// `start`. Dates outside [start, start + 365d] are dropped.
pub fn distribute(
    templates: &[&TaskTemplate],
    home: &Home,
    start: NaiveDate,
) -> BTreeMap<TemplateId, Vec<NaiveDate>> {
    let mut out = BTreeMap::new();
    for template in templates {
        out.insert(template.id, place(template, home, start));
    }
    out
}

/// Occurrence dates for a single template. Already window-filtered.
pub fn place(template: &TaskTemplate, _home: &Home, start: NaiveDate) -> Vec<NaiveDate> {
    let months = preferred_months(template.affinity, start);
    let end = start + Duration::days(HORIZON_DAYS);

    let mut dates = match template.frequency {
        Frequency::Weekly => {
            let mut out = Vec::new();
            if let Some(&(y, m)) = months.first() {
                let mut d = month_day(y, m, 1);
                while d <= end {
                    out.push(d);
                    d += Duration::days(7);
                }
            }
            out
        }
        Frequency::Monthly => months.iter().map(|&(y, m)| month_day(y, m, 1)).collect(),
        Frequency::Quarterly => {
            if months.len() >= 4 {
                // Four evenly strided preferred months, mid-month.
                let n = months.len();
                (0..4)
                    .map(|i| {
                        let (y, m) = months[i * n / 4];
                        month_day(y, m, 15)
                    })
                    .collect()
            } else {
                (1..=4)
                    .map(|i| start + Duration::days(90 * i))
                    .collect()
            }
        }
        Frequency::Biannual => {
            if months.len() >= 2 {
                let (y1, m1) = months[0];
                let (y2, m2) = months[months.len() / 2];
                vec![month_day(y1, m1, 15), month_day(y2, m2, 15)]
            } else {
                vec![start + Duration::days(30), start + Duration::days(210)]
            }
        }
        Frequency::Annual => match annual_slot(template.id, &months) {
            Some(d) => vec![d],
            None => vec![start + Duration::days(30)],
        },
        Frequency::Biennial => match months.first() {
            Some(&(y, m)) => vec![month_day(y, m, 15)],
            None => vec![start + Duration::days(60)],
        },
        Frequency::AsNeeded => match months.first() {
            Some(&(y, m)) => vec![month_day(y, m, 15)],
            None => vec![start + Duration::days(45)],
        },
    };

    dates.retain(|d| *d >= start && *d <= end);
    dates
}

/// Deterministic annual slot: the template id picks both the month and a
/// day offset (1/8/15/22), spreading templates across their season instead
/// of bunching them on one date.
fn annual_slot(id: TemplateId, months: &[(i32, u32)]) -> Option<NaiveDate> {
    if months.is_empty() {
        return None;
    }
    let n = months.len() as u64;
    let (y, m) = months[(id % n) as usize];
    let day = [1, 8, 15, 22][((id / n) % 4) as usize];
    Some(month_day(y, m, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Category, SeasonalAffinity};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn home(zone: ClimateZone) -> Home {
        Home::new(1, 1, "House", 2000).with_climate(zone)
    }

    fn template(id: u64, frequency: Frequency, affinity: SeasonalAffinity) -> TaskTemplate {
        TaskTemplate::new(id, "t", Category::General, frequency).with_affinity(affinity)
    }

    #[test]
    fn next_due_quarterly_temperate_vs_polar() {
        let t = template(1, Frequency::Quarterly, SeasonalAffinity::Any);
        let from = d(2024, 1, 1);

        assert_eq!(next_due(&t, &home(ClimateZone::Temperate), from), d(2024, 3, 31));
        // 90 / 1.5 = 60 days.
        assert_eq!(next_due(&t, &home(ClimateZone::Polar), from), d(2024, 3, 1));
    }

    #[test]
    fn next_due_truncates_fractional_days() {
        let t = template(1, Frequency::Annual, SeasonalAffinity::Any);
        // 365 / 1.3 = 280.76 -> 280 days.
        let due = next_due(&t, &home(ClimateZone::Tropical), d(2024, 1, 1));
        assert_eq!(due, d(2024, 1, 1) + Duration::days(280));
    }

    #[test]
    fn next_due_monotonic_in_interval_and_climate() {
        let from = d(2024, 5, 1);
        let h = home(ClimateZone::Temperate);
        let freqs = [
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Biannual,
            Frequency::Annual,
            Frequency::Biennial,
        ];
        let mut prev = from;
        for f in freqs {
            let due = next_due(&template(1, f, SeasonalAffinity::Any), &h, from);
            assert!(due >= prev, "{f:?} regressed");
            prev = due;
        }

        // Harsher climate never pushes a date later.
        let t = template(1, Frequency::Annual, SeasonalAffinity::Any);
        let temperate = next_due(&t, &home(ClimateZone::Temperate), from);
        let polar = next_due(&t, &home(ClimateZone::Polar), from);
        assert!(polar <= temperate);
    }

    #[test]
    fn weekly_fills_the_horizon() {
        let t = template(1, Frequency::Weekly, SeasonalAffinity::Any);
        let start = d(2024, 1, 10);
        let dates = place(&t, &home(ClimateZone::Temperate), start);

        // Day 1 of the start month precedes the window and is filtered.
        assert!(dates.iter().all(|x| *x >= start));
        assert!(dates.len() >= 50);
        for w in dates.windows(2) {
            assert_eq!((w[1] - w[0]).num_days(), 7);
        }
    }

    #[test]
    fn monthly_lands_on_the_first_of_preferred_months() {
        let t = template(1, Frequency::Monthly, SeasonalAffinity::Summer);
        let dates = place(&t, &home(ClimateZone::Temperate), d(2024, 1, 1));
        assert_eq!(dates, vec![d(2024, 6, 1), d(2024, 7, 1), d(2024, 8, 1)]);
    }

    #[test]
    fn quarterly_any_strides_the_year() {
        let t = template(1, Frequency::Quarterly, SeasonalAffinity::Any);
        let dates = place(&t, &home(ClimateZone::Temperate), d(2024, 1, 1));
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 4, 15), d(2024, 7, 15), d(2024, 10, 15)]
        );
    }

    #[test]
    fn quarterly_seasonal_falls_back_to_90_day_steps() {
        // Only 3 preferred months, so the fallback applies.
        let t = template(1, Frequency::Quarterly, SeasonalAffinity::Spring);
        let start = d(2024, 1, 1);
        let dates = place(&t, &home(ClimateZone::Temperate), start);
        assert_eq!(
            dates,
            vec![
                start + Duration::days(90),
                start + Duration::days(180),
                start + Duration::days(270),
                start + Duration::days(360),
            ]
        );
    }

    #[test]
    fn biannual_uses_first_and_middle_preferred_month() {
        let t = template(1, Frequency::Biannual, SeasonalAffinity::Any);
        let dates = place(&t, &home(ClimateZone::Temperate), d(2024, 1, 1));
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 7, 15)]);
    }

    #[test]
    fn annual_spreads_templates_by_id() {
        let h = home(ClimateZone::Temperate);
        let start = d(2024, 1, 1);
        let a = place(&template(0, Frequency::Annual, SeasonalAffinity::Fall), &h, start);
        let b = place(&template(1, Frequency::Annual, SeasonalAffinity::Fall), &h, start);
        let c = place(&template(3, Frequency::Annual, SeasonalAffinity::Fall), &h, start);

        assert_eq!(a, vec![d(2024, 9, 1)]);
        assert_eq!(b, vec![d(2024, 10, 1)]);
        // id 3 wraps to the first month at the next day offset.
        assert_eq!(c, vec![d(2024, 9, 8)]);
    }

    #[test]
    fn all_dates_stay_inside_the_window() {
        let h = home(ClimateZone::Temperate);
        let start = d(2024, 3, 20);
        let end = start + Duration::days(HORIZON_DAYS);
        for f in [
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Biannual,
            Frequency::Annual,
            Frequency::Biennial,
            Frequency::AsNeeded,
        ] {
            for aff in [
                SeasonalAffinity::Spring,
                SeasonalAffinity::Winter,
                SeasonalAffinity::Any,
            ] {
                for date in place(&template(5, f, aff), &h, start) {
                    assert!(date >= start && date <= end, "{f:?}/{aff:?} out of window");
                }
            }
        }
    }
}
