//! compass-catalog: the standard maintenance task catalog.
//!
//! Read-only reference data for the engine. Catalog entries predate explicit
//! capability tagging, so each entry runs its text through the keyword
//! migration seed (`capabilities_from_text`) at build time.

use compass_core::template::{
    Category, Difficulty, Frequency, SeasonalAffinity, TaskTemplate, capabilities_from_text,
};

fn entry(
    id: u64,
    title: &str,
    description: &str,
    category: Category,
    frequency: Frequency,
) -> TaskTemplate {
    let mut t = TaskTemplate::new(id, title, category, frequency).with_description(description);
    for cap in capabilities_from_text(title, description) {
        t = t.with_capability(cap);
    }
    t
}

/// The standard task set. Ids are stable; the annual distributor uses them
/// to spread same-season tasks, so renumbering shifts placements.
pub fn standard_catalog() -> Vec<TaskTemplate> {
    vec![
        entry(
            1,
            "Change HVAC Filter",
            "Replace the air filter to maintain efficiency and air quality.",
            Category::Hvac,
            Frequency::Monthly,
        )
        .needs_hvac()
        .with_minutes(15),
        entry(
            2,
            "Clean Gutters",
            "Remove leaves and debris from gutters to prevent water damage.",
            Category::Exterior,
            Frequency::Biannual,
        )
        .with_affinity(SeasonalAffinity::Fall)
        .with_difficulty(Difficulty::Intermediate)
        .with_minutes(120),
        entry(
            3,
            "Test Smoke and Carbon Monoxide Detectors",
            "Ensure all safety detectors are functioning properly.",
            Category::Safety,
            Frequency::Monthly,
        )
        .with_minutes(10),
        entry(
            4,
            "Inspect and Clean Dryer Vent",
            "Prevent fire hazards by keeping dryer vents clear of lint.",
            Category::Appliances,
            Frequency::Quarterly,
        )
        .with_difficulty(Difficulty::Intermediate)
        .with_minutes(45),
        entry(
            5,
            "Test Garage Door Safety Features",
            "Verify the auto-reverse mechanism stops and reverses on contact.",
            Category::Exterior,
            Frequency::Monthly,
        )
        .with_minutes(10),
        entry(
            6,
            "Flush Water Heater",
            "Drain sediment buildup to extend water heater life and efficiency.",
            Category::Plumbing,
            Frequency::Annual,
        )
        .with_difficulty(Difficulty::Intermediate)
        .with_minutes(60),
        entry(
            7,
            "Inspect Roof for Damage",
            "Check shingles, flashing, and seals for wear from the ground or a ladder.",
            Category::Exterior,
            Frequency::Biannual,
        )
        .with_affinity(SeasonalAffinity::Spring)
        .with_difficulty(Difficulty::Intermediate)
        .with_minutes(45),
        entry(
            8,
            "Seal Windows and Doors",
            "Re-caulk and weatherstrip drafty openings before heating season.",
            Category::Interior,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Fall)
        .with_minutes(90),
        entry(
            9,
            "Clean Range Hood Filter",
            "Degrease the hood filter so the kitchen vents properly.",
            Category::Appliances,
            Frequency::Quarterly,
        )
        .with_minutes(20),
        entry(
            10,
            "Test Sump Pump",
            "Pour water into the pit and confirm the sump pump cycles and drains.",
            Category::Plumbing,
            Frequency::Quarterly,
        )
        .with_affinity(SeasonalAffinity::Spring)
        .needs_basement()
        .with_minutes(15),
        entry(
            11,
            "Winterize Outdoor Faucets",
            "Shut off and drain exterior spigots before the first hard freeze.",
            Category::Seasonal,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Fall)
        .with_minutes(30),
        entry(
            12,
            "Clean Refrigerator Coils",
            "Vacuum the condenser coils so the compressor runs efficiently.",
            Category::Appliances,
            Frequency::Biannual,
        )
        .with_minutes(30),
        entry(
            13,
            "Clean Solar Panels",
            "Rinse solar panels and check mounts and wiring for wear.",
            Category::Exterior,
            Frequency::Biannual,
        )
        .with_affinity(SeasonalAffinity::Spring)
        .with_minutes(60),
        entry(
            14,
            "Inspect Septic Tank",
            "Have the tank levels checked and pumped if needed.",
            Category::Plumbing,
            Frequency::Biennial,
        )
        .needs_septic()
        .with_difficulty(Difficulty::Professional)
        .with_minutes(120),
        entry(
            15,
            "Test Well Water Quality",
            "Send a well water sample for bacteria and nitrate testing.",
            Category::Safety,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Spring)
        .with_minutes(30),
        entry(
            16,
            "Inspect Fence Line",
            "Walk the fence line and repair loose posts, rails, and gates.",
            Category::Yard,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Summer)
        .with_minutes(60),
        entry(
            17,
            "Winterize Irrigation System",
            "Blow out irrigation lines and shut down the controller for winter.",
            Category::Yard,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Fall)
        .with_difficulty(Difficulty::Advanced)
        .with_minutes(90),
        entry(
            18,
            "Inspect and Sweep Chimney",
            "Have the chimney and wood stove flue inspected and swept before burning season.",
            Category::Safety,
            Frequency::Annual,
        )
        .with_affinity(SeasonalAffinity::Fall)
        .with_difficulty(Difficulty::Professional)
        .with_minutes(120),
    ]
}
