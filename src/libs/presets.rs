//! Named category presets used to bootstrap a project's category tree.
//!
//! Presets are static configuration. Their `id` is the version key: changing
//! the contents of a shipped preset means shipping it under a new id.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetTier1 {
    pub name: &'static str,
    pub color: &'static str,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetTier2 {
    pub name: &'static str,
    pub color: &'static str,
    pub parent_tier1_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tier1: &'static [PresetTier1],
    pub tier2: &'static [PresetTier2],
}

impl Preset {
    /// Tier2 entries whose parent is not one of this preset's tier1 names.
    pub fn orphaned_tier2(&self) -> Vec<&PresetTier2> {
        self.tier2
            .iter()
            .filter(|entry| !self.tier1.iter().any(|t1| t1.name.eq_ignore_ascii_case(entry.parent_tier1_name)))
            .collect()
    }

    pub fn tier2_of(&self, tier1_name: &str) -> impl Iterator<Item = &PresetTier2> + '_ {
        let tier1_name = tier1_name.to_string();
        self.tier2.iter().filter(move |entry| entry.parent_tier1_name.eq_ignore_ascii_case(&tier1_name))
    }
}

const fn t1(name: &'static str, color: &'static str, sort_order: i64) -> PresetTier1 {
    PresetTier1 { name, color, sort_order }
}

const fn t2(parent_tier1_name: &'static str, name: &'static str, color: &'static str) -> PresetTier2 {
    PresetTier2 {
        name,
        color,
        parent_tier1_name,
    }
}

pub const HOME_BUILDER: Preset = Preset {
    id: "home-builder",
    name: "Home Builder",
    description: "Residential construction from foundation to finishes",
    tier1: &[
        t1("Structural", "#8B5A2B", 1),
        t1("Systems", "#2563EB", 2),
        t1("Sheathing", "#16A34A", 3),
        t1("Finishings", "#9333EA", 4),
    ],
    tier2: &[
        t2("Structural", "Foundation", "#A0522D"),
        t2("Structural", "Framing", "#CD853F"),
        t2("Structural", "Roofing", "#D2691E"),
        t2("Systems", "Electrical", "#3B82F6"),
        t2("Systems", "Plumbing", "#0EA5E9"),
        t2("Systems", "HVAC", "#06B6D4"),
        t2("Sheathing", "Barriers", "#22C55E"),
        t2("Sheathing", "Drywall", "#4ADE80"),
        t2("Sheathing", "Exteriors", "#15803D"),
        t2("Finishings", "Trim", "#A855F7"),
        t2("Finishings", "Flooring", "#C084FC"),
        t2("Finishings", "Paint", "#7E22CE"),
        t2("Finishings", "Cabinets", "#6B21A8"),
        t2("Finishings", "Fixtures", "#D8B4FE"),
        t2("Finishings", "Landscaping", "#65A30D"),
    ],
};

pub const SOFTWARE_DEVELOPMENT: Preset = Preset {
    id: "software-development",
    name: "Software Development",
    description: "Plan, build, verify and ship a software product",
    tier1: &[
        t1("Planning", "#0F766E", 1),
        t1("Development", "#1D4ED8", 2),
        t1("Testing", "#CA8A04", 3),
        t1("Deployment", "#B91C1C", 4),
    ],
    tier2: &[
        t2("Planning", "Requirements", "#14B8A6"),
        t2("Planning", "Architecture", "#0D9488"),
        t2("Development", "Frontend", "#3B82F6"),
        t2("Development", "Backend", "#2563EB"),
        t2("Development", "Database", "#1E40AF"),
        t2("Testing", "Unit Tests", "#EAB308"),
        t2("Testing", "Integration Tests", "#FACC15"),
        t2("Testing", "QA", "#A16207"),
        t2("Deployment", "Infrastructure", "#EF4444"),
        t2("Deployment", "Release", "#DC2626"),
        t2("Deployment", "Monitoring", "#991B1B"),
    ],
};

pub const REMODELING: Preset = Preset {
    id: "remodeling",
    name: "Remodeling",
    description: "Renovation of an existing structure",
    tier1: &[
        t1("Demolition", "#78716C", 1),
        t1("Rough Work", "#EA580C", 2),
        t1("Finish Work", "#7C3AED", 3),
    ],
    tier2: &[
        t2("Demolition", "Interior Demo", "#A8A29E"),
        t2("Demolition", "Debris Removal", "#57534E"),
        t2("Rough Work", "Framing Changes", "#F97316"),
        t2("Rough Work", "Rough Electrical", "#FB923C"),
        t2("Rough Work", "Rough Plumbing", "#FDBA74"),
        t2("Finish Work", "Surfaces", "#8B5CF6"),
        t2("Finish Work", "Fixtures & Hardware", "#A78BFA"),
    ],
};

static PRESETS: &[Preset] = &[HOME_BUILDER, SOFTWARE_DEVELOPMENT, REMODELING];

pub fn list_presets() -> &'static [Preset] {
    PRESETS
}

/// Looks up a preset by id, ignoring case and surrounding whitespace.
pub fn get_preset_by_id(id: &str) -> Option<&'static Preset> {
    let id = id.trim();
    PRESETS.iter().find(|preset| preset.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_presets_are_well_formed() {
        for preset in list_presets() {
            assert!(preset.orphaned_tier2().is_empty(), "{} has orphaned tier2 entries", preset.id);
            let mut names: Vec<String> = preset.tier2.iter().map(|t| t.name.to_lowercase()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), preset.tier2.len(), "{} repeats a tier2 name", preset.id);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(get_preset_by_id(" Home-Builder ").map(|p| p.id), Some("home-builder"));
        assert!(get_preset_by_id("space-station").is_none());
    }

    #[test]
    fn home_builder_has_four_roots() {
        assert_eq!(HOME_BUILDER.tier1.len(), 4);
        assert_eq!(HOME_BUILDER.tier2_of("structural").count(), 3);
    }
}
