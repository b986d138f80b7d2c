//! Read-time mapping of stored category labels onto a project's current tree.
//!
//! Legacy rows store their category as free text captured when the row was
//! written. The tree may have been renamed since, or the label may come from
//! a different preset vocabulary. Resolution tries, in order:
//!
//! 1. exact match ignoring case,
//! 2. match after stripping everything but letters and digits,
//! 3. membership in the same synonym group of that tier,
//!
//! and otherwise hands the stored label back unchanged. Nothing here writes
//! to the store.

use crate::libs::category::{Category, CategoryRef, Tier};
use crate::libs::task::Task;
use serde::Serialize;

/// Known vocabularies that name the same bucket of work.
///
/// Members are compared in normalized form, so spacing and punctuation do not
/// matter. Common misspellings seen in stored data are listed explicitly.
/// A group only applies to labels of its own tier.
pub static SYNONYM_GROUPS: &[(&str, Tier, &[&str])] = &[
    ("structural", Tier::Tier1, &["structural", "structure", "structures", "framing", "foundation"]),
    ("systems", Tier::Tier1, &["systems", "system", "mep", "mechanical", "utilities"]),
    ("sheathing", Tier::Tier1, &["sheathing", "seathing", "sheething", "sheeting", "envelope", "enclosure"]),
    ("finishings", Tier::Tier1, &["finishings", "finishing", "finishes", "finish", "interiors"]),
    ("planning", Tier::Tier1, &["planning", "plan", "discovery"]),
    ("development", Tier::Tier1, &["development", "dev", "engineering", "implementation"]),
    ("testing", Tier::Tier1, &["testing", "tests", "qa", "quality assurance"]),
    ("deployment", Tier::Tier1, &["deployment", "deploy", "operations", "devops"]),
    ("foundation", Tier::Tier2, &["foundation", "foundations", "footings", "concrete"]),
    ("framing", Tier::Tier2, &["framing", "frame", "frames", "carpentry rough"]),
    ("roofing", Tier::Tier2, &["roofing", "roof", "roofs"]),
    ("electrical", Tier::Tier2, &["electrical", "electric", "electricity", "wiring"]),
    ("plumbing", Tier::Tier2, &["plumbing", "plumber", "pipes", "piping"]),
    ("hvac", Tier::Tier2, &["hvac", "heating", "cooling", "ventilation", "heating and cooling"]),
    ("barriers", Tier::Tier2, &["barriers", "barrier", "insulation", "house wrap", "vapor barrier"]),
    ("drywall", Tier::Tier2, &["drywall", "sheetrock", "gypsum", "plasterboard"]),
    ("exteriors", Tier::Tier2, &["exteriors", "exterior", "siding", "cladding"]),
    ("trim", Tier::Tier2, &["trim", "millwork", "moulding", "molding"]),
    ("flooring", Tier::Tier2, &["flooring", "floors", "floor", "tile"]),
    ("paint", Tier::Tier2, &["paint", "painting", "paints"]),
    ("cabinets", Tier::Tier2, &["cabinets", "cabinetry", "casework"]),
    ("fixtures", Tier::Tier2, &["fixtures", "fixture", "appliances"]),
    ("landscaping", Tier::Tier2, &["landscaping", "landscape", "yard", "hardscape"]),
    ("release", Tier::Tier2, &["release", "releases", "rollout", "ship"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    StructuredId,
    Exact,
    Normalized,
    Synonym,
    Unresolved,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MatchKind::StructuredId => "structured id",
            MatchKind::Exact => "exact",
            MatchKind::Normalized => "normalized",
            MatchKind::Synonym => "synonym",
            MatchKind::Unresolved => "unresolved",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCategory {
    pub name: String,
    pub color: Option<String>,
    pub category_id: Option<i64>,
    pub matched_by: MatchKind,
}

impl ResolvedCategory {
    fn matched(category: &Category, matched_by: MatchKind) -> Self {
        Self {
            name: category.name.clone(),
            color: Some(category.color.clone()),
            category_id: Some(category.id),
            matched_by,
        }
    }

    fn unresolved(stored_name: &str) -> Self {
        Self {
            name: stored_name.to_string(),
            color: None,
            category_id: None,
            matched_by: MatchKind::Unresolved,
        }
    }
}

/// Lower-cases and drops everything that is not a letter or digit.
pub fn normalize(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

fn share_synonym_group(a: &str, b: &str, tier: Tier) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    SYNONYM_GROUPS.iter().filter(|(_, group_tier, _)| *group_tier == tier).any(|(_, _, members)| {
        let members: Vec<String> = members.iter().map(|m| normalize(m)).collect();
        members.iter().any(|m| m == a) && members.iter().any(|m| m == b)
    })
}

/// Finds the current category a stored label refers to, if any.
pub fn resolve_category<'a>(stored_name: &str, tier: Tier, categories: &'a [Category]) -> Option<(&'a Category, MatchKind)> {
    let stored = stored_name.trim();
    if stored.is_empty() {
        return None;
    }
    let candidates: Vec<&Category> = categories.iter().filter(|c| c.tier == tier).collect();

    if let Some(found) = candidates.iter().find(|c| c.name.trim().to_lowercase() == stored.to_lowercase()) {
        return Some((*found, MatchKind::Exact));
    }

    let normalized = normalize(stored);
    if !normalized.is_empty() {
        if let Some(found) = candidates.iter().find(|c| normalize(&c.name) == normalized) {
            return Some((*found, MatchKind::Normalized));
        }
    }

    candidates
        .iter()
        .find(|c| share_synonym_group(&normalized, &normalize(&c.name), tier))
        .map(|found| (*found, MatchKind::Synonym))
}

/// Category a new row may be linked to by id.
///
/// Only exact and normalized matches qualify. A synonym match is a display
/// hint and never becomes a stored reference.
pub fn link_category<'a>(stored_name: &str, tier: Tier, categories: &'a [Category]) -> Option<&'a Category> {
    match resolve_category(stored_name, tier, categories) {
        Some((category, MatchKind::Exact | MatchKind::Normalized)) => Some(category),
        _ => None,
    }
}

/// Display name for a stored label; the label itself when nothing matches.
pub fn resolve_category_name(stored_name: &str, tier: Tier, categories: &[Category]) -> String {
    match resolve_category(stored_name, tier, categories) {
        Some((category, _)) => category.name.clone(),
        None => stored_name.to_string(),
    }
}

/// Resolves a category reference. A structured id that no longer exists in
/// the tree yields `None`; legacy names always produce a value.
pub fn resolve_ref(reference: &CategoryRef, categories: &[Category]) -> Option<ResolvedCategory> {
    match reference {
        CategoryRef::ByStructuredId(id) => categories
            .iter()
            .find(|c| c.id == *id)
            .map(|c| ResolvedCategory::matched(c, MatchKind::StructuredId)),
        CategoryRef::ByLegacyName { tier, name } => Some(match resolve_category(name, *tier, categories) {
            Some((category, kind)) => ResolvedCategory::matched(category, kind),
            None => ResolvedCategory::unresolved(name),
        }),
    }
}

/// Resolves the category shown for a task.
///
/// A dangling `category_id` falls back to the task's legacy labels, tier2
/// first.
pub fn resolve_task(task: &Task, categories: &[Category]) -> Option<ResolvedCategory> {
    if let Some(resolved) = task.category_ref().and_then(|r| resolve_ref(&r, categories)) {
        return Some(resolved);
    }
    let legacy = [(Tier::Tier2, &task.tier2_category), (Tier::Tier1, &task.tier1_category)];
    legacy
        .into_iter()
        .filter_map(|(tier, name)| name.as_deref().filter(|n| !n.trim().is_empty()).map(|n| (tier, n)))
        .find_map(|(tier, name)| {
            resolve_ref(
                &CategoryRef::ByLegacyName {
                    tier,
                    name: name.to_string(),
                },
                categories,
            )
        })
}
