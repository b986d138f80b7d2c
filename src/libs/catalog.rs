//! Static catalog of task templates.
//!
//! Each template is a blueprint for one concrete task in a project. The `id`
//! is stable across releases and is the idempotency key used by
//! materialization, so ids are never reused for a different piece of work.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier1_category: &'static str,
    pub tier2_category: &'static str,
    /// Free-text tag carried over to the task.
    pub category: &'static str,
    pub estimated_duration_days: u32,
}

const fn tpl(
    id: &'static str,
    tier1_category: &'static str,
    tier2_category: &'static str,
    category: &'static str,
    title: &'static str,
    description: &'static str,
    estimated_duration_days: u32,
) -> TaskTemplate {
    TaskTemplate {
        id,
        title,
        description,
        tier1_category,
        tier2_category,
        category,
        estimated_duration_days,
    }
}

static TEMPLATES: &[TaskTemplate] = &[
    // Structural
    tpl("FN1", "Structural", "Foundation", "excavation", "Site excavation", "Clear, grade and excavate the building footprint", 3),
    tpl("FN2", "Structural", "Foundation", "concrete", "Pour footings", "Form and pour footings, schedule inspection", 4),
    tpl("FN3", "Structural", "Foundation", "concrete", "Foundation walls", "Form and pour foundation walls, apply waterproofing", 7),
    tpl("FR1", "Structural", "Framing", "framing", "Floor framing", "Install sill plates, joists and subfloor", 5),
    tpl("FR2", "Structural", "Framing", "framing", "Wall framing", "Frame exterior and interior walls, set headers", 10),
    tpl("FR3", "Structural", "Framing", "framing", "Roof framing", "Set trusses or rafters and roof sheathing", 6),
    tpl("RF1", "Structural", "Roofing", "roofing", "Underlayment and flashing", "Install ice barrier, underlayment and flashing", 2),
    tpl("RF2", "Structural", "Roofing", "roofing", "Roof covering", "Install shingles or metal roofing", 4),
    // Systems
    tpl("EL1", "Systems", "Electrical", "electrical", "Electrical rough-in", "Run circuits, set boxes and panel", 5),
    tpl("EL2", "Systems", "Electrical", "electrical", "Electrical trim-out", "Install devices, fixtures and make final connections", 3),
    tpl("PL1", "Systems", "Plumbing", "plumbing", "Plumbing rough-in", "Run supply and drain lines, pressure test", 5),
    tpl("PL2", "Systems", "Plumbing", "plumbing", "Plumbing trim-out", "Set fixtures and water heater", 3),
    tpl("HV1", "Systems", "HVAC", "hvac", "HVAC rough-in", "Install ductwork, line sets and equipment pads", 4),
    tpl("HV2", "Systems", "HVAC", "hvac", "HVAC startup", "Set registers, commission and balance the system", 2),
    // Sheathing
    tpl("BR1", "Sheathing", "Barriers", "insulation", "Insulation", "Insulate walls, attic and rim joists", 3),
    tpl("BR2", "Sheathing", "Barriers", "weatherproofing", "House wrap", "Install weather-resistive barrier and tape seams", 2),
    tpl("DR1", "Sheathing", "Drywall", "drywall", "Hang drywall", "Hang board on walls and ceilings", 5),
    tpl("DR2", "Sheathing", "Drywall", "drywall", "Tape and finish", "Tape, mud and sand to finish level", 6),
    tpl("EX1", "Sheathing", "Exteriors", "siding", "Siding", "Install siding and exterior trim", 7),
    tpl("EX2", "Sheathing", "Exteriors", "windows", "Windows and exterior doors", "Set and flash windows and exterior doors", 3),
    // Finishings
    tpl("TR1", "Finishings", "Trim", "carpentry", "Interior trim", "Install casing, baseboard and interior doors", 5),
    tpl("FL1", "Finishings", "Flooring", "flooring", "Flooring", "Install hardwood, tile and carpet", 6),
    tpl("PT1", "Finishings", "Paint", "paint", "Interior paint", "Prime and paint walls, ceilings and trim", 5),
    tpl("CB1", "Finishings", "Cabinets", "cabinetry", "Cabinets and countertops", "Set cabinets, template and install countertops", 4),
    tpl("FX1", "Finishings", "Fixtures", "fixtures", "Fixtures and appliances", "Install lighting, hardware and appliances", 3),
    tpl("LS1", "Finishings", "Landscaping", "landscaping", "Final grade and landscaping", "Final grading, seed or sod, plantings", 4),
];

pub fn get_all_templates() -> &'static [TaskTemplate] {
    TEMPLATES
}

pub fn get_template_by_id(id: &str) -> Option<&'static TaskTemplate> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

pub fn get_templates_by_tier1(tier1: &str) -> Vec<&'static TaskTemplate> {
    let tier1 = tier1.trim();
    TEMPLATES.iter().filter(|t| t.tier1_category.eq_ignore_ascii_case(tier1)).collect()
}

pub fn get_templates_by_tier2(tier1: &str, tier2: &str) -> Vec<&'static TaskTemplate> {
    let (tier1, tier2) = (tier1.trim(), tier2.trim());
    TEMPLATES
        .iter()
        .filter(|t| t.tier1_category.eq_ignore_ascii_case(tier1) && t.tier2_category.eq_ignore_ascii_case(tier2))
        .collect()
}
