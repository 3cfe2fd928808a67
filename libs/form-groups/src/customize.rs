//! Resource-specific reclassification applied after generic grouping

use crate::group::{DraftGroup, GroupField, OTHER_ID};
use crate::resource::ResourceKind;
use chartform_models::ElementDefinition;

pub const COMPONENT_GROUP_ID: &str = "component";
pub const COMPONENT_GROUP_TITLE: &str = "Component Observations";
pub const ACTIVITIES_GROUP_ID: &str = "activities";
pub const ACTIVITIES_GROUP_TITLE: &str = "Activities";
pub const MEDICATION_GROUP_ID: &str = "medication";
pub const MEDICATION_GROUP_TITLE: &str = "Medication Information";

/// Fields pulled out of MedicationRequest groups, including the
/// expanded forms of `medication[x]`.
pub const MEDICATION_FIELDS: [&str; 6] = [
    "medication[x]",
    "medicationCodeableConcept",
    "medicationReference",
    "dosageInstruction",
    "dispenseRequest",
    "substitution",
];

/// Canonical content of the "Medication Information" group.
pub const MEDICATION_GROUP_FIELDS: [&str; 4] = [
    "medication[x]",
    "dosageInstruction",
    "dispenseRequest",
    "substitution",
];

/// Which fields the "Medication Information" group lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MedicationFieldPolicy {
    /// All canonical fields whenever any of them is present
    #[default]
    Canonical,
    /// Only the canonical fields the definition actually declares
    PresentOnly,
}

/// Apply the reclassification rules for `kind`. No-op for kinds without rules.
pub fn apply_resource_rules(
    kind: &ResourceKind,
    root: &str,
    groups: &mut Vec<DraftGroup>,
    elements: &[ElementDefinition],
    medication_policy: MedicationFieldPolicy,
) {
    match kind {
        ResourceKind::Observation => isolate_components(groups),
        ResourceKind::CarePlan => isolate_activities(root, groups, elements),
        ResourceKind::MedicationRequest => {
            gather_medication_fields(root, groups, elements, medication_policy)
        }
        ResourceKind::Patient | ResourceKind::Encounter | ResourceKind::Unknown(_) => {}
    }
}

fn isolate_components(groups: &mut Vec<DraftGroup>) {
    if let Some(group) = groups.iter_mut().find(|g| g.id == COMPONENT_GROUP_ID) {
        group.title = COMPONENT_GROUP_TITLE.to_string();
        return;
    }

    let taken = take_everywhere(groups, "component");
    if !taken.is_empty() {
        insert_before_other(
            groups,
            DraftGroup::new(COMPONENT_GROUP_ID, COMPONENT_GROUP_TITLE).with_fields(taken),
        );
    }
}

fn isolate_activities(root: &str, groups: &mut Vec<DraftGroup>, elements: &[ElementDefinition]) {
    let mut taken = take_everywhere(groups, "activity");
    let activity_path = format!("{}.activity", root);
    let declared = elements.iter().any(|e| e.path == activity_path);

    if groups.iter().any(|g| g.id == ACTIVITIES_GROUP_ID) || (taken.is_empty() && !declared) {
        return;
    }
    if taken.is_empty() {
        taken.push(GroupField::from_path(&activity_path));
    }
    insert_before_other(
        groups,
        DraftGroup::new(ACTIVITIES_GROUP_ID, ACTIVITIES_GROUP_TITLE).with_fields(taken),
    );
}

fn gather_medication_fields(
    root: &str,
    groups: &mut Vec<DraftGroup>,
    elements: &[ElementDefinition],
    policy: MedicationFieldPolicy,
) {
    for name in MEDICATION_FIELDS {
        take_everywhere(groups, name);
    }

    let declared: Vec<&str> = elements
        .iter()
        .filter(|e| e.parent_path() == Some(root))
        .filter_map(|e| canonical_medication_field(e.leaf_name()))
        .collect();
    if declared.is_empty() {
        return;
    }

    let fields = MEDICATION_GROUP_FIELDS
        .iter()
        .filter(|name| policy == MedicationFieldPolicy::Canonical || declared.contains(*name))
        .map(|name| GroupField::from_path(&format!("{}.{}", root, name)))
        .collect();
    insert_before_other(
        groups,
        DraftGroup::new(MEDICATION_GROUP_ID, MEDICATION_GROUP_TITLE).with_fields(fields),
    );
}

/// Map a declared field onto its canonical medication field name
fn canonical_medication_field(name: &str) -> Option<&'static str> {
    match name {
        "medication[x]" | "medicationCodeableConcept" | "medicationReference" => {
            Some("medication[x]")
        }
        _ => MEDICATION_GROUP_FIELDS.iter().find(|f| **f == name).copied(),
    }
}

fn take_everywhere(groups: &mut [DraftGroup], name: &str) -> Vec<GroupField> {
    groups.iter_mut().flat_map(|g| g.take(name)).collect()
}

/// Keep "Other Information" last
fn insert_before_other(groups: &mut Vec<DraftGroup>, group: DraftGroup) {
    match groups.iter().position(|g| g.id == OTHER_ID) {
        Some(pos) => groups.insert(pos, group),
        None => groups.push(group),
    }
}
