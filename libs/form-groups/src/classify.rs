//! Partition StructureDefinition elements into form groups
//!
//! Elements are filtered down to the ones worth editing, backbone elements
//! become group anchors, direct children of the root go to the Overview and
//! everything left over lands in "Other Information". Group order is
//! Overview, backbone groups by anchor position, Other.

use crate::element::ElementType;
use crate::group::{
    backbone_title, DraftGroup, GroupField, OTHER_ID, OTHER_TITLE, OVERVIEW_ID, OVERVIEW_TITLE,
};
use chartform_models::{is_descendant_path, ElementDefinition};
use std::collections::HashSet;

/// Root-level fields that carry resource plumbing rather than content.
pub const STRUCTURAL_FIELDS: [&str; 8] = [
    "id",
    "meta",
    "implicitRules",
    "language",
    "text",
    "contained",
    "extension",
    "modifierExtension",
];

/// Fields every backbone element inherits from `BackboneElement`.
pub const BACKBONE_STRUCTURAL_FIELDS: [&str; 3] = ["id", "extension", "modifierExtension"];

/// Leaves of composite types still shown when nested one level below the root.
pub const SIMPLE_SUB_ELEMENTS: [&str; 8] = [
    "coding",
    "text",
    "display",
    "reference",
    "value",
    "unit",
    "system",
    "code",
];

/// An element that passed filtering, with its position in the source array
#[derive(Debug, Clone)]
pub struct SurvivingElement<'a> {
    pub index: usize,
    pub element: &'a ElementDefinition,
    pub element_type: ElementType,
}

impl SurvivingElement<'_> {
    pub fn path(&self) -> &str {
        &self.element.path
    }
}

/// Apply the structural denylist and depth rules, keeping source order.
pub fn surviving_elements<'a>(
    root: &str,
    elements: &'a [ElementDefinition],
) -> Vec<SurvivingElement<'a>> {
    let mut anchors: Vec<&str> = Vec::new();
    let mut survivors = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        let path = element.path.as_str();
        if !is_descendant_path(path, root) || is_structural(root, path) {
            continue;
        }

        let leaf = element.leaf_name();
        let depth = element.depth();
        let under_anchor = element
            .parent_path()
            .is_some_and(|parent| anchors.contains(&parent));

        if under_anchor && BACKBONE_STRUCTURAL_FIELDS.contains(&leaf) {
            continue;
        }

        let element_type = ElementType::of(element);
        if depth > 2 {
            let keep = matches!(element_type, ElementType::Polymorphic(_))
                || (depth == 3 && SIMPLE_SUB_ELEMENTS.contains(&leaf))
                || under_anchor;
            if !keep {
                continue;
            }
        }

        if element_type.is_backbone() && !anchors.contains(&path) {
            anchors.push(path);
        }
        survivors.push(SurvivingElement {
            index,
            element,
            element_type,
        });
    }

    survivors
}

/// True for `Root.<structural>` and anything below it
fn is_structural(root: &str, path: &str) -> bool {
    path.get(root.len() + 1..)
        .and_then(|relative| relative.split('.').next())
        .is_some_and(|first| STRUCTURAL_FIELDS.contains(&first))
}

struct Anchor<'a> {
    path: &'a str,
    group: DraftGroup,
}

/// Group the elements of the definition rooted at `root`.
///
/// The result always contains Overview first and Other last, possibly
/// empty; callers drop empty groups once reclassification has run.
pub fn classify_elements(root: &str, elements: &[ElementDefinition]) -> Vec<DraftGroup> {
    let survivors = surviving_elements(root, elements);

    // survivors are in source order, so anchors are already sorted by position.
    // Sliced profiles repeat a backbone path; the first occurrence is the anchor.
    let mut anchors: Vec<Anchor<'_>> = Vec::new();
    for survivor in survivors.iter().filter(|s| s.element_type.is_backbone()) {
        if anchors.iter().any(|a| a.path == survivor.path()) {
            continue;
        }
        let taken: Vec<&str> = anchors.iter().map(|a| a.group.id.as_str()).collect();
        let mut group = DraftGroup::new(
            anchor_group_id(root, survivor.path(), &taken),
            backbone_title(survivor.element.leaf_name()),
        );
        group.description = survivor.element.short.clone();
        anchors.push(Anchor {
            path: survivor.path(),
            group,
        });
    }

    let mut overview = DraftGroup::new(OVERVIEW_ID, OVERVIEW_TITLE);
    let mut other = DraftGroup::new(OTHER_ID, OTHER_TITLE);

    let mut placed: HashSet<&str> = HashSet::new();
    for survivor in survivors.iter().filter(|s| !s.element_type.is_backbone()) {
        if !placed.insert(survivor.path()) {
            continue;
        }
        let field = GroupField::from_path(survivor.path());
        if survivor.element.depth() == 2 {
            overview.fields.push(field);
            continue;
        }

        let owner = anchors
            .iter_mut()
            .filter(|a| is_descendant_path(survivor.path(), a.path))
            .max_by_key(|a| a.path.len());
        match owner {
            Some(anchor) => anchor.group.fields.push(field),
            None => other.fields.push(field),
        }
    }

    let mut groups = Vec::with_capacity(anchors.len() + 2);
    groups.push(overview);
    groups.extend(anchors.into_iter().map(|a| a.group));
    groups.push(other);

    tracing::debug!(
        root,
        elements = elements.len(),
        survivors = survivors.len(),
        groups = groups.len(),
        "Classified structure definition elements"
    );

    groups
}

/// Lower-cased leaf, else the lower-cased relative path, else that path with
/// the first free numeric suffix.
fn anchor_group_id(root: &str, path: &str, taken: &[&str]) -> String {
    let unavailable = |id: &str| id == OVERVIEW_ID || id == OTHER_ID || taken.contains(&id);

    let leaf = chartform_models::leaf_segment(path).to_lowercase();
    if !unavailable(&leaf) {
        return leaf;
    }
    let relative = path
        .get(root.len() + 1..)
        .unwrap_or(path)
        .replace('.', "-")
        .to_lowercase();
    if !unavailable(&relative) {
        return relative;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}", relative, suffix);
        if !unavailable(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartform_models::BACKBONE_ELEMENT;

    fn el(path: &str, codes: &[&str]) -> ElementDefinition {
        ElementDefinition::new(path, codes)
    }

    fn paths(group: &DraftGroup) -> Vec<&str> {
        group.fields.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn structural_fields_are_discarded() {
        let elements = vec![
            el("Observation", &[]),
            el("Observation.id", &["string"]),
            el("Observation.meta", &["Meta"]),
            el("Observation.meta.versionId", &["id"]),
            el("Observation.text", &["Narrative"]),
            el("Observation.extension", &["Extension"]),
            el("Observation.extension.value[x]", &["string"]),
            el("Observation.status", &["code"]),
        ];

        let survivors = surviving_elements("Observation", &elements);
        let kept: Vec<&str> = survivors.iter().map(|s| s.path()).collect();
        assert_eq!(kept, vec!["Observation.status"]);
    }

    #[test]
    fn deep_elements_need_a_reason_to_stay() {
        let elements = vec![
            el("Observation", &[]),
            el("Observation.code", &["CodeableConcept"]),
            el("Observation.code.coding", &["Coding"]),
            el("Observation.code.coding.system", &["uri"]),
            el("Observation.code.text", &["string"]),
            el("Observation.code.id", &["string"]),
            el("Observation.referenceRange", &["Element"]),
            el("Observation.referenceRange.low", &["Quantity"]),
            el("Observation.referenceRange.low.value[x]", &["decimal"]),
        ];

        let survivors = surviving_elements("Observation", &elements);
        let kept: Vec<&str> = survivors.iter().map(|s| s.path()).collect();
        assert_eq!(
            kept,
            vec![
                "Observation.code",
                "Observation.code.coding",
                "Observation.code.text",
                "Observation.referenceRange",
                "Observation.referenceRange.low.value[x]",
            ]
        );
        assert_eq!(survivors[4].index, 8);
    }

    #[test]
    fn backbone_children_follow_their_anchor() {
        let elements = vec![
            el("Encounter", &[]),
            el("Encounter.status", &["code"]),
            el("Encounter.hospitalization", &[BACKBONE_ELEMENT]),
            el("Encounter.hospitalization.id", &["string"]),
            el("Encounter.hospitalization.extension", &["Extension"]),
            el("Encounter.hospitalization.admitSource", &["CodeableConcept"]),
            el("Encounter.hospitalization.origin", &["Reference"]),
            el("Encounter.hospitalization.origin.display", &["string"]),
            el("Encounter.period", &["Period"]),
        ];

        let groups = classify_elements("Encounter", &elements);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "hospitalization", "other"]);

        assert_eq!(paths(&groups[0]), vec!["Encounter.status", "Encounter.period"]);
        assert_eq!(groups[1].title, "Hospitalization Details");
        assert_eq!(
            paths(&groups[1]),
            vec![
                "Encounter.hospitalization.admitSource",
                "Encounter.hospitalization.origin",
            ]
        );
        assert!(groups[2].is_empty());
    }

    #[test]
    fn nested_backbones_get_their_own_group() {
        let elements = vec![
            el("Claim", &[]),
            el("Claim.item", &[BACKBONE_ELEMENT]),
            el("Claim.item.sequence", &["positiveInt"]),
            el("Claim.item.detail", &[BACKBONE_ELEMENT]),
            el("Claim.item.detail.sequence", &["positiveInt"]),
            el("Claim.item.detail.net", &["Money"]),
        ];

        let groups = classify_elements("Claim", &elements);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "item", "detail", "other"]);
        assert_eq!(paths(&groups[1]), vec!["Claim.item.sequence"]);
        assert_eq!(
            paths(&groups[2]),
            vec!["Claim.item.detail.sequence", "Claim.item.detail.net"]
        );
    }

    #[test]
    fn composite_leaves_go_to_other() {
        let elements = vec![
            el("Observation", &[]),
            el("Observation.code", &["CodeableConcept"]),
            el("Observation.code.text", &["string"]),
        ];

        let groups = classify_elements("Observation", &elements);
        let other = groups.last().unwrap();
        assert_eq!(other.id, OTHER_ID);
        assert_eq!(other.title, "Other Information");
        assert_eq!(other.fields[0].name, "text");
    }

    #[test]
    fn colliding_anchor_ids_use_relative_path() {
        let elements = vec![
            el("Contract", &[]),
            el("Contract.term", &[BACKBONE_ELEMENT]),
            el("Contract.term.asset", &[BACKBONE_ELEMENT]),
            el("Contract.term.asset.term", &[BACKBONE_ELEMENT]),
            el("Contract.term.asset.term.text", &["string"]),
        ];

        let groups = classify_elements("Contract", &elements);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "term", "asset", "term-asset-term", "other"]);
        assert_eq!(paths(&groups[3]), vec!["Contract.term.asset.term.text"]);
    }

    #[test]
    fn anchor_ids_never_shadow_reserved_or_taken_ids() {
        let elements = vec![
            el("Foo", &[]),
            el("Foo.other", &[BACKBONE_ELEMENT]),
            el("Foo.other.note", &["string"]),
            el("Foo.overview", &[BACKBONE_ELEMENT]),
            el("Foo.code", &["CodeableConcept"]),
            el("Foo.code.text", &["string"]),
        ];

        let groups = classify_elements("Foo", &elements);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "other-2", "overview-2", "other"]);
        assert_eq!(groups[1].title, "Other Details");
        assert_eq!(paths(&groups[1]), vec!["Foo.other.note"]);
        assert_eq!(paths(&groups[3]), vec!["Foo.code.text"]);
    }

    #[test]
    fn sliced_backbone_is_a_single_anchor() {
        let mut slice = el("Observation.component", &[BACKBONE_ELEMENT]);
        slice.id = Some("Observation.component:systolic".into());
        let mut slice_code = el("Observation.component.code", &["CodeableConcept"]);
        slice_code.id = Some("Observation.component:systolic.code".into());
        let elements = vec![
            el("Observation", &[]),
            el("Observation.status", &["code"]),
            el("Observation.component", &[BACKBONE_ELEMENT]),
            el("Observation.component.code", &["CodeableConcept"]),
            slice,
            slice_code,
            el("Observation.component.value[x]", &["Quantity"]),
        ];

        let groups = classify_elements("Observation", &elements);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "component", "other"]);
        assert_eq!(
            paths(&groups[1]),
            vec!["Observation.component.code", "Observation.component.value[x]"]
        );
    }

    #[test]
    fn anchors_carry_short_description() {
        let mut anchor = el("Encounter.hospitalization", &[BACKBONE_ELEMENT]);
        anchor.short = Some("Details about the admission to a healthcare service".into());
        let elements = vec![el("Encounter", &[]), anchor];

        let groups = classify_elements("Encounter", &elements);
        assert_eq!(
            groups[1].description.as_deref(),
            Some("Details about the admission to a healthcare service")
        );
    }
}
