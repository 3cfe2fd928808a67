//! Hand-authored groupings used when no StructureDefinition can be loaded

use crate::group::{FormGroup, OTHER_ID, OVERVIEW_ID, OVERVIEW_TITLE};
use crate::resource::ResourceKind;

/// Compile-time form group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticGroup {
    pub id: &'static str,
    pub title: &'static str,
    pub elements: &'static [&'static str],
    pub description: Option<&'static str>,
}

impl StaticGroup {
    pub fn to_form_group(&self) -> FormGroup {
        FormGroup {
            id: self.id.to_string(),
            title: self.title.to_string(),
            elements: self.elements.iter().map(|e| e.to_string()).collect(),
            description: self.description.map(str::to_string),
        }
    }
}

const PATIENT_GROUPS: &[StaticGroup] = &[
    StaticGroup {
        id: OVERVIEW_ID,
        title: OVERVIEW_TITLE,
        elements: &["identifier", "active", "name", "gender", "birthDate", "deceased[x]"],
        description: None,
    },
    StaticGroup {
        id: "contact",
        title: "Contact Information",
        elements: &["telecom", "address", "contact"],
        description: Some("How to reach the patient and their contacts"),
    },
    StaticGroup {
        id: OTHER_ID,
        title: "Additional Information",
        elements: &[
            "maritalStatus",
            "multipleBirth[x]",
            "communication",
            "generalPractitioner",
            "managingOrganization",
            "link",
        ],
        description: None,
    },
];

const ENCOUNTER_GROUPS: &[StaticGroup] = &[
    StaticGroup {
        id: OVERVIEW_ID,
        title: OVERVIEW_TITLE,
        elements: &[
            "identifier",
            "status",
            "class",
            "type",
            "serviceType",
            "priority",
            "subject",
            "period",
        ],
        description: None,
    },
    StaticGroup {
        id: "participants",
        title: "Participants",
        elements: &["participant", "episodeOfCare", "basedOn", "appointment"],
        description: None,
    },
    StaticGroup {
        id: "clinical",
        title: "Clinical Details",
        elements: &["reasonCode", "reasonReference", "diagnosis", "length"],
        description: Some("Why the encounter took place"),
    },
    StaticGroup {
        id: "hospitalization",
        title: "Hospitalization Details",
        elements: &["hospitalization"],
        description: None,
    },
    StaticGroup {
        id: "location",
        title: "Location",
        elements: &["location", "serviceProvider"],
        description: None,
    },
];

const OBSERVATION_GROUPS: &[StaticGroup] = &[
    StaticGroup {
        id: OVERVIEW_ID,
        title: OVERVIEW_TITLE,
        elements: &[
            "status",
            "category",
            "code",
            "subject",
            "encounter",
            "effective[x]",
            "issued",
        ],
        description: None,
    },
    StaticGroup {
        id: "result",
        title: "Result",
        elements: &[
            "value[x]",
            "dataAbsentReason",
            "interpretation",
            "note",
            "referenceRange",
        ],
        description: Some("The measured or asserted value"),
    },
    StaticGroup {
        id: "context",
        title: "Context",
        elements: &[
            "performer",
            "method",
            "specimen",
            "device",
            "bodySite",
            "basedOn",
            "partOf",
        ],
        description: None,
    },
    StaticGroup {
        id: "component",
        title: "Component Observations",
        elements: &["component"],
        description: None,
    },
];

const MEDICATION_REQUEST_GROUPS: &[StaticGroup] = &[
    StaticGroup {
        id: OVERVIEW_ID,
        title: OVERVIEW_TITLE,
        elements: &[
            "status",
            "statusReason",
            "intent",
            "category",
            "priority",
            "subject",
            "encounter",
            "authoredOn",
            "requester",
        ],
        description: None,
    },
    StaticGroup {
        id: "medication",
        title: "Medication Information",
        elements: &[
            "medication[x]",
            "dosageInstruction",
            "dispenseRequest",
            "substitution",
        ],
        description: Some("What is prescribed and how it is taken"),
    },
    StaticGroup {
        id: "reason",
        title: "Reason",
        elements: &["reasonCode", "reasonReference", "note"],
        description: None,
    },
];

const CARE_PLAN_GROUPS: &[StaticGroup] = &[
    StaticGroup {
        id: OVERVIEW_ID,
        title: OVERVIEW_TITLE,
        elements: &[
            "status",
            "intent",
            "category",
            "title",
            "description",
            "subject",
            "period",
            "created",
            "author",
        ],
        description: None,
    },
    StaticGroup {
        id: "team",
        title: "Care Team",
        elements: &["contributor", "careTeam", "addresses", "goal"],
        description: None,
    },
    StaticGroup {
        id: "activities",
        title: "Activities",
        elements: &["activity"],
        description: None,
    },
    StaticGroup {
        id: OTHER_ID,
        title: "Other Information",
        elements: &["note", "supportingInfo", "basedOn", "replaces", "partOf"],
        description: None,
    },
];

const DEFAULT_GROUPS: &[StaticGroup] = &[StaticGroup {
    id: OVERVIEW_ID,
    title: OVERVIEW_TITLE,
    elements: &["status", "code", "subject", "identifier"],
    description: None,
}];

/// The static table for a resource kind
pub fn static_groups(kind: &ResourceKind) -> &'static [StaticGroup] {
    match kind {
        ResourceKind::Patient => PATIENT_GROUPS,
        ResourceKind::Encounter => ENCOUNTER_GROUPS,
        ResourceKind::Observation => OBSERVATION_GROUPS,
        ResourceKind::MedicationRequest => MEDICATION_REQUEST_GROUPS,
        ResourceKind::CarePlan => CARE_PLAN_GROUPS,
        ResourceKind::Unknown(_) => DEFAULT_GROUPS,
    }
}

/// Owned copy of the static table for a resource kind. Never empty.
pub fn fallback_groups(kind: &ResourceKind) -> Vec<FormGroup> {
    static_groups(kind)
        .iter()
        .map(StaticGroup::to_form_group)
        .collect()
}
