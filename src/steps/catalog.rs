//! Step catalog: the fixed list of disclosure sections for each stepper layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Step identifier. Dense, 1-based, defines display order.
pub type StepId = u32;

/// What a step is about, independent of where a layout places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Documents,
    ApplicationForm,
    Photos,
    References,
    Guarantor,
    Submission,
    Fees,
    Collection,
    TravelDetails,
    Review,
}

/// The two stepper layouts found in the guide.
///
/// They differ in ordering, length and side effects, and are kept apart
/// rather than merged into one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepperVariant {
    /// Eight steps, documents first, fee step 7. Preserves scroll on toggle.
    #[default]
    Standard,
    /// Ten steps ending with travel details and review. Mirrors its state
    /// to the settings store.
    Extended,
}

impl StepperVariant {
    /// Whether toggling in this layout asks the view to keep its scroll offset.
    pub fn preserves_scroll(&self) -> bool {
        matches!(self, Self::Standard)
    }

    /// Whether this layout persists its state unless configured otherwise.
    pub fn persists_by_default(&self) -> bool {
        matches!(self, Self::Extended)
    }

    fn definitions(&self) -> &'static [StepDef] {
        match self {
            Self::Standard => STANDARD_STEPS,
            Self::Extended => EXTENDED_STEPS,
        }
    }
}

impl fmt::Display for StepperVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        };
        write!(f, "{s}")
    }
}

impl FromStr for StepperVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            other => Err(format!("unknown stepper variant {other:?}")),
        }
    }
}

/// One disclosure section of the guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: StepId,
    pub kind: StepKind,
    pub title: &'static str,
    /// Opaque display payload.
    pub content: &'static str,
}

struct StepDef {
    kind: StepKind,
    title: &'static str,
    content: &'static str,
}

const DOCUMENTS: StepDef = StepDef {
    kind: StepKind::Documents,
    title: "Gather Required Documents",
    content: "You need all of the following: proof of Canadian citizenship (original \
              birth or citizenship certificate, or a printed e-certificate), a document \
              to support your identity, and any previous passport.",
};

const APPLICATION_FORM: StepDef = StepDef {
    kind: StepKind::ApplicationForm,
    title: "Download application form",
    content: "Download and complete the adult passport application form. Declare a lost \
              or stolen passport if it applies to you.",
};

const PHOTOS: StepDef = StepDef {
    kind: StepKind::Photos,
    title: "Get Passport Photos",
    content: "Get 2 identical passport photos taken by a commercial photographer. One must \
              be signed by your guarantor.",
};

const REFERENCES: StepDef = StepDef {
    kind: StepKind::References,
    title: "Find References",
    content: "List 2 references who are not family members and who have known you for at \
              least 2 years.",
};

const GUARANTOR: StepDef = StepDef {
    kind: StepKind::Guarantor,
    title: "Find a Guarantor",
    content: "Your guarantor must be a Canadian passport holder aged 18 or over who has \
              known you for at least 2 years.",
};

const SUBMISSION: StepDef = StepDef {
    kind: StepKind::Submission,
    title: "Find out how to submit your application",
    content: "Apply in person at a passport office or Service Canada Centre, or by mail.",
};

const FEES: StepDef = StepDef {
    kind: StepKind::Fees,
    title: "Calculate your fees",
    content: "Choose a processing time, a passport type and any additional services. \
              Fees are paid in person by card, certified cheque or money order. No refunds.",
};

const COLLECTION: StepDef = StepDef {
    kind: StepKind::Collection,
    title: "Getting your passport",
    content: "If you applied by mail, your passport is mailed to you. If you applied in \
              person, pick it up at the office where you applied.",
};

const TRAVEL_DETAILS: StepDef = StepDef {
    kind: StepKind::TravelDetails,
    title: "Tell us about your travel plans",
    content: "Enter your planned departure date and destination, then submit.",
};

const REVIEW: StepDef = StepDef {
    kind: StepKind::Review,
    title: "Review and confirm",
    content: "Check your answers before you go to the passport office.",
};

static STANDARD_STEPS: &[StepDef] = &[
    DOCUMENTS,
    APPLICATION_FORM,
    PHOTOS,
    REFERENCES,
    GUARANTOR,
    SUBMISSION,
    FEES,
    COLLECTION,
];

static EXTENDED_STEPS: &[StepDef] = &[
    DOCUMENTS,
    PHOTOS,
    GUARANTOR,
    REFERENCES,
    APPLICATION_FORM,
    FEES,
    SUBMISSION,
    COLLECTION,
    TRAVEL_DETAILS,
    REVIEW,
];

/// The ordered steps of one stepper layout.
#[derive(Debug, Clone)]
pub struct StepCatalog {
    variant: StepperVariant,
    steps: Vec<Step>,
}

impl StepCatalog {
    /// Build the catalog for a layout. Ids follow list position, starting at 1.
    pub fn for_variant(variant: StepperVariant) -> Self {
        let steps = variant
            .definitions()
            .iter()
            .zip(1..)
            .map(|(def, id)| Step {
                id,
                kind: def.kind,
                title: def.title,
                content: def.content,
            })
            .collect();
        Self { variant, steps }
    }

    pub fn variant(&self) -> StepperVariant {
        self.variant
    }

    /// Number of steps; also the highest valid id.
    pub fn len(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, id: StepId) -> bool {
        (1..=self.len()).contains(&id)
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        if !self.contains(id) {
            return None;
        }
        self.steps.get((id - 1) as usize)
    }

    /// First step of the given kind, if the layout has one.
    pub fn find(&self, kind: StepKind) -> Option<&Step> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_ordered() {
        for variant in [StepperVariant::Standard, StepperVariant::Extended] {
            let catalog = StepCatalog::for_variant(variant);
            let ids: Vec<StepId> = catalog.iter().map(|s| s.id).collect();
            let expected: Vec<StepId> = (1..=catalog.len()).collect();
            assert_eq!(ids, expected, "{variant} ids should be 1..=N");
        }
    }

    #[test]
    fn variants_differ_in_length_and_order() {
        let standard = StepCatalog::for_variant(StepperVariant::Standard);
        let extended = StepCatalog::for_variant(StepperVariant::Extended);
        assert_eq!(standard.len(), 8);
        assert_eq!(extended.len(), 10);
        assert_eq!(standard.find(StepKind::Fees).unwrap().id, 7);
        assert_eq!(extended.find(StepKind::Fees).unwrap().id, 6);
        assert_eq!(extended.get(10).unwrap().kind, StepKind::Review);
        assert!(standard.find(StepKind::TravelDetails).is_none());
    }

    #[test]
    fn get_rejects_out_of_range() {
        let catalog = StepCatalog::for_variant(StepperVariant::Standard);
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(9).is_none());
        assert_eq!(catalog.get(1).unwrap().title, "Gather Required Documents");
        assert_eq!(catalog.get(8).unwrap().title, "Getting your passport");
    }

    #[test]
    fn variant_flags() {
        assert!(StepperVariant::Standard.preserves_scroll());
        assert!(!StepperVariant::Standard.persists_by_default());
        assert!(!StepperVariant::Extended.preserves_scroll());
        assert!(StepperVariant::Extended.persists_by_default());
    }

    #[test]
    fn display_matches_serde() {
        for variant in [StepperVariant::Standard, StepperVariant::Extended] {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(format!("\"{variant}\""), json);
            assert_eq!(variant.to_string().parse::<StepperVariant>().unwrap(), variant);
        }
    }
}
