//! Topic registry.
//!
//! Each topic is a category of service affected by ESSB 5814 and maps to an
//! ordered list of guidance documents. The shared documents are appended to
//! every topic's list. References are relative to a guidance root; a leading
//! `/` is stripped by the loader.

/// A reference to one citable guidance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceEntry {
    /// Path of the document text, relative to the guidance root
    pub reference: &'static str,
    /// Citation label shown above the document text
    pub label: &'static str,
}

/// Documents cited for every topic.
pub const SHARED_GUIDANCE: &[GuidanceEntry] = &[GuidanceEntry {
    reference: "/wa-guidance/shared/das-retail/guidance.txt",
    label: "Interim Guidance — DAS exclusions and definition of \"retail sale\" (ESSB 5814)",
}];

/// A service category with its own guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    It,
    Marketing,
    Webdev,
    Software,
    Engineering,
    Staffing,
    Security,
    Presentations,
    ProfessionalServices,
    DataProcessing,
    Contracts,
}

impl Topic {
    /// Every topic, in declaration order.
    pub const ALL: [Topic; 11] = [
        Topic::It,
        Topic::Marketing,
        Topic::Webdev,
        Topic::Software,
        Topic::Engineering,
        Topic::Staffing,
        Topic::Security,
        Topic::Presentations,
        Topic::ProfessionalServices,
        Topic::DataProcessing,
        Topic::Contracts,
    ];

    /// The wire identifier of this topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Marketing => "marketing",
            Self::Webdev => "webdev",
            Self::Software => "software",
            Self::Engineering => "engineering",
            Self::Staffing => "staffing",
            Self::Security => "security",
            Self::Presentations => "presentations",
            Self::ProfessionalServices => "professional-services",
            Self::DataProcessing => "data-processing",
            Self::Contracts => "contracts",
        }
    }

    /// Exact, case-sensitive lookup. No trimming or case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Lookup on untyped input. Anything but an exact topic string is `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value.as_str().and_then(Self::parse)
    }

    /// Documents specific to this topic, in citation order.
    pub fn guidance(&self) -> &'static [GuidanceEntry] {
        match self {
            Self::It => &[GuidanceEntry {
                reference: "/wa-guidance/it/guidance.txt",
                label: "Interim Guidance — Information Technology Services (ESSB 5814)",
            }],
            Self::Marketing => &[GuidanceEntry {
                reference: "/wa-guidance/marketing/guidance.txt",
                label: "Interim Guidance — Advertising Services (ESSB 5814)",
            }],
            Self::Webdev => &[GuidanceEntry {
                reference: "/wa-guidance/webdev/guidance.txt",
                label: "Interim Guidance — Custom Website Development (ESSB 5814)",
            }],
            Self::Software => &[GuidanceEntry {
                reference: "/wa-guidance/software/guidance.txt",
                label: "Interim Guidance — Custom Software (ESSB 5814)",
            }],
            Self::Engineering => &[GuidanceEntry {
                reference: "/wa-guidance/engineering/guidance.txt",
                label: "Interim Guidance — Professional Services with Digital Delivery (ESSB 5814)",
            }],
            Self::Staffing => &[GuidanceEntry {
                reference: "/wa-guidance/staffing/guidance.txt",
                label: "Interim Guidance — Temporary Staffing Services (ESSB 5814)",
            }],
            Self::Security => &[GuidanceEntry {
                reference: "/wa-guidance/security/guidance.txt",
                label: "Interim Guidance — Investigation, Security, Security Monitoring, and Armored Car (ESSB 5814)",
            }],
            Self::Presentations => &[GuidanceEntry {
                reference: "/wa-guidance/presentations/guidance.txt",
                label: "Interim Guidance — Live Presentations (ESSB 5814)",
            }],
            Self::ProfessionalServices => &[GuidanceEntry {
                reference: "/wa-guidance/professional-services/guidance.txt",
                label: "Interim Guidance — Professional Services & DAS Features (ESSB 5814)",
            }],
            Self::DataProcessing => &[GuidanceEntry {
                reference: "/wa-guidance/data-processing/guidance.txt",
                label: "Interim Guidance — Data Processing & AI Platforms (ESSB 5814)",
            }],
            Self::Contracts => &[GuidanceEntry {
                reference: "/wa-guidance/contracts/guidance.txt",
                label: "Interim Guidance — Existing Contracts prior to Oct 1, 2025 (ESSB 5814)",
            }],
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic-specific entries followed by the shared entries.
pub fn entries_for(topic: Topic) -> Vec<GuidanceEntry> {
    topic
        .guidance()
        .iter()
        .chain(SHARED_GUIDANCE)
        .copied()
        .collect()
}

/// Membership test on untyped input.
pub fn is_valid_topic(value: &serde_json::Value) -> bool {
    Topic::from_value(value).is_some()
}
