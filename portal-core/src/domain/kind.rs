//! Resource kinds and step keys
//!
//! A pipeline references two families of services: resources the backend
//! provisions and reconciles itself ([`Kind`]), and tools that are only
//! recorded for information because the backend cannot manage them
//! ([`StepKey`]). Both travel over the wire as a bare identifier string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource type provisioned and reconciled by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    GithubRepository,
    JenkinsPipeline,
    GithubActionsWorkflow,
    PiperConfig,
    CumulusPipeline,
    CheckmarxOneScan,
    SonarQubeProject,
    OpenSourceComplianceScan,
    GithubAdvancedSecurity,
    JiraProject,
    StagingServiceCredential,
}

impl Kind {
    pub const ALL: [Kind; 11] = [
        Kind::GithubRepository,
        Kind::JenkinsPipeline,
        Kind::GithubActionsWorkflow,
        Kind::PiperConfig,
        Kind::CumulusPipeline,
        Kind::CheckmarxOneScan,
        Kind::SonarQubeProject,
        Kind::OpenSourceComplianceScan,
        Kind::GithubAdvancedSecurity,
        Kind::JiraProject,
        Kind::StagingServiceCredential,
    ];

    /// Identifier used by the GraphQL API
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::GithubRepository => "GithubRepository",
            Kind::JenkinsPipeline => "JenkinsPipeline",
            Kind::GithubActionsWorkflow => "GithubActionsWorkflow",
            Kind::PiperConfig => "PiperConfig",
            Kind::CumulusPipeline => "CumulusPipeline",
            Kind::CheckmarxOneScan => "CheckmarxOneScan",
            Kind::SonarQubeProject => "SonarQubeProject",
            Kind::OpenSourceComplianceScan => "OpenSourceComplianceScan",
            Kind::GithubAdvancedSecurity => "GithubAdvancedSecurity",
            Kind::JiraProject => "JiraProject",
            Kind::StagingServiceCredential => "StagingServiceCredential",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool that can be attached to a pipeline but never managed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKey {
    Fortify,
    Checkmarx,
    /// Mend, formerly WhiteSource
    WhiteSource,
}

impl StepKey {
    pub const ALL: [StepKey; 3] = [StepKey::Fortify, StepKey::Checkmarx, StepKey::WhiteSource];

    /// Identifier used by the GraphQL API
    pub fn as_str(self) -> &'static str {
        match self {
            StepKey::Fortify => "Fortify",
            StepKey::Checkmarx => "Checkmarx",
            StepKey::WhiteSource => "WhiteSource",
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `kind` field of a resource reference
///
/// Identifiers the portal does not know are kept verbatim in
/// [`KindOrStepKey::Unknown`] so that a newer backend never breaks
/// deserialization of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KindOrStepKey {
    Kind(Kind),
    Step(StepKey),
    Unknown(String),
}

impl KindOrStepKey {
    /// Parse a wire identifier, falling back to `Unknown`
    pub fn parse(input: &str) -> Self {
        if let Some(kind) = Kind::ALL.into_iter().find(|k| k.as_str() == input) {
            return KindOrStepKey::Kind(kind);
        }
        if let Some(step) = StepKey::ALL.into_iter().find(|s| s.as_str() == input) {
            return KindOrStepKey::Step(step);
        }
        KindOrStepKey::Unknown(input.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            KindOrStepKey::Kind(kind) => kind.as_str(),
            KindOrStepKey::Step(step) => step.as_str(),
            KindOrStepKey::Unknown(raw) => raw,
        }
    }

    /// The backend-managed kind, if this is one
    pub fn as_kind(&self) -> Option<Kind> {
        match self {
            KindOrStepKey::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<Kind> for KindOrStepKey {
    fn from(kind: Kind) -> Self {
        KindOrStepKey::Kind(kind)
    }
}

impl From<StepKey> for KindOrStepKey {
    fn from(step: StepKey) -> Self {
        KindOrStepKey::Step(step)
    }
}

impl From<String> for KindOrStepKey {
    fn from(s: String) -> Self {
        KindOrStepKey::parse(&s)
    }
}

impl From<&str> for KindOrStepKey {
    fn from(s: &str) -> Self {
        KindOrStepKey::parse(s)
    }
}

impl From<KindOrStepKey> for String {
    fn from(key: KindOrStepKey) -> Self {
        match key {
            KindOrStepKey::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for KindOrStepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
