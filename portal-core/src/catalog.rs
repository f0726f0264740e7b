//! Static metadata tables
//!
//! Immutable lookups from a kind or step key to its category, its display
//! name and its slot in the category's priority order. Identifiers missing
//! from the tables resolve to [`Category::Other`] and the name `"Other"`.

use crate::domain::category::Category;
use crate::domain::kind::{Kind, KindOrStepKey, StepKey};

/// Display name used for identifiers the catalog does not know
pub const UNKNOWN_DISPLAY_NAME: &str = "Other";

const ORCHESTRATION: &[KindOrStepKey] = &[
    KindOrStepKey::Kind(Kind::JenkinsPipeline),
    KindOrStepKey::Kind(Kind::GithubActionsWorkflow),
    KindOrStepKey::Kind(Kind::PiperConfig),
];

const STATIC_SECURITY_CHECKS: &[KindOrStepKey] = &[
    KindOrStepKey::Kind(Kind::GithubAdvancedSecurity),
    KindOrStepKey::Kind(Kind::CheckmarxOneScan),
    KindOrStepKey::Step(StepKey::Checkmarx),
    KindOrStepKey::Step(StepKey::Fortify),
];

const STATIC_CODE_CHECKS: &[KindOrStepKey] = &[KindOrStepKey::Kind(Kind::SonarQubeProject)];

const OPEN_SOURCE_CHECKS: &[KindOrStepKey] = &[
    KindOrStepKey::Kind(Kind::OpenSourceComplianceScan),
    KindOrStepKey::Step(StepKey::WhiteSource),
];

const SOURCE_CODE_MANAGEMENT: &[KindOrStepKey] = &[KindOrStepKey::Kind(Kind::GithubRepository)];

const ARTEFACTS: &[KindOrStepKey] = &[KindOrStepKey::Kind(Kind::StagingServiceCredential)];

const COMPLIANCE: &[KindOrStepKey] = &[
    KindOrStepKey::Kind(Kind::CumulusPipeline),
    KindOrStepKey::Kind(Kind::JiraProject),
];

/// Category a kind or step key is displayed under
pub fn category_of(key: &KindOrStepKey) -> Category {
    match key {
        KindOrStepKey::Kind(kind) => match kind {
            Kind::JenkinsPipeline | Kind::GithubActionsWorkflow | Kind::PiperConfig => {
                Category::Orchestration
            }
            Kind::GithubAdvancedSecurity | Kind::CheckmarxOneScan => {
                Category::StaticSecurityChecks
            }
            Kind::SonarQubeProject => Category::StaticCodeChecks,
            Kind::OpenSourceComplianceScan => Category::OpenSourceChecks,
            Kind::GithubRepository => Category::SourceCodeManagement,
            Kind::StagingServiceCredential => Category::Artefacts,
            Kind::CumulusPipeline | Kind::JiraProject => Category::Compliance,
        },
        KindOrStepKey::Step(step) => match step {
            StepKey::Fortify | StepKey::Checkmarx => Category::StaticSecurityChecks,
            StepKey::WhiteSource => Category::OpenSourceChecks,
        },
        KindOrStepKey::Unknown(_) => Category::Other,
    }
}

/// Human-readable name of a kind or step key
pub fn display_name(key: &KindOrStepKey) -> &'static str {
    match key {
        KindOrStepKey::Kind(kind) => match kind {
            Kind::GithubRepository => "GitHub Repository",
            Kind::JenkinsPipeline => "Jenkins",
            Kind::GithubActionsWorkflow => "GitHub Actions",
            Kind::PiperConfig => "Piper",
            Kind::CumulusPipeline => "Cumulus",
            Kind::CheckmarxOneScan => "Checkmarx ONE",
            Kind::SonarQubeProject => "SonarQube",
            Kind::OpenSourceComplianceScan => "Open Source Compliance",
            Kind::GithubAdvancedSecurity => "GitHub Advanced Security",
            Kind::JiraProject => "Jira",
            Kind::StagingServiceCredential => "Staging Service",
        },
        KindOrStepKey::Step(step) => match step {
            StepKey::Fortify => "Fortify",
            StepKey::Checkmarx => "Checkmarx",
            StepKey::WhiteSource => "Mend",
        },
        KindOrStepKey::Unknown(_) => UNKNOWN_DISPLAY_NAME,
    }
}

/// Fixed priority order of the services in a category
pub fn priority_order(category: Category) -> &'static [KindOrStepKey] {
    match category {
        Category::Orchestration => ORCHESTRATION,
        Category::StaticSecurityChecks => STATIC_SECURITY_CHECKS,
        Category::StaticCodeChecks => STATIC_CODE_CHECKS,
        Category::OpenSourceChecks => OPEN_SOURCE_CHECKS,
        Category::SourceCodeManagement => SOURCE_CODE_MANAGEMENT,
        Category::Artefacts => ARTEFACTS,
        Category::Compliance => COMPLIANCE,
        Category::Other => &[],
    }
}

/// Slot of `key` in the priority order of `category`
pub fn rank(category: Category, key: &KindOrStepKey) -> Option<usize> {
    priority_order(category).iter().position(|k| k == key)
}

/// Tools that can never satisfy compliance on their own (Fortify, Checkmarx)
pub fn needs_compliant_alternative(key: &KindOrStepKey) -> bool {
    matches!(
        key,
        KindOrStepKey::Step(StepKey::Fortify) | KindOrStepKey::Step(StepKey::Checkmarx)
    )
}

/// Tools the backend fully manages whenever they are present
pub fn is_managed_class(key: &KindOrStepKey) -> bool {
    matches!(
        key,
        KindOrStepKey::Kind(Kind::GithubAdvancedSecurity)
            | KindOrStepKey::Kind(Kind::CheckmarxOneScan)
            | KindOrStepKey::Kind(Kind::SonarQubeProject)
    )
}
