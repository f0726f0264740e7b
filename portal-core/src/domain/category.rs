//! User-facing grouping of services

use serde::{Deserialize, Serialize};

/// Category a kind or step key is displayed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Orchestration,
    StaticSecurityChecks,
    StaticCodeChecks,
    OpenSourceChecks,
    SourceCodeManagement,
    Artefacts,
    Compliance,
    /// Services whose identifier is not in the catalog
    Other,
}

impl Category {
    /// Display order of the categories
    pub const ALL: [Category; 8] = [
        Category::SourceCodeManagement,
        Category::Orchestration,
        Category::StaticSecurityChecks,
        Category::StaticCodeChecks,
        Category::OpenSourceChecks,
        Category::Artefacts,
        Category::Compliance,
        Category::Other,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Orchestration => "Orchestration",
            Category::StaticSecurityChecks => "Static Security Checks",
            Category::StaticCodeChecks => "Static Code Checks",
            Category::OpenSourceChecks => "Open Source Checks",
            Category::SourceCodeManagement => "Source Code Management",
            Category::Artefacts => "Artefacts",
            Category::Compliance => "Compliance",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
