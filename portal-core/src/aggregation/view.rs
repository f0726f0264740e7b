//! View-model fragments handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::kind::KindOrStepKey;

/// Background colour code of the "Not Compliant" tag
pub const NOT_COMPLIANT_BACKGROUND_COLOR: &str = "2";

pub const NOT_MANAGED_TAG_TEXT: &str = "Not Managed";
pub const NOT_COMPLIANT_TAG_TEXT: &str = "Not Compliant";
pub const ADD_COMPLIANT_SERVICE_TEXT: &str = "Add a compliant service";

pub const PPMS_SCV_HELP_TEXT: &str = "Open Source Compliance needs a PPMS software component \
version (SCV) to sign off this component. Add the PPMS SCV to the component to become compliant.";

/// Single icon summarising the statuses of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusIconType {
    Error,
    Unknown,
    NotFound,
    Pending,
    Success,
    /// Only tools that can never be compliant on their own are configured
    Alert,
    NotManaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusIconConfig {
    pub status_icon_type: StatusIconType,
}

/// Badge shown next to a category title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTag {
    pub is_status_tag_shown: bool,
    pub status_tag_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_tag_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_tag_inline_help_text: Option<String>,
}

impl StatusTag {
    pub fn hidden() -> Self {
        Self {
            is_status_tag_shown: false,
            status_tag_text: String::new(),
            status_tag_background_color: None,
            status_tag_inline_help_text: None,
        }
    }

    pub fn not_managed() -> Self {
        Self {
            is_status_tag_shown: true,
            status_tag_text: NOT_MANAGED_TAG_TEXT.to_string(),
            status_tag_background_color: None,
            status_tag_inline_help_text: None,
        }
    }

    pub fn not_compliant() -> Self {
        Self {
            is_status_tag_shown: true,
            status_tag_text: NOT_COMPLIANT_TAG_TEXT.to_string(),
            status_tag_background_color: Some(NOT_COMPLIANT_BACKGROUND_COLOR.to_string()),
            status_tag_inline_help_text: Some(PPMS_SCV_HELP_TEXT.to_string()),
        }
    }
}

/// Text rendered on the right side of a category row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightSideConfig {
    pub right_side_text: String,
    pub right_side_text_inline_help_text: String,
}

/// Everything the presentation layer needs to draw one category row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub title: String,
    pub services: Vec<KindOrStepKey>,
    pub configured_services_text: String,
    pub status_icon: Option<StatusIconConfig>,
    pub status_tag: StatusTag,
    pub right_side: Option<RightSideConfig>,
    /// Whether a backend-managed service can still be added
    pub can_add_service: bool,
}
