//! Category aggregation
//!
//! Reduces the flat list of resource references of a pipeline into
//! per-category display state: the ordered services, one status icon, the
//! status tag and the right-side hint. Every function here is pure and
//! degrades to its "nothing configured" value (`None`, an empty string or a
//! hidden tag) when a category has no services.

mod tooltip;
mod view;

pub use tooltip::not_managed_tooltip;
pub use view::{
    ADD_COMPLIANT_SERVICE_TEXT, CategorySummary, NOT_COMPLIANT_BACKGROUND_COLOR,
    NOT_COMPLIANT_TAG_TEXT, NOT_MANAGED_TAG_TEXT, PPMS_SCV_HELP_TEXT, RightSideConfig,
    StatusIconConfig, StatusIconType, StatusTag,
};

use crate::catalog;
use crate::domain::category::Category;
use crate::domain::kind::{Kind, KindOrStepKey, StepKey};
use crate::domain::resource::{NotManagedServices, ResourceRef};
use crate::domain::status::ServiceStatus;

/// Computes per-category view state for one pipeline
///
/// A service listed in `notManagedServices` and the same service as a plain
/// resource reference count once, in the same priority slot.
pub struct CategoryAggregator<'a> {
    resource_refs: &'a [ResourceRef],
    not_managed: Option<&'a NotManagedServices>,
    is_ppms_scv_provided: Box<dyn Fn() -> bool + Send + Sync + 'a>,
}

impl<'a> CategoryAggregator<'a> {
    pub fn new(resource_refs: &'a [ResourceRef]) -> Self {
        Self {
            resource_refs,
            not_managed: None,
            is_ppms_scv_provided: Box::new(|| false),
        }
    }

    pub fn with_not_managed_services(mut self, services: Option<&'a NotManagedServices>) -> Self {
        self.not_managed = services;
        self
    }

    /// Predicate telling whether a PPMS SCV was supplied for the component
    pub fn with_ppms_scv_check(mut self, check: impl Fn() -> bool + Send + Sync + 'a) -> Self {
        self.is_ppms_scv_provided = Box::new(check);
        self
    }

    /// Resources present in `category`, including not-managed payload entries
    fn entries(&self, category: Category) -> Vec<ResourceRef> {
        let mut entries: Vec<ResourceRef> = self
            .resource_refs
            .iter()
            .filter(|r| catalog::category_of(&r.kind) == category)
            .cloned()
            .collect();

        if let Some(services) = self.not_managed {
            for step in services.step_keys() {
                let key = KindOrStepKey::Step(step);
                if catalog::category_of(&key) == category && !entries.iter().any(|e| e.kind == key)
                {
                    entries.push(ResourceRef::new(key, ServiceStatus::NotManaged));
                }
            }
        }

        entries
    }

    /// Distinct services of `category` in the category's priority order
    ///
    /// Services without a priority slot sort last in first-seen order.
    pub fn find_and_sort_services(&self, category: Category) -> Vec<KindOrStepKey> {
        let mut services: Vec<KindOrStepKey> = Vec::new();
        for entry in self.entries(category) {
            if !services.contains(&entry.kind) {
                services.push(entry.kind);
            }
        }
        services.sort_by_key(|key| catalog::rank(category, key).unwrap_or(usize::MAX));
        services
    }

    /// Display names of the configured services, joined with `", "`
    pub fn configured_services_text(&self, category: Category) -> String {
        self.find_and_sort_services(category)
            .iter()
            .map(catalog::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reduce the statuses of `category` to a single icon
    ///
    /// Precedence: failing > unknown > not found > pending > created >
    /// alert > not managed. `None` means the category is empty and the icon
    /// should be hidden.
    pub fn status_icon(&self, category: Category) -> Option<StatusIconConfig> {
        let entries = self.entries(category);
        if entries.is_empty() {
            return None;
        }

        let any = |status: ServiceStatus| entries.iter().any(|e| e.status == status);
        let status_icon_type = if any(ServiceStatus::FailingCreation) {
            StatusIconType::Error
        } else if any(ServiceStatus::Unknown) {
            StatusIconType::Unknown
        } else if any(ServiceStatus::NotFound) {
            StatusIconType::NotFound
        } else if any(ServiceStatus::PendingCreation) {
            StatusIconType::Pending
        } else if any(ServiceStatus::Created) {
            StatusIconType::Success
        } else if entries
            .iter()
            .all(|e| e.status.is_not_managed() && catalog::needs_compliant_alternative(&e.kind))
        {
            StatusIconType::Alert
        } else {
            StatusIconType::NotManaged
        };

        Some(StatusIconConfig { status_icon_type })
    }

    /// Status tag of `category`
    pub fn status_tag(&self, category: Category) -> StatusTag {
        let entries = self.entries(category);
        if entries.is_empty() {
            return StatusTag::hidden();
        }
        let only_not_managed = entries.iter().all(|e| e.status.is_not_managed());

        match category {
            Category::StaticSecurityChecks => {
                let managed_present = entries.iter().any(|e| catalog::is_managed_class(&e.kind));
                if only_not_managed && !managed_present {
                    StatusTag::not_managed()
                } else {
                    StatusTag::hidden()
                }
            }
            Category::OpenSourceChecks => {
                let osc = KindOrStepKey::Kind(Kind::OpenSourceComplianceScan);
                let osc_present = entries.iter().any(|e| e.kind == osc);
                let mend = KindOrStepKey::Step(StepKey::WhiteSource);
                let mend_not_managed = entries
                    .iter()
                    .any(|e| e.kind == mend && e.status.is_not_managed());

                if osc_present {
                    if (self.is_ppms_scv_provided)() {
                        StatusTag::hidden()
                    } else {
                        StatusTag::not_compliant()
                    }
                } else if mend_not_managed {
                    StatusTag::not_managed()
                } else {
                    StatusTag::hidden()
                }
            }
            // SonarQube is always managed, so no claim is made either way
            Category::StaticCodeChecks => StatusTag::hidden(),
            _ if only_not_managed => StatusTag::not_managed(),
            _ => StatusTag::hidden(),
        }
    }

    /// Right-side hint of `category`
    ///
    /// Only produced for a mix of managed and not-managed services, or when
    /// the only configured tools need a compliant alternative.
    pub fn right_side_config(&self, category: Category) -> Option<RightSideConfig> {
        build_right_side_config(self.entries(category), category)
    }

    /// Whether a backend-managed service of `category` is not yet present
    pub fn can_add_service(&self, category: Category) -> bool {
        let present = self.find_and_sort_services(category);
        catalog::priority_order(category)
            .iter()
            .any(|key| key.as_kind().is_some() && !present.contains(key))
    }

    /// Summaries of every non-empty category, in display order
    pub fn summaries(&self) -> Vec<CategorySummary> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.summary(category))
            .collect()
    }

    /// Summary of one category, `None` when it has no services
    pub fn summary(&self, category: Category) -> Option<CategorySummary> {
        let services = self.find_and_sort_services(category);
        if services.is_empty() {
            return None;
        }

        Some(CategorySummary {
            category,
            title: category.title().to_string(),
            configured_services_text: self.configured_services_text(category),
            status_icon: self.status_icon(category),
            status_tag: self.status_tag(category),
            right_side: self.right_side_config(category),
            can_add_service: self.can_add_service(category),
            services,
        })
    }
}

/// Right-side hint of `category` computed from plain resource references
pub fn right_side_config(
    category: Category,
    resource_refs: &[ResourceRef],
) -> Option<RightSideConfig> {
    let entries = resource_refs
        .iter()
        .filter(|r| catalog::category_of(&r.kind) == category)
        .cloned()
        .collect();
    build_right_side_config(entries, category)
}

fn build_right_side_config(
    mut entries: Vec<ResourceRef>,
    category: Category,
) -> Option<RightSideConfig> {
    entries.sort_by_key(|e| catalog::rank(category, &e.kind).unwrap_or(usize::MAX));
    let (not_managed, managed): (Vec<ResourceRef>, Vec<ResourceRef>) =
        entries.into_iter().partition(|e| e.status.is_not_managed());

    if not_managed.is_empty() {
        return None;
    }

    if managed.is_empty() {
        if !not_managed
            .iter()
            .all(|e| catalog::needs_compliant_alternative(&e.kind))
        {
            return None;
        }
        let names = tooltip::not_managed_names(&not_managed);
        let (verb, own) = if names.len() == 1 {
            ("is", "its")
        } else {
            ("are", "their")
        };
        let subject = tooltip::join_names(&names)?;
        return Some(RightSideConfig {
            right_side_text: ADD_COMPLIANT_SERVICE_TEXT.to_string(),
            right_side_text_inline_help_text: format!(
                "{subject} {verb} not compliant on {own} own. Add GitHub Advanced Security \
                 or Checkmarx ONE to meet the static security requirements."
            ),
        });
    }

    let names = tooltip::not_managed_names(&not_managed);

    Some(RightSideConfig {
        right_side_text: format!("{} Not Managed.", names.len()),
        right_side_text_inline_help_text: not_managed_tooltip(&not_managed)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::{FortifyConfig, WhiteSourceConfig};
    use pretty_assertions::assert_eq;

    fn r(kind: impl Into<KindOrStepKey>, status: ServiceStatus) -> ResourceRef {
        ResourceRef::new(kind, status)
    }

    fn fortify_payload() -> NotManagedServices {
        NotManagedServices {
            fortify: Some(FortifyConfig {
                server_url: "https://fortify.example".to_string(),
                project_name: "app".to_string(),
                project_version: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_categories_show_nothing() {
        let aggregator = CategoryAggregator::new(&[]);
        for category in Category::ALL {
            assert_eq!(aggregator.status_icon(category), None);
            assert!(!aggregator.status_tag(category).is_status_tag_shown);
            assert_eq!(aggregator.right_side_config(category), None);
            assert_eq!(aggregator.configured_services_text(category), "");
            assert!(aggregator.find_and_sort_services(category).is_empty());
            assert_eq!(right_side_config(category, &[]), None);
        }
        assert!(aggregator.summaries().is_empty());
    }

    #[test]
    fn test_static_security_order_ignores_input_order() {
        let refs = vec![
            r(StepKey::Fortify, ServiceStatus::NotManaged),
            r(StepKey::Checkmarx, ServiceStatus::NotManaged),
            r(Kind::CheckmarxOneScan, ServiceStatus::Created),
            r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
        ];
        let aggregator = CategoryAggregator::new(&refs);

        assert_eq!(
            aggregator.find_and_sort_services(Category::StaticSecurityChecks),
            vec![
                KindOrStepKey::Kind(Kind::GithubAdvancedSecurity),
                KindOrStepKey::Kind(Kind::CheckmarxOneScan),
                KindOrStepKey::Step(StepKey::Checkmarx),
                KindOrStepKey::Step(StepKey::Fortify),
            ]
        );
        assert_eq!(
            aggregator.configured_services_text(Category::StaticSecurityChecks),
            "GitHub Advanced Security, Checkmarx ONE, Checkmarx, Fortify"
        );
    }

    #[test]
    fn test_not_managed_payload_shares_slot_with_reference() {
        let refs = vec![r(StepKey::Fortify, ServiceStatus::NotManaged)];
        let payload = fortify_payload();
        let aggregator = CategoryAggregator::new(&refs).with_not_managed_services(Some(&payload));

        assert_eq!(
            aggregator.find_and_sort_services(Category::StaticSecurityChecks),
            vec![KindOrStepKey::Step(StepKey::Fortify)]
        );

        let payload_only = CategoryAggregator::new(&[]).with_not_managed_services(Some(&payload));
        assert_eq!(
            payload_only.configured_services_text(Category::StaticSecurityChecks),
            "Fortify"
        );
    }

    #[test]
    fn test_single_service_text_has_no_separator() {
        let refs = vec![r(Kind::SonarQubeProject, ServiceStatus::Created)];
        let aggregator = CategoryAggregator::new(&refs);
        assert_eq!(
            aggregator.configured_services_text(Category::StaticCodeChecks),
            "SonarQube"
        );
    }

    #[test]
    fn test_unknown_kind_displays_as_other() {
        let refs = vec![r("BlackDuck", ServiceStatus::Created)];
        let aggregator = CategoryAggregator::new(&refs);
        assert_eq!(aggregator.configured_services_text(Category::Other), "Other");
        assert_eq!(
            aggregator.status_icon(Category::Other),
            Some(StatusIconConfig {
                status_icon_type: StatusIconType::Success
            })
        );
    }

    #[test]
    fn test_status_icon_precedence() {
        let icon = |refs: Vec<ResourceRef>| {
            CategoryAggregator::new(&refs)
                .status_icon(Category::StaticSecurityChecks)
                .map(|c| c.status_icon_type)
        };

        assert_eq!(
            icon(vec![
                r(Kind::GithubAdvancedSecurity, ServiceStatus::Unknown),
                r(Kind::CheckmarxOneScan, ServiceStatus::FailingCreation),
            ]),
            Some(StatusIconType::Error)
        );
        assert_eq!(
            icon(vec![
                r(Kind::GithubAdvancedSecurity, ServiceStatus::NotFound),
                r(Kind::CheckmarxOneScan, ServiceStatus::Unknown),
            ]),
            Some(StatusIconType::Unknown)
        );
        assert_eq!(
            icon(vec![
                r(Kind::GithubAdvancedSecurity, ServiceStatus::PendingCreation),
                r(Kind::CheckmarxOneScan, ServiceStatus::NotFound),
            ]),
            Some(StatusIconType::NotFound)
        );
        assert_eq!(
            icon(vec![
                r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
                r(Kind::CheckmarxOneScan, ServiceStatus::PendingCreation),
            ]),
            Some(StatusIconType::Pending)
        );
        assert_eq!(
            icon(vec![
                r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
                r(StepKey::Fortify, ServiceStatus::NotManaged),
            ]),
            Some(StatusIconType::Success)
        );
        assert_eq!(
            icon(vec![
                r(StepKey::Fortify, ServiceStatus::NotManaged),
                r(StepKey::Checkmarx, ServiceStatus::NotManaged),
            ]),
            Some(StatusIconType::Alert)
        );
        assert_eq!(
            icon(vec![r(Kind::CheckmarxOneScan, ServiceStatus::NotManaged)]),
            Some(StatusIconType::NotManaged)
        );
    }

    #[test]
    fn test_static_security_tag() {
        let fortify_only = vec![r(StepKey::Fortify, ServiceStatus::NotManaged)];
        assert_eq!(
            CategoryAggregator::new(&fortify_only).status_tag(Category::StaticSecurityChecks),
            StatusTag::not_managed()
        );

        let with_ghas = vec![
            r(StepKey::Fortify, ServiceStatus::NotManaged),
            r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
        ];
        assert!(
            !CategoryAggregator::new(&with_ghas)
                .status_tag(Category::StaticSecurityChecks)
                .is_status_tag_shown
        );
    }

    #[test]
    fn test_mend_without_osc_is_not_managed() {
        let refs = vec![r(StepKey::WhiteSource, ServiceStatus::NotManaged)];
        let tag = CategoryAggregator::new(&refs).status_tag(Category::OpenSourceChecks);

        assert!(tag.is_status_tag_shown);
        assert_eq!(tag.status_tag_text, "Not Managed");
    }

    #[test]
    fn test_osc_without_scv_is_not_compliant() {
        let refs = vec![
            r(StepKey::WhiteSource, ServiceStatus::NotManaged),
            r(Kind::OpenSourceComplianceScan, ServiceStatus::Created),
        ];
        let tag = CategoryAggregator::new(&refs)
            .with_ppms_scv_check(|| false)
            .status_tag(Category::OpenSourceChecks);

        assert!(tag.is_status_tag_shown);
        assert_eq!(tag.status_tag_text, "Not Compliant");
        assert_eq!(tag.status_tag_background_color.as_deref(), Some("2"));
        assert!(tag.status_tag_inline_help_text.unwrap().contains("PPMS"));
    }

    #[test]
    fn test_osc_with_scv_has_no_tag() {
        let refs = vec![
            r(StepKey::WhiteSource, ServiceStatus::NotManaged),
            r(Kind::OpenSourceComplianceScan, ServiceStatus::Created),
        ];
        let tag = CategoryAggregator::new(&refs)
            .with_ppms_scv_check(|| true)
            .status_tag(Category::OpenSourceChecks);

        assert_eq!(tag, StatusTag::hidden());
    }

    #[test]
    fn test_mend_payload_counts_as_not_managed() {
        let payload = NotManagedServices {
            white_source: Some(WhiteSourceConfig {
                product_name: "app".to_string(),
                project_names: vec![],
            }),
            ..Default::default()
        };
        let tag = CategoryAggregator::new(&[])
            .with_not_managed_services(Some(&payload))
            .status_tag(Category::OpenSourceChecks);

        assert_eq!(tag, StatusTag::not_managed());
    }

    #[test]
    fn test_sonarqube_never_tagged() {
        for status in [ServiceStatus::Created, ServiceStatus::NotManaged] {
            let refs = vec![r(Kind::SonarQubeProject, status)];
            assert_eq!(
                CategoryAggregator::new(&refs).status_tag(Category::StaticCodeChecks),
                StatusTag::hidden()
            );
        }
    }

    #[test]
    fn test_other_category_tagged_when_only_not_managed() {
        let refs = vec![r(Kind::JenkinsPipeline, ServiceStatus::NotManaged)];
        assert_eq!(
            CategoryAggregator::new(&refs).status_tag(Category::Orchestration),
            StatusTag::not_managed()
        );
    }

    #[test]
    fn test_right_side_only_managed() {
        let refs = vec![r(Kind::GithubAdvancedSecurity, ServiceStatus::Created)];
        assert_eq!(right_side_config(Category::StaticSecurityChecks, &refs), None);
    }

    #[test]
    fn test_right_side_fortify_only() {
        let refs = vec![r(StepKey::Fortify, ServiceStatus::NotManaged)];
        let config = right_side_config(Category::StaticSecurityChecks, &refs).unwrap();

        assert_eq!(config.right_side_text, "Add a compliant service");
        assert!(config.right_side_text_inline_help_text.starts_with("Fortify is not compliant"));
    }

    #[test]
    fn test_right_side_mixed() {
        let refs = vec![
            r(StepKey::Fortify, ServiceStatus::NotManaged),
            r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
        ];
        let config = right_side_config(Category::StaticSecurityChecks, &refs).unwrap();

        assert_eq!(config.right_side_text, "1 Not Managed.");
        assert!(config.right_side_text_inline_help_text.contains("Fortify"));
    }

    #[test]
    fn test_right_side_not_managed_without_alternative_need() {
        let refs = vec![r(StepKey::WhiteSource, ServiceStatus::NotManaged)];
        assert_eq!(right_side_config(Category::OpenSourceChecks, &refs), None);
    }

    #[test]
    fn test_right_side_counts_distinct_services_in_priority_order() {
        let refs = vec![
            r(StepKey::Fortify, ServiceStatus::NotManaged),
            r(StepKey::Checkmarx, ServiceStatus::NotManaged),
            r(Kind::CheckmarxOneScan, ServiceStatus::Created),
        ];
        let config = right_side_config(Category::StaticSecurityChecks, &refs).unwrap();

        assert_eq!(config.right_side_text, "2 Not Managed.");
        assert!(
            config
                .right_side_text_inline_help_text
                .starts_with("Checkmarx and Fortify are")
        );
    }

    #[test]
    fn test_right_side_count_matches_tooltip_names() {
        let refs = vec![
            r(KindOrStepKey::parse("LegacyScanner"), ServiceStatus::NotManaged),
            r(KindOrStepKey::parse("HomegrownLinter"), ServiceStatus::NotManaged),
            r(KindOrStepKey::parse("InternalDashboard"), ServiceStatus::Created),
        ];
        let config = right_side_config(Category::Other, &refs).unwrap();

        // Both unknown tools display as "Other" and are one named service
        assert_eq!(config.right_side_text, "1 Not Managed.");
        assert_eq!(
            config.right_side_text_inline_help_text,
            "Other is not available in the Hyperspace Portal. \
             Your setup can't be managed or edited from here."
        );
    }

    #[test]
    fn test_can_add_service() {
        let refs = vec![r(Kind::GithubAdvancedSecurity, ServiceStatus::Created)];
        let aggregator = CategoryAggregator::new(&refs);

        assert!(aggregator.can_add_service(Category::StaticSecurityChecks));
        assert!(aggregator.can_add_service(Category::StaticCodeChecks));
        assert!(!aggregator.can_add_service(Category::Other));

        let sonar = vec![r(Kind::SonarQubeProject, ServiceStatus::Created)];
        assert!(!CategoryAggregator::new(&sonar).can_add_service(Category::StaticCodeChecks));
    }

    #[test]
    fn test_summaries_follow_display_order() {
        let refs = vec![
            r(Kind::SonarQubeProject, ServiceStatus::Created),
            r(Kind::GithubRepository, ServiceStatus::Created),
            r(Kind::JenkinsPipeline, ServiceStatus::PendingCreation),
        ];
        let categories: Vec<_> = CategoryAggregator::new(&refs)
            .summaries()
            .into_iter()
            .map(|s| s.category)
            .collect();

        assert_eq!(
            categories,
            vec![
                Category::SourceCodeManagement,
                Category::Orchestration,
                Category::StaticCodeChecks,
            ]
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let refs = vec![
            r(StepKey::Fortify, ServiceStatus::NotManaged),
            r(Kind::GithubAdvancedSecurity, ServiceStatus::Created),
            r(Kind::OpenSourceComplianceScan, ServiceStatus::PendingCreation),
        ];
        let aggregator = CategoryAggregator::new(&refs);

        assert_eq!(aggregator.summaries(), aggregator.summaries());
        for category in Category::ALL {
            assert_eq!(aggregator.status_tag(category), aggregator.status_tag(category));
            assert_eq!(
                aggregator.right_side_config(category),
                aggregator.right_side_config(category)
            );
        }
    }
}
