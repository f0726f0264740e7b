//! Tooltip text for services the portal cannot manage

use crate::catalog;
use crate::domain::resource::ResourceRef;

const NOT_AVAILABLE: &str =
    "not available in the Hyperspace Portal. Your setup can't be managed or edited from here.";

/// Build the tooltip naming every `NOT_MANAGED` service in `steps`
///
/// Returns `None` when no step is `NOT_MANAGED`. Names keep the order of
/// `steps` and repeated services are named once.
pub fn not_managed_tooltip(steps: &[ResourceRef]) -> Option<String> {
    let names = not_managed_names(steps);
    let verb = if names.len() == 1 { "is" } else { "are" };
    join_names(&names).map(|subject| format!("{subject} {verb} {NOT_AVAILABLE}"))
}

/// Distinct display names of the `NOT_MANAGED` entries, first seen first
///
/// Every count or list of not-managed services is derived from this so
/// that numbers and names never disagree.
pub(crate) fn not_managed_names(steps: &[ResourceRef]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for step in steps.iter().filter(|s| s.status.is_not_managed()) {
        let name = catalog::display_name(&step.kind);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Join names as an English list: `A`, `A and B`, `A, B and C`
pub(crate) fn join_names(names: &[&str]) -> Option<String> {
    match names {
        [] => None,
        [only] => Some((*only).to_string()),
        [init @ .., last] => Some(format!("{} and {}", init.join(", "), last)),
    }
}
