//! Search over the inspectable object list and the displayed member list
//!
//! Matching is a case-insensitive substring test. Objects match on their
//! name or type; members match on their own name or the name of the value
//! they hold.
//!
//! Output policy, shared by both modes: when more than one object survives
//! the filter the member list is ambiguous and is returned unfiltered;
//! otherwise the filtered member list is returned.

use std::sync::Arc;

use crate::snoopable::SnoopableObject;
use crate::types::Descriptor;

/// Which list changed and triggered the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOption {
    /// New query, or the object list changed
    Objects,
    /// The member list changed, e.g. a different object was selected
    Selection,
}

/// Inputs of one search pass
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub objects: &'a [Arc<SnoopableObject>],
    pub members: &'a [Descriptor],
    pub selected: Option<&'a Arc<SnoopableObject>>,
}

/// Filtered lists for the view
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub objects: Vec<Arc<SnoopableObject>>,
    pub members: Vec<Descriptor>,
}

/// Run one search pass
pub fn search(request: &SearchRequest<'_>, option: SearchOption) -> SearchResults {
    let results = match option {
        SearchOption::Objects => search_by_objects(request),
        SearchOption::Selection => search_by_selection(request),
    };
    tracing::debug!(
        "Search {:?} '{}': {} objects, {} members",
        option,
        request.query,
        results.objects.len(),
        results.members.len()
    );
    results
}

fn search_by_objects(request: &SearchRequest<'_>) -> SearchResults {
    let mut objects = search_objects(request.query, request.objects);
    let members = search_members(request.query, request.members);

    if let Some(selected) = request.selected {
        if objects.is_empty() && !members.is_empty() {
            // Data matched but no object text did: recover siblings of the selection
            objects = search_by_type(selected, request.objects);
        }
        if !members.is_empty() && !objects.iter().any(|o| Arc::ptr_eq(o, selected)) {
            objects.push(Arc::clone(selected));
        }
    }

    let members = choose_members(&objects, request.members, members);
    SearchResults { objects, members }
}

fn search_by_selection(request: &SearchRequest<'_>) -> SearchResults {
    let objects = search_objects(request.query, request.objects);
    let filtered = search_members(request.query, request.members);
    let members = choose_members(&objects, request.members, filtered);
    SearchResults { objects, members }
}

fn choose_members(
    objects: &[Arc<SnoopableObject>],
    source: &[Descriptor],
    filtered: Vec<Descriptor>,
) -> Vec<Descriptor> {
    if objects.len() > 1 {
        source.to_vec()
    } else {
        filtered
    }
}

/// Objects whose name or type contains `query`
pub fn search_objects(query: &str, objects: &[Arc<SnoopableObject>]) -> Vec<Arc<SnoopableObject>> {
    if query.is_empty() {
        return objects.to_vec();
    }
    let query = query.to_lowercase();
    objects
        .iter()
        .filter(|object| {
            object.name().is_some_and(|name| contains(&name, &query))
                || contains(&object.type_name(), &query)
        })
        .cloned()
        .collect()
}

/// Members whose name, or whose value's name, contains `query`
pub fn search_members(query: &str, members: &[Descriptor]) -> Vec<Descriptor> {
    if query.is_empty() {
        return members.to_vec();
    }
    let query = query.to_lowercase();
    members
        .iter()
        .filter(|member| {
            member.name().is_some_and(|name| contains(name, &query))
                || member
                    .object()
                    .and_then(|object| object.name())
                    .is_some_and(|name| contains(&name, &query))
        })
        .cloned()
        .collect()
}

/// Objects with the same type as `selected`
fn search_by_type(
    selected: &Arc<SnoopableObject>,
    objects: &[Arc<SnoopableObject>],
) -> Vec<Arc<SnoopableObject>> {
    let type_name = selected.type_name();
    objects
        .iter()
        .filter(|object| object.type_name() == type_name)
        .cloned()
        .collect()
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
