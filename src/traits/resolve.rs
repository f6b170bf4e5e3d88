//! Resolution of entities addressed by id or slug.

/// Entities that can be looked up by exact id or slug match.
pub trait Resolve {
    /// Stable identifier assigned by the API.
    fn id(&self) -> &str;

    /// Human-readable URL slug.
    fn slug(&self) -> &str;

    /// Whether `filter` exactly equals this entity's id or slug.
    ///
    /// Comparison is case-sensitive.
    fn matches(&self, filter: &str) -> bool {
        self.id() == filter || self.slug() == filter
    }
}

/// Select one entity from `items` by an optional filter.
///
/// With a filter, returns the first entity whose id or slug matches
/// exactly. Without one, returns the first entity, which covers accounts
/// that only have a single organisation.
pub fn select_by_filter<'a, T: Resolve>(items: &'a [T], filter: Option<&str>) -> Option<&'a T> {
    match filter {
        Some(filter) => items.iter().find(|item| item.matches(filter)),
        None => items.first(),
    }
}
