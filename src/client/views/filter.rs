use crate::models::{Project, Task};

/// An entity the search box can match against.
pub trait Searchable {
    /// The text fields consulted by search. Absent optional fields are skipped.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.tags.as_deref());
        fields.extend(self.priority.map(|p| p.as_str()));
        fields
    }
}

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

/// Entities matching `term`, in their original order. An empty term keeps
/// every entity.
pub fn filter_entities<'a, T: Searchable>(entities: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return entities.iter().collect();
    }
    let needle = term.to_lowercase();
    entities
        .iter()
        .filter(|entity| entity.matches_lowercase(&needle))
        .collect()
}
