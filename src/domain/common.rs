use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

/// Case-insensitive lookup by display name.
pub fn find_by_name<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    let needle = name.trim().to_ascii_lowercase();
    items
        .iter()
        .find(|item| item.name().trim().to_ascii_lowercase() == needle)
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
