use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// A set of optional field overrides applied onto an existing record.
///
/// Only fields that are `Some` overwrite the target; everything else keeps its
/// prior value.
pub trait Patch<T> {
    fn apply_to(&self, target: &mut T);

    /// True when no field would change.
    fn is_empty(&self) -> bool;
}

/// Overwrites `slot` when `value` is present.
pub(crate) fn merge<V: Clone>(slot: &mut V, value: &Option<V>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}
