use super::EntityMetadata;

/// Trait implemented by every aggregate root in the system
pub trait AggregateRoot {
    type Id;

    // Instance data

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // Static aggregate metadata

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name used for the database table (e.g. "trabajador")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Trabajador")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Trabajadores")
    fn list_name() -> &'static str;

    /// Full aggregate name (e.g. "a001_trabajador")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
