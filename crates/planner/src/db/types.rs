/// Database types for persisted planner collections

/// One of the six independently persisted planner collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Subjects,
    Timetable,
    Cancellations,
    ExtraClasses,
    Notes,
    CustomEvents,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 6] = [
        CollectionKey::Subjects,
        CollectionKey::Timetable,
        CollectionKey::Cancellations,
        CollectionKey::ExtraClasses,
        CollectionKey::Notes,
        CollectionKey::CustomEvents,
    ];

    /// The key the collection is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Subjects => "planner_subjects",
            CollectionKey::Timetable => "planner_timetable",
            CollectionKey::Cancellations => "planner_cancellations",
            CollectionKey::ExtraClasses => "planner_extraclasses",
            CollectionKey::Notes => "planner_notes",
            CollectionKey::CustomEvents => "planner_custom_events",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DbCollection {
    pub key: String,
    pub value: String, // JSON array
    pub updated_at: Option<String>,
}
