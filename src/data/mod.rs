pub mod assignment;
pub mod store;
pub mod validate;

pub use assignment::{
    build_team, strip_items, Assignment, AssignmentEntry, CharacterRecord, ItemRecord, TeamData,
};
pub use store::{AssignmentStore, DirectoryStore, MemoryStore, StoreError, TEAM_DATA_FILE};
pub use validate::{
    validate_assignment, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
