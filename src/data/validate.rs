use std::collections::HashMap;
use std::fmt;

use crate::combat::{CharacterKind, ItemKind, MAX_ITEMS};
use crate::data::assignment::{AssignmentEntry, TeamData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Checks an assignment against the roster and item pool it was built from.
pub fn validate_assignment(
    assignment: &[AssignmentEntry],
    team_data: &TeamData,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    // Roster slots are matched by exact record so two characters of one archetype stay distinct.
    let mut unclaimed: Vec<&AssignmentEntry> = team_data.characters.iter().collect();
    let mut placed_items: HashMap<&str, usize> = HashMap::new();
    let mut total_items = 0usize;

    for (index, entry) in assignment.iter().enumerate() {
        let context = format!("assignment[{index}]");

        if CharacterKind::from_name(&entry.character.name).is_err() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.character.name"),
                format!("unknown character '{}'", entry.character.name),
            );
        }

        match unclaimed
            .iter()
            .position(|slot| slot.character == entry.character)
        {
            Some(position) => {
                unclaimed.swap_remove(position);
            }
            None => report.push(
                ValidationSeverity::Error,
                format!("{context}.character"),
                format!(
                    "'{}' is not an unassigned roster character",
                    entry.character.name
                ),
            ),
        }

        if entry.items.len() > MAX_ITEMS {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.items"),
                format!("{} items placed, at most {MAX_ITEMS} allowed", entry.items.len()),
            );
        }

        for (item_index, item) in entry.items.iter().enumerate() {
            if ItemKind::from_name(&item.name).is_err() {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.items[{item_index}]"),
                    format!("unknown item '{}'", item.name),
                );
            }
            *placed_items.entry(item.name.as_str()).or_default() += 1;
        }
        total_items += entry.items.len();
    }

    if total_items > team_data.items.len() {
        report.push(
            ValidationSeverity::Error,
            "items",
            format!(
                "{total_items} items placed but only {} available",
                team_data.items.len()
            ),
        );
    }

    for (name, placed) in placed_items {
        let available = team_data
            .items
            .iter()
            .filter(|item| item.name == name)
            .count();
        if placed > available {
            report.push(
                ValidationSeverity::Error,
                format!("items['{name}']"),
                format!("{placed} placed but only {available} available"),
            );
        }
    }

    for slot in unclaimed {
        report.push(
            ValidationSeverity::Warning,
            "assignment",
            format!("roster character '{}' is not fielded", slot.character.name),
        );
    }

    report
}
