//! Project create/edit form rules.

use crate::model::project::{parse_date, ProjectDraft};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectField {
    Name,
    StartDate,
    EndDate,
    Members,
}

impl ProjectField {
    /// Form field key as used by the client forms.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "nombre",
            Self::StartDate => "fechaInicio",
            Self::EndDate => "fechaFin",
            Self::Members => "miembros",
        }
    }
}

/// Whether the member list must be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberRule {
    /// Canonical rule for the member-picker form.
    #[default]
    Required,
    /// Lenient rule of the legacy create form.
    Optional,
}

/// Field-keyed validation messages. Empty iff the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<ProjectField, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: ProjectField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn get(&self, field: ProjectField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Records a violation; a later message for the same field wins.
    pub fn insert(&mut self, field: ProjectField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .errors
            .keys()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "invalid project fields: {fields}")
    }
}

impl Error for FieldErrors {}

/// Validates a draft with the canonical rule set.
pub fn validate(draft: &ProjectDraft) -> FieldErrors {
    validate_with(draft, MemberRule::Required)
}

/// Validates a draft with an explicit member rule.
///
/// Date ordering is only checked when both dates parse; a reversed range is
/// reported on the end date.
pub fn validate_with(draft: &ProjectDraft, member_rule: MemberRule) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(ProjectField::Name, "project name is required");
    }

    let start = check_date(
        &mut errors,
        ProjectField::StartDate,
        &draft.start_date,
        "start date is required",
    );
    let end = check_date(
        &mut errors,
        ProjectField::EndDate,
        &draft.end_date,
        "end date is required",
    );

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.insert(
                ProjectField::EndDate,
                "end date must not be earlier than start date",
            );
        }
    }

    if member_rule == MemberRule::Required && draft.members.is_empty() {
        errors.insert(ProjectField::Members, "at least one member is required");
    }

    errors
}

fn check_date(
    errors: &mut FieldErrors,
    field: ProjectField,
    value: &str,
    missing_message: &str,
) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        errors.insert(field, missing_message);
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.insert(field, "date must use YYYY-MM-DD");
    }
    parsed
}
