use shared::domain::{TeamCategory, TeamField};
use shared::protocol::{Team, TeamPatch};
use thiserror::Error;

/// Separator used when presenting the member list for editing.
pub const MEMBER_JOIN: &str = ", ";

pub const NAME_REQUIRED: &str = "Name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const CATEGORY_INVALID: &str = "Category must be one of Development, Design, or Marketing";
pub const MEMBERS_REQUIRED: &str = "At least one member is required";

/// Raw field values as typed into the form. Frontends keep a draft copy of
/// this and hand it back on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub members: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: TeamField,
    pub message: &'static str,
}

#[derive(Debug, Clone, Error)]
#[error("{} team field(s) failed validation", errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Canonical form state for one open editor: the current field values plus
/// the field errors recorded by the last blocked submit.
#[derive(Debug, Default)]
pub struct TeamForm {
    fields: TeamFields,
    errors: Vec<FieldError>,
}

impl TeamForm {
    /// Hydration pass run once after a successful load. Members are joined
    /// into a single delimited string for editing.
    pub fn hydrate(&mut self, team: &Team) {
        self.fields = TeamFields {
            name: team.name.clone(),
            description: team.description.clone(),
            category: team.category.clone(),
            members: team.members.join(MEMBER_JOIN),
        };
        self.errors.clear();
    }

    /// Replaces every field with the submitted snapshot.
    pub fn apply(&mut self, fields: TeamFields) {
        self.fields = fields;
    }

    /// Sets a single field; editing a field clears its recorded error.
    pub fn set(&mut self, field: TeamField, value: String) {
        match field {
            TeamField::Name => self.fields.name = value,
            TeamField::Description => self.fields.description = value,
            TeamField::Category => self.fields.category = value,
            TeamField::Members => self.fields.members = value,
        }
        self.errors.retain(|error| error.field != field);
    }

    pub fn fields(&self) -> &TeamFields {
        &self.fields
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Runs the required-field checks in display order. On pass, returns the
    /// update payload; values go out exactly as entered, with members still
    /// one delimited string. On failure, records one error per offending
    /// field so the attempt stops before any network call.
    pub fn validate(&mut self) -> Result<TeamPatch, ValidationError> {
        let mut errors = Vec::new();
        if self.fields.name.trim().is_empty() {
            errors.push(FieldError {
                field: TeamField::Name,
                message: NAME_REQUIRED,
            });
        }
        if self.fields.description.trim().is_empty() {
            errors.push(FieldError {
                field: TeamField::Description,
                message: DESCRIPTION_REQUIRED,
            });
        }
        let category = if self.fields.category.trim().is_empty() {
            errors.push(FieldError {
                field: TeamField::Category,
                message: CATEGORY_REQUIRED,
            });
            None
        } else {
            let parsed = TeamCategory::parse(&self.fields.category);
            if parsed.is_none() {
                errors.push(FieldError {
                    field: TeamField::Category,
                    message: CATEGORY_INVALID,
                });
            }
            parsed
        };
        if self.fields.members.trim().is_empty() {
            errors.push(FieldError {
                field: TeamField::Members,
                message: MEMBERS_REQUIRED,
            });
        }

        match (errors.is_empty(), category) {
            (true, Some(category)) => {
                self.errors.clear();
                Ok(TeamPatch {
                    name: self.fields.name.clone(),
                    description: self.fields.description.clone(),
                    category,
                    members: self.fields.members.clone(),
                })
            }
            _ => {
                self.errors = errors.clone();
                Err(ValidationError { errors })
            }
        }
    }
}
