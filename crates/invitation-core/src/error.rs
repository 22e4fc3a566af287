use thiserror::Error;

use invitation_domain::SectionId;

/// Integrity failures detected while assembling a field catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate field key: {0}")]
    DuplicateField(String),
    #[error("Section `{section}` references undefined field `{key}`")]
    UndefinedSectionField { section: SectionId, key: String },
    #[error("Field `{key}` is owned by `{owner}` but not listed in that section")]
    UnlistedOwner { key: String, owner: SectionId },
}
