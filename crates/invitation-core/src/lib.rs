//! invitation-core
//!
//! Customizer logic for invitation templates: section detection, the field
//! catalog, default extraction, the progressive override session and the
//! merge into render props.
//! Depends on invitation-domain. No CLI, no terminal I/O, no storage.

pub mod catalog;
pub mod component_defaults;
pub mod computed;
pub mod defaults;
pub mod error;
pub mod format;
pub mod legacy;
pub mod merge;
pub mod sections;
pub mod session;

pub use catalog::{fields_by_section, fields_for_sections, filter_by_mode, FieldCatalog};
pub use defaults::{extract_defaults, DefaultSources};
pub use error::CatalogError;
pub use format::{DateFormatter, LocaleDateFormatter};
pub use merge::{merge_and_transform, merge_flat, MergeInput};
pub use sections::{detect_active_sections, detect_section_variants, FALLBACK_SECTIONS};
pub use session::EditorSession;
