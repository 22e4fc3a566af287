//! invitation-domain
//!
//! Pure domain models for invitation templates (sections, field definitions,
//! field values, template definitions, progressive data, merged props).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod field;
pub mod progressive;
pub mod props;
pub mod section;
pub mod template;
pub mod value;

pub use field::*;
pub use progressive::*;
pub use props::*;
pub use section::*;
pub use template::*;
pub use value::*;
