#![doc(test(attr(deny(warnings))))]

//! Invitation Studio edits wedding invitation templates progressively: the
//! user's explicit edits override template defaults field by field, and the
//! merge produces render-ready props for every section.

pub mod cli;
pub mod errors;
pub mod utils;

pub use errors::StudioError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Invitation Studio tracing initialized.");
    });
}
