//! Persistence-facing view of an editing session.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Field key to template default, computed once per session.
pub type TemplateDefaults = BTreeMap<String, FieldValue>;

/// Minimal payload needed to rebuild a customization: the user's overrides
/// (touched keys only), the defaults they were made against, and the touched set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressiveData {
    pub template_id: String,
    pub overrides: BTreeMap<String, FieldValue>,
    pub defaults: TemplateDefaults,
    pub touched: BTreeSet<String>,
}

impl ProgressiveData {
    pub fn is_pristine(&self) -> bool {
        self.touched.is_empty()
    }
}

/// Snapshot of one field as the editor sees it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub value: FieldValue,
    pub is_touched: bool,
    pub is_modified: bool,
    pub default_value: FieldValue,
    pub can_reset: bool,
}
