use std::path::PathBuf;

use invitation_config::{ConfigManager, EditorConfig};
use invitation_core::EditorSession;
use invitation_domain::TemplateDefinition;
use invitation_storage_json::JsonSessionStore;

use super::commands::CommandTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub commands: CommandTable,
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: EditorConfig,
    pub store: JsonSessionStore,
    pub template: Option<TemplateDefinition>,
    pub session: Option<EditorSession>,
    pub session_name: Option<String>,
    pub running: bool,
}
