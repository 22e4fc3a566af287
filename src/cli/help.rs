use crate::cli::output::{self, section as output_section};
use crate::cli::commands::{CommandEntry, CommandTable};

pub fn print_overview(commands: &CommandTable) {
    output_section("Available commands");
    for entry in commands.entries() {
        output::info(format!("  {:<14} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    output::info(format!("  Description: {}", entry.description));
    output::info(format!("  Usage: {}", entry.usage));
}
