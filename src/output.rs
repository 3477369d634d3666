//! Terminal output for the CLI.
//!
//! CI commands go to stdout untouched; human-facing messages go to stderr so
//! they never interfere with the runner's parsing of logging commands.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print lines produced by a build agent, one per line.
pub fn display_commands(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Describe the resolved agent on stderr.
///
/// # Arguments
/// * `name` - Agent name, e.g. "AzurePipelines"
/// * `prevent_fetch` - Whether the agent reports an authoritative checkout
pub fn display_agent_summary(name: &str, prevent_fetch: bool) {
    eprintln!(
        "{} Build agent: {} (prevent fetch: {})",
        style("→").yellow(),
        style(name).bold(),
        prevent_fetch
    );
}
