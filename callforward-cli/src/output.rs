// callforward-cli/src/output.rs
use callforward_core::OperationReport;

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{}\n", console::style(format!("Error: {}", message)).red()));
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("Warning:").yellow(), message));
}

/// Print a styled info/header
pub fn print_header(key: &str, value: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{}: {}\n", console::style(key).bold(), value));
}

/// One-line summary of a finished operation
pub fn summarize(report: &OperationReport) -> String {
    let mut summary = format!(
        "{} of {} users written to {}",
        report.records,
        report.users,
        report.output.display()
    );
    if let Some(backup) = &report.backup {
        summary.push_str(&format!(" (backup: {})", backup.display()));
    }
    summary
}
