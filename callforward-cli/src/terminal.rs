// callforward-cli/src/terminal.rs
use crate::output::{print_error, print_header, print_success, print_warning, summarize};
use callforward_core::{MenuState, OperationError, OperationReport, Operator, RunContext, MENU_ENTRIES};
use console::{style, Term};
use std::io::{self, BufRead, BufReader, IsTerminal};

/// Menu rendered on the controlling terminal
pub struct ConsoleOperator {
    term: Term,
    tenant: String,
    /// Line source used instead of the terminal when stdin is redirected
    piped: Option<Box<dyn BufRead + Send>>,
}

impl ConsoleOperator {
    pub fn new(tenant: &str) -> Self {
        let piped: Option<Box<dyn BufRead + Send>> = if io::stdin().is_terminal() {
            None
        } else {
            Some(Box::new(BufReader::new(io::stdin())))
        };
        Self {
            term: Term::stdout(),
            tenant: tenant.to_string(),
            piped,
        }
    }

    #[cfg(test)]
    fn with_input(tenant: &str, input: impl BufRead + Send + 'static) -> Self {
        Self {
            term: Term::stdout(),
            tenant: tenant.to_string(),
            piped: Some(Box::new(input)),
        }
    }
}

impl Operator for ConsoleOperator {
    fn show_menu(&mut self, ctx: &RunContext) -> io::Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&style("Call Forwarding Bulk Configuration").bold().cyan().to_string())?;
        print_header("Tenant", &self.tenant);
        print_header("Input", &ctx.input_path().display().to_string());
        print_header("Log", &ctx.dir().join(ctx.log_file_name()).display().to_string());
        self.term.write_line("")?;
        for (key, state) in MENU_ENTRIES {
            self.term.write_line(&format!("  {}. {}", key, state.describe()))?;
        }
        self.term.write_line("")
    }

    fn read_choice(&mut self) -> io::Result<String> {
        self.term.write_str("Select an option (1-4): ")?;
        let Some(reader) = self.piped.as_mut() else {
            return self.term.read_line();
        };
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before option 4 was chosen",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn invalid_choice(&mut self, input: &str) -> io::Result<()> {
        print_error(&format!("Invalid choice '{}'. Please select 1-4.", input.trim()));
        Ok(())
    }

    fn started(&mut self, state: MenuState) -> io::Result<()> {
        self.term.write_line("")?;
        print_header("Running", state.describe());
        Ok(())
    }

    fn report(&mut self, result: &Result<OperationReport, OperationError>) -> io::Result<()> {
        match result {
            Ok(report) => {
                print_success(&summarize(report));
                if report.failures() > 0 {
                    print_warning(&format!(
                        "{} users could not be processed; see the log for details",
                        report.failures()
                    ));
                }
            }
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    fn acknowledge(&mut self) -> io::Result<()> {
        if self.piped.is_some() {
            return self.term.write_line("");
        }
        self.term.write_str("Press any key to continue...")?;
        self.term.read_key()?;
        self.term.clear_screen()
    }
}
