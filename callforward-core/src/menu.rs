// callforward-core/src/menu.rs
use crate::accessor::SettingsApi;
use crate::context::RunContext;
use crate::operations::{run_backup, run_configure, ForwardingMode, OperationError, OperationReport};
use std::io;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Menu,
    RunningImmediate,
    RunningUnanswered,
    RunningBackup,
    Exit,
}

impl MenuState {
    /// Next state for a line typed at the menu; anything unrecognised stays put
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            "1" => Self::RunningImmediate,
            "2" => Self::RunningUnanswered,
            "3" => Self::RunningBackup,
            "4" => Self::Exit,
            _ => Self::Menu,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::RunningImmediate => "Configure immediate forwarding",
            Self::RunningUnanswered => "Configure unanswered forwarding (10 second delay)",
            Self::RunningBackup => "Backup current settings only",
            Self::Exit => "Exit",
        }
    }
}

/// Menu entries in display order
pub const MENU_ENTRIES: [(&str, MenuState); 4] = [
    ("1", MenuState::RunningImmediate),
    ("2", MenuState::RunningUnanswered),
    ("3", MenuState::RunningBackup),
    ("4", MenuState::Exit),
];

/// The person at the keyboard
pub trait Operator {
    fn show_menu(&mut self, ctx: &RunContext) -> io::Result<()>;
    fn read_choice(&mut self) -> io::Result<String>;
    fn invalid_choice(&mut self, input: &str) -> io::Result<()>;
    fn started(&mut self, state: MenuState) -> io::Result<()>;
    fn report(&mut self, result: &Result<OperationReport, OperationError>) -> io::Result<()>;
    /// Block until the operator has seen the result
    fn acknowledge(&mut self) -> io::Result<()>;
}

pub struct MenuController<'a, A: ?Sized, O> {
    api: &'a A,
    ctx: &'a RunContext,
    operator: O,
}

impl<'a, A, O> MenuController<'a, A, O>
where
    A: SettingsApi + ?Sized,
    O: Operator,
{
    pub fn new(api: &'a A, ctx: &'a RunContext, operator: O) -> Self {
        Self { api, ctx, operator }
    }

    pub fn into_operator(self) -> O {
        self.operator
    }

    /// Loop until the operator picks exit. Operation failures never end the loop.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.operator.show_menu(self.ctx)?;
            let input = self.operator.read_choice()?;

            let state = MenuState::from_input(&input);
            let result = match state {
                MenuState::Menu => {
                    self.operator.invalid_choice(&input)?;
                    continue;
                }
                MenuState::Exit => {
                    info!("Script completed");
                    return Ok(());
                }
                MenuState::RunningImmediate => {
                    self.start(state)?;
                    run_configure(self.api, self.ctx, ForwardingMode::Immediate).await
                }
                MenuState::RunningUnanswered => {
                    self.start(state)?;
                    run_configure(self.api, self.ctx, ForwardingMode::Unanswered).await
                }
                MenuState::RunningBackup => {
                    self.start(state)?;
                    run_backup(self.api, self.ctx).await
                }
            };

            if let Err(e) = &result {
                error!("{}", e);
            }
            self.operator.report(&result)?;
            self.operator.acknowledge()?;
        }
    }

    fn start(&mut self, state: MenuState) -> io::Result<()> {
        info!("Starting: {}", state.describe());
        self.operator.started(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunStamp;
    use crate::pacer::Pacer;
    use crate::testing::{FakeApi, FakeUser, LogCapture};
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    #[derive(Default)]
    struct ScriptedOperator {
        inputs: VecDeque<String>,
        menus_shown: usize,
        invalid: Vec<String>,
        started: Vec<MenuState>,
        reports: Vec<Result<OperationReport, String>>,
        acknowledged: usize,
    }

    impl ScriptedOperator {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Operator for ScriptedOperator {
        fn show_menu(&mut self, _ctx: &RunContext) -> io::Result<()> {
            self.menus_shown += 1;
            Ok(())
        }

        fn read_choice(&mut self) -> io::Result<String> {
            self.inputs
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn invalid_choice(&mut self, input: &str) -> io::Result<()> {
            self.invalid.push(input.to_string());
            Ok(())
        }

        fn started(&mut self, state: MenuState) -> io::Result<()> {
            self.started.push(state);
            Ok(())
        }

        fn report(&mut self, result: &Result<OperationReport, OperationError>) -> io::Result<()> {
            self.reports
                .push(result.as_ref().map(Clone::clone).map_err(|e| e.to_string()));
            Ok(())
        }

        fn acknowledge(&mut self) -> io::Result<()> {
            self.acknowledged += 1;
            Ok(())
        }
    }

    fn context(dir: &Path) -> RunContext {
        RunContext::new(
            dir.to_path_buf(),
            RunStamp::now(),
            "users.csv".to_string(),
            Pacer::immediate(),
        )
    }

    #[test]
    fn test_transitions() {
        assert_eq!(MenuState::from_input("1"), MenuState::RunningImmediate);
        assert_eq!(MenuState::from_input("2"), MenuState::RunningUnanswered);
        assert_eq!(MenuState::from_input(" 3\n"), MenuState::RunningBackup);
        assert_eq!(MenuState::from_input("4"), MenuState::Exit);
        for junk in ["", "0", "5", "11", "q", "exit"] {
            assert_eq!(MenuState::from_input(junk), MenuState::Menu);
        }
    }

    #[test]
    fn test_menu_entries_round_trip() {
        for (key, state) in MENU_ENTRIES {
            assert_eq!(MenuState::from_input(key), state);
        }
    }

    #[tokio::test]
    async fn test_invalid_choice_redisplays_menu() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let api = FakeApi::new();

        let mut controller = MenuController::new(&api, &ctx, ScriptedOperator::new(&["9", "x", "4"]));
        controller.run().await.unwrap();
        let operator = controller.into_operator();

        assert_eq!(operator.menus_shown, 3);
        assert_eq!(operator.invalid, vec!["9", "x"]);
        assert!(operator.started.is_empty());
        assert!(operator.reports.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_input_logs_one_error_and_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let api = FakeApi::new();

        let logs = LogCapture::default();
        let _guard = logs.install();

        let mut controller =
            MenuController::new(&api, &ctx, ScriptedOperator::new(&["1", "2", "3", "4"]));
        controller.run().await.unwrap();
        let operator = controller.into_operator();

        assert_eq!(operator.menus_shown, 4);
        assert_eq!(operator.acknowledged, 3);
        assert_eq!(operator.reports.len(), 3);
        assert!(operator.reports.iter().all(|r| r.is_err()));

        let expected = ctx.input_path().display().to_string();
        let errors = logs.lines("ERROR");
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|line| line.contains(&expected)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_backup_then_exit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("users.csv"), "Email,ForwardingNumber\na@x.com,1\n").unwrap();
        let ctx = context(dir.path());
        let api = FakeApi::new().with_user("a@x.com", FakeUser::default());

        let logs = LogCapture::default();
        let _guard = logs.install();

        let mut controller = MenuController::new(&api, &ctx, ScriptedOperator::new(&["3", "4"]));
        controller.run().await.unwrap();
        let operator = controller.into_operator();

        assert_eq!(operator.started, vec![MenuState::RunningBackup]);
        let report = operator.reports[0].as_ref().unwrap();
        assert_eq!(report.output, ctx.backup_path());
        assert!(ctx.backup_path().exists());
        assert!(api.updates().is_empty());
        assert!(logs
            .lines("INFO")
            .last()
            .is_some_and(|line| line.contains("Script completed")));
    }

    #[tokio::test]
    async fn test_reader_error_ends_loop() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let api = FakeApi::new();

        let mut controller = MenuController::new(&api, &ctx, ScriptedOperator::new(&["7"]));
        let err = controller.run().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
