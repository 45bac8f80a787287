//! The interactive console menu.
//!
//! The loop itself is synchronous. Each selection is handed to an
//! [`Execute`] implementation, which for the real console blocks a tokio
//! runtime on the operation's future.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tokio::runtime::{Builder, Runtime};
use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::operations::{Operation, OperationRegistry, OperationRunner};
use crate::render::{SystemViewer, Viewer};

const HEADER: [&str; 2] = [
    "Choose a method to execute by entering the numeral for the selected method.",
    "The results of the test method executions will be displayed within the system text editor.",
];
const INVALID_SELECTION: &str = "An invalid test method index was entered.  Please try again.";
const CONTINUE_PROMPT: &str = "Execute another test method?  (Y/N)";

/// Runs one operation to completion.
pub trait Execute {
    fn execute(&mut self, operation: Operation) -> Result<()>;
}

/// Drives an [`OperationRunner`] on a current-thread runtime.
pub struct BlockingExecutor<V: Viewer = SystemViewer> {
    runtime: Runtime,
    runner: OperationRunner<V>,
}

impl<V: Viewer> BlockingExecutor<V> {
    pub fn new(runner: OperationRunner<V>) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, runner })
    }

    /// Delete every file rendered during the session.
    pub fn shutdown(&mut self) {
        self.runner.shutdown();
    }
}

impl<V: Viewer> Execute for BlockingExecutor<V> {
    fn execute(&mut self, operation: Operation) -> Result<()> {
        self.runtime.block_on(self.runner.run(operation))?;
        Ok(())
    }
}

/// Parse a 1-based menu selection. Valid numbers are `1..=count`.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Some(number),
        _ => None,
    }
}

/// Whether the answer to the continuation prompt asks for another run.
///
/// Only the line terminator is ignored; a `y` padded with spaces stops.
pub fn wants_another(answer: &str) -> bool {
    answer
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case("y")
}

/// The menu loop over an input and an output stream.
pub struct MenuLoop<'a, R, W> {
    registry: &'a OperationRegistry,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuLoop<'a, R, W> {
    pub fn new(registry: &'a OperationRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
        }
    }

    /// Run until the operator declines to continue or input ends.
    ///
    /// Returns the number of operations executed.
    pub fn run<E: Execute>(&mut self, executor: &mut E) -> Result<usize> {
        let mut executed = 0;

        loop {
            self.print_menu()?;

            let Some(operation) = self.read_selection()? else {
                info!("Input closed while waiting for a selection");
                break;
            };

            writeln!(self.output, "Executing:  {}...", operation.label())?;
            self.output.flush()?;

            let started = Instant::now();
            if let Err(e) = executor.execute(operation) {
                error!(operation = operation.label(), "Operation failed: {}", e);
                writeln!(self.output, "{}", e.user_message())?;
            }
            executed += 1;

            writeln!(
                self.output,
                "Total Method Execution Time (ms):  {}",
                started.elapsed().as_millis()
            )?;
            writeln!(self.output)?;
            writeln!(self.output, "{}", CONTINUE_PROMPT)?;
            self.output.flush()?;

            match self.read_line()? {
                Some(answer) if wants_another(&answer) => continue,
                _ => break,
            }
        }

        Ok(executed)
    }

    fn print_menu(&mut self) -> Result<()> {
        for line in HEADER {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;
        for line in self.registry.menu_lines() {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read lines until one is a valid selection. `None` at end of input.
    fn read_selection(&mut self) -> Result<Option<Operation>> {
        while let Some(line) = self.read_line()? {
            let operation = parse_selection(&line, self.registry.len())
                .and_then(|number| self.registry.get(number));

            match operation {
                Some(operation) => return Ok(Some(operation)),
                None => {
                    debug!(input = line.trim(), "Rejected menu selection");
                    writeln!(self.output, "{}", INVALID_SELECTION)?;
                    self.output.flush()?;
                }
            }
        }
        Ok(None)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(AppError::Io)?;
        Ok((read > 0).then_some(line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::api::Lookup;

    #[derive(Default)]
    struct FakeExecutor {
        executed: Vec<Operation>,
        fail: bool,
    }

    impl Execute for FakeExecutor {
        fn execute(&mut self, operation: Operation) -> Result<()> {
            self.executed.push(operation);
            if self.fail {
                Err(AppError::other("render failed"))
            } else {
                Ok(())
            }
        }
    }

    fn run_menu(registry: &OperationRegistry, input: &str, executor: &mut FakeExecutor) -> String {
        let mut output = Vec::new();
        MenuLoop::new(registry, Cursor::new(input.as_bytes()), &mut output)
            .run(executor)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_selection_bounds() {
        assert_eq!(parse_selection("1", 64), Some(1));
        assert_eq!(parse_selection(" 64\n", 64), Some(64));
        assert_eq!(parse_selection("0", 64), None);
        assert_eq!(parse_selection("65", 64), None);
        assert_eq!(parse_selection("-1", 64), None);
        assert_eq!(parse_selection("abc", 64), None);
        assert_eq!(parse_selection("", 64), None);
    }

    #[test]
    fn test_wants_another() {
        assert!(wants_another("y"));
        assert!(wants_another("y\n"));
        assert!(wants_another("Y\r\n"));
        assert!(!wants_another(" y\n"));
        assert!(!wants_another("y \n"));
        assert!(!wants_another("yes"));
        assert!(!wants_another("n"));
        assert!(!wants_another(""));
    }

    #[test]
    fn test_first_and_last_execute_once() {
        let registry = OperationRegistry::new();

        let mut executor = FakeExecutor::default();
        run_menu(&registry, "1\nn\n", &mut executor);
        assert_eq!(executor.executed, vec![Operation::CreateAttachment]);

        let mut executor = FakeExecutor::default();
        run_menu(&registry, "64\nn\n", &mut executor);
        assert_eq!(executor.executed, vec![Operation::GetAll(Lookup::UserType)]);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let registry = OperationRegistry::new();
        let mut executor = FakeExecutor::default();

        let output = run_menu(&registry, "0\n65\nfoo\n\n5\nn\n", &mut executor);

        assert_eq!(output.matches(INVALID_SELECTION).count(), 4);
        assert_eq!(executor.executed, vec![Operation::GetById(Lookup::Cause)]);
    }

    #[test]
    fn test_padded_y_ends_session() {
        let registry = OperationRegistry::new();
        let mut executor = FakeExecutor::default();

        run_menu(&registry, "1\n y\n2\nn\n", &mut executor);

        assert_eq!(executor.executed, vec![Operation::CreateAttachment]);
    }

    #[test]
    fn test_y_repeats_anything_else_stops() {
        let registry = OperationRegistry::new();
        let mut executor = FakeExecutor::default();

        let output = run_menu(&registry, "1\ny\n2\nY\n3\n\n4\nn\n", &mut executor);

        assert_eq!(
            executor.executed,
            vec![
                Operation::CreateAttachment,
                Operation::GetAttachment,
                Operation::GetAttachmentsForIssue,
            ]
        );
        assert_eq!(output.matches(CONTINUE_PROMPT).count(), 3);
    }

    #[test]
    fn test_eof_ends_session() {
        let registry = OperationRegistry::new();
        let mut executor = FakeExecutor::default();

        let output = run_menu(&registry, "", &mut executor);
        assert!(executor.executed.is_empty());
        assert!(output.contains(HEADER[0]));

        let output = run_menu(&registry, "2\n", &mut executor);
        assert_eq!(executor.executed, vec![Operation::GetAttachment]);
        assert!(output.contains(CONTINUE_PROMPT));
    }

    #[test]
    fn test_output_format() {
        let registry = OperationRegistry::from_operations(vec![
            Operation::GetIssue,
            Operation::GetAllUsers,
        ]);
        let mut executor = FakeExecutor::default();

        let output = run_menu(&registry, "2\nn\n", &mut executor);

        assert!(output.contains("  1:  GetIssueForIssueNumber\n"));
        assert!(output.contains("  2:  GetAllUsers\n"));
        assert!(output.contains("Executing:  GetAllUsers...\n"));
        assert!(output.contains("Total Method Execution Time (ms):  "));
    }

    #[test]
    fn test_failed_operation_is_reported_and_loop_continues() {
        let registry = OperationRegistry::new();
        let mut executor = FakeExecutor {
            fail: true,
            ..Default::default()
        };

        let output = run_menu(&registry, "1\ny\n2\nn\n", &mut executor);

        assert_eq!(executor.executed.len(), 2);
        assert_eq!(output.matches("render failed").count(), 2);
    }
}
