use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use taskdag::exec::{CommandOutput, CommandRunner};

/// One recorded command execution.
#[derive(Debug, Clone)]
pub struct Execution {
    /// `argv` joined with spaces, e.g. `"echo A"`.
    pub command: String,
    pub started: Instant,
    pub finished: Instant,
}

/// A fake runner that:
/// - records which commands were "run", and when
/// - sleeps for a configured delay per command (default: none)
/// - reports failure for commands marked with [`FakeRunner::fail`].
///
/// Commands are keyed by `argv.join(" ")`.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    executions: Arc<Mutex<Vec<Execution>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn delay(mut self, command: &str, delay: Duration) -> Self {
        self.delays.insert(command.to_string(), delay);
        self
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Snapshot of the execution log. Clones of a runner share one log.
    pub fn executions(&self) -> Vec<Execution> {
        self.executions.lock().unwrap().clone()
    }

    pub fn executed_commands(&self) -> Vec<String> {
        self.executions().into_iter().map(|e| e.command).collect()
    }

    pub fn execution(&self, command: &str) -> Option<Execution> {
        self.executions().into_iter().find(|e| e.command == command)
    }

    pub fn was_run(&self, command: &str) -> bool {
        self.execution(command).is_some()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = CommandOutput> + Send + 'a>> {
        let command = argv.join(" ");
        let delay = self
            .delays
            .get(&command)
            .copied()
            .unwrap_or(self.default_delay);
        let success = !self.failing.contains(&command);
        let executions = Arc::clone(&self.executions);

        Box::pin(async move {
            let started = Instant::now();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let finished = Instant::now();

            executions.lock().unwrap().push(Execution {
                command: command.clone(),
                started,
                finished,
            });

            CommandOutput {
                success,
                output: format!("ran {command}\n"),
                duration: finished - started,
            }
        })
    }
}
