//! User-facing console output
//!
//! Diagnostics go through `tracing`; what the user is meant to read goes
//! through a [`Reporter`] so commands can be driven and inspected in tests.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use colored::Colorize;

/// Receives the messages of a command
pub trait Reporter: Send + Sync {
    /// Start a line that progress markers are appended to
    fn status_line(&self, message: &str);

    /// Append one progress marker to the current status line
    fn progress(&self);

    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    fn failure(&self, message: &str);
}

/// Writes coloured output to the terminal
#[derive(Debug, Default)]
pub struct TerminalReporter {
    inline: Mutex<bool>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminate a pending status line before printing a full line
    fn finish_inline(&self) {
        let mut inline = self.inline.lock().unwrap_or_else(|e| e.into_inner());
        if *inline {
            println!();
            *inline = false;
        }
    }

    fn print_inline(&self, text: colored::ColoredString) {
        let mut inline = self.inline.lock().unwrap_or_else(|e| e.into_inner());
        print!("{}", text);
        let _ = std::io::stdout().flush();
        *inline = true;
    }
}

impl Reporter for TerminalReporter {
    fn status_line(&self, message: &str) {
        self.finish_inline();
        self.print_inline(message.cyan());
    }

    fn progress(&self) {
        self.print_inline(".".cyan());
    }

    fn info(&self, message: &str) {
        self.finish_inline();
        println!("{}", message.cyan());
    }

    fn success(&self, message: &str) {
        self.finish_inline();
        println!("{}", message.green());
    }

    fn warning(&self, message: &str) {
        self.finish_inline();
        println!("{}", message.yellow());
    }

    fn failure(&self, message: &str) {
        self.finish_inline();
        eprintln!("{}", message.red());
    }
}

/// Kind of a recorded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    StatusLine,
    Progress,
    Info,
    Success,
    Warning,
    Failure,
}

/// Keeps every message in memory instead of printing it
#[derive(Debug, Default)]
pub struct BufferedReporter {
    messages: Mutex<Vec<(MessageKind, String)>>,
}

impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far
    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Messages of one kind
    pub fn of_kind(&self, kind: MessageKind) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, message)| message)
            .collect()
    }

    fn push(&self, kind: MessageKind, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, message.to_string()));
    }
}

impl Reporter for BufferedReporter {
    fn status_line(&self, message: &str) {
        self.push(MessageKind::StatusLine, message);
    }

    fn progress(&self) {
        self.push(MessageKind::Progress, ".");
    }

    fn info(&self, message: &str) {
        self.push(MessageKind::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageKind::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageKind::Warning, message);
    }

    fn failure(&self, message: &str) {
        self.push(MessageKind::Failure, message);
    }
}

/// Help shown when a profile is requested but the profile file is missing
pub fn config_help(profile_file: &Path) -> String {
    let app = env!("CARGO_PKG_NAME");
    let mut help = String::new();

    help.push_str(&format!("{}\n\n", "Configuration Required".bold().cyan()));
    help.push_str("To get started, create a configuration file at: ");
    help.push_str(&format!("{}\n\n", profile_file.display().to_string().bold().yellow()));
    help.push_str("Example configuration:\n\n");
    help.push_str(
        &"[profiles.dev]\n\
          API_BASE_URL = \"https://dev-api.example.com\"\n\
          API_ACCESS_TOKEN = \"your-dev-token\"\n\
          \n\
          [profiles.prod]\n\
          API_BASE_URL = \"https://prod-api.example.com\"\n\
          API_ACCESS_TOKEN = \"your-prod-token\"\n"
            .green()
            .to_string(),
    );
    help.push_str("\nThen use: ");
    help.push_str(
        &format!("{} ecs deploy service image --profile dev", app)
            .bold()
            .blue()
            .to_string(),
    );
    help
}
