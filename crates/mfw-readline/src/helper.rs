//! Line parsing and rustyline helper for the REPL.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub const COMMANDS: &[&str] = &[
    "/login", "/logout", "/topics", "/paste", "/select", "/show", "/prompter", "/back", "/help",
];

/// One line of REPL input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Logout,
    /// Raw material for topic generation.
    Material(String),
    /// Collect multi-line material until a lone `.`.
    Paste,
    /// 1-based topic number as typed by the user.
    Select(usize),
    Show,
    Prompter,
    Back,
    Help,
    Quit,
    /// Malformed command; carries the message to show.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Command::Quit;
        }
        if !line.starts_with('/') {
            return Command::Material(line.to_string());
        }

        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match name {
            "/login" if rest.is_empty() => Command::Invalid("usage: /login <access code>".into()),
            "/login" => Command::Login(rest.to_string()),
            "/logout" => Command::Logout,
            "/topics" => Command::Material(rest.to_string()),
            "/paste" => Command::Paste,
            "/select" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Select(n),
                _ => Command::Invalid("usage: /select <topic number>".into()),
            },
            "/show" => Command::Show,
            "/prompter" => Command::Prompter,
            "/back" => Command::Back,
            "/help" => Command::Help,
            other => Command::Invalid(format!("unknown command: {other}")),
        }
    }

    /// Lines that must not end up in the history file.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Command::Login(_))
    }
}

/// Replaces everything after `/login` with one `*` per character.
fn mask_login(line: &str) -> String {
    let visible = line.len().min("/login".len());
    format!("{}{}", &line[..visible], "*".repeat(line[visible..].chars().count()))
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with("/login") {
            // Keep the code off the screen as it is typed.
            Owned(mask_login(line).bright_cyan().to_string())
        } else if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}
