mod helper;
mod teleprompter;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mfw_application::{Workbench, WorkbenchError, WorkbenchSession};
use mfw_core::config::WorkbenchSettings;
use mfw_core::{MfwError, PipelineErrorKind, SessionPhase, SessionView};
use mfw_infrastructure::MfwPaths;
use mfw_interaction::GeminiApiAgent;

use helper::{CliHelper, Command};

type Repl = Editor<CliHelper, DefaultHistory>;
type Session = WorkbenchSession<GeminiApiAgent>;

/// Logs go to a daily file so they never interleave with the prompt.
fn init_tracing(paths: &MfwPaths) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let appender = tracing_appender::rolling::daily(logs_dir, "mfw-repl.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("MFW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn print_help() {
    println!("{}", "Commands:".bright_magenta());
    for (cmd, desc) in [
        ("/login <code>", "unlock the workbench with your access code"),
        ("/logout", "lock the workbench and end the session"),
        ("<text> | /topics <text>", "generate topics from raw material"),
        ("/paste", "enter multi-line raw material, finish with a lone '.'"),
        ("/select <n>", "write a script for topic n"),
        ("/show", "show topics and the current script"),
        ("/prompter", "teleprompter view of the current script"),
        ("/back", "step back (script → topics → empty)"),
        ("quit", "exit"),
    ] {
        println!("  {:<26}{}", cmd.bright_cyan(), desc.bright_black());
    }
}

fn print_topics(view: &SessionView) {
    for (number, topic) in view.numbered_topics() {
        let marker = match &view.selected_topic {
            Some(selected) if selected.index + 1 == number => "▶",
            _ => " ",
        };
        println!("{} {}", marker.bright_green(), format!("Topic {number:02}").bright_yellow().bold());
        for line in topic.lines() {
            println!("    {}", line);
        }
    }
}

fn print_script(view: &SessionView) {
    if let Some(script) = &view.script {
        if let Some(selected) = &view.selected_topic {
            println!("{}", format!("📄 Script · Topic {:02}", selected.index + 1).bright_magenta());
        }
        for line in script.lines() {
            println!("{}", line.bright_blue());
        }
    }
}

fn print_view(view: &SessionView) {
    match view.phase {
        SessionPhase::Empty => println!("{}", "No topics yet. Type some raw material.".bright_black()),
        SessionPhase::TopicsReady => {
            print_topics(view);
            println!("{}", "Use /select <n> to write a script.".bright_black());
        }
        SessionPhase::ScriptReady => {
            print_topics(view);
            println!();
            print_script(view);
        }
    }
}

fn report_error(err: &WorkbenchError) {
    let message = match err {
        WorkbenchError::Locked => format!("🔒 {err}").yellow(),
        WorkbenchError::Pipeline(pipeline) => match pipeline.kind() {
            PipelineErrorKind::Validation => format!("⚠ {pipeline}").yellow(),
            PipelineErrorKind::Format => format!("⚠ {pipeline}").yellow(),
            PipelineErrorKind::Transport => format!("❌ {pipeline}").red(),
        },
        WorkbenchError::Setup(MfwError::Security(_)) => "❌ Invalid access code".red(),
        WorkbenchError::Setup(MfwError::Config(msg)) => {
            format!("⚠ System configuration missing: {msg}").red()
        }
        WorkbenchError::Setup(other) => format!("❌ {other}").red(),
    };
    eprintln!("{message}");
    if let WorkbenchError::Pipeline(pipeline) = err {
        if pipeline.is_retryable() {
            eprintln!("{}", "Nothing was changed; you can try again.".bright_black());
        }
    }
}

/// Reads lines until a lone `.` and joins them.
fn read_paste(rl: &mut Repl) -> Result<Option<String>> {
    println!("{}", "Paste raw material; finish with a line containing only '.'".bright_black());
    let mut lines = Vec::new();
    loop {
        match rl.readline(".. ") {
            Ok(line) if line.trim() == "." => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(Some(lines.join("\n")))
}

fn run_prompter(rl: &mut Repl, view: &SessionView, settings: &WorkbenchSettings) -> Result<()> {
    let Some(script) = &view.script else {
        println!("{}", "No script yet. Use /select <n> first.".yellow());
        return Ok(());
    };
    let title = view
        .selected_topic
        .as_ref()
        .map(|s| s.label.lines().next().unwrap_or_default().to_string())
        .unwrap_or_default();

    let lines = teleprompter::layout(script, settings.prompter_width);
    let pages = teleprompter::pages(&lines, settings.prompter_page_lines);
    let total = pages.len();
    for (i, page) in pages.into_iter().enumerate() {
        println!();
        print!("{}", teleprompter::render_page(page, &title, i + 1, total));
        if i + 1 < total {
            match rl.readline("   — Enter to scroll, q to stop — ") {
                Ok(answer) if answer.trim().eq_ignore_ascii_case("q") => break,
                Ok(_) => {}
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}

async fn login(workbench: &Workbench, session: &mut Session, code: &str) {
    match workbench.unlock(session, code).await {
        Ok(()) => println!("{}", "✅ System online. Welcome back.".bright_green()),
        Err(err) => report_error(&err),
    }
}

async fn generate_topics(session: &mut Session, material: &str) {
    println!("{}", "Analyzing deep psychology patterns...".bright_black());
    match session.submit_raw_material(material).await {
        Ok(view) => {
            println!(
                "{}",
                format!("Analysis complete. {} topics generated.", view.topics.len()).bright_green()
            );
            print_topics(&view);
        }
        Err(err) => report_error(&err),
    }
}

async fn select_topic(session: &mut Session, number: usize) {
    println!("{}", "Synthesizing script...".bright_black());
    match session.select_topic(number - 1).await {
        Ok(view) => print_script(&view),
        Err(err) => report_error(&err),
    }
}

/// The main entry point for the MF Workbench REPL.
///
/// Each pipeline call is awaited before the next prompt is shown, so a
/// session never has more than one request in flight.
#[tokio::main]
async fn main() -> Result<()> {
    let paths = MfwPaths::default();
    let _guard = init_tracing(&paths)?;

    let workbench = match Workbench::load(paths).await {
        Ok(workbench) => workbench,
        Err(err) => {
            eprintln!("{}", format!("⚠ Failed to load configuration: {err}").red());
            return Err(err.into());
        }
    };
    let mut session: Session = WorkbenchSession::new();
    tracing::info!(session = %session.id(), "REPL started");

    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== 💠 MF Workbench ===".bright_magenta().bold());
    println!("{}", "Content OS for Female Growth".bright_black());
    println!();

    if workbench.requires_access_code() {
        println!("{}", "🔒 System locked. Use /login <access code>.".yellow());
    } else {
        login(&workbench, &mut session, "").await;
    }
    println!("{}", "Type /help for commands.".bright_black());
    println!();

    loop {
        let prompt = if session.is_unlocked() { ">> " } else { "🔒 " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = Command::parse(&line);
        if !command.is_sensitive() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => print_help(),
            Command::Login(code) => login(&workbench, &mut session, &code).await,
            Command::Logout => {
                session.lock();
                println!("{}", "🔒 Logged out.".yellow());
            }
            Command::Material(material) => generate_topics(&mut session, &material).await,
            Command::Paste => {
                if let Some(material) = read_paste(&mut rl)? {
                    generate_topics(&mut session, &material).await;
                }
            }
            Command::Select(number) => select_topic(&mut session, number).await,
            Command::Show => print_view(&session.view()),
            Command::Prompter => {
                run_prompter(&mut rl, &session.view(), &workbench.config().workbench)?
            }
            Command::Back => {
                let phase = session.back();
                println!("{}", format!("← {phase}").bright_black());
            }
            Command::Invalid(message) => println!("{}", message.bright_black()),
        }
    }

    tracing::info!(session = %session.id(), "REPL finished");
    Ok(())
}
