mod app;
mod config;
mod form;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use form::{ContactForm, Field};

#[derive(Parser, Debug)]
#[command(name = "contact-form")]
#[command(version = "0.1.0")]
#[command(about = "A terminal contact form with live field validation")]
struct Args {
    /// Validate and submit the given values without opening the form, printing JSON
    #[arg(short, long)]
    submit: bool,

    /// First name (with --submit)
    #[arg(long, requires = "submit")]
    first_name: Option<String>,

    /// Last name (with --submit)
    #[arg(long, requires = "submit")]
    last_name: Option<String>,

    /// Email address (with --submit)
    #[arg(long, requires = "submit")]
    email: Option<String>,

    /// Optional message (with --submit)
    #[arg(long, requires = "submit")]
    message: Option<String>,

    /// Read config from this file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Outcome of a headless submit
#[derive(Debug, Serialize)]
struct SubmitReport {
    submitted: bool,
    errors: BTreeMap<Field, String>,
    summary: Vec<String>,
}

fn main() -> Result<()> {
    // Log to stderr so stdout stays clean for --submit output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.submit {
        let report = submit_headless(&args);
        println!("{}", serde_json::to_string(&report)?);
        match exit_code(&report) {
            0 => return Ok(()),
            code => std::process::exit(code),
        }
    }

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load().unwrap_or_default(),
    };

    run_tui(config)
}

/// Run the form's submit logic on the values given on the command line
fn submit_headless(args: &Args) -> SubmitReport {
    let mut form = ContactForm::new();
    let given = [
        (Field::FirstName, &args.first_name),
        (Field::LastName, &args.last_name),
        (Field::Email, &args.email),
        (Field::Message, &args.message),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            form.on_field_change(field, value.as_str());
        }
    }

    let summary = form
        .on_submit()
        .map(|submission| submission.summary_lines())
        .unwrap_or_default();

    SubmitReport {
        submitted: form.submitted().is_some(),
        errors: form.errors().map(|err| (err.field(), err.to_string())).collect(),
        summary,
    }
}

/// Process exit status for a headless submit: 1 when validation failed
fn exit_code(report: &SubmitReport) -> i32 {
    if report.submitted {
        0
    } else {
        1
    }
}

fn run_tui(config: AppConfig) -> Result<()> {
    ui::set_theme(theme::Theme::load(config.theme_path.as_deref()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("contact-form").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_headless_submit_success() {
        let args = parse(&[
            "--submit",
            "--first-name",
            "William",
            "--last-name",
            "Ward",
            "--email",
            "email@email.com",
        ]);
        let report = submit_headless(&args);

        assert!(report.submitted);
        assert!(report.errors.is_empty());
        assert_eq!(exit_code(&report), 0);
        assert_eq!(
            report.summary,
            vec!["First Name: William", "Last Name: Ward", "Email: email@email.com"]
        );
    }

    #[test]
    fn test_headless_submit_with_nothing() {
        let report = submit_headless(&parse(&["-s"]));

        assert!(!report.submitted);
        assert!(report.summary.is_empty());
        assert_eq!(report.errors.len(), 3);
        assert_eq!(exit_code(&report), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["errors"]["firstName"],
            "firstName must have at least 5 characters."
        );
        assert_eq!(json["errors"]["lastName"], "lastName is a required field.");
        assert_eq!(json["errors"]["email"], "email must be a valid email address.");
    }

    #[test]
    fn test_headless_submit_bad_email_only() {
        let args = parse(&["-s", "--first-name", "Anthony", "--last-name", "iommi", "--email", "no"]);
        let report = submit_headless(&args);

        assert!(!report.submitted);
        assert_eq!(report.errors.keys().copied().collect::<Vec<_>>(), vec![Field::Email]);
        assert_eq!(exit_code(&report), 1);
    }

    #[test]
    fn test_message_is_reported_verbatim() {
        let args = parse(&[
            "-s",
            "--first-name",
            "Tony Iommi",
            "--last-name",
            "Iommi",
            "--email",
            "tony@sabbath.com",
            "--message",
            "  Paranoid  ",
        ]);
        let report = submit_headless(&args);
        assert_eq!(report.summary.last().map(String::as_str), Some("Message:   Paranoid  "));
    }

    #[test]
    fn test_config_flag() {
        let args = parse(&["--config", "/tmp/contact-form.toml"]);
        assert!(!args.submit);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/contact-form.toml")));
    }

    #[test]
    fn test_field_values_need_submit() {
        for flag in ["--first-name", "--last-name", "--email", "--message"] {
            let result = Args::try_parse_from(["contact-form", flag, "William"]);
            assert!(result.is_err(), "{} without --submit should be rejected", flag);
        }
        assert!(Args::try_parse_from(["contact-form", "-s", "--email", "a@b.com"]).is_ok());
    }
}
