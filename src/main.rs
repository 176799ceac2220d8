mod app;
mod config;
mod logging;
mod models;
mod suggest;
mod ui;
pub mod utils;

use anyhow::{Context, Result};
use app::App;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode, MouseButton, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use models::KeyInput;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use suggest::client::HttpSuggestionClient;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "nextword")]
#[command(version)]
#[command(about = "Next-word suggestions in your terminal, in the voice of an author", long_about = None)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Author/style whose language model drives suggestions (e.g. "shakespeare")
    #[arg(short, long)]
    author: Option<String>,

    /// Base URL of the suggestion server (e.g. http://127.0.0.1:5001)
    #[arg(short, long)]
    server: Option<String>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print N words of generated text instead of starting the editor
    #[arg(short, long, value_name = "N", value_parser = RangedU64ValueParser::<u32>::new().range(1..=10000))]
    generate: Option<u32>,

    /// With --generate: count characters instead of words
    #[arg(short, long, default_value_t = false, requires = "generate", help_heading = "Flags")]
    chars: bool,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });
    if let Some(server) = cli.server {
        app_config.server.url = server;
    }
    if let Some(author) = cli.author {
        app_config.default_context = author;
    }
    app_config.normalize();

    let _log_guard = match cli.log_dir.or_else(logging::default_log_dir) {
        Some(dir) => match logging::init_tracing(&dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled. Error: {:#}", e);
                None
            }
        },
        None => None,
    };

    let client = HttpSuggestionClient::new(&app_config.server.url, app_config.server.timeout())
        .context("failed to build HTTP client")?;

    if let Some(num) = cli.generate {
        let text = client
            .generate(&app_config.default_context, !cli.chars, num)
            .with_context(|| format!("text generation for {} failed", app_config.default_context))?;
        println!("{}", text);
        return Ok(());
    }

    info!(server = %app_config.server.url, context = %app_config.default_context, "starting editor");

    let mut app = App::new(
        Arc::new(client),
        app_config.contexts,
        &app_config.default_context,
        app_config.theme,
    )?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // lone Shift / CapsLock presses are only reported with enhanced keyboard reporting
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    } else {
        warn!("terminal lacks keyboard enhancement; use F2/F3 for shift/caps");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        app.poll_suggestions();
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(std::time::Duration::from_millis(16))? {
            let ev = event::read()?;
            match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        if is_quit(&key) {
                            app.quit();
                        } else {
                            app.on_key(map_key(&key));
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let area = Rect::new(0, 0, app.terminal_width, app.terminal_height);
                        if let Some(index) = ui::candidate_at(area, app, mouse.column, mouse.row) {
                            app.activate(index);
                        }
                    }
                }
                Event::Resize(w, h) => {
                    app.resize(w, h);
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn map_key(key: &KeyEvent) -> KeyInput {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Tab => KeyInput::Tab,
        KeyCode::F(2) => KeyInput::Shift,
        KeyCode::F(3) => KeyInput::CapsLock,
        KeyCode::F(4) => KeyInput::NextContext,
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            KeyInput::Shift
        }
        KeyCode::CapsLock => KeyInput::CapsLock,
        // alt is accepted too, many terminals swallow ctrl+digit
        KeyCode::Char(c @ '2'..='4') if ctrl || alt => KeyInput::CtrlDigit(c as u8 - b'0'),
        KeyCode::Char(_) if ctrl || alt => KeyInput::Other,
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Backspace => KeyInput::Backspace,
        _ => KeyInput::Other,
    }
}
