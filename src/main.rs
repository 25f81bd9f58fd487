mod app;
mod automation;
mod catalog;
mod client;
mod config;
mod persist;
mod ui;

use anyhow::Result;
use app::App;
use automation::AutomationRunner;
use catalog::Catalog;
use client::{ClientSurface, Depot};
use config::Config;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use persist::{load_config, save_config};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task;

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = match load_config()? {
        Some(config) => config,
        None => Config::default(),
    };

    let catalog = Catalog::standard();
    let mut depot = Depot::new(catalog.clone());
    let mut runner = AutomationRunner::new();
    runner.add_message("Reported for duty at the depot.");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut config, &catalog, &mut depot, &mut runner).await;
    restore_terminal(&mut terminal)?;

    save_config(&config)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &mut Config,
    catalog: &Catalog,
    depot: &mut Depot,
    runner: &mut AutomationRunner,
) -> Result<()> {
    let mut app = App::new();
    app.clamp_entry_selection(config.wish_list.len());

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    task::spawn(async move {
        loop {
            match task::spawn_blocking(crossterm::event::read).await {
                Ok(Ok(event)) => {
                    if input_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Err(_)) => break,
                Err(_) => break,
            }
        }
    });

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(100);
    let mut should_quit = false;

    loop {
        terminal.draw(|f| ui::render(f, &app, runner, depot, config, catalog))?;
        if should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        tokio::select! {
            Some(event) = input_rx.recv() => {
                if handle_event(event, &mut app, config, depot, runner)? {
                    should_quit = true;
                }
            }
            _ = tokio::time::sleep(timeout) => {
                let delta = last_tick.elapsed();
                last_tick = Instant::now();
                depot.advance(delta);
                runner.tick(depot, config, catalog, Instant::now());
                app.clamp_entry_selection(config.wish_list.len());
            }
        }
    }

    runner.shutdown(depot, config);
    Ok(())
}

fn handle_event(
    event: Event,
    app: &mut App,
    config: &mut Config,
    depot: &mut Depot,
    runner: &mut AutomationRunner,
) -> Result<bool> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key_event(key, app, config, depot, runner)
        }
        Event::Resize(_, _) => Ok(false),
        _ => Ok(false),
    }
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    config: &mut Config,
    depot: &mut Depot,
    runner: &mut AutomationRunner,
) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char(' ') => {
            runner.toggle_enabled();
            if runner.is_enabled() {
                runner.add_message("Supply run requested.");
            } else {
                runner.add_message("Stop requested.");
            }
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.move_selection(config.wish_list.len(), -1);
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            app.move_selection(config.wish_list.len(), 1);
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            if let Some(entry) = config.entry_mut(app.selected_entry) {
                entry.toggle_enabled();
            }
            Ok(false)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(entry) = config.entry_mut(app.selected_entry) {
                entry.adjust_limit(1);
            }
            Ok(false)
        }
        KeyCode::Char('-') => {
            if let Some(entry) = config.entry_mut(app.selected_entry) {
                entry.adjust_limit(-1);
            }
            Ok(false)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            if let Some(entry) = config.entry_mut(app.selected_entry) {
                entry.cycle_mode();
            }
            Ok(false)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if let Some(entry) = config.entry_mut(app.selected_entry) {
                entry.toggle_secondary_stock();
            }
            Ok(false)
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            config.cycle_report_channel();
            runner.add_message(format!(
                "Run reports now go to the {}.",
                config.report_channel.label()
            ));
            Ok(false)
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            let inside = !depot.in_service_area();
            depot.set_service_area(inside);
            runner.add_message(if inside {
                "Back inside the depot grounds."
            } else {
                "Walked off the depot grounds."
            });
            Ok(false)
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            let home = !depot.on_home_realm();
            depot.set_home_realm(home);
            runner.add_message(if home {
                "Returned to the home realm."
            } else {
                "Travelled to a visiting realm."
            });
            Ok(false)
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            if depot.bonus_multiplier() > 1.0 {
                depot.set_bonus_multiplier(1.0);
                runner.add_message("Delivery bonus expired.");
            } else {
                depot.set_bonus_multiplier(1.15);
                runner.add_message("Delivery bonus active (+15%).");
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
