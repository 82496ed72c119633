use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use rambar::app::{App, LIMIT_HOOK_PERIOD};
use rambar::event::{Event, EventHandler};
use rambar::launch_agent::LaunchAgent;
use rambar::settings::SettingsStore;
use rambar::ui;

#[derive(Parser)]
#[command(
    name = "rambar",
    about = "Menu-bar style RAM and power monitor for the terminal"
)]
struct Cli {
    /// Path to the settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Refresh interval in seconds (one of 1, 3, 5, 10, 30, 60)
    #[arg(long)]
    refresh: Option<u64>,

    /// Print one sample to stdout and exit
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "debug-log")]
    init_debug_log();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => SettingsStore::load_from_path(path),
        None => SettingsStore::load(),
    };
    if let Some(secs) = cli.refresh {
        settings.set_refresh_interval(secs);
    }

    let mut app = App::new(settings, LaunchAgent::new());

    if cli.once {
        print_once(&app);
        return Ok(());
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &mut app).await;

    ratatui::restore();
    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_secs(app.settings.refresh_interval_secs());
    let mut events = EventHandler::new(tick_rate, LIMIT_HOOK_PERIOD);

    // Apply the persisted limit at launch; the LimitTick keeps re-applying it
    app.run_limit_hook();

    terminal.draw(|frame| ui::draw(frame, app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => app.refresh(),
                Event::LimitTick => app.run_limit_hook(),
                Event::Resize => {}
            }
            if let Some(rate) = app.take_interval_change() {
                events.set_tick_rate(rate);
            }
            terminal.draw(|frame| ui::draw(frame, app))?;
        }
    }

    Ok(())
}

fn print_once(app: &App) {
    println!("Power: {}", app.readout.watts_text);
    println!("RAM: {} ({}%)", app.readout.ram_usage_text, app.readout.used_percent);
    println!(
        "Non-system RAM: {}% (limit {}%, {})",
        app.readout.non_system_used_percent,
        app.settings.non_system_limit_percent(),
        if app.limit_exceeded() { "HIGH" } else { "OK" },
    );
}

#[cfg(feature = "debug-log")]
fn init_debug_log() {
    use std::fs::File;

    let Some(path) = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|p| p.join("rambar.log"))
    else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
}
