//! Postcards from Nowhere terminal application.
//!
//! An interactive story told through flippable postcards, user-chosen
//! branches, and a final write-back composition step.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! scripted walks:
//!
//! ```bash
//! cargo run -p postcards -- --headless --name "Ren" --offline
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use postcards_api::PostcardsClient;
use postcards_core::{load_story, CatalogSource};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--headless") {
        let options = headless::parse_options_from_args(&args);
        return headless::run_headless(options).await.map_err(|e| e.into());
    }

    let offline = args.iter().any(|a| a == "--offline");
    let reduce_motion = args.iter().any(|a| a == "--reduce-motion");
    let client = api_base_from_args(&args)
        .map(PostcardsClient::new)
        .unwrap_or_else(PostcardsClient::from_env);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(offline, reduce_motion), client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: PostcardsClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Process a pending story load (triggered by the name prompt or a
        // retry). Both sets are fetched together; failure leaves the app on
        // an error screen with no partial flow installed.
        if app.pending_load {
            app.pending_load = false;
            app.set_status("Delivering postcards...");
            terminal.draw(|f| render(f, &app))?;

            let result = if app.offline {
                load_story(&CatalogSource).await
            } else {
                load_story(&client).await
            };

            match result {
                Ok(data) => app.install_story(data),
                Err(e) => app.load_failed(e.to_string()),
            }
        }

        // Process a pending postcard send from the composer.
        if let Some(postcard) = app.pending_send.take() {
            if app.offline {
                app.postcard_sent();
            } else {
                app.set_status("Sending...");
                terminal.draw(|f| render(f, &app))?;

                match client.create(&postcard).await {
                    Ok(_) => app.postcard_sent(),
                    Err(e) => app.send_failed(e.to_string()),
                }
            }
        }

        // Poll for events with a timeout that doubles as the animation tick.
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick(Duration::from_millis(100));
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn api_base_from_args(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--api-base")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn print_help() {
    println!("Postcards from Nowhere - an interactive narrative experience");
    println!();
    println!("USAGE:");
    println!("  postcards [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --headless          Run in headless mode (text-only, no TUI)");
    println!("  --offline           Use the built-in story, no backend needed");
    println!("  --api-base <URL>    Backend API base (default: $POSTCARDS_API_BASE");
    println!("                      or http://localhost:4000/api)");
    println!("  --reduce-motion     Skip the staged fade-ins");
    println!();
    println!("HEADLESS OPTIONS (only with --headless):");
    println!("  --name <NAME>       Who the postcards are addressed to");
    println!();
    println!("EXAMPLES:");
    println!("  postcards                          # Interactive TUI mode");
    println!("  postcards --offline                # No backend required");
    println!("  postcards --headless --name Ren    # Scripted text mode");
}
