//! Headless mode for the postcards experience.
//!
//! A simple line-oriented interface for walking the story without a TUI,
//! suitable for scripted runs and smoke tests against a live backend.

use std::io::{self, BufRead, Write};

use postcards_api::PostcardsClient;
use postcards_core::{
    CatalogSource, HeadlessConfig, HeadlessJourney, PostcardDraft, Screen, StoreError,
};

/// Options for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Visitor name the postcards are addressed to.
    pub user_name: String,
    /// Run against the built-in catalog instead of a backend.
    pub offline: bool,
    /// API base when online.
    pub api_base: Option<String>,
}

/// Parse headless options from command line arguments.
pub fn parse_options_from_args(args: &[String]) -> HeadlessOptions {
    let mut options = HeadlessOptions {
        user_name: "Traveler".to_string(),
        offline: args.iter().any(|a| a == "--offline"),
        api_base: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    options.user_name = name.clone();
                    i += 1;
                }
            }
            "--api-base" => {
                if let Some(base) = args.get(i + 1) {
                    options.api_base = Some(base.clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    options
}

/// Run the story in headless mode.
///
/// Protocol:
/// - postcards print as `[POSTCARD]` blocks; press Enter to continue
/// - choice menus print as `[CHOICES]`; answer `1` or `2`
/// - at the end, anything typed after `#write` becomes your postcard
/// - `#quit` exits at any point
pub async fn run_headless(options: HeadlessOptions) -> Result<(), StoreError> {
    let client = options
        .api_base
        .clone()
        .map(PostcardsClient::new)
        .unwrap_or_else(PostcardsClient::from_env);

    let config = HeadlessConfig::quick_start(options.user_name.clone());
    let mut journey = if options.offline {
        HeadlessJourney::load(&CatalogSource, config).await?
    } else {
        HeadlessJourney::load(&client, config).await?
    };

    println!("=== Postcards from Nowhere ===");
    println!("Addressed to: {}", options.user_name);
    println!();
    println!("Commands:");
    println!("  #quit   - Leave the journey");
    println!("  #where  - Show the current node");
    println!("  #write <message> - Write back (at the end)");
    println!();

    print_screen(&journey.screen());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };
        let line = line.trim();

        if let Some(command) = line.strip_prefix('#') {
            let mut parts = command.splitn(2, ' ');
            match parts.next() {
                Some("quit") | Some("exit") => {
                    println!("Goodbye!");
                    break;
                }
                Some("where") => {
                    println!("[WHERE] {}", journey.journey().current_node());
                }
                Some("write") => {
                    let message = parts.next().unwrap_or("").trim();
                    write_back(&client, &options, message).await;
                }
                _ => {
                    println!("[ERROR] Unknown command.");
                }
            }
            stdout.flush().ok();
            continue;
        }

        let screen = match journey.screen() {
            Screen::ChoiceMenu { choices, .. } => match line {
                "1" => journey.choose(choices[0].id),
                "2" => journey.choose(choices[1].id),
                _ => {
                    println!("[CHOOSE] Answer 1 or 2.");
                    continue;
                }
            }
            .unwrap_or_else(|| journey.screen()),
            Screen::WriteBack => {
                println!("[END] The story is over. Use `#write <message>` or `#quit`.");
                continue;
            }
            _ => journey.continue_story(),
        };

        // In text mode the interstitial is printed as a pause marker and
        // completed immediately.
        if let Screen::Interstitial { title, subtitle, .. } = &screen {
            println!();
            println!("          ~ {title} ~");
            println!("          {subtitle}");
            println!();
            print_screen(&journey.complete_transition());
        } else {
            print_screen(&screen);
        }

        stdout.flush().ok();
    }

    Ok(())
}

fn print_screen(screen: &Screen) {
    match screen {
        Screen::Postcard {
            node,
            postmarked,
            message,
        } => {
            println!("[POSTCARD] {postmarked} ({node})");
            for line in message.split('\n') {
                println!("  {line}");
            }
            println!("  (press Enter to continue)");
        }
        Screen::ChoiceMenu {
            title,
            subtitle,
            choices,
            ..
        } => {
            println!("[CHOICES] {title}");
            if !subtitle.is_empty() {
                println!("  {subtitle}");
            }
            for (index, choice) in choices.iter().enumerate() {
                println!("  {}. {} — {}", index + 1, choice.title, choice.subtitle);
            }
        }
        Screen::Interstitial { title, .. } => {
            println!("[TRANSITION] {title}");
        }
        Screen::WriteBack => {
            println!("[END] If you ever find yourself here again, write back.");
            println!("  Use `#write <message>` to leave a postcard, or `#quit`.");
        }
        Screen::NotFound { node } => {
            println!("[NOT FOUND] No postcard at '{node}'.");
        }
    }
}

async fn write_back(client: &PostcardsClient, options: &HeadlessOptions, message: &str) {
    if message.is_empty() {
        println!("[ERROR] Usage: #write <message>");
        return;
    }
    if options.offline {
        println!("[OFFLINE] Your postcard stays with you this time.");
        return;
    }

    let draft = PostcardDraft::new(message).with_to(options.user_name.clone());
    match draft.build() {
        Ok(postcard) => match client.create(&postcard).await {
            Ok(created) => println!("[SENT] Postcard {} is on its way.", created.slug_id),
            Err(e) => println!("[ERROR] Could not send: {e}"),
        },
        Err(e) => println!("[ERROR] {e}"),
    }
}
