//! mockingbird CLI: terminal mockup of an AI-assistant chat product

use clap::{Parser, Subcommand, ValueEnum};
use mockingbird_core::DemoScript;
use mockingbird_tui::{IconMode, Options, Speed, Theme};

/// Terminal mockup of an AI-assistant chat product
#[derive(Parser)]
#[command(name = "mockingbird")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Color theme
    #[arg(long, value_enum, default_value = "mocha", global = true)]
    theme: ThemeArg,

    /// Use ASCII-only icons and borders
    #[arg(long, global = true)]
    ascii: bool,

    /// Typing animation speed
    #[arg(long, value_enum, default_value = "normal", global = true)]
    speed: SpeedArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Print the embedded demo script
    Script {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Mocha,
    Latte,
    HighContrast,
}

impl ThemeArg {
    fn theme(self) -> Theme {
        match self {
            ThemeArg::Mocha => Theme::mocha(),
            ThemeArg::Latte => Theme::latte(),
            ThemeArg::HighContrast => Theme::high_contrast(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpeedArg {
    Normal,
    Fast,
    Instant,
}

impl SpeedArg {
    fn speed(self) -> Speed {
        match self {
            SpeedArg::Normal => Speed::Normal,
            SpeedArg::Fast => Speed::Fast,
            SpeedArg::Instant => Speed::Instant,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let options = Options {
        theme: cli.theme.theme(),
        icon_mode: if cli.ascii {
            IconMode::Ascii
        } else {
            IconMode::Unicode
        },
        speed: cli.speed.speed(),
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(mockingbird_tui::run_tui(options)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Script { json }) => {
            cmd_script(json);
        }
    }
}

/// Print the embedded demo script, either as JSON or as a readable summary.
fn cmd_script(json: bool) {
    let script = match DemoScript::embedded() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match script.to_json() {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Demo Script\n");

    println!("Seeded conversations:");
    for conversation in &script.conversations {
        println!("  {} ({} messages)", conversation.title, conversation.messages.len());
    }
    println!();

    println!("Canned reply: {} chars", script.reply.text.chars().count());
    for directive in &script.reply.directives {
        println!(
            "  directive at {}: [{}] {}",
            directive.offset,
            directive.tool.label(),
            directive.label
        );
    }
    println!();

    println!("Tool payloads:");
    println!("  search: {} chars", script.search_text.chars().count());
    println!("  files: {} items", script.files.len());
    println!("  terminal: {} chars", script.terminal_text.chars().count());
}
