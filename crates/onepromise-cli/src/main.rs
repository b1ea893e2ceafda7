use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "onepromise", version, about = "One promise a day, kept honest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's promise cycle
    Today {
        #[command(subcommand)]
        action: commands::today::TodayAction,
    },
    /// Journal history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Local profile management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Notification permission tracking
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Promise suggestions
    Suggest(commands::suggest::SuggestArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { action } => commands::today::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "onepromise", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
