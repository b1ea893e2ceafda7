use chrono::Utc;
use clap::Args;
use onepromise_core::suggestions;

#[derive(Args)]
pub struct SuggestArgs {
    /// Milliseconds into the rotation (defaults to the wall clock)
    #[arg(long)]
    elapsed_ms: Option<u64>,
    /// Print the whole catalog instead of one suggestion
    #[arg(long)]
    all: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.all {
        for text in suggestions::SUGGESTIONS {
            println!("{text}");
        }
        return Ok(());
    }

    let elapsed = args
        .elapsed_ms
        .unwrap_or_else(|| Utc::now().timestamp_millis() as u64);
    println!("{}", suggestions::suggestion_at(elapsed));
    Ok(())
}
