use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use onepromise_core::{day, Event, HistoryLedger, Outcome};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// All journal entries, newest first
    List {
        /// Plain text lines instead of JSON
        #[arg(long)]
        plain: bool,
    },
    /// This week's entries and the kept/made summary
    Week,
    /// Heal entries written before outcomes were validated
    Repair,
    /// Delete the entire journal
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn outcome_word(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Kept) => "kept",
        Some(Outcome::Missed) => "missed",
        None => "open",
    }
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = super::open()?;
    let ledger = HistoryLedger::new(&ctx.db).with_reset_hour(ctx.config.cycle.reset_hour);

    match action {
        HistoryAction::List { plain } => {
            let entries = ledger.list_all();
            if plain {
                for entry in entries {
                    let human = NaiveDate::parse_from_str(&entry.day_key, "%Y-%m-%d")
                        .map(day::format_day_human)
                        .unwrap_or_default();
                    println!(
                        "{:<11}  {:<6}  {}",
                        human,
                        outcome_word(entry.outcome),
                        entry.promise
                    );
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }
        HistoryAction::Week => {
            let now = Local::now();
            let entries = ledger.list_current_week(now);
            let summary = ledger.week_summary(now);
            let report = serde_json::json!({
                "entries": entries,
                "made": summary.made,
                "kept": summary.kept,
                "headline": summary.headline(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        HistoryAction::Repair => {
            let repaired = ledger.repair_once()?;
            if repaired > 0 {
                println!("repaired {repaired} entries");
            } else {
                println!("nothing to repair");
            }
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                eprintln!("this deletes the whole journal; pass --yes to confirm");
                std::process::exit(1);
            }
            ledger.clear_all()?;
            let event = Event::HistoryCleared { at: Utc::now() };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
