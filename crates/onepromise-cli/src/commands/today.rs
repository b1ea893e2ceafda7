use chrono::Local;
use clap::Subcommand;
use onepromise_core::{CycleEngine, Thumb};

#[derive(Subcommand)]
pub enum TodayAction {
    /// Print the current cycle state as JSON
    Status,
    /// Make today's promise
    Promise {
        /// The one thing you promise to do today
        text: String,
    },
    /// Record whether the promise was kept
    Reflect {
        /// "up" if you kept it, "down" if you didn't
        thumb: String,
    },
    /// Discard today's promise and start over
    Reset,
}

pub fn run(action: TodayAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = super::open()?;
    let now = Local::now();
    let mut engine = CycleEngine::new(&ctx.db).with_reset_hour(ctx.config.cycle.reset_hour);
    engine.resume(now);

    match action {
        TodayAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
        }
        TodayAction::Promise { text } => match engine.submit(&text, now)? {
            Some(event) => {
                println!("{}", serde_json::to_string_pretty(&event)?);
                engine.confirm(now);
            }
            None => {
                eprintln!("a promise already stands for today");
                std::process::exit(1);
            }
        },
        TodayAction::Reflect { thumb } => {
            let thumb = match thumb.as_str() {
                "up" => Thumb::Up,
                "down" => Thumb::Down,
                other => return Err(format!("expected 'up' or 'down', got '{other}'").into()),
            };
            match engine.reflect(thumb, now)? {
                Some(event) => {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                    println!("{}", engine.ledger().week_summary(now).headline());
                }
                None => {
                    eprintln!("nothing to reflect on right now");
                    std::process::exit(1);
                }
            }
        }
        TodayAction::Reset => {
            if let Some(event) = engine.reset_today(now)? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }
    Ok(())
}
