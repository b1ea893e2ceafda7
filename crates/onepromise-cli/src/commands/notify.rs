use clap::Subcommand;
use onepromise_core::{Decision, NotificationPlatform, PermissionGate, PermissionState};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Show whether the permission question has been settled
    Status,
    /// Run the one-time permission request
    Attempt {
        /// Answer yes without prompting
        #[arg(long, conflicts_with = "deny")]
        allow: bool,
        /// Answer no without prompting
        #[arg(long)]
        deny: bool,
    },
    /// Forget the recorded answer
    ResetFlag,
}

/// Terminal stand-in for a browser permission prompt. A preset answer
/// acts like a platform that already holds a decision.
struct TerminalPlatform {
    preset: Option<Decision>,
}

impl NotificationPlatform for TerminalPlatform {
    fn current_decision(&self) -> Decision {
        self.preset.unwrap_or(Decision::Undecided)
    }

    fn request(&mut self) -> Result<Decision, Box<dyn std::error::Error>> {
        eprint!("Allow notifications? [y/n] ");
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Err("no answer".into());
        }
        match line.trim() {
            "y" | "yes" => Ok(Decision::Granted),
            "n" | "no" => Ok(Decision::Denied),
            other => Err(format!("unrecognized answer '{other}'").into()),
        }
    }
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = super::open()?;
    let gate = PermissionGate::new(&ctx.db);

    match action {
        NotifyAction::Status => {
            println!("{}", gate.state().as_str());
        }
        NotifyAction::Attempt { allow, deny } => {
            let preset = if allow {
                Some(Decision::Granted)
            } else if deny {
                Some(Decision::Denied)
            } else {
                None
            };
            let mut platform = TerminalPlatform { preset };
            match gate.attempt_once(&mut platform)? {
                PermissionState::Satisfied => println!("satisfied"),
                PermissionState::AttemptedFailed => {
                    println!("attempt did not complete; will ask again next time")
                }
                PermissionState::Unrequested => println!("unrequested"),
            }
        }
        NotifyAction::ResetFlag => {
            gate.reset()?;
            println!("flag cleared");
        }
    }
    Ok(())
}
