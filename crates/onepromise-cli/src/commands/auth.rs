use chrono::Local;
use clap::Subcommand;
use onepromise_core::{CycleEngine, IdentityProvider, LocalIdentity, MemoryKv, PostLogoutFlag};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in under a profile name
    Login {
        /// Display name for the local profile
        handle: String,
    },
    /// Sign out and wipe the journal
    Logout,
    /// Show the signed-in profile
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = super::open()?;
    let mut identity = LocalIdentity::new(&ctx.db);

    match action {
        AuthAction::Login { handle } => {
            identity.login(&handle)?;
            match identity.current_identity() {
                Some(stored) => println!("signed in as {stored}"),
                None => println!("signed in"),
            }
        }
        AuthAction::Logout => {
            // The flag lives for this invocation only, like the session
            // it models; we consume it right here for the goodbye line.
            let session = MemoryKv::new();
            let flag = PostLogoutFlag::new(&session);

            let mut engine =
                CycleEngine::new(&ctx.db).with_reset_hour(ctx.config.cycle.reset_hour);
            let now = Local::now();
            engine.resume(now);
            engine.logout(&flag, now)?;
            identity.clear()?;

            if flag.consume() {
                println!("signed out, journal cleared. See you tomorrow.");
            }
        }
        AuthAction::Status => match identity.current_identity() {
            Some(handle) => {
                println!("signed in as {handle} ({})", identity.status().as_str())
            }
            None => println!("not signed in"),
        },
    }
    Ok(())
}
