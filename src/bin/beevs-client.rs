use anyhow::Result;
use beevs_client::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::Login { .. } | Action::Logout | Action::Session | Action::Elections => {
            actions::admin::handle(action, &globals).await?;
        }
        Action::Auth { .. } | Action::Revoke { .. } => {
            actions::scoped::handle(action, &globals).await?;
        }
        Action::Route { .. } => actions::route::handle(action, &globals)?,
    }

    Ok(())
}
