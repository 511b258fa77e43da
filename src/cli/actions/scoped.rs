use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::scoped::ScopedAccessManager;
use crate::store::FileStore;
use anyhow::{anyhow, Result};
use serde_json::json;
use std::sync::Arc;

/// Handle the voter/auditor token actions
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let store = Arc::new(FileStore::open(&globals.credentials));
    let manager = ScopedAccessManager::new(&globals.api_url, store)?;

    match action {
        Action::Auth {
            role,
            election_id,
            credential,
        } => {
            let token = manager.authenticate(role, &election_id, &credential).await?;

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "message": "Authentication successful",
                    "role": token.role,
                    "election_id": token.election_id,
                }))?
            );
        }
        Action::Revoke { role, election_id } => {
            manager.revoke(role, &election_id);

            println!("Dropped {role} token for election {election_id}");
        }
        _ => return Err(anyhow!("unexpected action")),
    }

    Ok(())
}
