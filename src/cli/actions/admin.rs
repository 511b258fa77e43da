use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::dispatch::{CredentialScope, Dispatcher};
use crate::errors::Error;
use crate::session::SessionManager;
use crate::store::FileStore;
use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// Handle the administrator session actions
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let store = Arc::new(FileStore::open(&globals.credentials));
    let manager = SessionManager::new(&globals.api_url, store.clone())?;

    match action {
        Action::Login { email, password } => {
            let session = manager.login(&email, &password).await?;

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "message": "Login successful",
                    "admin": session.profile,
                }))?
            );
        }
        Action::Logout => {
            manager.logout();

            println!("Admin session cleared");
        }
        Action::Session => match manager.current_session() {
            Some(session) => {
                println!("{}", serde_json::to_string_pretty(&session.profile)?);
            }
            None => println!("No admin session"),
        },
        Action::Elections => {
            let dispatcher = Dispatcher::new(&globals.api_url, store)?;
            let request = dispatcher.request(Method::GET, "/api/v1/elections")?;

            match dispatcher.send(request, &CredentialScope::Admin).await {
                Ok(response) => {
                    let json_response: Value = response.json().await?;
                    let data = json_response.get("data").cloned().unwrap_or(Value::Null);

                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                // The server no longer accepts the stored session; drop it so
                // the next command starts from a clean login. Scoped voter and
                // auditor tokens stay as they are.
                Err(Error::Expired(scope)) => {
                    manager.logout();

                    return Err(anyhow!(
                        "Credential for {scope} was rejected, session cleared; log in again"
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        }
        _ => return Err(anyhow!("unexpected action")),
    }

    Ok(())
}
