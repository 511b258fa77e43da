use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::gate::{self, Access};
use crate::store::FileStore;
use anyhow::{anyhow, Result};

/// Handle the navigation gate action
pub fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Route { path } = action else {
        return Err(anyhow!("unexpected action"));
    };

    let store = FileStore::open(&globals.credentials);

    match gate::evaluate_path(&path, &store) {
        Access::Allow => println!("allow"),
        Access::RedirectToAuth(target) => println!("redirect {target}"),
        Access::Deny => println!("deny"),
    }

    Ok(())
}
