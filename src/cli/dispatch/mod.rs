use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::scoped::Role;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs::new(
        matches
            .get_one::<String>("api-url")
            .map(String::to_string)
            .context("missing required argument: --api-url")?,
        matches
            .get_one::<PathBuf>("credentials")
            .cloned()
            .context("missing required argument: --credentials")?,
    );

    let one = |matches: &clap::ArgMatches, arg: &str| -> Result<String> {
        matches
            .get_one::<String>(arg)
            .map(String::to_string)
            .with_context(|| format!("missing required argument: --{arg}"))
    };

    let role = |matches: &clap::ArgMatches| -> Result<Role> {
        matches
            .get_one::<Role>("role")
            .copied()
            .context("missing required argument: --role")
    };

    let action = match matches.subcommand() {
        Some(("login", sub_matches)) => Action::Login {
            email: one(sub_matches, "email")?,
            password: SecretString::from(one(sub_matches, "password")?),
        },
        Some(("logout", _)) => Action::Logout,
        Some(("session", _)) => Action::Session,
        Some(("elections", _)) => Action::Elections,
        Some(("auth", sub_matches)) => Action::Auth {
            role: role(sub_matches)?,
            election_id: one(sub_matches, "election")?,
            credential: SecretString::from(one(sub_matches, "credential")?),
        },
        Some(("revoke", sub_matches)) => Action::Revoke {
            role: role(sub_matches)?,
            election_id: one(sub_matches, "election")?,
        },
        Some(("route", sub_matches)) => Action::Route {
            path: one(sub_matches, "path")?,
        },
        _ => return Err(anyhow!("no command specified")),
    };

    Ok((action, globals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_login() {
        let matches = commands::new().get_matches_from(vec![
            "beevs-client",
            "login",
            "--email",
            "a@x.com",
            "--password",
            "pw",
        ]);

        let (action, globals) = handler(&matches).unwrap();
        assert_eq!(globals.api_url, "http://localhost:5000");
        assert!(matches!(action, Action::Login { email, .. } if email == "a@x.com"));
    }

    #[test]
    fn test_handler_route() {
        let matches = commands::new().get_matches_from(vec!["beevs-client", "route", "/vote/E1"]);

        let (action, _) = handler(&matches).unwrap();
        assert!(matches!(action, Action::Route { path } if path == "/vote/E1"));
    }

    #[test]
    fn test_handler_revoke() {
        let matches = commands::new().get_matches_from(vec![
            "beevs-client",
            "revoke",
            "--role",
            "auditor",
            "--election",
            "E1",
        ]);

        let (action, _) = handler(&matches).unwrap();
        assert!(matches!(
            action,
            Action::Revoke {
                role: Role::Auditor,
                election_id,
            } if election_id == "E1"
        ));
    }
}
