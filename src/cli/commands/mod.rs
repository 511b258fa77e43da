use crate::scoped::Role;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_role() -> ValueParser {
    ValueParser::from(move |role: &str| -> std::result::Result<Role, String> { role.parse() })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("beevs-client")
        .about("Access control client for the beevs election platform")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the beevs API")
                .default_value("http://localhost:5000")
                .env("BEEVS_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("credentials")
                .long("credentials")
                .help("Path of the credential file")
                .default_value(".beevs-credentials.json")
                .env("BEEVS_CREDENTIALS")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("BEEVS_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Authenticate the administrator")
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Administrator email")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Administrator password")
                        .env("BEEVS_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Clear the administrator session"))
        .subcommand(Command::new("session").about("Show the stored administrator session"))
        .subcommand(Command::new("elections").about("List elections as the administrator"))
        .subcommand(
            Command::new("auth")
                .about("Authenticate a voter or auditor for one election")
                .arg(
                    Arg::new("role")
                        .short('r')
                        .long("role")
                        .help("Actor kind: voter or auditor")
                        .required(true)
                        .value_parser(validator_role()),
                )
                .arg(
                    Arg::new("election")
                        .long("election")
                        .help("Election id")
                        .required(true),
                )
                .arg(
                    Arg::new("credential")
                        .short('c')
                        .long("credential")
                        .help("Role-specific credential material, forwarded verbatim")
                        .env("BEEVS_CREDENTIAL")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("revoke")
                .about("Drop the stored token for one role and election")
                .arg(
                    Arg::new("role")
                        .short('r')
                        .long("role")
                        .help("Actor kind: voter or auditor")
                        .required(true)
                        .value_parser(validator_role()),
                )
                .arg(
                    Arg::new("election")
                        .long("election")
                        .help("Election id")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("route")
                .about("Evaluate the navigation gate for a client path")
                .arg(
                    Arg::new("path")
                        .help("Client path, for example /vote/E1")
                        .required(true),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "beevs-client");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Access control client for the beevs election platform"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_login_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "beevs-client",
            "login",
            "--email",
            "a@x.com",
            "--password",
            "pw",
        ]);

        assert_eq!(
            matches.get_one::<String>("api-url").map(String::to_string),
            Some("http://localhost:5000".to_string())
        );

        let sub_matches = matches.subcommand_matches("login").unwrap();
        assert_eq!(
            sub_matches.get_one::<String>("email").map(String::to_string),
            Some("a@x.com".to_string())
        );
        assert_eq!(
            sub_matches
                .get_one::<String>("password")
                .map(String::to_string),
            Some("pw".to_string())
        );
    }

    #[test]
    fn test_check_auth_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "beevs-client",
            "auth",
            "--role",
            "voter",
            "--election",
            "E7",
            "--credential",
            "code-123",
        ]);

        let sub_matches = matches.subcommand_matches("auth").unwrap();
        assert_eq!(
            sub_matches.get_one::<Role>("role").copied(),
            Some(Role::Voter)
        );
        assert_eq!(
            sub_matches
                .get_one::<String>("election")
                .map(String::to_string),
            Some("E7".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("BEEVS_API_URL", Some("https://elections.example")),
                ("BEEVS_CREDENTIALS", Some("/tmp/beevs.json")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["beevs-client", "logout"]);

                assert_eq!(
                    matches.get_one::<String>("api-url").map(String::to_string),
                    Some("https://elections.example".to_string())
                );
                assert_eq!(
                    matches.get_one::<PathBuf>("credentials").cloned(),
                    Some(PathBuf::from("/tmp/beevs.json"))
                );
            },
        );
    }

    #[test]
    fn test_invalid_role_is_rejected() {
        let command = new();
        let result = command.try_get_matches_from(vec![
            "beevs-client",
            "auth",
            "--role",
            "admin",
            "--election",
            "E7",
            "--credential",
            "code-123",
        ]);
        assert!(result.is_err());
    }
}
