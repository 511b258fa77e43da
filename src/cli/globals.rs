use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub credentials: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, credentials: PathBuf) -> Self {
        Self {
            api_url,
            credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "http://localhost:5000".to_string(),
            PathBuf::from(".beevs-credentials.json"),
        );
        assert_eq!(args.api_url, "http://localhost:5000");
        assert_eq!(args.credentials, PathBuf::from(".beevs-credentials.json"));
    }
}
