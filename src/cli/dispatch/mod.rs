use crate::cli::{
    actions::{Action, server::Args},
    commands::{ARG_DSN, ARG_FRONTEND_URL, ARG_MAX_CONNECTIONS, ARG_PORT},
};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(4000);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let frontend_url = matches.get_one::<String>(ARG_FRONTEND_URL).cloned();
    let max_connections = matches
        .get_one::<u32>(ARG_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);

    Ok(Action::Server(Args {
        port,
        dsn,
        frontend_url,
        max_connections,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_server_action() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "products",
            "--port",
            "9000",
            "--dsn",
            "memory://",
            "--frontend-url",
            "http://localhost:5173",
        ]);

        let Action::Server(args) = handler(&matches)?;
        assert_eq!(args.port, 9000);
        assert_eq!(args.dsn, "memory://");
        assert_eq!(args.frontend_url.as_deref(), Some("http://localhost:5173"));
        Ok(())
    }
}
