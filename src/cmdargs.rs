use clap::Parser;

use crate::store::DEFAULT_LATEST_LIMIT;

/// Record GitHub repository activity received through webhooks
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Telemetry URL (disabled as default)
    #[clap(long)]
    pub telemetry_url: Option<String>,

    /// Webhook secret (signature verification disabled as default)
    #[clap(long)]
    pub webhook_secret: Option<String>,

    /// SQLite database path (in-memory storage as default)
    #[clap(long)]
    pub database_path: Option<String>,

    /// Bind IP (127.0.0.1:3000 as default)
    #[clap(long)]
    pub bind_ip: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: SubCommand,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    /// Run server
    Serve,
    /// Print latest stored events
    Latest(LatestCommand),
}

#[derive(Parser, Debug)]
pub struct LatestCommand {
    /// Number of events to print
    #[clap(long, default_value_t = DEFAULT_LATEST_LIMIT)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clap::Parser;

    use super::{Args, SubCommand};

    #[test]
    fn test_parse_serve() {
        let args = Args::try_parse_from([
            "hooklog",
            "--bind-ip",
            "0.0.0.0:8000",
            "--database-path",
            "events.db",
            "serve",
        ])
        .unwrap();

        assert_eq!(args.bind_ip.as_deref(), Some("0.0.0.0:8000"));
        assert_eq!(args.database_path.as_deref(), Some("events.db"));
        assert_matches!(args.command, SubCommand::Serve);
    }

    #[test]
    fn test_parse_latest() {
        let args = Args::try_parse_from(["hooklog", "latest"]).unwrap();
        assert_matches!(args.command, SubCommand::Latest(l) if l.count == 10);

        let args = Args::try_parse_from(["hooklog", "latest", "--count", "3"]).unwrap();
        assert_matches!(args.command, SubCommand::Latest(l) if l.count == 3);
    }
}
