use allflex_api::OrderStatus;
use clap::Parser;

/// Pull orders from and push order status to the Allflex Order API.
#[derive(Parser, Debug, Clone)]
#[clap(version = clap::crate_version!(), author = clap::crate_authors!("\n"))]
pub struct Opts {
    /// Print debug info
    #[clap(short, long)]
    pub debug: bool,

    /// Use the admin routes of the API
    #[clap(long)]
    pub admin: bool,

    /// Base URL of the Allflex API
    #[clap(long, env = "ALLFLEX_API_URL")]
    pub api_url: String,

    /// API key sent as the bearer token
    #[clap(long, env = "ALLFLEX_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser, Debug, Clone)]
pub enum SubCommand {
    Pull(Pull),
    Status(Status),
    SetStatus(SetStatus),
    PostOrder(PostOrder),
    Statuses(Statuses),
}

/// A subcommand for retrieving the orders pending processing.
#[derive(Parser, Debug, Clone)]
pub struct Pull {
    /// Save every pulled order as an XML file in this directory
    #[clap(long, env = "ALLFLEX_ORDER_PATH", parse(from_os_str), value_hint = clap::ValueHint::DirPath)]
    pub save_dir: Option<std::path::PathBuf>,
}

/// A subcommand for printing the current status of an order.
#[derive(Parser, Debug, Clone)]
pub struct Status {
    pub ws_order_id: String,
}

/// A subcommand for sending a new status for an order.
#[derive(Parser, Debug, Clone)]
pub struct SetStatus {
    pub ws_order_id: String,

    pub order_id: String,

    /// One of the names printed by `statuses`, matched exactly
    pub status: OrderStatus,
}

/// A subcommand for posting a purchase order read from an XML file.
#[derive(Parser, Debug, Clone)]
pub struct PostOrder {
    #[clap(parse(from_os_str), value_hint = clap::ValueHint::FilePath)]
    pub file: std::path::PathBuf,
}

/// A subcommand for listing every order status in pipeline order.
#[derive(Parser, Debug, Clone)]
pub struct Statuses {}

#[cfg(test)]
mod tests {
    use allflex_api::OrderStatus;
    use clap::Parser;

    use super::{Opts, SubCommand};

    fn parse(args: &[&str]) -> Result<Opts, clap::Error> {
        let mut argv = vec!["allflex", "--api-url", "http://localhost:8080", "--api-key", "key123"];
        argv.extend_from_slice(args);
        Opts::try_parse_from(argv)
    }

    #[test]
    fn test_parses_set_status() {
        let opts = parse(&["--admin", "set-status", "8f14e45f", "A-77", "QcChecked"]).unwrap();

        assert!(opts.admin);
        match opts.subcmd {
            SubCommand::SetStatus(s) => {
                assert_eq!("8f14e45f", s.ws_order_id);
                assert_eq!("A-77", s.order_id);
                assert_eq!(OrderStatus::QcChecked, s.status);
            }
            other => panic!("Expected set-status, but instead received {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(parse(&["set-status", "8f14e45f", "A-77", "qcchecked"]).is_err());
    }

    #[test]
    fn test_parses_pull_save_dir() {
        let opts = parse(&["pull", "--save-dir", "/tmp/orders"]).unwrap();

        match opts.subcmd {
            SubCommand::Pull(p) => assert_eq!(Some(std::path::PathBuf::from("/tmp/orders")), p.save_dir),
            other => panic!("Expected pull, but instead received {:?}", other),
        }
    }
}
