use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "taxdesk")]
#[command(about = "Tax type catalog API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create an administrator account in the configured database
    CreateAdmin {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["taxdesk"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_create_admin_args() {
        let cli = Cli::try_parse_from([
            "taxdesk",
            "create-admin",
            "--username",
            "root",
            "--password",
            "pw",
        ])
        .unwrap();

        match cli.command {
            Some(Command::CreateAdmin { username, password }) => {
                assert_eq!(username, "root");
                assert_eq!(password, "pw");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_admin_requires_password() {
        assert!(Cli::try_parse_from(["taxdesk", "create-admin", "--username", "root"]).is_err());
    }
}
