//! CLI for RACF profile administration.
//!
//! Structures saved IRRSMO00 results, prints request documents and replays
//! recorded responses through the full administration path.
//!
//! # Examples
//!
//! ```bash
//! # Structure a saved LISTUSER result
//! racfadm parse --type user squidwrd.xml
//!
//! # Print the request that would give a user an OMVS UID
//! racfadm request alter --type user --name SQUIDWRD --trait omvs:uid=2424
//!
//! # Run an extract against a recorded response
//! racfadm extract --type resource --name TESTING --class ELIJTEST --replay rlist.xml
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use miette::Result;
use racf_admin::{TextEncoding, TraitValue};

mod commands;
mod config;

use commands::{OperationKind, ProfileKind};
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "racfadm")]
#[command(author, version, about = "RACF profile administration", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Document encoding (ibm-1047 or utf-8)
    #[arg(long, global = true, value_name = "ENCODING")]
    encoding: Option<TextEncoding>,

    /// Log request and result documents (secrets masked)
    #[arg(long, global = true)]
    debug: bool,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Configuration file (replaces the default locations)
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Structure a saved service result
    Parse {
        /// Profile type the result is for
        #[arg(long = "type", value_enum)]
        kind: ProfileKind,

        /// Saved result document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print a request document without sending it
    Request {
        /// Operation to request
        #[arg(value_enum)]
        operation: OperationKind,

        /// Profile type
        #[arg(long = "type", value_enum)]
        kind: ProfileKind,

        /// Profile name
        #[arg(long)]
        name: String,

        /// Resource class (general resources and permissions)
        #[arg(long)]
        class: Option<String>,

        /// Trait to set, as segment:key=value (repeatable)
        #[arg(long = "trait", value_name = "TRAIT", value_parser = commands::parse_trait)]
        traits: Vec<(String, TraitValue)>,

        /// Segment to extract besides base (repeatable)
        #[arg(long = "segment", value_name = "SEGMENT")]
        segments: Vec<String>,
    },

    /// Extract a profile using a recorded response
    Extract {
        /// Profile type
        #[arg(long = "type", value_enum)]
        kind: ProfileKind,

        /// Profile name
        #[arg(long)]
        name: String,

        /// Resource class (general resources)
        #[arg(long)]
        class: Option<String>,

        /// Recorded response to replay
        #[arg(long, value_name = "FILE")]
        replay: PathBuf,

        /// Segment to extract besides base (repeatable)
        #[arg(long = "segment", value_name = "SEGMENT")]
        segments: Vec<String>,
    },

    /// Print the default configuration
    Config {
        /// Write the configuration in effect to a file instead
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Configuration after files, environment and flags.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => {
                let mut config = Config::default().merge(Config::load_from_file(path)?);
                config.apply_env(|name| std::env::var(name).ok());
                config
            }
            None => Config::load(),
        };
        if let Some(encoding) = self.encoding {
            config.admin.encoding = encoding;
        }
        if self.debug {
            config.admin.debug = true;
        }
        if self.compact {
            config.output.pretty = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose || cli.debug {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let config = cli.config()?;

    match cli.command {
        Commands::Parse { kind, input } => commands::parse::run(kind, input, &config),
        Commands::Request {
            operation,
            kind,
            name,
            class,
            traits,
            segments,
        } => commands::request::run(operation, kind, name, class, traits, segments, &config),
        Commands::Extract {
            kind,
            name,
            class,
            replay,
            segments,
        } => commands::extract::run(kind, name, class, replay, segments, &config),
        Commands::Config { write: Some(path) } => {
            config.write_to_file(&path)?;
            tracing::info!("Wrote configuration to {}", path.display());
            Ok(())
        }
        Commands::Config { write: None } => {
            print!("{}", Config::generate_default());
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "racfadm", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_request_arguments() {
        let cli = Cli::try_parse_from([
            "racfadm",
            "request",
            "alter",
            "--type",
            "user",
            "--name",
            "SQUIDWRD",
            "--trait",
            "omvs:uid=2424",
            "--trait",
            "base:special=true",
        ])
        .unwrap();
        match cli.command {
            Commands::Request {
                operation,
                kind,
                traits,
                ..
            } => {
                assert_eq!(operation, OperationKind::Alter);
                assert_eq!(kind, ProfileKind::User);
                assert_eq!(traits.len(), 2);
                assert_eq!(traits[0].1, TraitValue::Int(2424));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "racfadm",
            "--encoding",
            "utf-8",
            "--compact",
            "config",
        ])
        .unwrap();
        assert_eq!(cli.encoding, Some(TextEncoding::Utf8));
        assert!(cli.compact);
    }

    #[test]
    fn test_bad_trait_rejected() {
        let err = Cli::try_parse_from([
            "racfadm", "request", "add", "--type", "user", "--name", "X", "--trait", "uid=1",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
