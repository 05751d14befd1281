use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tedx-pass")]
#[command(about = "TEDx event registration service and digital pass generator")]
pub struct Cli {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the registration service
    Serve {
        #[arg(long, help = "Address to listen on, e.g. 0.0.0.0:4000")]
        bind: Option<String>,
    },
    /// Register an attendee and download their pass
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "Registration service base URL")]
        api_url: Option<String>,

        #[arg(long, help = "Directory the pass document is written to")]
        output: Option<String>,

        #[arg(long, help = "Seed for the decorative code pattern")]
        seed: Option<u64>,

        #[arg(long, help = "Also write the on-screen PNG snapshot")]
        snapshot: bool,
    },
}

impl Cli {
    /// Command-line flags win over file and environment values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match &self.command {
            Command::Serve { bind } => {
                if let Some(bind) = bind {
                    config.server.bind = bind.clone();
                }
            }
            Command::Register {
                api_url,
                output,
                seed,
                ..
            } => {
                if let Some(api_url) = api_url {
                    config.client.api_url = api_url.clone();
                }
                if let Some(output) = output {
                    config.export.output_dir = output.clone();
                }
                if seed.is_some() {
                    config.export.pattern_seed = *seed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_flags_override_config() {
        let cli = Cli::parse_from([
            "tedx-pass",
            "register",
            "--name",
            "Jane Doe",
            "--email",
            "j@x.com",
            "--api-url",
            "http://127.0.0.1:9000",
            "--seed",
            "7",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.client.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.export.pattern_seed, Some(7));
        assert_eq!(config.export.output_dir, "./passes");
    }

    #[test]
    fn serve_bind_override() {
        let cli = Cli::parse_from(["tedx-pass", "--verbose", "serve", "--bind", "0.0.0.0:80"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert!(cli.verbose);
        assert_eq!(config.server.bind, "0.0.0.0:80");
    }
}
