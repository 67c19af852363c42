use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facdash")]
#[command(about = "Faculty campus dashboard for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Section to open on launch (overrides config)
    #[arg(long, value_name = "KEY")]
    pub tab: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the registered sections in sidebar order
    Sections {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one frame of a section to stdout without a terminal
    Render {
        /// Section key (see `facdash sections`)
        #[arg(long, value_name = "KEY")]
        tab: String,

        #[arg(long, default_value_t = 120)]
        width: u16,

        #[arg(long, default_value_t = 36)]
        height: u16,
    },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_render_subcommand() {
        let cli = Cli::try_parse_from(["facdash", "render", "--tab", "leave", "--width", "80"])
            .unwrap();
        match cli.command {
            Some(Commands::Render { tab, width, height }) => {
                assert_eq!(tab, "leave");
                assert_eq!(width, 80);
                assert_eq!(height, 36);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["facdash", "--tab", "exams", "-v"]).unwrap();
        assert_eq!(cli.tab.as_deref(), Some("exams"));
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
