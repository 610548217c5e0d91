//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;

/// create-cp - Quickly build a project from a curated template
#[derive(Parser, Debug)]
#[command(name = "create-cp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    pub target_dir: Option<String>,

    /// Template to use, by name (e.g. vitesse, vitesse-lite, starter-ts)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Shallow-clone depth passed to the version-control client
    #[arg(long)]
    pub depth: Option<u32>,

    /// Path to a config file (defaults to ~/.create-cp/config.yaml)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_and_template() {
        let cli = Cli::try_parse_from(["create-cp", "my-app", "-t", "vitesse"]).unwrap();
        assert_eq!(cli.target_dir.as_deref(), Some("my-app"));
        assert_eq!(cli.template.as_deref(), Some("vitesse"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_long_template_without_dir() {
        let cli = Cli::try_parse_from(["create-cp", "--template", "starter-ts", "-vv"]).unwrap();
        assert_eq!(cli.target_dir, None);
        assert_eq!(cli.template.as_deref(), Some("starter-ts"));
        assert_eq!(cli.verbose, 2);
    }
}
