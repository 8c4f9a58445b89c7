use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-fetch",
    version,
    about = "Clone or update the repositories listed in repos.yaml"
)]
pub(crate) struct Cli {
    #[arg(short, long, help = "Process only the repository with this name")]
    pub(crate) repo: Option<String>,
    #[arg(
        short,
        long,
        help = "Report repository status without cloning or pulling"
    )]
    pub(crate) status: bool,
    #[arg(
        short,
        long,
        default_value = "repos.yaml",
        help = "Path to the configuration file, relative to the project root"
    )]
    pub(crate) config: PathBuf,
}
