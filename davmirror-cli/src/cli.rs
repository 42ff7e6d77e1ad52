pub mod auth;

use std::path::PathBuf;

use argh::FromArgs;

const BIN_NAME: &str = "davmirror";

/// Download files from Nextcloud
///
/// Mirrors the directory trees behind one or more share URLs to local disk
/// over WebDAV. Both browser links to the files app (with a `dir` query
/// parameter) and direct `remote.php/webdav` URLs are accepted.
#[derive(FromArgs, Debug)]
pub struct CliArgs {
    /// username; prompted for when the flag is omitted
    #[argh(option, short = 'u')]
    pub username: Option<String>,
    /// password; prompted for without echo when the flag is omitted
    #[argh(option, short = 'p')]
    pub password: Option<String>,
    /// output directory, defaults to the current directory
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    pub output: PathBuf,
    /// print version and exit
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// share URLs to download
    #[argh(positional)]
    pub urls: Vec<String>,
}

impl CliArgs {
    pub fn init_logger(&self) -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()?;

        Ok(())
    }
}

/// Print the same usage screen argh renders for `--help`.
pub fn print_usage() {
    if let Err(early_exit) = CliArgs::from_args(&[BIN_NAME], &["--help"]) {
        println!("{}", early_exit.output);
    }
}
