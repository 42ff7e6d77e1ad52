mod cli;

use anyhow::Context;
use davmirror::Layout;
use remotefs::RemoteFs;
use remotefs_webdav::WebDAVFs;

fn main() -> anyhow::Result<()> {
    let args = argh::from_env::<cli::CliArgs>();
    args.init_logger()?;

    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.urls.is_empty() {
        cli::print_usage();
        return Ok(());
    }

    let username = match args.username.clone() {
        Some(username) => username,
        None => cli::auth::ask_username()?,
    };
    let password = match args.password.clone() {
        Some(password) => password,
        None => cli::auth::ask_password()?,
    };

    // strictly sequential; the first failing URL aborts the whole run
    for url in &args.urls {
        let share = davmirror::resolve(url)?;
        log::info!("mirroring {} from {}", share.root.display(), share.endpoint);

        let mut remote = WebDAVFs::new(&share.endpoint, &username, &password);
        remote
            .connect()
            .with_context(|| format!("failed to connect to {}", share.endpoint))?;

        let layout = Layout::new(&args.output, &username, &share.root);
        let mirrored = davmirror::mirror(&mut remote, &share.root, &layout);

        if let Err(err) = remote.disconnect() {
            log::warn!("failed to disconnect from {}: {err}", share.endpoint);
        }

        mirrored?;
    }

    Ok(())
}
