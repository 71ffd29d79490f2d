use crate::cli::{GlobalOptions, Session};
use modman::core::ModmanResult;
use modman::di::RuntimeFetcher;
use modman::runtime::RuntimeUpdate;
use std::path::Path;

pub async fn run(options: &GlobalOptions) -> ModmanResult<()> {
    let session = Session::open(options, false)?;
    let message = update(
        session.services.runtime_fetcher.as_ref(),
        &session.services.directories.runtime_library,
        &session.config.runtime_library,
    )
    .await?;
    println!("{}", message);
    Ok(())
}

/// Fetch the latest runtime library into `library` and describe the result
async fn update(fetcher: &dyn RuntimeFetcher, library: &Path, name: &str) -> ModmanResult<String> {
    let message = match fetcher.fetch_latest_runtime(library).await? {
        RuntimeUpdate::Unchanged(version) => format!("{} is already up to date ({})", name, version),
        RuntimeUpdate::Updated { from, to } => format!("✓ Updated {} from {} to {}", name, from, to),
        RuntimeUpdate::FetchedFirstTime(version) => format!("✓ Installed {} {}", name, version),
    };
    Ok(message)
}
