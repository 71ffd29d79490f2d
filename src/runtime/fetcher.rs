use crate::core::path::ensure_dir;
use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::{RuntimeFetcher, VersionProbe};
use crate::runtime::probe::{parse_file_version, FileVersionProbe};
use crate::runtime::RuntimeUpdate;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Downloads the runtime library release archive over HTTP
pub struct HttpRuntimeFetcher {
    client: Client,
    url: String,
    archive_entry: String,
    probe: FileVersionProbe,
}

impl HttpRuntimeFetcher {
    pub fn new(url: &str, archive_entry: &str) -> ModmanResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("modman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ModmanError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            archive_entry: archive_entry.to_string(),
            probe: FileVersionProbe::new(),
        })
    }

    async fn download(&self) -> ModmanResult<Vec<u8>> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Downloading {}", self.url));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = async {
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ModmanError::RuntimeUpdate(format!(
                    "GET {} returned {}",
                    self.url, status
                )));
            }
            Ok::<_, ModmanError>(response.bytes().await?.to_vec())
        }
        .await;

        spinner.finish_and_clear();
        result
    }

    fn extract_library(&self, archive_bytes: Vec<u8>) -> ModmanResult<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(archive_bytes)).map_err(|e| {
            ModmanError::RuntimeUpdate(format!("Downloaded file is not a zip archive: {}", e))
        })?;
        let mut entry = archive.by_name(&self.archive_entry).map_err(|e| {
            ModmanError::RuntimeUpdate(format!(
                "Downloaded archive has no {}: {}",
                self.archive_entry, e
            ))
        })?;

        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        Ok(data)
    }
}

#[async_trait]
impl RuntimeFetcher for HttpRuntimeFetcher {
    async fn fetch_latest_runtime(&self, library_path: &Path) -> ModmanResult<RuntimeUpdate> {
        // An unreadable library is replaced as if none were installed
        let installed = match self.probe.installed_runtime_version(library_path) {
            Ok(version) => version,
            Err(e) => {
                warn!("Cannot read version of {}: {}", library_path.display(), e);
                None
            }
        };

        let archive = self.download().await?;
        let library = self.extract_library(archive)?;
        let latest = parse_file_version(&library)
            .map_err(|e| ModmanError::RuntimeUpdate(format!("Downloaded library: {}", e)))?;
        debug!("Downloaded runtime library version {}", latest);

        let outcome = match installed {
            None => RuntimeUpdate::FetchedFirstTime(latest),
            Some(current) if latest > current => RuntimeUpdate::Updated {
                from: current,
                to: latest,
            },
            Some(current) => return Ok(RuntimeUpdate::Unchanged(current)),
        };

        if let Some(parent) = library_path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = library_path.with_extension("dll.download");
        fs::write(&tmp, &library)?;
        fs::rename(&tmp, library_path)?;
        debug!("Wrote {}", library_path.display());

        Ok(outcome)
    }
}
