use crate::committee::Committees;
use crate::config::{Config, SortOrder};
use crate::dispatch::Narrator;
use crate::error::{Error, Result};
use crate::store::{BillStore, JsonBillStore};
use crate::types::{BillDossier, EventSummary};
use async_stream::stream;
use futures::Stream;
use jwalk::WalkDir;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A dossier file found under the data directory
#[derive(Debug, Clone)]
pub struct DossierFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Runs the narrator over every event of every dossier in the data directory
pub struct NarrativeProcessor {
    config: Config,
    committees: Arc<Committees>,
}

impl NarrativeProcessor {
    /// Create a new processor with the given configuration and committees
    pub fn new(config: Config, committees: Committees) -> Self {
        Self {
            config,
            committees: Arc::new(committees),
        }
    }

    /// Create a processor, loading committees from `committees.json` in the
    /// data directory when it exists
    pub fn from_config(config: Config) -> Result<Self> {
        let path = config.committees_path();
        let committees = if path.exists() {
            Committees::load(&path)?
        } else {
            warn!(path = %path.display(), "no committee directory; committee mentions stay unlinked");
            Committees::default()
        };
        Ok(Self::new(config, committees))
    }

    /// Summaries for every event, dossier by dossier, events in stored order.
    ///
    /// A dossier that fails to load, or an event whose source cannot be
    /// resolved, yields an error and processing continues.
    pub fn process(&self) -> impl Stream<Item = Result<EventSummary>> {
        let config = self.config.clone();
        let config_for_discovery = config.clone();
        let committees = Arc::clone(&self.committees);
        Box::pin(stream! {
            let files = match tokio::task::spawn_blocking(move || {
                Self::discover_files_internal(&config_for_discovery)
            }).await {
                Ok(Ok(files)) => files,
                Ok(Err(e)) => {
                    yield Err(e);
                    return;
                }
                Err(e) => {
                    yield Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Task join error: {}", e)
                    )));
                    return;
                }
            };

            let sorted_files = Self::sort_files_internal(&config, files);
            let limited_files = Self::apply_limit_internal(&config, sorted_files);

            let narrator = Narrator::from_config(&config, committees.as_ref());
            let store = JsonBillStore::new();

            for file in limited_files {
                let mut dossier = match Self::load_dossier(&file.path).await {
                    Ok(dossier) => dossier,
                    Err(e) => {
                        error!(file = %file.relative_path, error = %e, "failed to load dossier");
                        yield Err(e);
                        continue;
                    }
                };
                store.register(dossier.bill.id, &file.path);
                let writer: Option<&dyn BillStore> = if config.write_back { Some(&store) } else { None };

                debug!(file = %file.relative_path, events = dossier.events.len(), "narrating dossier");
                for event in &dossier.events {
                    match narrator.summarize(event, &mut dossier.bill, writer) {
                        Ok(summary) => yield Ok(summary),
                        Err(e) => {
                            error!(bill = %dossier.bill.url, event = %event.name, error = %e, "could not summarize event");
                            yield Err(e);
                        }
                    }
                }
            }
        })
    }

    /// Read and parse one dossier file
    pub async fn load_dossier(path: &Path) -> Result<BillDossier> {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Discover all JSON dossier files below the data directory
    /// Uses jwalk for fast parallel filesystem traversal
    fn discover_files_internal(config: &Config) -> Result<Vec<DossierFile>> {
        let committees_path = config.committees_path();
        let mut files = Vec::new();

        for entry_result in WalkDir::new(&config.data_dir) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().map(|ext| ext == "json").unwrap_or(false) && path != committees_path {
                let relative_path = Self::calculate_relative_path(&path, &config.data_dir)?;
                files.push(DossierFile {
                    path,
                    relative_path,
                });
            }
        }

        debug!(count = files.len(), dir = %config.data_dir.display(), "discovered dossiers");
        Ok(files)
    }

    /// Calculate relative path from the data directory
    fn calculate_relative_path(path: &Path, data_dir: &Path) -> Result<String> {
        let relative = pathdiff::diff_paths(path, data_dir)
            .ok_or_else(|| Error::Path(format!("Failed to calculate relative path: {}", path.display())))?;
        Ok(relative.to_string_lossy().to_string())
    }

    /// Sort files by relative path according to sort order
    fn sort_files_internal(config: &Config, mut files: Vec<DossierFile>) -> Vec<DossierFile> {
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        if config.sort_order == SortOrder::Descending {
            files.reverse();
        }
        files
    }

    /// Apply limit to files
    fn apply_limit_internal(config: &Config, files: Vec<DossierFile>) -> Vec<DossierFile> {
        if let Some(limit) = config.limit {
            files.into_iter().take(limit).collect()
        } else {
            files
        }
    }
}
