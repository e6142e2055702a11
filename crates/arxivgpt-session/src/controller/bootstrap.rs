//! Creating a new session end to end.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use arxivgpt_ai::{AssistantError, AssistantSpec};
use arxivgpt_common::{SessionKey, StoreError};
use arxivgpt_corpus::{CorpusError, CorpusQuery};

use super::SessionController;
use crate::model::Session;

/// The step at which a bootstrap stopped. Nothing after it ran.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("corpus retrieval failed: {0}")]
    Corpus(#[from] CorpusError),

    #[error("assistant creation failed: {0}")]
    AssistantSetup(#[source] AssistantError),

    #[error("thread creation failed: {0}")]
    ThreadSetup(#[source] AssistantError),

    #[error("upload of {} failed: {source}", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: AssistantError,
    },

    #[error("saving the session failed: {0}")]
    Store(#[from] StoreError),
}

impl From<BootstrapError> for arxivgpt_common::ArxivGptError {
    fn from(err: BootstrapError) -> Self {
        Self::Session(err.to_string())
    }
}

impl SessionController<'_> {
    /// Scrape, create the assistant and thread, upload the corpus, and save.
    pub async fn bootstrap(
        &self,
        query: &CorpusQuery,
        display_name: &str,
    ) -> Result<(SessionKey, Session), BootstrapError> {
        let ctx = self.ctx;
        let folder = ctx.settings.corpus_folder.as_path();

        let papers = ctx.corpus.fetch(query).await.map_err(|e| {
            error!(step = "corpus", error = %e, "Bootstrap failed");
            e
        })?;
        if papers.is_empty() {
            warn!(category = %query.category, "No papers found; uploading existing corpus folder");
        } else {
            ctx.corpus.persist(&papers, folder).map_err(|e| {
                error!(step = "corpus", error = %e, folder = %folder.display(), "Bootstrap failed");
                e
            })?;
            info!(count = papers.len(), folder = %folder.display(), "Corpus written");
        }

        let spec = AssistantSpec::research(display_name, ctx.settings.model.as_str());
        let assistant_id = ctx.registry.create_assistant(&spec).await.map_err(|e| {
            error!(step = "assistant", error = %e, "Bootstrap failed");
            BootstrapError::AssistantSetup(e)
        })?;
        info!(%assistant_id, name = %display_name, "Assistant created");

        let thread_id = ctx.registry.create_thread().await.map_err(|e| {
            error!(step = "thread", error = %e, "Bootstrap failed");
            warn!(%assistant_id, "Assistant left without a session");
            BootstrapError::ThreadSetup(e)
        })?;
        info!(%thread_id, "Thread created");

        let mut file_ids = Vec::new();
        for path in corpus_files(folder)? {
            let file_id = match self.upload_and_attach(&assistant_id, &path).await {
                Ok(id) => id,
                Err(source) => {
                    error!(step = "upload", path = %path.display(), error = %source, "Bootstrap failed");
                    warn!(%assistant_id, %thread_id, uploaded = ?file_ids, "Remote objects left without a session");
                    return Err(BootstrapError::Upload { path, source });
                }
            };
            file_ids.push(file_id);
        }

        let session = Session::new(assistant_id, thread_id, display_name, file_ids);
        let key = ctx.store.save(&session).map_err(|e| {
            error!(step = "store", error = %e, "Bootstrap failed");
            e
        })?;
        info!(session = %key, files = session.file_ids.len(), "Session created");
        Ok((key, session))
    }

    async fn upload_and_attach(
        &self,
        assistant_id: &str,
        path: &Path,
    ) -> Result<String, AssistantError> {
        let file_id = self.ctx.documents.upload(path).await?;
        self.ctx.registry.attach_file(assistant_id, &file_id).await?;
        debug!(path = %path.display(), %file_id, "File uploaded and attached");
        Ok(file_id)
    }
}

/// Regular, non-empty files directly inside `folder`, sorted by name.
///
/// A missing folder yields no files.
fn corpus_files(folder: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(folder = %folder.display(), "Corpus folder does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_file() {
            debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        if metadata.len() == 0 {
            debug!(path = %path.display(), "Skipping empty file");
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
