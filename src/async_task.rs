use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::error::{Result, SidebarError};

#[derive(Debug, Clone)]
pub enum Task {
    /// Load the catalog at `path`, or the builtin one when `None`.
    LoadCatalog { path: Option<PathBuf> },
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    CatalogLoaded { catalog: Catalog },
    Error { message: String },
}

pub async fn run_worker(mut task_receiver: mpsc::Receiver<Task>, result_sender: mpsc::Sender<TaskResult>) {
    while let Some(task) = task_receiver.recv().await {
        let result = match task {
            Task::LoadCatalog { path } => match load_catalog(path).await {
                Ok(catalog) => TaskResult::CatalogLoaded { catalog },
                Err(e) => TaskResult::Error {
                    message: e.to_string(),
                },
            },
        };

        if result_sender.send(result).await.is_err() {
            // Main thread has dropped the receiver, exit worker
            break;
        }
    }
    log::debug!("Worker: task channel closed");
}

pub async fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    log::info!("Loading catalog from {}", path.display());
    // Parsing is sync, keep it off the UI thread
    tokio::task::spawn_blocking(move || Catalog::from_file(&path))
        .await
        .map_err(|e| SidebarError::Catalog(format!("catalog loader panicked: {}", e)))?
}
