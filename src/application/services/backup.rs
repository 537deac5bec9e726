//! Collection export service
//!
//! Streams every document of every non-excluded collection into either one
//! `.jsonl` file per collection or a single merged file.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    collection_file_name, tag_provenance, Deadline, DocumentRenderer, ExcludeSet, OutputTarget,
};
use crate::infrastructure::traits::{DocumentCursor, DocumentStore, FileSystem};

/// Buffer size for output files.
const WRITE_BUFFER_CAPACITY: usize = 1 << 20;

type OutputWriter = BufWriter<Box<dyn Write + Send>>;

/// What to back up and how.
#[derive(Debug, Clone)]
pub struct BackupPlan {
    /// Database to export
    pub database: String,
    /// Directory or merged file, see [`OutputTarget::classify`]
    pub output: PathBuf,
    /// Collections to skip
    pub exclude: ExcludeSet,
    /// Cursor batch size (`None`: server default)
    pub batch_size: Option<u32>,
    /// Extended JSON flavor and layout
    pub renderer: DocumentRenderer,
    /// Abort once this passes
    pub deadline: Option<Deadline>,
}

/// Progress notifications emitted while a backup runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupEvent<'a> {
    /// Output location decided and prepared
    Started { target: &'a OutputTarget },
    /// Collection matched the exclude set
    Skipped { collection: &'a str },
    /// Export of a collection begins; `destination` is `None` in merged mode
    CollectionStarted {
        collection: &'a str,
        destination: Option<&'a Path>,
    },
    /// Export of a collection finished
    CollectionFinished { collection: &'a str, documents: u64 },
}

/// Result of one exported collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    /// Per-collection file (directory mode only)
    pub path: Option<PathBuf>,
    pub documents: u64,
}

/// Outcome of a completed backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub target: OutputTarget,
    pub collections: Vec<CollectionSummary>,
    pub skipped: Vec<String>,
}

impl BackupReport {
    pub fn total_documents(&self) -> u64 {
        self.collections.iter().map(|c| c.documents).sum()
    }
}

/// Service for exporting a database to JSON lines.
pub struct BackupService {
    store: Arc<dyn DocumentStore>,
    fs: Arc<dyn FileSystem>,
}

impl BackupService {
    pub fn new(store: Arc<dyn DocumentStore>, fs: Arc<dyn FileSystem>) -> Self {
        Self { store, fs }
    }

    /// Run the backup, reporting progress through `on_event`.
    ///
    /// Collections are visited in server order. Any store, render or write
    /// failure aborts the whole run.
    #[instrument(skip(self, plan, on_event), fields(database = %plan.database))]
    pub fn run(
        &self,
        plan: &BackupPlan,
        on_event: &mut dyn FnMut(BackupEvent<'_>),
    ) -> ApplicationResult<BackupReport> {
        let collections = self.store.list_collection_names(&plan.database)?;
        debug!("run: {} collections", collections.len());

        let target = OutputTarget::classify(&plan.output, self.fs.probe_dir(&plan.output));
        self.prepare(&target)?;
        on_event(BackupEvent::Started { target: &target });

        let mut merged = match &target {
            OutputTarget::MergedFile(file) => Some((file.clone(), self.open_writer(file)?)),
            OutputTarget::Directory(_) => None,
        };

        let mut report = BackupReport {
            target: target.clone(),
            collections: Vec::new(),
            skipped: Vec::new(),
        };

        for name in collections {
            if plan.exclude.contains(&name) {
                on_event(BackupEvent::Skipped { collection: &name });
                report.skipped.push(name);
                continue;
            }
            check_deadline(plan)?;

            let cursor = self.store.find_all(&plan.database, &name, plan.batch_size)?;

            let (path, documents) = match merged.as_mut() {
                Some((file, writer)) => {
                    on_event(BackupEvent::CollectionStarted {
                        collection: &name,
                        destination: None,
                    });
                    let documents = copy_documents(plan, &name, cursor, writer, file, true)?;
                    (None, documents)
                }
                None => {
                    let path = target
                        .path()
                        .join(collection_file_name(&plan.database, &name));
                    on_event(BackupEvent::CollectionStarted {
                        collection: &name,
                        destination: Some(&path),
                    });
                    let mut writer = self.open_writer(&path)?;
                    let documents = copy_documents(plan, &name, cursor, &mut writer, &path, false)?;
                    writer.flush().with_path_context("flush", &path)?;
                    (Some(path), documents)
                }
            };

            on_event(BackupEvent::CollectionFinished {
                collection: &name,
                documents,
            });
            report.collections.push(CollectionSummary {
                name,
                path,
                documents,
            });
        }

        if let Some((file, mut writer)) = merged {
            writer.flush().with_path_context("flush", &file)?;
        }

        info!(
            "backup of {} done: {} collections, {} documents, {} skipped",
            plan.database,
            report.collections.len(),
            report.total_documents(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn prepare(&self, target: &OutputTarget) -> ApplicationResult<()> {
        match target {
            OutputTarget::Directory(dir) => self
                .fs
                .create_dir_all(dir)
                .with_path_context("create output directory", dir),
            OutputTarget::MergedFile(file) => self
                .fs
                .ensure_parent(file)
                .with_path_context("create output directory", file),
        }
    }

    fn open_writer(&self, path: &Path) -> ApplicationResult<OutputWriter> {
        let file = self.fs.create(path).with_path_context("create", path)?;
        Ok(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, file))
    }
}

/// Write every document from `cursor`, returning how many were written.
fn copy_documents(
    plan: &BackupPlan,
    collection: &str,
    cursor: DocumentCursor<'_>,
    writer: &mut OutputWriter,
    path: &Path,
    tag: bool,
) -> ApplicationResult<u64> {
    let mut count = 0u64;
    for item in cursor {
        let mut document = item?;
        if tag {
            tag_provenance(&mut document, &plan.database, collection);
        }
        let line = plan.renderer.render_line(collection, document)?;
        writer.write_all(&line).with_path_context("write", path)?;
        count += 1;
        check_deadline(plan)?;
    }
    debug!("copy_documents: {} -> {} ({} docs)", collection, path.display(), count);
    Ok(count)
}

fn check_deadline(plan: &BackupPlan) -> ApplicationResult<()> {
    match plan.deadline {
        Some(deadline) if deadline.is_expired() => Err(ApplicationError::Timeout {
            budget: deadline.budget(),
        }),
        _ => Ok(()),
    }
}
