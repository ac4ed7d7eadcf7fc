//! Concurrent classification of a batch of documents.
//!
//! Every document gets its own tokio task. A semaphore caps how many of them
//! parse or move files at the same time. Each task sends exactly one
//! [`WorkerOutcome`] into a shared mpsc channel. [`Organizer::run`] returns
//! only after every task has been joined, so callers never see a partial
//! outcome set.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

use crate::config::default_max_concurrent;
use crate::error::OrganizeError;
use crate::extract::{extract_keywords, DocumentParser, PdfParser};
use crate::models::{Assignment, DocumentHandle, RelocationFailure, WorkerOutcome};
use crate::progress::{NoProgress, OrganizeProgressEvent, OrganizeProgressReporter};
use crate::relocate::{category_dir, FsRelocator, Relocator};
use crate::scorer::CategoryScorer;

/// Extract, score, move. Cheap to clone: everything shared sits behind `Arc`.
#[derive(Clone)]
pub struct ClassificationWorker {
    scorer: Arc<CategoryScorer>,
    parser: Arc<dyn DocumentParser>,
    relocator: Arc<dyn Relocator>,
    destination_root: PathBuf,
}

impl ClassificationWorker {
    pub fn new(
        scorer: Arc<CategoryScorer>,
        parser: Arc<dyn DocumentParser>,
        relocator: Arc<dyn Relocator>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scorer,
            parser,
            relocator,
            destination_root: destination_root.into(),
        }
    }

    /// Classifies one document and moves it into its category folder.
    /// A failed move comes back as `Err` so the document is not counted.
    pub async fn process(&self, document: DocumentHandle) -> WorkerOutcome {
        let blob = self.extract(&document).await;
        let scores = self.scorer.scores(&blob);
        let category = scores.winner();
        debug!(
            document = %document.display_name(),
            %category,
            matches = scores.total(),
            "scored"
        );

        let dest = category_dir(&self.destination_root, category);
        match self.relocator.relocate(document.path(), &dest).await {
            Ok(target) => {
                info!(
                    document = %document.display_name(),
                    %category,
                    to = %target.display(),
                    "moved"
                );
                Ok(Assignment::new(document.stem, category))
            }
            Err(e) => {
                error!(
                    document = %document.display_name(),
                    %category,
                    error = %e,
                    "relocation failed"
                );
                Err(RelocationFailure {
                    document,
                    category,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Runs the parser on the blocking pool. If that task dies, the stem
    /// alone is used.
    async fn extract(&self, document: &DocumentHandle) -> String {
        let parser = Arc::clone(&self.parser);
        let doc = document.clone();
        match tokio::task::spawn_blocking(move || extract_keywords(&doc, parser.as_ref())).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(
                    document = %document.display_name(),
                    error = %e,
                    "extraction task failed; using file name only"
                );
                document.stem.to_lowercase()
            }
        }
    }
}

/// Fans documents out to workers and collects their outcomes.
pub struct Organizer {
    worker: ClassificationWorker,
    max_concurrent: usize,
    progress: Arc<dyn OrganizeProgressReporter>,
}

impl Organizer {
    /// An organizer backed by the real PDF parser and filesystem.
    pub fn new(scorer: CategoryScorer, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            worker: ClassificationWorker::new(
                Arc::new(scorer),
                Arc::new(PdfParser),
                Arc::new(FsRelocator),
                destination_root,
            ),
            max_concurrent: default_max_concurrent(),
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.worker.parser = parser;
        self
    }

    pub fn with_relocator(mut self, relocator: Arc<dyn Relocator>) -> Self {
        self.worker.relocator = relocator;
        self
    }

    /// Values below one are treated as one.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn OrganizeProgressReporter>) -> Self {
        self.progress = Arc::from(progress);
        self
    }

    /// Creates the category folders under the destination root.
    pub async fn prepare(&self) -> Result<()> {
        self.worker
            .relocator
            .ensure_category_dirs(&self.worker.destination_root)
            .await
    }

    /// Classifies every document and waits for all of them. A panicked
    /// worker fails the whole run.
    pub async fn run(&self, documents: Vec<DocumentHandle>) -> Result<Vec<WorkerOutcome>> {
        let total = documents.len() as u64;
        self.progress
            .report(OrganizeProgressEvent::Discovered { total });

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let (tx, mut rx) = mpsc::unbounded_channel::<WorkerOutcome>();

        let mut handles = Vec::with_capacity(documents.len());
        for document in documents {
            let path = document.path.clone();
            let worker = self.worker.clone();
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let outcome = worker.process(document).await;
                tx.send(outcome)
                    .map_err(|_| anyhow::anyhow!("outcome channel closed"))?;
                anyhow::Ok(())
            });
            handles.push((path, handle));
        }
        // Only worker-held senders remain, so the receiver ends with the last worker.
        drop(tx);

        let mut outcomes = Vec::with_capacity(handles.len());
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
            self.progress.report(OrganizeProgressEvent::Classified {
                n: outcomes.len() as u64,
                total,
            });
        }

        for (path, handle) in handles {
            let reason = match handle.await {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(e) => e.to_string(),
            };
            return Err(OrganizeError::DispatchInterrupted { path, reason }.into());
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::extract::{ParseError, ParsedDocument};
    use crate::keywords::CategoryKeywordMap;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashMap};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn scorer() -> CategoryScorer {
        let raw: BTreeMap<String, Vec<String>> = [
            ("Programming", vec!["rust"]),
            ("AI", vec!["ai", "neural"]),
            ("Math", vec!["algebra"]),
            ("Database", vec!["sql"]),
            ("Security", vec!["security"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
        .collect();
        CategoryScorer::new(&CategoryKeywordMap::from_raw(raw).unwrap()).unwrap()
    }

    /// Page text keyed by stem; unknown stems fail to parse.
    struct TextParser(HashMap<String, String>);

    impl DocumentParser for TextParser {
        fn parse(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
            let stem = path.file_stem().unwrap().to_string_lossy().to_string();
            match self.0.get(&stem) {
                Some(text) => Ok(ParsedDocument {
                    first_page_text: Some(text.clone()),
                    ..Default::default()
                }),
                None => Err(ParseError::Empty),
            }
        }
    }

    struct PanickingParser;

    impl DocumentParser for PanickingParser {
        fn parse(&self, _path: &Path) -> Result<ParsedDocument, ParseError> {
            panic!("parser exploded");
        }
    }

    /// Records moves in memory and fails for the listed stems. Also tracks
    /// peak concurrency.
    #[derive(Default)]
    struct RecordingRelocator {
        fail: Vec<String>,
        moves: Mutex<Vec<(PathBuf, PathBuf)>>,
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Relocator for RecordingRelocator {
        async fn ensure_category_dirs(&self, _root: &Path) -> Result<()> {
            Ok(())
        }

        async fn relocate(&self, source: &Path, dest_dir: &Path) -> std::io::Result<PathBuf> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            let stem = source.file_stem().unwrap().to_string_lossy().to_string();
            if self.fail.contains(&stem) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                ));
            }
            let target = dest_dir.join(source.file_name().unwrap());
            self.moves
                .lock()
                .unwrap()
                .push((source.to_path_buf(), target.clone()));
            Ok(target)
        }
    }

    fn docs(stems: &[&str]) -> Vec<DocumentHandle> {
        stems
            .iter()
            .map(|s| DocumentHandle::new(format!("/in/{}.pdf", s)))
            .collect()
    }

    fn text_parser(entries: &[(&str, &str)]) -> Arc<dyn DocumentParser> {
        Arc::new(TextParser(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    fn sorted(outcomes: Vec<WorkerOutcome>) -> Vec<Assignment> {
        let mut out: Vec<Assignment> = outcomes.into_iter().filter_map(Result::ok).collect();
        out.sort();
        out
    }

    #[tokio::test]
    async fn classifies_every_document() {
        let relocator = Arc::new(RecordingRelocator::default());
        let organizer = Organizer::new(scorer(), "/out")
            .with_parser(text_parser(&[("paper", "a neural network ai primer")]))
            .with_relocator(relocator.clone())
            .with_max_concurrent(4);

        let outcomes = organizer
            .run(docs(&["paper", "security_audit", "grocery_list"]))
            .await
            .unwrap();

        assert_eq!(
            sorted(outcomes),
            vec![
                Assignment::new("grocery_list", Category::Other),
                Assignment::new("paper", Category::AI),
                Assignment::new("security_audit", Category::Security),
            ]
        );
        let moves = relocator.moves.lock().unwrap();
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&(
            PathBuf::from("/in/paper.pdf"),
            PathBuf::from("/out/AI/paper.pdf")
        )));
    }

    #[tokio::test]
    async fn relocation_failure_is_reported_not_dropped() {
        let relocator = Arc::new(RecordingRelocator {
            fail: vec!["locked_sql".to_string()],
            ..Default::default()
        });
        let organizer = Organizer::new(scorer(), "/out")
            .with_parser(text_parser(&[]))
            .with_relocator(relocator)
            .with_max_concurrent(2);

        let outcomes = organizer
            .run(docs(&["locked_sql", "rust_notes"]))
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 2);

        let failure = outcomes
            .iter()
            .find_map(|o| o.as_ref().err())
            .expect("one failure");
        assert_eq!(failure.document.stem, "locked_sql");
        assert_eq!(failure.category, Category::Database);
        assert!(failure.reason.contains("read-only"));
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_limit() {
        let relocator = Arc::new(RecordingRelocator::default());
        let organizer = Organizer::new(scorer(), "/out")
            .with_parser(text_parser(&[]))
            .with_relocator(relocator.clone())
            .with_max_concurrent(2);

        let stems: Vec<String> = (0..12).map(|i| format!("doc{}", i)).collect();
        let stem_refs: Vec<&str> = stems.iter().map(String::as_str).collect();
        let outcomes = organizer.run(docs(&stem_refs)).await.unwrap();

        assert_eq!(outcomes.len(), 12);
        assert!(relocator.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn repeated_runs_assign_identically() {
        let stems = ["rust_sql", "ai_algebra", "sql_security", "misc"];
        let mut previous: Option<Vec<Assignment>> = None;
        for _ in 0..5 {
            let organizer = Organizer::new(scorer(), "/out")
                .with_parser(text_parser(&[]))
                .with_relocator(Arc::new(RecordingRelocator::default()))
                .with_max_concurrent(4);
            let assignments = sorted(organizer.run(docs(&stems)).await.unwrap());
            if let Some(prev) = &previous {
                assert_eq!(prev, &assignments);
            }
            previous = Some(assignments);
        }
        let assignments = previous.unwrap();
        // Ties resolve by enumeration order.
        assert!(assignments.contains(&Assignment::new("rust_sql", Category::Programming)));
        assert!(assignments.contains(&Assignment::new("ai_algebra", Category::AI)));
        assert!(assignments.contains(&Assignment::new("sql_security", Category::Database)));
    }

    #[tokio::test]
    async fn parser_panic_falls_back_to_stem() {
        let organizer = Organizer::new(scorer(), "/out")
            .with_parser(Arc::new(PanickingParser))
            .with_relocator(Arc::new(RecordingRelocator::default()));

        let outcomes = organizer.run(docs(&["security_notes"])).await.unwrap();
        assert_eq!(
            sorted(outcomes),
            vec![Assignment::new("security_notes", Category::Security)]
        );
    }

    #[test]
    fn concurrency_defaults_to_available_parallelism() {
        let organizer = Organizer::new(scorer(), "/out");
        let expected = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        assert_eq!(organizer.max_concurrent, expected);
        assert_eq!(organizer.with_max_concurrent(0).max_concurrent, 1);
    }

    #[tokio::test]
    async fn empty_batch_yields_no_outcomes() {
        let organizer = Organizer::new(scorer(), "/out")
            .with_relocator(Arc::new(RecordingRelocator::default()));
        assert!(organizer.run(Vec::new()).await.unwrap().is_empty());
    }
}
