//! Content loader - turns source documents into posts

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{MarkdownPipeline, Post, PostDefaults, SourceDocument};
use super::source::DocumentSource;
use crate::error::{DocumentError, SourceError};
use crate::posts::{is_post_published, is_published_at, sort_posts_by_date, SortOrder};

/// A document that could not become a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub identifier: String,
    pub error: DocumentError,
}

/// Outcome of building a batch of documents
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Posts, newest first
    pub posts: Vec<Post>,
    /// Documents skipped as non-publishable files
    pub ignored: usize,
    /// Documents that failed to build
    pub failures: Vec<DocumentFailure>,
}

/// Loads posts from a document source
pub struct PostLoader<S> {
    source: S,
    pipeline: Arc<MarkdownPipeline>,
    defaults: PostDefaults,
}

impl<S: DocumentSource> PostLoader<S> {
    pub fn new(source: S, pipeline: Arc<MarkdownPipeline>, defaults: PostDefaults) -> Self {
        Self {
            source,
            pipeline,
            defaults,
        }
    }

    /// Fetch and build every post, reporting skipped and failed documents
    pub async fn try_load_all_posts(&self) -> Result<LoadReport, SourceError> {
        let documents = self.source.fetch_all().await?;
        Ok(self.build_posts(documents, Utc::now()))
    }

    /// Fetch and build every post, newest first.
    ///
    /// A failed batch fetch is logged and yields no posts.
    pub async fn load_all_posts(&self) -> Vec<Post> {
        match self.try_load_all_posts().await {
            Ok(report) => report.posts,
            Err(e) => {
                tracing::error!("Failed to load posts: {}", e);
                Vec::new()
            }
        }
    }

    /// Find a published post by slug
    pub async fn load_post(&self, slug: &str) -> Option<Post> {
        self.load_all_posts()
            .await
            .into_iter()
            .find(|post| post.slug == slug && is_post_published(post))
    }

    /// Build posts from documents, isolating failures per document.
    ///
    /// Documents are processed in identifier order. When two share a slug
    /// the first one keeps it, unless it is scheduled for later than `now`
    /// and the other is already published.
    pub fn build_posts(&self, mut documents: Vec<SourceDocument>, now: DateTime<Utc>) -> LoadReport {
        documents.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        let mut report = LoadReport::default();
        // slug -> index into report.posts
        let mut seen: HashMap<String, usize> = HashMap::new();

        for doc in &documents {
            let post = match Post::from_document(doc, &self.pipeline, &self.defaults, now) {
                Ok(Some(post)) => post,
                Ok(None) => {
                    tracing::debug!("Ignoring {}", doc.identifier);
                    report.ignored += 1;
                    continue;
                }
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", doc.identifier, error);
                    report.failures.push(DocumentFailure {
                        identifier: doc.identifier.clone(),
                        error,
                    });
                    continue;
                }
            };

            let Some(&index) = seen.get(&post.slug) else {
                seen.insert(post.slug.clone(), report.posts.len());
                report.posts.push(post);
                continue;
            };

            let existing = &report.posts[index];
            let (kept, dropped) =
                if !is_published_at(existing, now) && is_published_at(&post, now) {
                    let dropped = std::mem::replace(&mut report.posts[index], post);
                    (report.posts[index].source_file.clone(), dropped)
                } else {
                    (existing.source_file.clone(), post)
                };

            let error = DocumentError::DuplicateSlug {
                slug: dropped.slug,
                kept,
            };
            tracing::warn!("Skipping {}: {}", dropped.source_file, error);
            report.failures.push(DocumentFailure {
                identifier: dropped.source_file,
                error,
            });
        }

        report.posts = sort_posts_by_date(&report.posts, SortOrder::Desc);
        tracing::debug!(
            "Built {} posts ({} ignored, {} failed)",
            report.posts.len(),
            report.ignored,
            report.failures.len()
        );
        report
    }
}

impl<S: DocumentSource + 'static> PostLoader<S> {
    /// Reload every `period` and hand the fresh posts to `callback`.
    ///
    /// The first reload happens one period from now. A reload runs to
    /// completion before the next tick is awaited, and ticks missed while it
    /// ran are skipped, so reloads never overlap. Dropping the handle stops
    /// the polling.
    pub fn watch_for_changes<F>(self: Arc<Self>, period: Duration, mut callback: F) -> WatchHandle
    where
        F: FnMut(Vec<Post>) + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let posts = self.load_all_posts().await;
                tracing::debug!("Polled {} posts", posts.len());
                callback(posts);
            }
        });

        WatchHandle { task }
    }
}

/// Running poll loop; stops on [`WatchHandle::stop`] or drop
#[derive(Debug)]
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub fn stop(self) {
        // Drop aborts the task
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    struct FailingSource;

    impl DocumentSource for FailingSource {
        async fn fetch_all(&self) -> Result<Vec<SourceDocument>, SourceError> {
            Err(SourceError::Unavailable("disk on fire".to_string()))
        }
    }

    #[derive(Default)]
    struct FetchCounters {
        calls: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    /// Source whose first fetch takes `first_delay`
    struct SlowSource {
        counters: Arc<FetchCounters>,
        first_delay: Duration,
    }

    impl DocumentSource for SlowSource {
        async fn fetch_all(&self) -> Result<Vec<SourceDocument>, SourceError> {
            let c = &self.counters;
            let call = c.calls.fetch_add(1, Ordering::SeqCst);
            let active = c.active.fetch_add(1, Ordering::SeqCst) + 1;
            c.max_active.fetch_max(active, Ordering::SeqCst);

            if call == 0 {
                tokio::time::sleep(self.first_delay).await;
            }

            c.active.fetch_sub(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn loader<S: DocumentSource>(source: S) -> PostLoader<S> {
        PostLoader::new(
            source,
            Arc::new(MarkdownPipeline::default()),
            PostDefaults::default(),
        )
    }

    fn doc(name: &str, content: &str) -> SourceDocument {
        SourceDocument::new(format!("content/posts/{name}"), content)
    }

    #[test]
    fn test_build_posts_sorted_newest_first() {
        let loader = loader(MemorySource::default());
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let report = loader.build_posts(
            vec![
                doc("old.md", "---\ndate: 2020-01-01\n---\nold"),
                doc("new.md", "---\ndate: 2025-06-01\n---\nnew"),
                doc("b.md", "---\ntitle: Beta\ndate: 2022-01-01\n---\nb"),
                doc("a.md", "---\ntitle: alpha\ndate: 2022-01-01\n---\na"),
            ],
            now,
        );

        let slugs: Vec<_> = report.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "alpha", "beta", "old"]);
        assert_eq!(report.ignored, 0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_bad_documents_do_not_stop_the_batch() {
        let loader = loader(MemorySource::default());
        let report = loader.build_posts(
            vec![
                doc("good.md", "# Good"),
                doc("bad.md", "---\ntitle: '???'\n---\nx"),
                doc(".hidden.md", "# Hidden"),
                doc("malformed.md", "---\ntitle: [oops\n---\nStill renders"),
            ],
            Utc::now(),
        );

        let slugs: Vec<_> = report.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), 2);
        assert!(slugs.contains(&"good"));
        assert!(slugs.contains(&"malformed"));
        assert_eq!(report.ignored, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].identifier, "content/posts/bad.md");
    }

    #[test]
    fn test_duplicate_slug_first_wins() {
        let loader = loader(MemorySource::default());
        let report = loader.build_posts(
            vec![
                doc("b.md", "---\ntitle: Same\n---\nsecond"),
                doc("a.md", "---\ntitle: Same\n---\nfirst"),
            ],
            Utc::now(),
        );

        assert_eq!(report.posts.len(), 1);
        assert_eq!(report.posts[0].source_file, "content/posts/a.md");
        assert_eq!(
            report.failures[0].error,
            DocumentError::DuplicateSlug {
                slug: "same".to_string(),
                kept: "content/posts/a.md".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_slug_prefers_published_post() {
        let loader = loader(MemorySource::default());
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let report = loader.build_posts(
            vec![
                doc("a.md", "---\ntitle: Same\ndate: 2030-01-01\n---\nscheduled"),
                doc("b.md", "---\ntitle: Same\ndate: 2024-01-01\n---\nlive"),
                doc("c.md", "---\ntitle: Same\ndate: 2024-06-01\n---\nlater copy"),
            ],
            now,
        );

        assert_eq!(report.posts.len(), 1);
        assert_eq!(report.posts[0].source_file, "content/posts/b.md");

        let dropped: Vec<_> = report.failures.iter().map(|f| f.identifier.as_str()).collect();
        assert_eq!(dropped, vec!["content/posts/a.md", "content/posts/c.md"]);
        assert!(report.failures.iter().all(|f| f.error
            == DocumentError::DuplicateSlug {
                slug: "same".to_string(),
                kept: "content/posts/b.md".to_string(),
            }));
    }

    #[tokio::test]
    async fn test_failed_batch_yields_empty_collection() {
        let loader = loader(FailingSource);
        assert!(loader.load_all_posts().await.is_empty());
        assert!(matches!(
            loader.try_load_all_posts().await,
            Err(SourceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_load_post_only_finds_published() {
        let future = (Utc::now() + ChronoDuration::days(30)).format("%Y-%m-%d").to_string();
        let loader = loader(MemorySource::new(vec![
            doc("past.md", "---\ndate: 2024-01-01\n---\nx"),
            doc("later.md", &format!("---\ndate: {future}\n---\nx")),
        ]));

        assert!(loader.load_post("past").await.is_some());
        assert!(loader.load_post("later").await.is_none());
        assert!(loader.load_post("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_watch_for_changes_pushes_reloads() {
        let loader = Arc::new(loader(MemorySource::new(vec![doc("one.md", "# One")])));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = loader.watch_for_changes(Duration::from_millis(20), move |posts| {
            let _ = tx.send(posts.len());
        });

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(1));

        handle.stop();
        // The callback (and its sender) is dropped with the aborted task
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_slow_reloads_neither_overlap_nor_queue() {
        let counters = Arc::new(FetchCounters::default());
        let loader = Arc::new(loader(SlowSource {
            counters: counters.clone(),
            first_delay: Duration::from_millis(175),
        }));

        // Ticks every 50ms; the first reload (t=50..225) misses the ticks at
        // 100, 150 and 200, so the next reloads run at 250, 300 and 350.
        let handle = loader.watch_for_changes(Duration::from_millis(50), |_| {});
        tokio::time::sleep(Duration::from_millis(380)).await;
        handle.stop();

        let calls = counters.calls.load(Ordering::SeqCst);
        assert_eq!(counters.max_active.load(Ordering::SeqCst), 1);
        assert!(calls >= 2, "expected reloads to continue, got {calls}");
        assert!(calls <= 5, "missed ticks were replayed: {calls} reloads");
    }
}
