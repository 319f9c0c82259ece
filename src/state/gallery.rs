//! Gallery state machine
//!
//! `ResultCoordinator` is the single owner of "what the gallery currently
//! shows". The three search modes never touch the gallery directly: they
//! submit their input here, and the coordinator decides whether a fetch is
//! needed, adopts pre-fetched result sets, and replaces the `GalleryState`
//! wholesale on every transition.
//!
//! The coordinator is deliberately free of iced and network types so the
//! whole machine can be unit-tested without a runtime. Fetches come back
//! to it as plain `Result<Vec<ImageRecord>, String>` completions.

use super::data::ImageRecord;

/// Static user-facing message for any failed fetch. The underlying cause
/// is logged, not shown.
pub const FETCH_FAILED: &str = "Failed to fetch images";

/// What the gallery currently shows. Exactly one variant at a time;
/// `Loaded` is never empty (zero results map to `Empty`).
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryState {
    /// Startup only, before the implicit browse fetch is issued
    Idle,
    /// A fetch is in flight
    Loading,
    /// A non-empty, ordered result set
    Loaded(Vec<ImageRecord>),
    /// A fetch succeeded but matched nothing
    Empty,
    /// A fetch failed; holds the user-facing message
    Failed(String),
}

impl GalleryState {
    /// The only way a result set becomes gallery state. Keeps the
    /// Loaded-is-non-empty invariant in one place.
    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        if records.is_empty() {
            GalleryState::Empty
        } else {
            GalleryState::Loaded(records)
        }
    }
}

/// A fetch the coordinator wants performed on its behalf.
///
/// The caller runs it (async) and reports back via [`ResultCoordinator::finish`]
/// with the same sequence number.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// Text search against the API
    TextSearch { seq: u64, query: String },
    /// The default browse view: list everything
    ListAll { seq: u64 },
}

impl FetchPlan {
    pub fn seq(&self) -> u64 {
        match self {
            FetchPlan::TextSearch { seq, .. } => *seq,
            FetchPlan::ListAll { seq } => *seq,
        }
    }
}

/// The state machine that owns the gallery.
///
/// Pending inputs are evaluated in priority order whenever one changes:
/// 1. A pre-fetched result set is adopted directly (consumed exactly once).
/// 2. A pending text query triggers a text-search fetch.
/// 3. Otherwise a list-all fetch backs the default view.
///
/// Every fetch carries a monotonically increasing sequence number; a
/// completion older than the newest issued fetch is discarded, so a slow
/// early request can never clobber a newer one.
#[derive(Debug)]
pub struct ResultCoordinator {
    /// Pending text query, consumed by the next evaluation
    search_query: Option<String>,
    /// Pending pre-fetched result set, consumed by the next evaluation
    search_results: Option<Vec<ImageRecord>>,
    /// Current gallery state, replaced wholesale on every transition
    state: GalleryState,
    /// Next sequence number to hand out
    next_seq: u64,
    /// Newest sequence number issued so far; anything older is stale
    newest_seq: u64,
}

impl ResultCoordinator {
    pub fn new() -> Self {
        ResultCoordinator {
            search_query: None,
            search_results: None,
            state: GalleryState::Idle,
            next_seq: 1,
            newest_seq: 0,
        }
    }

    /// Current gallery state, for the renderer
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Enter the default browse view (also the implicit startup fetch:
    /// Idle never just sits there).
    pub fn browse(&mut self) -> Option<FetchPlan> {
        self.evaluate()
    }

    /// Submit a text query. All-whitespace input is rejected without
    /// touching the gallery at all.
    pub fn submit_query(&mut self, query: &str) -> Option<FetchPlan> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.search_query = Some(trimmed.to_string());
        // Mutual exclusion: a fresh query invalidates any pending
        // pre-fetched results
        self.search_results = None;
        self.evaluate()
    }

    /// A side-channel fetch (URL search) is starting. The gallery goes to
    /// Loading immediately; the returned sequence number must accompany
    /// the completion.
    pub fn begin_prefetch(&mut self) -> u64 {
        self.search_query = None;
        self.state = GalleryState::Loading;
        self.issue()
    }

    /// Report a fetch completion. Returns false when the completion was
    /// stale and discarded.
    pub fn finish(&mut self, seq: u64, outcome: Result<Vec<ImageRecord>, String>) -> bool {
        if seq < self.newest_seq {
            println!("⏭️  Discarding stale fetch #{} (newest is #{})", seq, self.newest_seq);
            return false;
        }

        match outcome {
            Ok(records) => {
                self.search_results = Some(records);
                self.evaluate();
            }
            Err(detail) => {
                eprintln!("❌ Fetch #{} failed: {}", seq, detail);
                self.state = GalleryState::Failed(FETCH_FAILED.to_string());
            }
        }

        true
    }

    /// Re-evaluate pending inputs in priority order. Consumed inputs are
    /// cleared so each is applied exactly once.
    fn evaluate(&mut self) -> Option<FetchPlan> {
        if let Some(records) = self.search_results.take() {
            self.state = GalleryState::from_records(records);
            return None;
        }

        if let Some(query) = self.search_query.take() {
            self.state = GalleryState::Loading;
            return Some(FetchPlan::TextSearch {
                seq: self.issue(),
                query,
            });
        }

        self.state = GalleryState::Loading;
        Some(FetchPlan::ListAll { seq: self.issue() })
    }

    /// Hand out the next fetch sequence number
    fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.newest_seq = seq;
        seq
    }
}

impl Default for ResultCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            storage_ref: format!("s3://bucket/{}.jpg", id),
            title: None,
            description: None,
            tags: None,
            similarity_score: None,
        }
    }

    #[test]
    fn test_starts_idle_and_browse_plans_list_all() {
        let mut c = ResultCoordinator::new();
        assert_eq!(*c.state(), GalleryState::Idle);

        let plan = c.browse().expect("startup must issue a fetch");
        assert!(matches!(plan, FetchPlan::ListAll { .. }));
        assert_eq!(*c.state(), GalleryState::Loading);
    }

    #[test]
    fn test_loaded_is_never_empty() {
        assert_eq!(GalleryState::from_records(vec![]), GalleryState::Empty);
        assert!(matches!(
            GalleryState::from_records(vec![record("a")]),
            GalleryState::Loaded(_)
        ));
    }

    #[test]
    fn test_successful_fetch_loads_records() {
        let mut c = ResultCoordinator::new();
        let plan = c.browse().unwrap();

        assert!(c.finish(plan.seq(), Ok(vec![record("a"), record("b")])));
        match c.state() {
            GalleryState::Loaded(records) => assert_eq!(records.len(), 2),
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_results_adopt_empty_not_failed() {
        let mut c = ResultCoordinator::new();
        let plan = c.browse().unwrap();

        assert!(c.finish(plan.seq(), Ok(vec![])));
        assert_eq!(*c.state(), GalleryState::Empty);
    }

    #[test]
    fn test_failed_fetch_uses_static_message() {
        let mut c = ResultCoordinator::new();
        let plan = c.browse().unwrap();

        assert!(c.finish(plan.seq(), Err("connection refused".to_string())));
        assert_eq!(
            *c.state(),
            GalleryState::Failed("Failed to fetch images".to_string())
        );
    }

    #[test]
    fn test_whitespace_query_does_not_change_state() {
        let mut c = ResultCoordinator::new();
        let plan = c.browse().unwrap();
        c.finish(plan.seq(), Ok(vec![record("a")]));
        let before = c.state().clone();

        assert!(c.submit_query("   \t  ").is_none());
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut c = ResultCoordinator::new();
        match c.submit_query("  sunset  ") {
            Some(FetchPlan::TextSearch { query, .. }) => assert_eq!(query, "sunset"),
            other => panic!("expected text-search plan, got {:?}", other),
        }
    }

    #[test]
    fn test_prefetched_results_win_over_pending_query() {
        // Regression test for the evaluation priority: when both inputs
        // are somehow non-null, the pre-fetched set is adopted and no
        // fetch is issued.
        let mut c = ResultCoordinator::new();
        c.search_results = Some(vec![record("a")]);
        c.search_query = Some("cat".to_string());

        assert!(c.evaluate().is_none());
        assert!(matches!(c.state(), GalleryState::Loaded(_)));
        // Consumed exactly once
        assert!(c.search_results.is_none());
    }

    #[test]
    fn test_new_query_invalidates_pending_results() {
        let mut c = ResultCoordinator::new();
        c.search_results = Some(vec![record("a")]);

        let plan = c.submit_query("cat");
        assert!(matches!(plan, Some(FetchPlan::TextSearch { .. })));
        assert!(c.search_results.is_none());
    }

    #[test]
    fn test_prefetch_flow() {
        let mut c = ResultCoordinator::new();
        let seq = c.begin_prefetch();
        assert_eq!(*c.state(), GalleryState::Loading);

        assert!(c.finish(seq, Ok(vec![record("similar")])));
        assert!(matches!(c.state(), GalleryState::Loaded(_)));
    }

    #[test]
    fn test_prefetch_clears_pending_query() {
        let mut c = ResultCoordinator::new();
        c.search_query = Some("left over".to_string());

        let seq = c.begin_prefetch();
        assert!(c.search_query.is_none());

        // With the query gone, an empty prefetched set must land on Empty,
        // not trigger a text search on the next evaluation
        assert!(c.finish(seq, Ok(vec![])));
        assert_eq!(*c.state(), GalleryState::Empty);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut c = ResultCoordinator::new();
        let old = c.submit_query("first").unwrap();
        let new = c.submit_query("second").unwrap();
        assert!(old.seq() < new.seq());

        // The slow old fetch resolves after the newer submission
        assert!(!c.finish(old.seq(), Ok(vec![record("old")])));
        assert_eq!(*c.state(), GalleryState::Loading);

        assert!(c.finish(new.seq(), Ok(vec![record("new")])));
        match c.state() {
            GalleryState::Loaded(records) => assert_eq!(records[0].id, "new"),
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_failure_cannot_clobber_newer_fetch() {
        let mut c = ResultCoordinator::new();
        let old = c.submit_query("first").unwrap();
        let seq = c.begin_prefetch();

        assert!(!c.finish(old.seq(), Err("timeout".to_string())));
        assert_eq!(*c.state(), GalleryState::Loading);

        assert!(c.finish(seq, Ok(vec![record("a")])));
        assert!(matches!(c.state(), GalleryState::Loaded(_)));
    }

    #[test]
    fn test_new_submission_discards_previous_error() {
        let mut c = ResultCoordinator::new();
        let plan = c.browse().unwrap();
        c.finish(plan.seq(), Err("boom".to_string()));
        assert!(matches!(c.state(), GalleryState::Failed(_)));

        c.submit_query("retry").unwrap();
        assert_eq!(*c.state(), GalleryState::Loading);
    }

    #[test]
    fn test_end_to_end_text_search_transitions() {
        // Idle → Loading → Loaded (browse), then Loading → Loaded (search)
        let mut c = ResultCoordinator::new();

        let browse = c.browse().unwrap();
        c.finish(browse.seq(), Ok(vec![record("a")]));
        assert!(matches!(c.state(), GalleryState::Loaded(_)));

        let plan = c.submit_query("sunset").unwrap();
        assert_eq!(*c.state(), GalleryState::Loading);

        c.finish(plan.seq(), Ok(vec![record("s1"), record("s2")]));
        match c.state() {
            GalleryState::Loaded(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].id, "s1");
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }
}
