//! The refresh cycle: fetch the latest predictions, reshape, redraw.
//!
//! Everything here runs on one cooperative thread (the page's event loop),
//! so shared state lives in `Cell`/`RefCell` and no borrow is held across
//! an await point.
//!
//! Overlapping refreshes are allowed. Each one takes a ticket when it
//! starts; a response that arrives after a newer refresh has already been
//! drawn is dropped, so the chart always shows the newest data that was
//! asked for rather than whichever response happened to land last.

use std::cell::{Cell, Ref, RefCell};
use std::future::Future;

use futures::{Stream, StreamExt};

use crate::chart::{ChartSurface, Renderer};
use crate::error::FetchError;
use crate::notify::Notification;
use crate::record::PredictionRecord;
use crate::series::{transform, ChronoLabeler, DateLabeler};

/// Where the latest prediction series comes from.
pub trait PredictionSource {
    /// Issue one request for the full prediction series.
    fn fetch_latest(&self) -> impl Future<Output = Result<Vec<PredictionRecord>, FetchError>>;
}

/// How one refresh cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The chart now shows this response.
    Applied {
        ticket: u64,
        points: usize,
        /// Rainfall of the last point, if it had one.
        latest: Option<f64>,
    },
    /// The fetch failed; the chart was left alone.
    Failed { ticket: u64, error: FetchError },
    /// A newer refresh was already drawn; this response was dropped.
    Stale { ticket: u64, newest: u64 },
}

impl RefreshOutcome {
    pub fn ticket(&self) -> u64 {
        match self {
            RefreshOutcome::Applied { ticket, .. }
            | RefreshOutcome::Failed { ticket, .. }
            | RefreshOutcome::Stale { ticket, .. } => *ticket,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Running totals over the updater's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub issued: u64,
    pub applied: u64,
    pub failed: u64,
    pub stale: u64,
}

/// Keeps one chart surface in sync with a prediction source.
pub struct LiveChartUpdater<S, R> {
    source: S,
    surface: RefCell<ChartSurface<R>>,
    labeler: Box<dyn DateLabeler>,
    issued_ticket: Cell<u64>,
    applied_ticket: Cell<u64>,
    stats: Cell<RefreshStats>,
}

impl<S, R> LiveChartUpdater<S, R>
where
    S: PredictionSource,
    R: Renderer,
{
    /// Updater labelling dates with the default [`ChronoLabeler`].
    pub fn new(source: S, surface: ChartSurface<R>) -> Self {
        Self::with_labeler(source, surface, Box::new(ChronoLabeler::default()))
    }

    pub fn with_labeler(
        source: S,
        surface: ChartSurface<R>,
        labeler: Box<dyn DateLabeler>,
    ) -> Self {
        Self {
            source,
            surface: RefCell::new(surface),
            labeler,
            issued_ticket: Cell::new(0),
            applied_ticket: Cell::new(0),
            stats: Cell::new(RefreshStats::default()),
        }
    }

    /// Run one fetch -> transform -> redraw cycle.
    ///
    /// Issues exactly one fetch. A failed fetch is logged once and leaves
    /// the chart untouched.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.issued_ticket.get() + 1;
        self.issued_ticket.set(ticket);
        self.record(|stats| stats.issued += 1);
        log::debug!("refresh #{}: fetching predictions", ticket);

        let records = match self.source.fetch_latest().await {
            Ok(records) => records,
            Err(error) => {
                log::error!("Error fetching data: {}", error);
                self.record(|stats| stats.failed += 1);
                return RefreshOutcome::Failed { ticket, error };
            }
        };

        let newest = self.applied_ticket.get();
        if ticket < newest {
            log::warn!(
                "refresh #{} finished after #{} was drawn, dropping its response",
                ticket,
                newest
            );
            self.record(|stats| stats.stale += 1);
            return RefreshOutcome::Stale { ticket, newest };
        }

        let points = transform(&records, self.labeler.as_ref());
        let latest = points.last().and_then(|point| point.y);
        self.surface.borrow_mut().redraw(&points);
        self.applied_ticket.set(ticket);
        self.record(|stats| stats.applied += 1);
        log::debug!("refresh #{}: drew {} points", ticket, points.len());

        RefreshOutcome::Applied {
            ticket,
            points: points.len(),
            latest,
        }
    }

    /// Refresh once per queued notification until the queue closes.
    ///
    /// Notifications are taken one at a time; each outcome is passed to
    /// `on_outcome`. Returns the number of notifications handled.
    ///
    /// Because each refresh finishes before the next notification is taken,
    /// a single `run` loop never has two fetches in flight and never sees a
    /// `Stale` outcome. The ticket guard in [`Self::refresh`] only matters
    /// when callers drive `refresh` concurrently themselves (several
    /// futures on one updater).
    pub async fn run<Q, F>(&self, mut queue: Q, mut on_outcome: F) -> usize
    where
        Q: Stream<Item = Notification> + Unpin,
        F: FnMut(&RefreshOutcome),
    {
        let mut handled = 0;
        while let Some(notification) = queue.next().await {
            log::info!("'{}' received, refreshing chart", notification.event);
            let outcome = self.refresh().await;
            on_outcome(&outcome);
            handled += 1;
        }
        log::info!("notification queue closed after {} refreshes", handled);
        handled
    }

    pub fn surface(&self) -> Ref<'_, ChartSurface<R>> {
        self.surface.borrow()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats.get()
    }

    fn record(&self, update: impl FnOnce(&mut RefreshStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::tests::RecordingRenderer;
    use crate::chart::ChartState;
    use crate::config::ChartLabels;
    use crate::notify::subscription;
    use crate::record::parse_records;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Once;

    type FetchResult = Result<Vec<PredictionRecord>, FetchError>;

    /// Replays canned responses in order and counts fetches.
    #[derive(Default)]
    struct ScriptedSource {
        responses: RefCell<VecDeque<FetchResult>>,
        fetches: Cell<usize>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<FetchResult>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                fetches: Cell::new(0),
            }
        }
    }

    impl PredictionSource for ScriptedSource {
        async fn fetch_latest(&self) -> FetchResult {
            self.fetches.set(self.fetches.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Each fetch waits until the test releases its gate.
    struct GatedSource {
        gates: RefCell<VecDeque<oneshot::Receiver<FetchResult>>>,
    }

    impl PredictionSource for GatedSource {
        async fn fetch_latest(&self) -> FetchResult {
            let gate = self.gates.borrow_mut().pop_front().expect("no gate left");
            gate.await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string())))
        }
    }

    thread_local! {
        static ERRORS_LOGGED: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts `error!` records per test thread.
    struct ErrorCounter;

    impl log::Log for ErrorCounter {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Error
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                ERRORS_LOGGED.with(|count| count.set(count.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static ERROR_COUNTER: ErrorCounter = ErrorCounter;
    static INIT_LOGGER: Once = Once::new();

    fn errors_logged() -> usize {
        INIT_LOGGER.call_once(|| {
            let _ = log::set_logger(&ERROR_COUNTER);
            log::set_max_level(log::LevelFilter::Trace);
        });
        ERRORS_LOGGED.with(Cell::get)
    }

    fn surface() -> ChartSurface<RecordingRenderer> {
        ChartSurface::initialize(RecordingRenderer::default(), "chart", ChartLabels::default())
    }

    fn sample() -> Vec<PredictionRecord> {
        parse_records(
            r#"[{"timestamp":"2024-01-01T00:00:00Z","curah_hujan":5.2},{"timestamp":"2024-01-02T00:00:00Z","curah_hujan":0}]"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_refresh_end_to_end() {
        let updater = LiveChartUpdater::new(ScriptedSource::new(vec![Ok(sample())]), surface());

        let outcome = updater.refresh().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Applied {
                ticket: 1,
                points: 2,
                latest: Some(0.0)
            }
        );

        let surface = updater.surface();
        let trace = &surface.state().data[0];
        assert_eq!(trace.x, vec!["1/1/2024", "1/2/2024"]);
        assert_eq!(trace.y, vec![Some(5.2), Some(0.0)]);
        assert_eq!(
            surface.state().layout.title.as_deref(),
            Some("Daily Rainfall Chart")
        );
        assert_eq!(surface.renderer().replaces.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_twice_same_data_is_identical() {
        let updater = LiveChartUpdater::new(
            ScriptedSource::new(vec![Ok(sample()), Ok(sample())]),
            surface(),
        );
        updater.refresh().await;
        let first = updater.surface().state().clone();
        updater.refresh().await;
        assert_eq!(&first, updater.surface().state());
    }

    #[tokio::test]
    async fn test_empty_response_clears_points() {
        let updater = LiveChartUpdater::new(
            ScriptedSource::new(vec![Ok(sample()), Ok(Vec::new())]),
            surface(),
        );
        updater.refresh().await;
        let outcome = updater.refresh().await;
        assert!(outcome.is_applied());

        let state = updater.surface().state().clone();
        assert_eq!(state, ChartState::from_points(&[], &ChartLabels::default()));
        assert_eq!(state.point_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_chart_alone() {
        let updater = LiveChartUpdater::new(
            ScriptedSource::new(vec![
                Ok(sample()),
                Err(FetchError::Transport("connection refused".to_string())),
            ]),
            surface(),
        );
        updater.refresh().await;
        let before = updater.surface().state().clone();
        let errors_before = errors_logged();

        let outcome = updater.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Failed { ticket: 2, .. }));
        assert_eq!(&before, updater.surface().state());
        assert_eq!(updater.surface().renderer().replaces.len(), 1);
        assert_eq!(errors_logged() - errors_before, 1);
        assert_eq!(
            updater.stats(),
            RefreshStats {
                issued: 2,
                applied: 1,
                failed: 1,
                stale: 0
            }
        );
    }

    #[tokio::test]
    async fn test_one_fetch_per_notification() {
        let updater = LiveChartUpdater::new(ScriptedSource::default(), surface());
        let (sub, queue) = subscription("update");
        sub.dispatch("update");
        sub.dispatch("disconnect");
        sub.dispatch("update");
        sub.dispatch("update");
        drop(sub);

        let mut outcomes = Vec::new();
        let handled = updater.run(queue, |outcome| outcomes.push(outcome.clone())).await;

        assert_eq!(handled, 3);
        assert_eq!(updater.source().fetches.get(), 3);
        let tickets: Vec<u64> = outcomes.iter().map(RefreshOutcome::ticket).collect();
        assert_eq!(tickets, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_does_not_block_next_notification() {
        let other = vec![PredictionRecord::new("2024-01-03T00:00:00Z", 7.5)];
        let updater = LiveChartUpdater::new(
            ScriptedSource::new(vec![
                Ok(sample()),
                Err(FetchError::Status(500)),
                Ok(other),
            ]),
            surface(),
        );
        let (sub, queue) = subscription("update");
        for _ in 0..3 {
            sub.dispatch("update");
        }
        drop(sub);

        let mut outcomes = Vec::new();
        let handled = updater.run(queue, |outcome| outcomes.push(outcome.clone())).await;

        assert_eq!(handled, 3);
        assert!(outcomes[0].is_applied());
        assert_eq!(
            outcomes[1],
            RefreshOutcome::Failed {
                ticket: 2,
                error: FetchError::Status(500)
            }
        );
        assert_eq!(
            outcomes[2],
            RefreshOutcome::Applied {
                ticket: 3,
                points: 1,
                latest: Some(7.5)
            }
        );

        let surface = updater.surface();
        assert_eq!(surface.state().data[0].x, vec!["1/3/2024"]);
        assert_eq!(surface.state().data[0].y, vec![Some(7.5)]);
        assert_eq!(surface.renderer().replaces.len(), 2);
        assert_eq!(
            updater.stats(),
            RefreshStats {
                issued: 3,
                applied: 2,
                failed: 1,
                stale: 0
            }
        );
    }

    #[tokio::test]
    async fn test_slow_older_response_is_dropped() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let updater = LiveChartUpdater::new(
            GatedSource {
                gates: RefCell::new(VecDeque::from([first_rx, second_rx])),
            },
            surface(),
        );

        let older = vec![PredictionRecord::new("2024-01-01", 1.0)];
        let newer = vec![PredictionRecord::new("2024-01-01", 1.0), PredictionRecord::new("2024-01-02", 9.0)];

        let (first, second, ()) = futures::join!(updater.refresh(), updater.refresh(), async {
            second_tx.send(Ok(newer)).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(Ok(older)).unwrap();
        });

        assert_eq!(second.ticket(), 2);
        assert!(second.is_applied());
        assert_eq!(first, RefreshOutcome::Stale { ticket: 1, newest: 2 });
        assert_eq!(updater.surface().state().point_count(), 2);
        assert_eq!(updater.stats().stale, 1);
    }
}
