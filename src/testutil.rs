//! Helpers shared by tests: canned metadata documents, an in-process stub
//! of the task metadata endpoint and a log capture.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;

use axum::Router;
use axum::routing::get;

use crate::metadata::{Client, SnapshotRetriever};

pub(crate) const TASK: &str = include_str!("metadata/testdata/task.json");
pub(crate) const TASK_STATS: &str = include_str!("metadata/testdata/task_stats.json");

/// Serves `/task` and `/task/stats` with fixed bodies on an ephemeral local port.
pub(crate) struct StubEndpoint {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl StubEndpoint {
    pub(crate) async fn new(task: &'static str, stats: &'static str) -> Self {
        Self::delayed(task, stats, Duration::ZERO).await
    }

    pub(crate) async fn fixtures() -> Self {
        Self::new(TASK, TASK_STATS).await
    }

    /// Like [`StubEndpoint::new`], but every response is held back for `delay`.
    pub(crate) async fn delayed(task: &'static str, stats: &'static str, delay: Duration) -> Self {
        let router = Router::new()
            .route(
                "/task",
                get(move || async move {
                    tokio::time::sleep(delay).await;
                    task
                }),
            )
            .route(
                "/task/stats",
                get(move || async move {
                    tokio::time::sleep(delay).await;
                    stats
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("TCP Listener bind");
        let addr = listener.local_addr().expect("bound listener address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("stub endpoint serve");
        });

        Self { addr, handle }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn retriever(&self, deadline: Duration) -> SnapshotRetriever {
        let client = Client::new(&self.url(), Duration::from_secs(5)).expect("valid stub url");
        SnapshotRetriever::new(client, deadline)
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A log record emitted on the current test thread.
#[derive(Debug, Clone)]
pub(crate) struct CapturedLog {
    pub(crate) level: log::Level,
    pub(crate) target: String,
    pub(crate) message: String,
}

thread_local! {
    static CAPTURED: RefCell<Vec<CapturedLog>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with_borrow_mut(|logs| {
            logs.push(CapturedLog {
                level: record.level(),
                target: record.target().to_owned(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Runs `f` and returns the log records it emitted on this thread.
///
/// Records are kept per thread, so tests running in parallel don't see each other's logs.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedLog>) {
    INSTALL_LOGGER.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed in tests");
        log::set_max_level(log::LevelFilter::Trace);
    });

    CAPTURED.with_borrow_mut(Vec::clear);
    let out = f();
    (out, CAPTURED.with_borrow_mut(std::mem::take))
}
