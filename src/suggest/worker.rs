use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::client::SuggestionService;

pub struct FetchWork {
    pub context_key: String,
    pub last_words: [String; 2],
    pub generation: u64,
}

/// `words` is `None` for transport errors, malformed payloads and
/// `success: false` alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub generation: u64,
    pub words: Option<Vec<String>>,
}

/// Runs suggestion fetches off the UI thread.
///
/// Each submission bumps a generation counter; the worker skips queued work
/// that has already been superseded, and callers drop results whose
/// generation is not `latest()`.
pub struct FetchWorker {
    work_tx: mpsc::Sender<FetchWork>,
    result_rx: mpsc::Receiver<FetchResult>,
    generation: Arc<AtomicU64>,
}

impl FetchWorker {
    pub fn spawn(service: Arc<dyn SuggestionService>) -> std::io::Result<Self> {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<FetchWork>();
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>();

        {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("nextword-fetch".into())
                .spawn(move || fetch_loop(work_rx, result_tx, generation, service))?;
        }

        Ok(Self {
            work_tx,
            result_rx,
            generation,
        })
    }

    /// Queues a fetch and returns its generation.
    pub fn submit(&self, context_key: String, last_words: [String; 2]) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self
            .work_tx
            .send(FetchWork {
                context_key,
                last_words,
                generation,
            })
            .is_err()
        {
            warn!("fetch worker has stopped; request dropped");
        }
        generation
    }

    /// Makes every outstanding request stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn latest(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<FetchResult> {
        self.result_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }
}

fn fetch_loop(
    rx: mpsc::Receiver<FetchWork>,
    tx: mpsc::Sender<FetchResult>,
    generation: Arc<AtomicU64>,
    service: Arc<dyn SuggestionService>,
) {
    while let Ok(work) = rx.recv() {
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != generation.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "skipping superseded fetch");
            continue;
        }

        let words = match service.fetch_suggestions(&latest.context_key, &latest.last_words) {
            Ok(res) if res.success => Some(res.words),
            Ok(res) => {
                warn!(
                    context = %latest.context_key,
                    key = ?latest.last_words,
                    reason = res.error.as_deref().unwrap_or("unspecified"),
                    "server returned no suggestions"
                );
                None
            }
            Err(err) => {
                warn!(context = %latest.context_key, error = %err, "suggestion fetch failed");
                None
            }
        };

        let result = FetchResult {
            generation: latest.generation,
            words,
        };
        if tx.send(result).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionResponse;
    use crate::suggest::client::ClientError;
    use std::sync::Mutex;

    struct Scripted {
        seen: Mutex<Vec<[String; 2]>>,
        fail: bool,
    }

    impl SuggestionService for Scripted {
        fn fetch_suggestions(
            &self,
            _context_key: &str,
            last_words: &[String; 2],
        ) -> Result<SuggestionResponse, ClientError> {
            self.seen.lock().unwrap().push(last_words.clone());
            if self.fail {
                return Err(ClientError::Status(503));
            }
            Ok(SuggestionResponse {
                success: true,
                words: vec![format!("after-{}", last_words[1])],
                error: None,
            })
        }
    }

    fn pair(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn results_carry_the_submitted_generation() {
        let service = Arc::new(Scripted {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let worker = FetchWorker::spawn(service).unwrap();

        let generation = worker.submit("bard".into(), pair("to", "be"));
        let result = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.generation, generation);
        assert_eq!(result.words, Some(vec!["after-be".to_string()]));
        assert_eq!(worker.latest(), generation);
    }

    #[test]
    fn failures_become_empty_results() {
        let service = Arc::new(Scripted {
            seen: Mutex::new(Vec::new()),
            fail: true,
        });
        let worker = FetchWorker::spawn(service).unwrap();

        worker.submit("bard".into(), pair("to", "be"));
        let result = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.words, None);
    }

    #[test]
    fn http_failures_end_as_empty_results() {
        use crate::suggest::client::{fixture, HttpSuggestionClient};

        let (addr, _seen) = fixture::serve(vec![
            (200, "not json".to_string()),
            (500, "{}".to_string()),
            (200, r#"{"success": false, "error": "Key not found"}"#.to_string()),
        ]);
        let client = HttpSuggestionClient::new(&addr, None).unwrap();
        let worker = FetchWorker::spawn(Arc::new(client)).unwrap();

        for _ in 0..3 {
            let generation = worker.submit("bard".into(), pair("to", "be"));
            let result = worker.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(result.generation, generation);
            assert_eq!(result.words, None);
        }
    }

    #[test]
    fn invalidated_work_is_never_fetched() {
        let service = Arc::new(Scripted {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        let worker = FetchWorker::spawn(service.clone()).unwrap();

        // invalidate before the worker can observe the submission
        let generation = worker.generation.fetch_add(1, Ordering::SeqCst) + 1;
        worker.invalidate();
        worker
            .work_tx
            .send(FetchWork {
                context_key: "bard".into(),
                last_words: pair("to", "be"),
                generation,
            })
            .unwrap();

        let follow_up = worker.submit("bard".into(), pair("or", "not"));
        let result = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.generation, follow_up);
        assert!(worker.recv_timeout(Duration::from_millis(100)).is_none());
        assert!(!service.seen.lock().unwrap().contains(&pair("to", "be")));
    }
}
