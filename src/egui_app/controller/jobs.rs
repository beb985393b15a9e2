use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::classify::{self, AnalysisError, BatchClassifier, Progress};
use crate::sentiment::ResultSet;

pub(crate) enum AnalysisMessage {
    Progress(Progress),
    Finished(Result<ResultSet, AnalysisError>),
}

/// What a poll of the worker channel produced.
pub(crate) enum JobPoll {
    Pending,
    Message(AnalysisMessage),
    /// The worker hung up without reporting a result.
    Lost,
}

/// A single analysis run on a background thread.
///
/// Chunks are classified strictly in order on the worker; the UI thread only drains
/// the channel.
pub(crate) struct AnalysisJob {
    rx: Receiver<AnalysisMessage>,
    started: Instant,
    total: usize,
}

impl AnalysisJob {
    pub(crate) fn spawn(
        classifier: BatchClassifier,
        reviews: Vec<String>,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let total = reviews.len();
        thread::Builder::new()
            .name("sentidash-analysis".into())
            .spawn(move || {
                let progress_tx = tx.clone();
                let result = classify::analyze(&classifier, reviews, |progress| {
                    let _ = progress_tx.send(AnalysisMessage::Progress(progress));
                });
                let _ = tx.send(AnalysisMessage::Finished(result));
            })?;
        Ok(Self {
            rx,
            started: Instant::now(),
            total,
        })
    }

    pub(crate) fn try_next(&self) -> JobPoll {
        match self.rx.try_recv() {
            Ok(message) => JobPoll::Message(message),
            Err(TryRecvError::Empty) => JobPoll::Pending,
            Err(TryRecvError::Disconnected) => JobPoll::Lost,
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }
}
