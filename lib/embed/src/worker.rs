// Single-owner encode worker
// One thread owns the loaded encoder; callers queue jobs and wait on a
// oneshot reply. Jobs run in FIFO order and shutdown drains the queue.
// An encoder panic fails the job that triggered it and stops the worker.

use crate::encoder::TextEncoder;
use crate::{EmbedError, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Reply = oneshot::Sender<Result<Vec<Vec<f32>>>>;

struct EncodeJob {
    texts: Vec<String>,
    reply: Reply,
}

struct JobQueue {
    jobs: Mutex<VecDeque<EncodeJob>>,
    condvar: Condvar,
    running: AtomicBool,
}

impl JobQueue {
    fn new() -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            running: AtomicBool::new(true),
        }
    }

    fn submit(&self, texts: Vec<String>) -> Result<oneshot::Receiver<Result<Vec<Vec<f32>>>>> {
        let (reply, receiver) = oneshot::channel();
        let mut jobs = self.jobs.lock();
        if !self.running.load(Ordering::Acquire) {
            return Err(EmbedError::WorkerStopped);
        }
        jobs.push_back(EncodeJob { texts, reply });
        self.condvar.notify_one();
        Ok(receiver)
    }

    fn stop(&self) {
        let _jobs = self.jobs.lock();
        self.running.store(false, Ordering::Release);
        self.condvar.notify_all();
    }

    /// Stop and drop every queued job; their callers see `WorkerStopped`
    fn abort(&self) -> usize {
        let mut jobs = self.jobs.lock();
        self.running.store(false, Ordering::Release);
        let dropped = jobs.len();
        jobs.clear();
        self.condvar.notify_all();
        dropped
    }

    /// Worker loop: runs until stopped and the queue is empty
    fn run(&self, encoder: &dyn TextEncoder) {
        loop {
            let job = {
                let mut jobs = self.jobs.lock();
                while jobs.is_empty() && self.running.load(Ordering::Acquire) {
                    self.condvar.wait(&mut jobs);
                }
                match jobs.pop_front() {
                    Some(job) => job,
                    None => break,
                }
            };

            let texts: Vec<&str> = job.texts.iter().map(String::as_str).collect();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| encoder.encode_batch(&texts)));
            let result = match outcome {
                Ok(result) => result,
                Err(_) => {
                    let dropped = self.abort();
                    warn!(model = encoder.model_id(), dropped, "encoder panicked, stopping worker");
                    let _ = job
                        .reply
                        .send(Err(EmbedError::Encoding("encoder panicked".to_string())));
                    break;
                }
            };
            // The caller may have given up (timeout); nothing to do then
            if job.reply.send(result).is_err() {
                debug!(texts = texts.len(), "encode result discarded");
            }
        }
    }
}

/// Thread that owns an encoder and serializes all inference through it
pub struct EncodeWorker {
    queue: Arc<JobQueue>,
    handle: EncoderHandle,
    thread: Option<JoinHandle<()>>,
}

impl EncodeWorker {
    /// Move `encoder` onto a dedicated thread
    pub fn spawn(encoder: Box<dyn TextEncoder>) -> Result<Self> {
        let queue = Arc::new(JobQueue::new());
        let handle = EncoderHandle {
            queue: queue.clone(),
            model_id: Arc::from(encoder.model_id()),
            dimension: encoder.dimension(),
        };

        let worker_queue = queue.clone();
        let thread = thread::Builder::new()
            .name(format!("encode-worker-{}", encoder.model_id()))
            .spawn(move || worker_queue.run(encoder.as_ref()))?;

        Ok(Self {
            queue,
            handle,
            thread: Some(thread),
        })
    }

    /// Cloneable handle for submitting work
    pub fn handle(&self) -> EncoderHandle {
        self.handle.clone()
    }

    /// Number of jobs waiting to run
    pub fn pending_jobs(&self) -> usize {
        self.queue.jobs.lock().len()
    }

    /// Stop accepting jobs, finish the queued ones and join the thread
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.queue.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(model = %self.handle.model_id, "encode worker panicked");
            }
        }
    }
}

impl Drop for EncodeWorker {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Submits encode jobs to an [`EncodeWorker`].
///
/// The [`TextEncoder`] impl blocks the calling thread and must not be used
/// from inside an async runtime; use [`encode_async`](Self::encode_async)
/// there.
#[derive(Clone)]
pub struct EncoderHandle {
    queue: Arc<JobQueue>,
    model_id: Arc<str>,
    dimension: usize,
}

impl std::fmt::Debug for EncoderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderHandle")
            .field("model_id", &self.model_id)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl EncoderHandle {
    pub async fn encode_async(&self, text: &str) -> Result<Vec<f32>> {
        let receiver = self.queue.submit(vec![text.to_string()])?;
        let batch = receiver.await.map_err(|_| EmbedError::WorkerStopped)??;
        single(batch)
    }

    pub async fn encode_batch_async(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let owned = texts.iter().map(|text| text.to_string()).collect();
        let receiver = self.queue.submit(owned)?;
        receiver.await.map_err(|_| EmbedError::WorkerStopped)?
    }

    /// Race an encode against a timer. On timeout the job is abandoned: it
    /// still runs on the worker but its result is dropped.
    pub async fn encode_timeout(&self, text: &str, timeout: Duration) -> Result<Vec<f32>> {
        tokio::time::timeout(timeout, self.encode_async(text))
            .await
            .map_err(|_| EmbedError::Timeout(timeout))?
    }
}

impl TextEncoder for EncoderHandle {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        single(self.encode_batch(&[text])?)
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let owned = texts.iter().map(|text| text.to_string()).collect();
        self.queue
            .submit(owned)?
            .blocking_recv()
            .map_err(|_| EmbedError::WorkerStopped)?
    }
}

fn single(batch: Vec<Vec<f32>>) -> Result<Vec<f32>> {
    let actual = batch.len();
    batch
        .into_iter()
        .next()
        .filter(|_| actual == 1)
        .ok_or(EmbedError::BatchSize {
            expected: 1,
            actual,
        })
}
