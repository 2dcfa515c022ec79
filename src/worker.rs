//! Dedicated threads owning in-process models.
//!
//! rust-bert pipelines hold libtorch state that cannot be shared between
//! threads, so each model lives on its own thread and is fed over a channel.

use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use tokio::sync::oneshot;
use tracing::{debug, error};

type Job<I, O> = (I, oneshot::Sender<Result<O>>);

pub struct ModelWorker<I, O> {
    name: String,
    jobs: mpsc::Sender<Job<I, O>>,
}

impl<I: Send + 'static, O: Send + 'static> ModelWorker<I, O> {
    /// Starts a thread that builds its model with `load` and answers calls with `run`.
    ///
    /// Resolves once the model is loaded; a load failure is returned here.
    pub async fn spawn<M, L, R>(name: &str, load: L, run: R) -> Result<Self>
    where
        L: FnOnce() -> Result<M> + Send + 'static,
        R: Fn(&M, I) -> Result<O> + Send + 'static,
    {
        let (jobs, queue) = mpsc::channel::<Job<I, O>>();
        let (ready_tx, ready_rx) = oneshot::channel();
        let thread_name = name.to_string();

        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let model = match load() {
                    Ok(model) => {
                        let _ = ready_tx.send(Ok(()));
                        model
                    }
                    Err(e) => {
                        error!("{} failed to load: {:#}", thread_name, e);
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                for (input, reply) in queue {
                    let _ = reply.send(run(&model, input));
                }
                debug!("{} stopped", thread_name);
            })
            .with_context(|| format!("failed to start {}", name))?;

        ready_rx
            .await
            .map_err(|_| anyhow!("{} exited while loading", name))??;

        Ok(Self {
            name: name.to_string(),
            jobs,
        })
    }

    pub async fn call(&self, input: I) -> Result<O> {
        let (reply, response) = oneshot::channel();
        self.jobs
            .send((input, reply))
            .map_err(|_| anyhow!("{} is not running", self.name))?;
        response
            .await
            .map_err(|_| anyhow!("{} dropped the request", self.name))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_run_against_loaded_model() {
        let worker = ModelWorker::spawn(
            "test-model",
            || Ok(3usize),
            |factor: &usize, text: String| Ok(text.len() * factor),
        )
        .await
        .unwrap();

        assert_eq!(worker.call("abcd".to_string()).await.unwrap(), 12);
        assert_eq!(worker.call(String::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_load_failure_is_returned() {
        let result = ModelWorker::<String, usize>::spawn(
            "broken-model",
            || -> Result<usize> { Err(anyhow!("weights missing")) },
            |_: &usize, text: String| Ok(text.len()),
        )
        .await;

        let err = result.err().unwrap();
        assert!(err.to_string().contains("weights missing"));
    }
}
