//! Dispatch actor - hands compiled request configurations to the (simulated) client
//!
//! No network traffic happens here. Each dispatch waits for a configured
//! latency and reports completion.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{DispatchCommand, DispatchResponse};

/// Dispatch actor that processes submitted request configurations
pub struct DispatchActor {
    response_tx: mpsc::UnboundedSender<DispatchResponse>,
    latency: Duration,
    in_flight: JoinSet<()>,
}

impl DispatchActor {
    pub fn new(response_tx: mpsc::UnboundedSender<DispatchResponse>, latency: Duration) -> Self {
        DispatchActor {
            response_tx,
            latency,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the dispatch actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<DispatchCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(DispatchCommand::Dispatch { id, config }) => {
                            let response_tx = self.response_tx.clone();
                            let latency = self.latency;

                            self.in_flight.spawn(async move {
                                let started = Instant::now();
                                tracing::info!(id, method = %config.method, url = %config.url, "Dispatching request configuration");
                                tokio::time::sleep(latency).await;
                                tracing::info!(id, "Request configuration handed off");

                                let elapsed_ms = started.elapsed().as_millis() as u64;
                                let _ = response_tx.send(DispatchResponse::Completed { id, elapsed_ms });
                            });
                        }

                        Some(DispatchCommand::Shutdown) => {
                            self.in_flight.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                Some(_result) = self.in_flight.join_next() => {}
            }
        }
        tracing::debug!("Dispatch actor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::RequestConfig;

    #[tokio::test]
    async fn test_dispatch_reports_completion() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(DispatchActor::new(resp_tx, Duration::ZERO).run(cmd_rx));

        let config = RequestConfig {
            method: "get".into(),
            url: "https://example.com".into(),
            ..Default::default()
        };
        cmd_tx.send(DispatchCommand::Dispatch { id: 7, config }).unwrap();

        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response.id(), 7);

        cmd_tx.send(DispatchCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_channel_stops_actor() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<DispatchCommand>();
        let (resp_tx, _resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(DispatchActor::new(resp_tx, Duration::ZERO).run(cmd_rx));

        drop(cmd_tx);
        handle.await.unwrap();
    }
}
