//! Background task management - spawning async tasks and receiving results.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiClient, ApiError, Issue};

/// Messages from background tasks.
pub enum BackgroundMessage {
    /// Issue list fetch completed with result
    ListRefreshComplete(Result<Vec<Issue>, ApiError>),
}

/// Tagged message as sent by a task, before staleness filtering.
enum Tagged {
    List { seq: u64, result: Result<Vec<Issue>, ApiError> },
}

/// Manages background task communication.
pub struct BackgroundTasks {
    client: Arc<ApiClient>,
    rx: mpsc::Receiver<Tagged>,
    tx: mpsc::Sender<Tagged>,
    /// Sequence number of the list fetch allowed to land, if any
    current_list: Option<u64>,
    next_seq: u64,
}

impl BackgroundTasks {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            client,
            rx,
            tx,
            current_list: None,
            next_seq: 0,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Whether a list fetch is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.current_list.is_some()
    }

    /// Poll for background task completions.
    ///
    /// Results of superseded or invalidated list fetches are dropped here.
    pub fn poll(&mut self) -> Vec<BackgroundMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Tagged::List { seq, result } => {
                    if self.current_list != Some(seq) {
                        debug!(seq, current = ?self.current_list, "Discarding stale issue list");
                        continue;
                    }
                    self.current_list = None;
                    messages.push(BackgroundMessage::ListRefreshComplete(result));
                }
            }
        }
        messages
    }

    /// Spawn a fetch of the issue list. Supersedes any fetch still in flight.
    pub fn spawn_list_refresh(&mut self) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.current_list = Some(seq);

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.list_issues().await;
            let _ = tx.send(Tagged::List { seq, result }).await;
        });
    }

    /// Forget any in-flight list fetch; its result will be ignored.
    pub fn invalidate_list_refresh(&mut self) {
        self.current_list = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tasks() -> BackgroundTasks {
        let client =
            ApiClient::new("http://127.0.0.1:9".to_string(), None, Duration::from_secs(1)).unwrap();
        BackgroundTasks::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_only_latest_list_fetch_lands() {
        let mut bg = tasks();
        bg.current_list = Some(2);
        assert!(bg.tx.send(Tagged::List { seq: 1, result: Ok(Vec::new()) }).await.is_ok());
        assert!(bg.tx.send(Tagged::List { seq: 2, result: Ok(Vec::new()) }).await.is_ok());

        let messages = bg.poll();
        assert_eq!(messages.len(), 1);
        assert!(!bg.is_refreshing());
    }

    #[tokio::test]
    async fn test_invalidated_fetch_is_ignored() {
        let mut bg = tasks();
        bg.current_list = Some(1);
        bg.invalidate_list_refresh();
        assert!(bg.tx.send(Tagged::List { seq: 1, result: Ok(Vec::new()) }).await.is_ok());

        assert!(bg.poll().is_empty());
    }
}
