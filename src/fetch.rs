use crate::catalog::CourseCollection;
use crate::notify::NETWORK_ERROR_MESSAGE;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Fetch task ended without a result")]
    Cancelled,
}

impl FetchError {
    /// Message shown to the user. Every cause reads the same.
    pub fn user_message(&self) -> &'static str {
        NETWORK_ERROR_MESSAGE
    }
}

pub type FetchOutcome = Result<CourseCollection, FetchError>;

/// Body of the courses endpoint.
#[derive(Debug, Deserialize)]
pub struct CoursesResponse {
    pub data: CourseCollection,
}

/// Somewhere the course catalog can be loaded from.
#[async_trait]
pub trait CourseSource: Send + Sync {
    fn url(&self) -> &str;

    async fn fetch_courses(&self) -> FetchOutcome;
}

/// Plain GET against the configured endpoint. No headers, no retry, no timeout.
pub struct HttpCourseSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCourseSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_courses(&self) -> FetchOutcome {
        tracing::info!(url = %self.url, "fetching courses");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: CoursesResponse = serde_json::from_slice(&body)?;
        tracing::info!(
            bytes = body.len(),
            courses = parsed.data.len(),
            "courses fetched"
        );
        Ok(parsed.data)
    }
}

/// An in-flight fetch. Dropping the handle aborts the task.
pub struct FetchHandle {
    rx: oneshot::Receiver<FetchOutcome>,
    task: JoinHandle<()>,
}

impl FetchHandle {
    /// Non-blocking check for the result; `None` while still in flight.
    pub fn try_take(&mut self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(FetchError::Cancelled)),
        }
    }

    /// Wait until the fetch settles.
    #[cfg(test)]
    pub async fn settled(&mut self) -> FetchOutcome {
        match (&mut self.rx).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::Cancelled),
        }
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `source` once on a background task.
pub fn spawn_fetch(source: Arc<dyn CourseSource>) -> FetchHandle {
    let (tx, rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        let outcome = source.fetch_courses().await;
        if let Err(ref e) = outcome {
            tracing::error!(url = %source.url(), error = %e, "course fetch failed");
        }
        // Receiver is gone when the UI quit first.
        let _ = tx.send(outcome);
    });
    FetchHandle { rx, task }
}
