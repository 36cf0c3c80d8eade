use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{error::FetchError, format::FormatConf};

/// Reads a json document from a url.
#[async_trait]
pub trait FetchJson: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: FetchJson + ?Sized> FetchJson for &T {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).fetch_json(url).await
    }
}

#[async_trait]
impl<T: FetchJson + ?Sized> FetchJson for Arc<T> {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).fetch_json(url).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(conf: &FormatConf) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = conf.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            user_agent: conf.user_agent.clone(),
            token: conf.token.clone(),
        })
    }
}

#[async_trait]
impl FetchJson for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "fetching");

        let mut request = self.client.get(url).header(USER_AGENT, &self.user_agent);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bot {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Canned responses keyed by url, with a call counter.
    #[derive(Default)]
    pub struct FakeFetcher {
        responses: HashMap<String, Value>,
        pub calls: AtomicUsize,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: impl Into<String>, body: Value) -> Self {
            self.responses.insert(url.into(), body);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FetchJson for FakeFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(url) {
                Some(body) => Ok(body.clone()),
                None => Err(FetchError::Decode {
                    url: url.to_string(),
                    source: serde_json::from_str::<Value>("<html>").unwrap_err(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    // Answers one request with `status` and `body`, handing back the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/applications/42/rpc", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).to_lowercase()
        });

        (url, handle)
    }

    fn fetcher(token: Option<&str>) -> HttpFetcher {
        HttpFetcher::new(&FormatConf {
            token: token.map(String::from),
            timeout_secs: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let (url, server) = serve_once("200 OK", r#"{"icon": "hash1"}"#).await;
        let payload = fetcher(None).fetch_json(&url).await.unwrap();
        assert_eq!(payload["icon"], "hash1");

        let request = server.await.unwrap();
        assert!(request.starts_with("get /applications/42/rpc"));
        assert!(request.contains("user-agent: presence-fmt/"));
        assert!(!request.contains("authorization:"));
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let (url, server) = serve_once("404 Not Found", "{}").await;
        let error = fetcher(None).fetch_json(&url).await.unwrap_err();
        assert!(
            matches!(
                &error,
                FetchError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND
            ),
            "{error}"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_html_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", "<html>cloudflare</html>").await;
        let error = fetcher(None).fetch_json(&url).await.unwrap_err();
        assert!(matches!(error, FetchError::Decode { .. }), "{error}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_token_is_sent() {
        let (url, server) = serve_once("200 OK", "{}").await;
        fetcher(Some("s3cret")).fetch_json(&url).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.contains("authorization: bot s3cret"), "{request}");
    }
}
