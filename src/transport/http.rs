//! # HTTP transport
//!
//! [`HttpTransport`] posts the save body as JSON to the configured update URL
//! with `reqwest`. Success replies are returned without reading the body;
//! for any other status the body is read as text so it can be shown verbatim.
//! The status text is the server's own reason phrase.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::TransportError;

use super::transport::{Reply, SaveRequest, Transport};

/// `reqwest`-backed [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// Builds a client for the update URL described by `config`.
    pub fn new(config: &ModelConfig) -> Result<Self, TransportError> {
        let url = config.update_url()?;
        let client = Client::builder().build().map_err(TransportError::Build)?;
        Ok(Self { client, url })
    }
}

/// Reason phrase the server actually sent.
///
/// hyper only records the phrase when it differs from the canonical one for
/// the code, so fall back to the canonical phrase otherwise.
fn status_text(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post(&self, request: &SaveRequest) -> Result<Reply, TransportError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let status_text = status_text(&response);
        debug!(url = %self.url, status = status.as_u16(), "update replied");

        if status.is_success() {
            return Ok(Reply::new(status.as_u16(), status_text, String::new()));
        }
        let body = response.text().await?;
        Ok(Reply::new(status.as_u16(), status_text, body))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSet;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned reply; resolves to the raw request text.
    async fn serve_once(reply: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        });
        (format!("http://{addr}/"), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..head_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= head_end + 4 + length
    }

    fn request() -> SaveRequest {
        let params = ParamSet::new().numeric("x", 3.0, 1.0, 0).boolean("running", true);
        SaveRequest::new(params, "csrf_blob", "tok")
    }

    #[tokio::test]
    async fn test_success_reply_skips_body() {
        let (base, server) =
            serve_once("HTTP/1.1 200 OK\r\ncontent-length: 7\r\nconnection: close\r\n\r\nUpdated")
                .await;
        let transport = HttpTransport::new(&ModelConfig::with_base_url(base)).unwrap();

        let reply = transport.post(&request()).await.unwrap();
        assert_eq!(reply, Reply::new(200, "OK", ""));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /update HTTP/1.1"), "got: {raw}");
        let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"params": {"x": 3.0, "running": true}, "csrf_blob": "tok"})
        );
    }

    #[tokio::test]
    async fn test_error_reply_reads_body() {
        let (base, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 9\r\nconnection: close\r\n\r\nbad token",
        )
        .await;
        let transport = HttpTransport::new(&ModelConfig::with_base_url(base)).unwrap();

        let reply = transport.post(&request()).await.unwrap();
        assert_eq!(reply, Reply::new(500, "Internal Server Error", "bad token"));
        assert!(!reply.is_success());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_custom_reason_phrase_is_kept() {
        let (base, server) = serve_once(
            "HTTP/1.1 500 Bad Token\r\ncontent-length: 3\r\nconnection: close\r\n\r\nxyz",
        )
        .await;
        let transport = HttpTransport::new(&ModelConfig::with_base_url(base)).unwrap();

        let reply = transport.post(&request()).await.unwrap();
        assert_eq!(reply, Reply::new(500, "Bad Token", "xyz"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_standard_code_keeps_its_phrase() {
        let (base, server) = serve_once(
            "HTTP/1.1 599 Network Timeout\r\ncontent-length: 3\r\nconnection: close\r\n\r\nxyz",
        )
        .await;
        let transport = HttpTransport::new(&ModelConfig::with_base_url(base)).unwrap();

        let reply = transport.post(&request()).await.unwrap();
        assert_eq!(reply.status, 599);
        assert_eq!(reply.status_text, "Network Timeout");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport =
            HttpTransport::new(&ModelConfig::with_base_url(format!("http://{addr}/"))).unwrap();
        let err = transport.post(&request()).await.unwrap_err();
        assert_eq!(err.as_label(), "transport_request");
    }

    #[test]
    fn test_new_rejects_bad_base() {
        let err = HttpTransport::new(&ModelConfig::with_base_url("::nope")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }
}
