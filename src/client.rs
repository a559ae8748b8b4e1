use crate::constants::{
    BROWSER_USER_AGENT, REQUEST_TIMEOUT, SERVICE_ORIGIN, SERVICE_REFERER, SHRINK_ENDPOINT,
};
use crate::error::{ShrinkError, Result};
use crate::formats::ImageKind;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN, REFERER};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Transport to the remote optimizer.
///
/// The pipeline only talks to the service through this trait, so tests can
/// substitute `MockShrinkService` for the network.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ShrinkService: Send + Sync {
    /// Posts raw image bytes and returns the undecoded response body.
    async fn upload(&self, body: Vec<u8>, kind: ImageKind) -> Result<String>;

    /// Streams the resource at `url` into `dest`, creating or truncating it.
    /// Returns the number of bytes written.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// `ShrinkService` backed by a single reused `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TinyClient {
    http: reqwest::Client,
    shrink_url: String,
}

impl TinyClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(SHRINK_ENDPOINT)
    }

    /// Client that posts uploads to `shrink_url` instead of the public endpoint.
    fn with_endpoint(shrink_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ORIGIN, HeaderValue::from_static(SERVICE_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static(SERVICE_REFERER));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            shrink_url: shrink_url.to_string(),
        })
    }
}

fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(ShrinkError::Status(status.as_u16()));
    }
    Ok(())
}

#[async_trait]
impl ShrinkService for TinyClient {
    async fn upload(&self, body: Vec<u8>, kind: ImageKind) -> Result<String> {
        debug!("POST {} ({} bytes, {})", self.shrink_url, body.len(), kind.mime_type());

        let response = self
            .http
            .post(&self.shrink_url)
            .header(CONTENT_TYPE, kind.mime_type())
            .body(body)
            .send()
            .await?;
        check_status(&response)?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(ShrinkError::EmptyBody);
        }
        Ok(text)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!("GET {} -> {:?}", url, dest);

        let mut response = self.http.get(url).send().await?;
        check_status(&response)?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;

        if written == 0 {
            return Err(ShrinkError::EmptyBody);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHRINK_PATH: &str = "/backend/opt/shrink";

    fn client_for(server: &MockServer) -> TinyClient {
        TinyClient::with_endpoint(&format!("{}{}", server.uri(), SHRINK_PATH)).unwrap()
    }

    #[test]
    fn test_tiny_client_builds() {
        let client = TinyClient::new().unwrap();
        assert_eq!(client.shrink_url, SHRINK_ENDPOINT);
    }

    #[tokio::test]
    async fn test_upload_posts_bytes_with_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SHRINK_PATH))
            .and(header("content-type", "image/png"))
            .and(header("origin", SERVICE_ORIGIN))
            .and(header("referer", SERVICE_REFERER))
            .and(body_bytes(b"png bytes".to_vec()))
            .respond_with(
                ResponseTemplate::new(201).set_body_string(r#"{"output":{"url":"u","ratio":0.5}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.upload(b"png bytes".to_vec(), ImageKind::Png).await.unwrap();
        assert_eq!(body, r#"{"output":{"url":"u","ratio":0.5}}"#);
    }

    #[tokio::test]
    async fn test_upload_sends_jpeg_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.upload(b"jpg".to_vec(), ImageKind::Jpeg).await.is_ok());
    }

    #[tokio::test]
    async fn test_upload_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.upload(b"img".to_vec(), ImageKind::Jpeg).await;
        assert!(matches!(result, Err(ShrinkError::Status(429))));
    }

    #[tokio::test]
    async fn test_upload_blank_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.upload(b"img".to_vec(), ImageKind::Jpeg).await;
        assert!(matches!(result, Err(ShrinkError::EmptyBody)));
    }

    #[tokio::test]
    async fn test_download_streams_body_to_dest() {
        let server = MockServer::start().await;
        let payload: Vec<u8> = (0..256 * 1024).map(|i| (i % 251) as u8).collect();
        Mock::given(method("GET"))
            .and(path("/backend/opt/output/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.jpg");
        std::fs::write(&dest, b"stale contents that are longer than nothing").unwrap();

        let client = client_for(&server);
        let url = format!("{}/backend/opt/output/abc", server.uri());
        let written = client.download(&url, &dest).await.unwrap();

        assert_eq!(written, payload.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_download_error_status_leaves_dest_alone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.jpg");

        let client = client_for(&server);
        let url = format!("{}/backend/opt/output/missing", server.uri());
        let result = client.download(&url, &dest).await;

        assert!(matches!(result, Err(ShrinkError::Status(404))));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.jpg");

        let client = client_for(&server);
        let url = format!("{}/backend/opt/output/empty", server.uri());
        let result = client.download(&url, &dest).await;

        assert!(matches!(result, Err(ShrinkError::EmptyBody)));
    }

    #[tokio::test]
    async fn test_mock_service_returns_scripted_body() {
        let mut service = MockShrinkService::new();
        service
            .expect_upload()
            .withf(|body, kind| body.as_slice() == b"img" && *kind == ImageKind::Png)
            .times(1)
            .returning(|_, _| Ok(r#"{"output":{"url":"u","ratio":1.0}}"#.to_string()));

        let body = service.upload(b"img".to_vec(), ImageKind::Png).await.unwrap();
        assert!(body.contains("\"url\":\"u\""));
    }
}
