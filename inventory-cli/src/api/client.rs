//! HTTP client for the inventory backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::ItemsBackend;
use super::endpoints;
use super::resilience::ResilienceConfig;
use crate::models::{Item, ItemId, RelationType};

/// reqwest-backed implementation of [`ItemsBackend`]
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct CreateItemBody<'a> {
    item: &'a Item,
}

impl InventoryClient {
    /// Build a client for `base_url`, sending `request_token` with every request
    pub fn new(
        base_url: impl Into<String>,
        request_token: Option<&str>,
        resilience: &ResilienceConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = request_token {
            let value = HeaderValue::from_str(token).context("Request token is not a valid header value")?;
            headers.insert(endpoints::REQUEST_TOKEN_HEADER, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = resilience.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = endpoints::join(&self.base_url, path);
        trace!("{} {}", method, url);
        self.http.request(method, url)
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} {} returned {}: {}",
                method,
                path,
                status,
                body.chars().take(200).collect::<String>()
            );
        }

        debug!("{} {} -> {}", method, path, status);
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response of GET {}", path))
    }
}

#[async_trait]
impl ItemsBackend for InventoryClient {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
        self.get_json(endpoints::ITEMS)
            .await
            .context("Failed to fetch items")
    }

    async fn create_item(&self, item: &Item) -> Result<Item> {
        let path = endpoints::ITEM_ADD;
        let builder = self
            .request(Method::POST, path)
            .json(&CreateItemBody { item });
        let response = self.send(Method::POST, path, builder).await?;

        let body = response
            .text()
            .await
            .context("Failed to read create response")?;
        let body = body.trim();
        // Older servers answer with an empty body; keep what was submitted
        if body.is_empty() || body == "null" {
            return Ok(item.clone());
        }
        serde_json::from_str(body).context("Failed to parse created item")
    }

    async fn fetch_item(&self, id: &ItemId) -> Result<Item> {
        self.get_json(&endpoints::item(id))
            .await
            .with_context(|| format!("Failed to fetch item {}", id))
    }

    async fn fetch_sub_items(&self, id: &ItemId) -> Result<Vec<Item>> {
        self.get_json(&endpoints::sub_items(id))
            .await
            .with_context(|| format!("Failed to fetch sub items of {}", id))
    }

    async fn fetch_parent_items(&self, id: &ItemId) -> Result<Vec<Item>> {
        self.get_json(&endpoints::parent_items(id))
            .await
            .with_context(|| format!("Failed to fetch parent items of {}", id))
    }

    async fn fetch_related_items(&self, id: &ItemId) -> Result<Vec<Item>> {
        self.get_json(&endpoints::related_items(id))
            .await
            .with_context(|| format!("Failed to fetch related items of {}", id))
    }

    async fn fetch_item_candidates(
        &self,
        id: &ItemId,
        relation: RelationType,
    ) -> Result<Vec<Item>> {
        self.get_json(&endpoints::item_candidates(id, relation))
            .await
            .with_context(|| format!("Failed to fetch {} candidates of {}", relation, id))
    }

    async fn delete_item(&self, id: &ItemId) -> Result<()> {
        let path = endpoints::delete_item(id);
        self.send(Method::DELETE, &path, self.request(Method::DELETE, &path))
            .await
            .with_context(|| format!("Failed to delete item {}", id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resilience::ResilienceConfig;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// What the client sent to the test server
    struct Captured {
        head: String,
        body: String,
    }

    impl Captured {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn has_header(&self, name: &str, value: &str) -> bool {
            let wanted = format!("{}: {}", name, value).to_lowercase();
            self.head.lines().any(|line| line.to_lowercase() == wanted)
        }
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Accept one connection on a local port, answer it with `response` and
    /// hand back the captured request. Returns the base URL to use.
    async fn serve_once(response: String) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the request was complete");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let body_len = content_length(&head);
            while buf.len() < header_end + 4 + body_len {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the body was complete");
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end + 4..header_end + 4 + body_len]).to_string();

            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            Captured { head, body }
        });

        (format!("http://{}/apps/inventory", addr), handle)
    }

    fn client(base_url: &str, token: Option<&str>) -> InventoryClient {
        InventoryClient::new(base_url, token, &ResilienceConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_token() {
        let result = InventoryClient::new(
            "http://localhost",
            Some("bad\ntoken"),
            &ResilienceConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_body_wraps_item() {
        let item = Item::new("Hammer");
        let body = serde_json::to_value(CreateItemBody { item: &item }).unwrap();
        assert_eq!(body["item"]["name"], "Hammer");
    }

    #[tokio::test]
    async fn test_fetch_items_sends_token_and_parses_list() {
        let (base, server) =
            serve_once(http_response("200 OK", r#"[{"id":1,"name":"Drill"},{"id":"2","name":"Saw"}]"#)).await;

        let items = client(&base, Some("abc123")).fetch_items().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request.request_line(), "GET /apps/inventory/items HTTP/1.1");
        assert!(request.has_header("requesttoken", "abc123"));
        assert!(request.has_header("accept", "application/json"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, Some(ItemId::from(1)));
        assert_eq!(items[1].name, "Saw");
    }

    #[tokio::test]
    async fn test_no_token_header_without_token() {
        let (base, server) = serve_once(http_response("200 OK", "[]")).await;

        let client = client(&base, None);
        client.fetch_items().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(client.base_url(), base);
        assert!(!request.head.to_lowercase().contains("requesttoken"));
    }

    #[tokio::test]
    async fn test_create_posts_wrapped_item() {
        let (base, server) =
            serve_once(http_response("200 OK", r#"{"id":9,"name":"Hammer","maker":"Estwing"}"#)).await;

        let created = client(&base, Some("t")).create_item(&Item::new("Hammer")).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request.request_line(), "POST /apps/inventory/item/add HTTP/1.1");
        assert!(request.has_header("content-type", "application/json"));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["item"]["name"], "Hammer");
        assert!(body["item"].get("syncstatus").is_none());
        assert_eq!(created.id, Some(ItemId::from(9)));
        assert_eq!(created.maker.as_deref(), Some("Estwing"));
    }

    #[tokio::test]
    async fn test_create_with_empty_body_keeps_submitted_item() {
        for reply in ["", "null"] {
            let (base, server) = serve_once(http_response("200 OK", reply)).await;

            let submitted = Item::new("Hammer");
            let created = client(&base, None).create_item(&submitted).await.unwrap();
            server.await.unwrap();

            assert_eq!(created, submitted);
        }
    }

    #[tokio::test]
    async fn test_rejected_delete_is_an_error() {
        let (base, server) = serve_once(http_response("403 Forbidden", "nope")).await;

        let err = client(&base, None)
            .delete_item(&ItemId::from(3))
            .await
            .unwrap_err();
        let request = server.await.unwrap();

        assert_eq!(request.request_line(), "DELETE /apps/inventory/item/3/delete HTTP/1.1");
        let message = format!("{:#}", err);
        assert!(message.contains("403"));
        assert!(message.contains("nope"));
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let (base, server) =
            serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()).await;

        let result = client(&base, None).delete_item(&ItemId::from(3)).await;
        server.await.unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_on_read_is_an_error() {
        let (base, server) = serve_once(http_response("500 Internal Server Error", "{}")).await;

        let result = client(&base, None).fetch_item(&ItemId::from(4)).await;
        let request = server.await.unwrap();

        assert_eq!(request.request_line(), "GET /apps/inventory/item/4 HTTP/1.1");
        assert!(result.is_err());
    }
}
