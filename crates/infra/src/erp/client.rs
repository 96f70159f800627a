//! HTTP client for the Galaxy ERP REST services

use std::time::Duration;

use async_trait::async_trait;
use erpbridge_core::ErpGateway;
use erpbridge_domain::constants::ERP_SESSION_COOKIE;
use erpbridge_domain::{
    BridgeError, ErpCategory, ErpConfig, ErpItem, ErpItemBalance, ErpItemImage, ErpItemRef,
    ErpOrderDocument, Result, SessionToken,
};
use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::into_domain;
use crate::http::{HttpClient, USER_AGENT};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const AUTH_PATH: &str = "/auth";
const CATEGORIES_PATH: &str = "/services/sync/itemcategories";
const BALANCES_PATH: &str = "/services/sync/itembalances";
const IMAGES_PATH: &str = "/services/sync/itemimages";
const IMAGE_ENTITY_PATH: &str = "/api/glx/entities/itemimage";
const ITEM_FETCH_PATH: &str = "/api/glx/entities/item/fetch";
const ITEMS_PATH: &str = "/services/sync/items";
const POST_ENTRY_PATH: &str = "/services/sync/actions/postentry";

/// ERP gateway over plain HTTP.
///
/// Holds no session state: every call after `authenticate` receives the
/// token explicitly and sends it as the `ss-id` cookie.
pub struct ErpClient {
    base_url: String,
    http_client: HttpClient,
}

impl ErpClient {
    /// Create a client for `http://<host>:<port>`.
    pub fn new(config: &ErpConfig) -> Result<Self> {
        Self::with_base_url(config.base_url())
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), http_client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str, session: &SessionToken) -> RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header(COOKIE, format!("{ERP_SESSION_COOKIE}={}", session.as_str()))
    }

    /// Send, require a 2xx status and decode the JSON body.
    async fn execute<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T> {
        let response = self.http_client.send(builder).await?;
        let response = ensure_success(path, response).await?;

        let body = response.text().await.map_err(into_domain)?;
        serde_json::from_str(&body).map_err(|err| {
            BridgeError::InvalidInput(format!("unexpected response from ERP {path}: {err}"))
        })
    }

    /// Item entity lookup with a single equality filter.
    async fn fetch_item(
        &self,
        session: &SessionToken,
        property: &str,
        value: &str,
    ) -> Result<Option<ErpItemRef>> {
        let body = ItemFetchRequest {
            select_properties: &["ID", "LightCrmCode"],
            filters: vec![ItemFilter { name: property, kind: "Default", operator: "Equal", value }],
        };

        let builder = self.authed(Method::POST, ITEM_FETCH_PATH, session).json(&body);
        let items: Vec<ErpItemRef> = self.execute(ITEM_FETCH_PATH, builder).await?;

        Ok(items.into_iter().next())
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BridgeError::Network(format!("ERP {path} returned HTTP {status}: {body}")))
}

#[async_trait]
impl ErpGateway for ErpClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<SessionToken>> {
        let builder = self
            .http_client
            .request(Method::GET, self.url(AUTH_PATH))
            .query(&[("username", username), ("password", password)]);

        let response = self.http_client.send(builder).await?;
        let status = response.status();

        let token = response
            .cookies()
            .find(|cookie| cookie.name() == ERP_SESSION_COOKIE)
            .map(|cookie| SessionToken::new(cookie.value()));

        if token.is_none() {
            warn!(status = status.as_u16(), "ERP auth response carried no session cookie");
        }

        Ok(token)
    }

    async fn fetch_categories(&self, session: &SessionToken) -> Result<Vec<ErpCategory>> {
        let builder = self.authed(Method::GET, CATEGORIES_PATH, session);
        self.execute(CATEGORIES_PATH, builder).await
    }

    async fn fetch_item_balances(&self, session: &SessionToken) -> Result<Vec<ErpItemBalance>> {
        let builder = self.authed(Method::GET, BALANCES_PATH, session);
        self.execute(BALANCES_PATH, builder).await
    }

    async fn fetch_item_images(&self, session: &SessionToken) -> Result<Vec<ErpItemImage>> {
        let builder = self.authed(Method::GET, IMAGES_PATH, session);
        self.execute(IMAGES_PATH, builder).await
    }

    async fn fetch_item_image_data(&self, session: &SessionToken, image_id: &str) -> Result<String> {
        let path = format!("{IMAGE_ENTITY_PATH}/{image_id}");
        let builder = self.authed(Method::GET, &path, session);
        let image: ItemImageEntity = self.execute(&path, builder).await?;
        Ok(image.image)
    }

    async fn find_item_by_id(
        &self,
        session: &SessionToken,
        item_id: &str,
    ) -> Result<Option<ErpItemRef>> {
        self.fetch_item(session, "ID", item_id).await
    }

    async fn find_item_by_code(
        &self,
        session: &SessionToken,
        code: &str,
    ) -> Result<Option<ErpItemRef>> {
        self.fetch_item(session, "LightCrmCode", code).await
    }

    async fn fetch_items(&self, session: &SessionToken, since_revision: i64) -> Result<Vec<ErpItem>> {
        let builder = self
            .authed(Method::GET, ITEMS_PATH, session)
            .query(&[("RevisionNumber", since_revision)]);
        self.execute(ITEMS_PATH, builder).await
    }

    async fn post_order(&self, session: &SessionToken, document: &ErpOrderDocument) -> Result<()> {
        let builder = self.authed(Method::POST, POST_ENTRY_PATH, session).json(document);
        let response = self.http_client.send(builder).await?;

        let status = response.status();
        if status.is_success() {
            debug!(doc_id = document.doc_id(), "ERP accepted order document");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErpErrorBody>(&body)
            .ok()
            .and_then(|err| err.response_status)
            .and_then(|status| status.message)
            .unwrap_or(body);

        Err(BridgeError::Network(format!("ERP rejected order (HTTP {status}): {message}")))
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ItemFetchRequest<'a> {
    select_properties: &'a [&'a str],
    filters: Vec<ItemFilter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ItemFilter<'a> {
    name: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    operator: &'a str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
struct ItemImageEntity {
    #[serde(rename = "Image")]
    image: String,
}

#[derive(Debug, Deserialize)]
struct ErpErrorBody {
    #[serde(rename = "ResponseStatus")]
    response_status: Option<ErpResponseStatus>,
}

#[derive(Debug, Deserialize)]
struct ErpResponseStatus {
    #[serde(rename = "Message")]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn session() -> SessionToken {
        SessionToken::new("tok-1")
    }

    async fn client(server: &MockServer) -> ErpClient {
        ErpClient::with_base_url(server.uri()).expect("client")
    }

    #[tokio::test]
    async fn authenticate_reads_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth"))
            .and(query_param("username", "sync"))
            .and(query_param("password", "secret"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "ss-id=abc123; path=/"),
            )
            .mount(&server)
            .await;

        let token = client(&server).await.authenticate("sync", "secret").await.expect("request ok");

        assert_eq!(token.expect("token issued").as_str(), "abc123");
    }

    #[tokio::test]
    async fn requests_identify_as_erpbridge() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "ss-id=ua; path=/"))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server).await.authenticate("sync", "secret").await.expect("request ok");

        assert!(token.is_some());
        assert!(USER_AGENT.starts_with("erpbridge/"));
    }

    #[tokio::test]
    async fn authenticate_without_cookie_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let token = client(&server).await.authenticate("sync", "wrong").await.expect("request ok");
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn categories_are_fetched_with_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/sync/itemcategories"))
            .and(header("cookie", "ss-id=tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"ID": "A", "ParentNodeID": null, "Code": "A1", "Description": "Chairs"},
                {"ID": "B", "ParentNodeID": "A", "Code": "B1", "Description": "Office"}
            ])))
            .mount(&server)
            .await;

        let categories = client(&server).await.fetch_categories(&session()).await.expect("fetch");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].parent_node_id.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/sync/itemcategories"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).await.fetch_categories(&session()).await.expect_err("500");
        assert!(matches!(err, BridgeError::Network(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/sync/itemcategories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client(&server).await.fetch_categories(&session()).await.expect_err("decode");
        assert!(matches!(err, BridgeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn item_lookup_posts_equality_filter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/glx/entities/item/fetch"))
            .and(body_json(json!({
                "SelectProperties": ["ID", "LightCrmCode"],
                "Filters": [{"Name": "LightCrmCode", "Type": "Default", "Operator": "Equal", "Value": "SKU1"}]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"ID": "item-1", "LightCrmCode": "SKU1"}])),
            )
            .mount(&server)
            .await;

        let item = client(&server)
            .await
            .find_item_by_code(&session(), "SKU1")
            .await
            .expect("lookup")
            .expect("found");

        assert_eq!(item.id, "item-1");
    }

    #[tokio::test]
    async fn empty_item_lookup_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/glx/entities/item/fetch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let item = client(&server).await.find_item_by_id(&session(), "x").await.expect("lookup");
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn items_are_requested_after_revision() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/sync/items"))
            .and(query_param("RevisionNumber", "41"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"Code": "SKU1", "Description": "Chair", "ItemPrice": 10, "RevisionNumber": 42}
            ])))
            .mount(&server)
            .await;

        let items = client(&server).await.fetch_items(&session(), 41).await.expect("items");
        assert_eq!(items[0].revision_number, 42);
    }

    #[tokio::test]
    async fn image_data_is_read_from_entity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/glx/entities/itemimage/img-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Image": "aGVsbG8="})))
            .mount(&server)
            .await;

        let data =
            client(&server).await.fetch_item_image_data(&session(), "img-1").await.expect("image");
        assert_eq!(data, "aGVsbG8=");
    }

    #[tokio::test]
    async fn rejected_order_carries_response_status_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/sync/actions/postentry"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ResponseStatus": {"ErrorCode": "Invalid", "Message": "Unknown trader"}
            })))
            .mount(&server)
            .await;

        let document: ErpOrderDocument = serde_json::from_value(json!({
            "body": {
                "header": {"version": "2.3.2", "processtype": "B2C", "source": "Webshop"},
                "data": {
                    "company": {"identifier": {"id": "c", "codelist": "RCP"}},
                    "revisionnumber": 1,
                    "doccurrency": {"descr": "EUR"},
                    "docid": 9,
                    "docdate": "2024-01-01",
                    "billtoaddress": {
                        "country": {"descr": ""}, "prefecture": {"descr": ""}, "city": {"descr": ""},
                        "zipcode": "", "streetname": "", "streetnum": ""
                    },
                    "deliveryinfo": {
                        "delivdate": "2024-01-01",
                        "address": {
                            "country": {"descr": ""}, "prefecture": {"descr": ""}, "city": {"descr": ""},
                            "zipcode": "", "streetname": "", "streetnum": ""
                        },
                        "telephone": "", "email": ""
                    },
                    "trader": {
                        "identifier": {"id": "t", "codelist": "RCP"},
                        "name": "A B",
                        "address": {
                            "country": {"descr": ""}, "prefecture": {"descr": ""}, "city": {"descr": ""},
                            "zipcode": "", "streetname": "", "streetnum": ""
                        },
                        "telephone": "", "email": ""
                    },
                    "lines": []
                }
            }
        }))
        .expect("valid document");

        let err = client(&server).await.post_order(&session(), &document).await.expect_err("400");
        assert!(matches!(err, BridgeError::Network(msg) if msg.contains("Unknown trader")));
    }
}
