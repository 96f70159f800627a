//! HTTP client for the OpenCart REST admin API
//!
//! Every route is dispatched through `index.php?route=...` and authorised by
//! the `X-Oc-Restadmin-Id` header.

use std::time::Duration;

use async_trait::async_trait;
use erpbridge_core::StorefrontGateway;
use erpbridge_domain::constants::STOREFRONT_API_KEY_HEADER;
use erpbridge_domain::{
    BridgeError, CategoryPayload, ImageUpload, ParentLink, ProductPayload, QuantityUpdate, Result,
    StorefrontConfig, StorefrontOrder,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::into_domain;
use crate::http::{HttpClient, USER_AGENT};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CATEGORY_ROUTE: &str = "rest/category_admin/category";
const QUANTITY_ROUTE: &str = "rest/product_admin/productquantitybysku";
const PRODUCT_LOOKUP_ROUTE: &str = "rest/product_admin/getproductidbyparameter";
const PRODUCT_IMAGE_ROUTE: &str = "rest/product_admin/productimages";
const PRODUCTS_ROUTE: &str = "rest/product_admin/products";
const ORDERS_ROUTE: &str = "rest/order_admin/listorderswithdetails";

pub struct StorefrontClient {
    index_url: Url,
    http_client: HttpClient,
}

impl StorefrontClient {
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        Self::with_index_url(&config.index_url(), &config.api_key)
    }

    /// Create a client against an explicit `.../index.php` URL.
    pub fn with_index_url(index_url: &str, api_key: &str) -> Result<Self> {
        let index_url = Url::parse(index_url).map_err(|err| {
            BridgeError::Config(format!("invalid storefront URL {index_url}: {err}"))
        })?;

        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| BridgeError::Config("storefront API key is not a valid header".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(STOREFRONT_API_KEY_HEADER, api_key);

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { index_url, http_client })
    }

    /// `index.php?route=<route>&<extra...>`
    fn route_url(&self, route: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.index_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("route", route);
            for (key, value) in extra {
                query.append_pair(key, value);
            }
        }
        url
    }

    fn request(&self, method: Method, route: &str, extra: &[(&str, &str)]) -> RequestBuilder {
        self.http_client.request(method, self.route_url(route, extra))
    }

    /// Any 2xx status counts as success.
    async fn send_checked(&self, route: &str, builder: RequestBuilder) -> Result<Response> {
        let response = self.http_client.send(builder).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BridgeError::Network(format!("storefront {route} returned HTTP {status}: {body}")))
    }

    async fn decode<T: DeserializeOwned>(route: &str, response: Response) -> Result<T> {
        let body = response.text().await.map_err(into_domain)?;
        serde_json::from_str(&body).map_err(|err| {
            BridgeError::InvalidInput(format!("unexpected response from storefront {route}: {err}"))
        })
    }
}

/// OpenCart renders ids as numbers or numeric strings.
fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn data_id(envelope: &Envelope<Value>) -> Option<i64> {
    envelope.data.as_ref().and_then(|data| data.get("id")).and_then(parse_id)
}

#[async_trait]
impl StorefrontGateway for StorefrontClient {
    async fn create_category(&self, payload: &CategoryPayload) -> Result<i64> {
        let builder = self.request(Method::POST, CATEGORY_ROUTE, &[]).json(payload);
        let response = self.send_checked(CATEGORY_ROUTE, builder).await?;
        let envelope: Envelope<Value> = Self::decode(CATEGORY_ROUTE, response).await?;

        data_id(&envelope).ok_or_else(|| {
            BridgeError::InvalidInput("storefront category response has no data.id".into())
        })
    }

    async fn link_category_parent(&self, category_id: i64, link: ParentLink) -> Result<()> {
        let id = category_id.to_string();
        let builder = self.request(Method::PUT, CATEGORY_ROUTE, &[("id", id.as_str())]).json(&link);
        self.send_checked(CATEGORY_ROUTE, builder).await?;
        Ok(())
    }

    async fn update_quantities(&self, updates: &[QuantityUpdate]) -> Result<()> {
        let builder = self.request(Method::PUT, QUANTITY_ROUTE, &[]).json(updates);
        self.send_checked(QUANTITY_ROUTE, builder).await?;
        Ok(())
    }

    async fn find_product_id_by_sku(&self, sku: &str) -> Result<Option<i64>> {
        let builder =
            self.request(Method::GET, PRODUCT_LOOKUP_ROUTE, &[("p", "sku"), ("value", sku)]);
        let response = self.http_client.send(builder).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(sku, "storefront has no product for SKU");
            return Ok(None);
        }

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => return Err(into_domain(err)),
        };

        let envelope: Envelope<Value> = Self::decode(PRODUCT_LOOKUP_ROUTE, response).await?;
        if !envelope.is_success() {
            return Ok(None);
        }
        Ok(data_id(&envelope))
    }

    async fn upload_product_image(&self, product_id: i64, image: ImageUpload) -> Result<()> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(image.mime_type)
            .map_err(into_domain)?;
        let form = Form::new().part("file", part);

        let id = product_id.to_string();
        let builder = self.request(Method::POST, PRODUCT_IMAGE_ROUTE, &[("id", id.as_str())]).multipart(form);
        self.send_checked(PRODUCT_IMAGE_ROUTE, builder).await?;
        Ok(())
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<()> {
        let builder = self.request(Method::POST, PRODUCTS_ROUTE, &[]).json(payload);
        self.send_checked(PRODUCTS_ROUTE, builder).await?;
        Ok(())
    }

    async fn update_product(&self, product_id: i64, payload: &ProductPayload) -> Result<()> {
        let id = product_id.to_string();
        let builder = self.request(Method::PUT, PRODUCTS_ROUTE, &[("id", id.as_str())]).json(payload);
        self.send_checked(PRODUCTS_ROUTE, builder).await?;
        Ok(())
    }

    async fn list_orders(&self, status_id: i64) -> Result<Vec<StorefrontOrder>> {
        let status = status_id.to_string();
        let builder =
            self.request(Method::GET, ORDERS_ROUTE, &[("filter_order_status_id", status.as_str())]);
        let response = self.http_client.send(builder).await?;

        // The REST module answers 404 when no order matches the filter.
        if response.status() == StatusCode::NOT_FOUND {
            debug!(status_id, "no storefront orders in status");
            return Ok(Vec::new());
        }

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => return Err(into_domain(err)),
        };

        let envelope: Envelope<Vec<StorefrontOrder>> = Self::decode(ORDERS_ROUTE, response).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

/// `{ "success": 1, "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<Value>,
    #[serde(default)]
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn is_success(&self) -> bool {
        self.success.as_ref().and_then(parse_id).is_some_and(|flag| flag == 1)
    }
}
