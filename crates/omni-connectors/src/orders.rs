//! OrdersConnector - procurement service over SOAP 1.1

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use omni_core::validation;
use omni_core::{Connector, ConnectorError, ConnectorResult, Order, OrderStatus};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::OrdersConnectorConfig;
use crate::http;
use crate::xml;

/// Procurement service target namespace
const PROCUREMENT_NS: &str = "http://retailsync.retail/procurement";

/// Stand-in unit amount used when the backend omits an order total.
///
/// `total = item_count * PLACEHOLDER_UNIT_PRICE_CENTS`. This is a
/// placeholder so the field is always populated, not a pricing rule.
pub const PLACEHOLDER_UNIT_PRICE_CENTS: u64 = 10_000;

fn get_orders_envelope(store_id: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" "#,
            r#"xmlns:tns="{ns}">"#,
            "<soapenv:Body><tns:GetOrders><tns:store_id>{store_id}</tns:store_id></tns:GetOrders>",
            "</soapenv:Body></soapenv:Envelope>"
        ),
        ns = PROCUREMENT_NS,
        store_id = quick_xml::escape::escape(store_id)
    )
}

/// `YYYY-MM-DD` with every position a digit except the two dashes
fn is_calendar_date(date: &str) -> bool {
    date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// xs:date timezone: nothing, `Z`, or `+HH:MM` / `-HH:MM`
fn is_timezone(suffix: &str) -> bool {
    match suffix.as_bytes() {
        [] | [b'Z'] => true,
        [sign, h1, h2, b':', m1, m2] if *sign == b'+' || *sign == b'-' => {
            [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
                && (h1 - b'0') * 10 + (h2 - b'0') <= 14
                && (m1 - b'0') * 10 + (m2 - b'0') < 60
        }
        _ => false,
    }
}

fn parse_date(field: &'static str, raw: &str) -> ConnectorResult<NaiveDate> {
    let invalid = |reason: String| {
        ConnectorError::Decode(format!("{} '{}' is not a date: {}", field, raw, reason))
    };

    // Some stacks emit xs:date with a timezone suffix ("2026-02-26Z", "2026-02-26+01:00")
    let (date, suffix) = match (raw.get(..10), raw.get(10..)) {
        (Some(date), Some(suffix)) => (date, suffix),
        _ => return Err(invalid("expected YYYY-MM-DD".to_string())),
    };
    if !is_calendar_date(date) {
        return Err(invalid("expected YYYY-MM-DD".to_string()));
    }
    if !is_timezone(suffix) {
        return Err(invalid(format!("unexpected trailing '{}'", suffix)));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))
}

fn parse_int(field: &'static str, raw: &str) -> ConnectorResult<i64> {
    raw.parse::<i64>()
        .map_err(|e| ConnectorError::Decode(format!("{} '{}' is not an integer: {}", field, raw, e)))
}

fn required<'a>(node: &'a Value, field: &'static str) -> ConnectorResult<&'a str> {
    xml::text(node, field).ok_or_else(|| {
        ConnectorError::Decode(format!("PurchaseOrder is missing {}", field))
    })
}

/// Map one `PurchaseOrder` node into a canonical order
fn decode_purchase_order(po: &Value) -> ConnectorResult<Order> {
    let id = required(po, "order_id")?.to_string();
    let supplier_id = required(po, "supplier_org_id")?.to_string();
    let order_date = parse_date("order_date", required(po, "order_date")?)?;

    let status = match xml::text(po, "status") {
        Some(raw) => raw.parse::<OrderStatus>().map_err(ConnectorError::Decode)?,
        None => OrderStatus::Pending,
    };

    let line_items = xml::one_or_many(xml::path(po, &["items", "OrderItem"]));
    for line in &line_items {
        if xml::text(line, "sku").is_none() {
            return Err(ConnectorError::Decode(format!(
                "Line item without sku in order {}",
                id
            )));
        }
    }
    let item_count = validation::count("item_count", line_items.len() as i64)?;

    let total_price_cents = match xml::text(po, "total_price_cents") {
        Some(raw) => validation::cents("total_price_cents", parse_int("total_price_cents", raw)?)?,
        None => u64::from(item_count) * PLACEHOLDER_UNIT_PRICE_CENTS,
    };

    let estimated_delivery = xml::text(po, "estimated_delivery")
        .map(|raw| parse_date("estimated_delivery", raw))
        .transpose()?;

    Ok(Order {
        estimated_delivery: validation::delivery_window(&id, order_date, estimated_delivery),
        id,
        supplier_id,
        status,
        total_price_cents,
        item_count,
        order_date,
    })
}

/// Decode a `GetOrders` response (or fault) envelope
fn decode_orders_response(body: &str) -> ConnectorResult<Vec<Order>> {
    let doc = xml::parse_document(body)?;
    let soap_body = xml::path(&doc, &["Envelope", "Body"])
        .ok_or_else(|| ConnectorError::Protocol("Response has no SOAP Body".to_string()))?;

    if let Some(fault) = soap_body.get("Fault") {
        return Err(ConnectorError::RemoteFault {
            code: xml::text(fault, "faultcode")
                .unwrap_or("soap:Server")
                .to_string(),
            message: xml::text(fault, "faultstring")
                .unwrap_or("unspecified fault")
                .to_string(),
        });
    }

    let response = soap_body.get("GetOrdersResponse").ok_or_else(|| {
        ConnectorError::Protocol("SOAP Body has no GetOrdersResponse".to_string())
    })?;

    xml::one_or_many(xml::path(response, &["GetOrdersResult", "PurchaseOrder"]))
        .into_iter()
        .map(decode_purchase_order)
        .collect()
}

/// Fills the `orders` slot from the procurement SOAP service.
pub struct OrdersConnector {
    client: Client,
    endpoint: Url,
}

impl OrdersConnector {
    /// Create a connector for the configured SOAP endpoint
    pub fn new(config: &OrdersConnectorConfig) -> ConnectorResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ConnectorError::InvalidRequest(format!(
                "Invalid orders endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;
        let client = http::client(Duration::from_millis(config.request_timeout_ms))?;

        Ok(Self { client, endpoint })
    }

    #[instrument(skip(self))]
    async fn call_get_orders(&self, store_id: &str) -> ConnectorResult<Vec<Order>> {
        debug!("Calling GetOrders on {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("text/xml; charset=utf-8"),
            )
            .header("SOAPAction", HeaderValue::from_static("\"GetOrders\""))
            .body(get_orders_envelope(store_id))
            .send()
            .await
            .map_err(http::request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(http::request_error)?;
        let decoded = decode_orders_response(&body);

        if status.is_success() {
            return decoded;
        }
        // SOAP 1.1 reports faults with HTTP 500; keep the fault detail if present
        match decoded {
            Err(fault @ ConnectorError::RemoteFault { .. }) => Err(fault),
            _ => Err(ConnectorError::Protocol(format!(
                "HTTP {} from orders backend",
                status
            ))),
        }
    }
}

#[async_trait]
impl Connector for OrdersConnector {
    type Entity = Order;

    fn name(&self) -> &str {
        "orders-soap"
    }

    async fn try_fetch(&self, store_id: &str) -> ConnectorResult<Vec<Order>> {
        http::require_store_id(store_id)?;
        self.call_get_orders(store_id).await
    }
}
