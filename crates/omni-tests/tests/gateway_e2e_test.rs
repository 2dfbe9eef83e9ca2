//! End-to-end tests for the OmniChain gateway
//!
//! These tests run the full stack over loopback sockets:
//! 1. Start simulated marketplace (REST), procurement (SOAP) and warehouse
//!    automation (gRPC) backends on ephemeral ports
//! 2. Wire the real connectors, aggregator and API router against them
//! 3. Serve the router and query it with reqwest
//!
//! Run with: cargo test -p omni-tests --test gateway_e2e_test

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::post;
use axum::Router;
use omni_api::{create_router, AppState};
use omni_connectors::proto::{Coordinates, RobotStatusEnum, RobotTelemetry};
use omni_connectors::testing::{
    fault_envelope, inventory_router, orders_envelope, orders_router, TestBackend,
    WarehouseService,
};
use omni_connectors::{
    InventoryConnector, InventoryConnectorConfig, OrdersConnector, OrdersConnectorConfig,
    TelemetryConnector, TelemetryConnectorConfig,
};
use omni_core::{StoreDirectory, StoreEntry};
use omni_gateway::{Aggregator, GatewayOptions, QueryService};
use pretty_assertions::assert_eq;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const PARIS: &str = "STORE-PARIS-01";
const BERLIN: &str = "STORE-BERLIN-02";

fn directory() -> StoreDirectory {
    StoreDirectory::from_entries(vec![
        StoreEntry {
            id: PARIS.to_string(),
            name: "OmniChain Paris - Le Marais".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            robots: vec!["ROBOT-P01-A".to_string(), "ROBOT-P01-B".to_string()],
        },
        StoreEntry {
            id: BERLIN.to_string(),
            name: "OmniChain Berlin - Mitte".to_string(),
            city: "Berlin".to_string(),
            country: "Germany".to_string(),
            robots: vec!["ROBOT-B02-A".to_string()],
        },
    ])
    .unwrap()
}

fn inventory_records() -> Vec<Value> {
    vec![
        json!({"sku": "SKU001", "name": "Urban Wool Jacket - Black, L", "category": "jackets",
               "quantity": 150, "price_cents": 4500, "store_id": PARIS}),
        json!({"sku": "SKU002", "name": "RetroFlex Sneaker - White, EU 42", "category": "sneakers",
               "quantity": 320, "price_cents": 3200, "store_id": PARIS}),
        json!({"sku": "SKU003", "name": "Cashmere Scarf - Navy", "category": "accessories",
               "quantity": 8, "price_cents": 2800, "store_id": PARIS}),
        json!({"sku": "SKU004", "name": "Organic Cotton T-Shirt - Grey, M", "category": "shirts",
               "quantity": 500, "price_cents": 1200, "store_id": BERLIN}),
        json!({"sku": "SKU005", "name": "Leather Messenger Bag - Brown", "category": "bags",
               "quantity": 3, "price_cents": 8900, "store_id": BERLIN}),
    ]
}

fn purchase_order(id: &str, buyer: &str, status: &str, skus: &[&str]) -> String {
    let items: String = skus
        .iter()
        .map(|sku| {
            format!(
                "<tns:OrderItem><tns:sku>{}</tns:sku><tns:quantity>10</tns:quantity></tns:OrderItem>",
                sku
            )
        })
        .collect();
    format!(
        concat!(
            "<tns:PurchaseOrder><tns:order_id>{}</tns:order_id>",
            "<tns:buyer_org_id>{}</tns:buyer_org_id>",
            "<tns:supplier_org_id>MFG-SHENZHEN-008</tns:supplier_org_id>",
            "<tns:order_date>2026-02-26</tns:order_date>",
            "<tns:status>{}</tns:status><tns:items>{}</tns:items></tns:PurchaseOrder>"
        ),
        id, buyer, status, items
    )
}

fn orders_backend() -> Router {
    let mut responses = HashMap::new();
    responses.insert(
        PARIS.to_string(),
        orders_envelope(&format!(
            "{}{}",
            purchase_order("PO-2026-0042", PARIS, "PENDING", &["SKU001", "SKU002"]),
            purchase_order("PO-2026-0040", PARIS, "CONFIRMED", &["SKU003"]),
        )),
    );
    responses.insert(
        BERLIN.to_string(),
        orders_envelope(&purchase_order("PO-2026-0041", BERLIN, "PENDING", &["SKU005"])),
    );
    orders_router(responses)
}

fn robot(id: &str, x: f64, battery: f64, status: RobotStatusEnum) -> RobotTelemetry {
    RobotTelemetry {
        robot_id: id.to_string(),
        position: Some(Coordinates { x, y: 3.2, z: 0.0 }),
        battery_level: battery,
        status: status as i32,
        speed_mps: 0.0,
        timestamp_ms: 0,
    }
}

fn warehouse() -> WarehouseService {
    WarehouseService::new(vec![
        robot("ROBOT-P01-A", 12.5, 0.87, RobotStatusEnum::RobotStatusPicking),
        robot("ROBOT-P01-B", 8.1, 0.45, RobotStatusEnum::RobotStatusCharging),
        robot("ROBOT-B02-A", 5.0, 0.92, RobotStatusEnum::RobotStatusIdle),
    ])
}

/// Test harness owning the simulated backends and the served gateway
struct GatewayHarness {
    _backends: Vec<TestBackend>,
    gateway: TestBackend,
    client: Client,
}

struct HarnessOptions {
    orders: Router,
    telemetry_up: bool,
    connector_timeout_ms: u64,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            orders: orders_backend(),
            telemetry_up: true,
            connector_timeout_ms: 2000,
        }
    }
}

impl GatewayHarness {
    async fn start(options: HarnessOptions) -> Self {
        let inventory_backend = TestBackend::start(inventory_router(inventory_records(), true))
            .await
            .unwrap();
        let orders_backend = TestBackend::start(options.orders).await.unwrap();
        let warehouse_backend = TestBackend::start_grpc(warehouse()).await.unwrap();
        let telemetry_endpoint = warehouse_backend.base_url();

        let mut backends = vec![inventory_backend, orders_backend];
        if options.telemetry_up {
            backends.push(warehouse_backend);
        } else {
            warehouse_backend.shutdown().await;
        }

        let directory = directory();
        let inventory = InventoryConnector::new(&InventoryConnectorConfig {
            base_url: backends[0].base_url(),
            request_timeout_ms: 5000,
        })
        .unwrap();
        let orders = OrdersConnector::new(&OrdersConnectorConfig {
            endpoint: format!("{}/", backends[1].base_url()),
            request_timeout_ms: 10_000,
        })
        .unwrap();
        let telemetry = TelemetryConnector::new(
            &TelemetryConnectorConfig {
                endpoint: telemetry_endpoint,
                connect_timeout_ms: 200,
                request_timeout_ms: 1000,
            },
            directory.robot_roster(),
        )
        .unwrap();

        let aggregator = Aggregator::new(
            directory,
            Arc::new(inventory),
            Arc::new(orders),
            Arc::new(telemetry),
            GatewayOptions {
                connector_timeout_ms: options.connector_timeout_ms,
                max_concurrent_stores: 2,
            },
        );
        let router = create_router(AppState::new(QueryService::new(Arc::new(aggregator))));
        let gateway = TestBackend::start(router).await.unwrap();

        Self {
            _backends: backends,
            gateway,
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.gateway.base_url(), path))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

fn skus(store: &Value) -> Vec<String> {
    store["inventory"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["sku"].as_str().unwrap().to_string())
        .collect()
}

fn len(value: &Value) -> usize {
    value.as_array().map(Vec::len).unwrap_or(0)
}

// =============================================================================
// Healthy backends
// =============================================================================

#[tokio::test]
async fn test_store_has_all_three_slots() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (status, store) = harness.get("/api/v1/stores/STORE-PARIS-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store["id"], PARIS);
    assert_eq!(store["name"], "OmniChain Paris - Le Marais");
    assert_eq!(skus(&store), vec!["SKU001", "SKU002", "SKU003"]);

    assert_eq!(len(&store["orders"]), 2);
    assert_eq!(store["orders"][0]["id"], "PO-2026-0042");
    assert_eq!(store["orders"][0]["item_count"], 2);
    assert_eq!(store["orders"][0]["total_price_cents"], 20_000);

    assert_eq!(len(&store["robots"]), 2);
    assert_eq!(store["robots"][0]["robot_id"], "ROBOT-P01-A");
    assert_eq!(store["robots"][0]["status"], "PICKING");
    assert_eq!(store["robots"][0]["position"]["x"], 12.5);
    assert_eq!(store["robots"][1]["status"], "CHARGING");
}

#[tokio::test]
async fn test_list_stores_in_directory_order() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (status, body) = harness.get("/api/v1/stores").await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    let ids: Vec<&str> = items.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![PARIS, BERLIN]);
    assert_eq!(skus(&items[1]), vec!["SKU004", "SKU005"]);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (status, summary) = harness.get("/api/v1/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_stores"], 2);
    assert_eq!(summary["total_skus"], 5);
    assert_eq!(summary["total_orders_pending"], 2);
    assert_eq!(summary["total_robots_active"], 2);

    let low: Vec<(&str, u64)> = summary["low_stock_alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| (i["sku"].as_str().unwrap(), i["quantity"].as_u64().unwrap()))
        .collect();
    assert_eq!(low, vec![("SKU003", 8_u64), ("SKU005", 3_u64)]);
}

#[tokio::test]
async fn test_dashboard_summary_matches_its_stores() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (status, dashboard) = harness.get("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let stores = dashboard["stores"].as_array().unwrap();
    let total_skus: usize = stores.iter().map(|s| len(&s["inventory"])).sum();
    assert_eq!(dashboard["summary"]["total_skus"], total_skus);
    assert_eq!(dashboard["summary"]["total_stores"], stores.len());
}

#[tokio::test]
async fn test_listing_is_idempotent() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (_, first) = harness.get("/api/v1/stores").await;
    let (_, second) = harness.get("/api/v1/stores").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_store_is_not_found() {
    let harness = GatewayHarness::start(HarnessOptions::default()).await;

    let (status, body) = harness.get("/api/v1/stores/STORE-NOWHERE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

// =============================================================================
// Degraded backends
// =============================================================================

#[tokio::test]
async fn test_telemetry_down_empties_robots_only() {
    let harness = GatewayHarness::start(HarnessOptions {
        telemetry_up: false,
        ..Default::default()
    })
    .await;

    let (status, store) = harness.get("/api/v1/stores/STORE-PARIS-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(len(&store["inventory"]), 3);
    assert_eq!(len(&store["orders"]), 2);
    assert_eq!(store["robots"], json!([]));

    let (_, summary) = harness.get("/api/v1/dashboard/summary").await;
    assert_eq!(summary["total_robots_active"], 0);
    assert_eq!(summary["total_skus"], 5);
}

#[tokio::test]
async fn test_orders_fault_empties_orders_only() {
    let faulting = Router::new().route(
        "/",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                fault_envelope("soap:Server", "Procurement database offline"),
            )
        }),
    );
    let harness = GatewayHarness::start(HarnessOptions {
        orders: faulting,
        ..Default::default()
    })
    .await;

    let (status, store) = harness.get("/api/v1/stores/STORE-BERLIN-02").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store["orders"], json!([]));
    assert_eq!(len(&store["inventory"]), 2);
    assert_eq!(len(&store["robots"]), 1);
}

#[tokio::test]
async fn test_hanging_backend_cut_by_gateway_timeout() {
    let hanging = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            orders_envelope("")
        }),
    );
    let harness = GatewayHarness::start(HarnessOptions {
        orders: hanging,
        connector_timeout_ms: 300,
        ..Default::default()
    })
    .await;

    let started = Instant::now();
    let (status, store) = harness.get("/api/v1/stores/STORE-PARIS-01").await;
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store["orders"], json!([]));
    assert_eq!(len(&store["inventory"]), 3);
    assert_eq!(len(&store["robots"]), 2);
}
