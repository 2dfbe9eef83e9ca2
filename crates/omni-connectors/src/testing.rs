//! Test utilities for connectors
//!
//! Provides an in-process backend bound to an ephemeral port, plus canned
//! services that mimic the marketplace (REST), procurement (SOAP) and
//! warehouse automation (gRPC) backends.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codegen::{http, Body, BoxFuture, Service, StdError};

use crate::proto;

/// A test backend that automatically shuts down when dropped
pub struct TestBackend {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestBackend {
    /// Serve `router` on 127.0.0.1 with an OS-assigned port
    pub async fn start(router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Ok(Self::running(addr, shutdown_tx, handle).await)
    }

    /// Serve a warehouse automation gRPC service on 127.0.0.1
    pub async fn start_grpc(service: WarehouseService) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Ok(Self::running(addr, shutdown_tx, handle).await)
    }

    async fn running(
        addr: SocketAddr,
        shutdown_tx: tokio::sync::oneshot::Sender<()>,
        handle: tokio::task::JoinHandle<()>,
    ) -> Self {
        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Get the base URL of the test backend
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the backend gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[derive(Clone)]
struct InventoryState {
    records: Arc<Vec<serde_json::Value>>,
    honor_filter: bool,
}

async fn list_inventory(
    State(state): State<InventoryState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<serde_json::Value>> {
    let filter = params.get("store_id").filter(|_| state.honor_filter);
    let records = state
        .records
        .iter()
        .filter(|r| match filter {
            Some(store_id) => r["store_id"].as_str() == Some(store_id.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    Json(records)
}

/// Marketplace backend serving `GET /inventory`.
///
/// With `honor_filter == false` the `store_id` query parameter is ignored
/// and every record is returned.
pub fn inventory_router(records: Vec<serde_json::Value>, honor_filter: bool) -> Router {
    Router::new()
        .route("/inventory", get(list_inventory))
        .with_state(InventoryState {
            records: Arc::new(records),
            honor_filter,
        })
}

async fn submit_envelope(
    State(responses): State<Arc<HashMap<String, String>>>,
    body: String,
) -> impl IntoResponse {
    let matched = responses
        .iter()
        .find(|(store_id, _)| body.contains(&format!(">{}<", store_id)))
        .map(|(_, xml)| xml.clone());

    match matched {
        Some(xml) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
            xml,
        ),
        None => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
            orders_envelope(""),
        ),
    }
}

/// Procurement backend answering `GetOrders` envelopes on `POST /`.
///
/// `responses` maps a store id to the complete response envelope; unknown
/// stores get an envelope with no orders.
pub fn orders_router(responses: HashMap<String, String>) -> Router {
    Router::new()
        .route("/", post(submit_envelope))
        .with_state(Arc::new(responses))
}

/// Wrap `purchase_orders` (zero or more `<tns:PurchaseOrder>` elements) in
/// a `GetOrdersResponse` envelope
pub fn orders_envelope(purchase_orders: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soap11env:Envelope xmlns:soap11env="http://schemas.xmlsoap.org/soap/envelope/" "#,
            r#"xmlns:tns="http://retailsync.retail/procurement">"#,
            "<soap11env:Body><tns:GetOrdersResponse><tns:GetOrdersResult>",
            "{}",
            "</tns:GetOrdersResult></tns:GetOrdersResponse></soap11env:Body></soap11env:Envelope>"
        ),
        purchase_orders
    )
}

/// A SOAP 1.1 fault envelope
pub fn fault_envelope(code: &str, message: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soap11env:Envelope xmlns:soap11env="http://schemas.xmlsoap.org/soap/envelope/">"#,
            "<soap11env:Body><soap11env:Fault>",
            "<faultcode>{}</faultcode><faultstring>{}</faultstring>",
            "</soap11env:Fault></soap11env:Body></soap11env:Envelope>"
        ),
        code, message
    )
}

/// Warehouse automation service answering `GetRobotStatus` from a fixed
/// table. Unknown robots get `NOT_FOUND`.
#[derive(Clone, Default)]
pub struct WarehouseService {
    robots: Arc<HashMap<String, proto::RobotTelemetry>>,
    delay: Duration,
}

impl WarehouseService {
    pub fn new(robots: Vec<proto::RobotTelemetry>) -> Self {
        Self {
            robots: Arc::new(
                robots
                    .into_iter()
                    .map(|r| (r.robot_id.clone(), r))
                    .collect(),
            ),
            delay: Duration::ZERO,
        }
    }

    /// Delay every answer by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct GetRobotStatusSvc(WarehouseService);

impl tonic::server::UnaryService<proto::RobotRequest> for GetRobotStatusSvc {
    type Response = proto::RobotTelemetry;
    type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<proto::RobotRequest>) -> Self::Future {
        let service = self.0.clone();
        Box::pin(async move {
            tokio::time::sleep(service.delay).await;
            let robot_id = request.into_inner().robot_id;
            service
                .robots
                .get(&robot_id)
                .cloned()
                .map(tonic::Response::new)
                .ok_or_else(|| tonic::Status::not_found(format!("Unknown robot {}", robot_id)))
        })
    }
}

impl<B> Service<http::Request<B>> for WarehouseService
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let service = self.clone();
        match req.uri().path() {
            proto::GET_ROBOT_STATUS_PATH => Box::pin(async move {
                let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                Ok(grpc.unary(GetRobotStatusSvc(service), req).await)
            }),
            _ => Box::pin(async move {
                let mut response = http::Response::new(tonic::body::empty_body());
                let headers = response.headers_mut();
                headers.insert(
                    "grpc-status",
                    http::HeaderValue::from(tonic::Code::Unimplemented as i32),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}

impl tonic::server::NamedService for WarehouseService {
    const NAME: &'static str = proto::SERVICE_NAME;
}
