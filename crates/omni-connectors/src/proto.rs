//! Wire types and client for the `warehouse.WarehouseAutomation` gRPC service
//!
//! Messages are declared with prost derives instead of build-time codegen;
//! field tags match the warehouse contract:
//!
//! ```text
//! service WarehouseAutomation {
//!   rpc GetRobotStatus(RobotRequest) returns (RobotTelemetry);
//! }
//! ```

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

/// Fully-qualified service name
pub const SERVICE_NAME: &str = "warehouse.WarehouseAutomation";

/// Path of the unary status RPC
pub const GET_ROBOT_STATUS_PATH: &str = "/warehouse.WarehouseAutomation/GetRobotStatus";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RobotRequest {
    #[prost(string, tag = "1")]
    pub robot_id: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Coordinates {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RobotTelemetry {
    #[prost(string, tag = "1")]
    pub robot_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub position: ::core::option::Option<Coordinates>,
    #[prost(double, tag = "3")]
    pub battery_level: f64,
    #[prost(enumeration = "RobotStatusEnum", tag = "4")]
    pub status: i32,
    #[prost(double, tag = "5")]
    pub speed_mps: f64,
    #[prost(int64, tag = "6")]
    pub timestamp_ms: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RobotStatusEnum {
    RobotStatusUnspecified = 0,
    RobotStatusIdle = 1,
    RobotStatusMoving = 2,
    RobotStatusPicking = 3,
    RobotStatusCharging = 4,
    RobotStatusError = 5,
}

/// Unary client for the warehouse automation service
#[derive(Debug, Clone)]
pub struct WarehouseAutomationClient {
    inner: tonic::client::Grpc<Channel>,
}

impl WarehouseAutomationClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Fetch the latest telemetry snapshot for one robot
    pub async fn get_robot_status(
        &mut self,
        request: impl tonic::IntoRequest<RobotRequest>,
    ) -> Result<tonic::Response<RobotTelemetry>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("Service was not ready: {}", e)))?;

        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(GET_ROBOT_STATUS_PATH);
        self.inner.unary(request.into_request(), path, codec).await
    }
}
