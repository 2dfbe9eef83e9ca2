//! TelemetryConnector - warehouse automation over gRPC
//!
//! The warehouse service is keyed by robot, not by store, so the connector
//! carries a roster (store id -> robot ids) taken from the store directory.
//! One unary `GetRobotStatus` call is made per robot; the calls for a store
//! run concurrently and the slot fails as a whole if any of them fails.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use omni_core::validation;
use omni_core::{Connector, ConnectorError, ConnectorResult, Position, RobotStatus, RobotTelemetry};
use tonic::transport::Endpoint;
use tonic::Code;
use tracing::{debug, instrument};

use crate::config::TelemetryConnectorConfig;
use crate::http;
use crate::proto::{self, RobotStatusEnum, WarehouseAutomationClient};

/// Map a wire status code to the canonical robot status.
///
/// `UNSPECIFIED` and any value outside the contract fall back to `Idle`.
pub fn robot_status(code: i32) -> RobotStatus {
    match RobotStatusEnum::try_from(code) {
        Ok(RobotStatusEnum::RobotStatusIdle) => RobotStatus::Idle,
        Ok(RobotStatusEnum::RobotStatusMoving) => RobotStatus::Moving,
        Ok(RobotStatusEnum::RobotStatusPicking) => RobotStatus::Picking,
        Ok(RobotStatusEnum::RobotStatusCharging) => RobotStatus::Charging,
        Ok(RobotStatusEnum::RobotStatusError) => RobotStatus::Error,
        Ok(RobotStatusEnum::RobotStatusUnspecified) | Err(_) => RobotStatus::Idle,
    }
}

/// Classify a gRPC status into the connector taxonomy
fn status_error(status: tonic::Status) -> ConnectorError {
    match status.code() {
        Code::Unavailable => ConnectorError::Transport(status.message().to_string()),
        // tonic reports its own per-call timeout as Cancelled
        Code::DeadlineExceeded | Code::Cancelled => ConnectorError::Timeout,
        code => ConnectorError::RemoteFault {
            code: format!("{:?}", code),
            message: status.message().to_string(),
        },
    }
}

/// Convert one telemetry message into the canonical form
fn decode_telemetry(
    requested_id: &str,
    message: proto::RobotTelemetry,
) -> ConnectorResult<RobotTelemetry> {
    let robot_id = if message.robot_id.is_empty() {
        requested_id.to_string()
    } else {
        message.robot_id
    };
    let position = message
        .position
        .map(|c| Position {
            x: c.x,
            y: c.y,
            z: c.z,
        })
        .unwrap_or_default();

    Ok(RobotTelemetry {
        robot_id,
        position,
        battery_level: validation::battery_level(message.battery_level)?,
        status: robot_status(message.status),
    })
}

/// Fills the `robots` slot from the warehouse automation service.
pub struct TelemetryConnector {
    client: WarehouseAutomationClient,
    roster: HashMap<String, Vec<String>>,
}

impl TelemetryConnector {
    /// Create a connector with a lazily connected channel.
    ///
    /// No connection is attempted here; an unreachable endpoint surfaces on
    /// the first fetch. Must be called from within a Tokio runtime.
    pub fn new(
        config: &TelemetryConnectorConfig,
        roster: HashMap<String, Vec<String>>,
    ) -> ConnectorResult<Self> {
        let channel = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| {
                ConnectorError::InvalidRequest(format!(
                    "Invalid telemetry endpoint '{}': {}",
                    config.endpoint, e
                ))
            })?
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .connect_lazy();

        Ok(Self {
            client: WarehouseAutomationClient::new(channel),
            roster,
        })
    }

    /// Robot ids served for `store_id`
    pub fn robots_for(&self, store_id: &str) -> &[String] {
        self.roster.get(store_id).map(Vec::as_slice).unwrap_or(&[])
    }

    #[instrument(skip(self))]
    async fn get_robot_status(&self, robot_id: &str) -> ConnectorResult<RobotTelemetry> {
        let mut client = self.client.clone();
        let response = client
            .get_robot_status(proto::RobotRequest {
                robot_id: robot_id.to_string(),
            })
            .await
            .map_err(status_error)?;

        decode_telemetry(robot_id, response.into_inner())
    }
}

#[async_trait]
impl Connector for TelemetryConnector {
    type Entity = RobotTelemetry;

    fn name(&self) -> &str {
        "telemetry-grpc"
    }

    async fn try_fetch(&self, store_id: &str) -> ConnectorResult<Vec<RobotTelemetry>> {
        http::require_store_id(store_id)?;

        let robot_ids = self.robots_for(store_id);
        if robot_ids.is_empty() {
            debug!(store_id = %store_id, "No robots registered for store");
            return Ok(Vec::new());
        }

        try_join_all(robot_ids.iter().map(|id| self.get_robot_status(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestBackend, WarehouseService};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn telemetry(robot_id: &str, battery: f64, status: RobotStatusEnum) -> proto::RobotTelemetry {
        proto::RobotTelemetry {
            robot_id: robot_id.to_string(),
            position: Some(proto::Coordinates {
                x: 12.5,
                y: 3.2,
                z: 0.0,
            }),
            battery_level: battery,
            status: status as i32,
            speed_mps: 0.0,
            timestamp_ms: 0,
        }
    }

    fn roster(store_id: &str, robots: &[&str]) -> HashMap<String, Vec<String>> {
        let mut roster = HashMap::new();
        roster.insert(
            store_id.to_string(),
            robots.iter().map(|r| r.to_string()).collect(),
        );
        roster
    }

    fn config_for(backend: &TestBackend) -> TelemetryConnectorConfig {
        TelemetryConnectorConfig {
            endpoint: backend.base_url(),
            connect_timeout_ms: 200,
            request_timeout_ms: 1000,
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(robot_status(0), RobotStatus::Idle);
        assert_eq!(robot_status(1), RobotStatus::Idle);
        assert_eq!(robot_status(2), RobotStatus::Moving);
        assert_eq!(robot_status(3), RobotStatus::Picking);
        assert_eq!(robot_status(4), RobotStatus::Charging);
        assert_eq!(robot_status(5), RobotStatus::Error);
        assert_eq!(robot_status(6), RobotStatus::Idle);
        assert_eq!(robot_status(-1), RobotStatus::Idle);
    }

    #[test]
    fn test_status_error_classification() {
        assert_eq!(status_error(tonic::Status::unavailable("down")).kind(), "transport");
        assert_eq!(status_error(tonic::Status::deadline_exceeded("slow")).kind(), "timeout");
        match status_error(tonic::Status::not_found("no such robot")) {
            ConnectorError::RemoteFault { code, message } => {
                assert_eq!(code, "NotFound");
                assert_eq!(message, "no such robot");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_telemetry() {
        let robot = decode_telemetry(
            "ROBOT-P01-A",
            telemetry("ROBOT-P01-A", 0.87, RobotStatusEnum::RobotStatusPicking),
        )
        .unwrap();
        assert_eq!(
            robot,
            RobotTelemetry {
                robot_id: "ROBOT-P01-A".to_string(),
                position: Position {
                    x: 12.5,
                    y: 3.2,
                    z: 0.0
                },
                battery_level: 0.87,
                status: RobotStatus::Picking,
            }
        );
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let robot = decode_telemetry("ROBOT-X", proto::RobotTelemetry::default()).unwrap();
        assert_eq!(robot.robot_id, "ROBOT-X");
        assert_eq!(robot.position, Position::default());
        assert_eq!(robot.status, RobotStatus::Idle);
    }

    #[test]
    fn test_decode_rejects_battery_out_of_range() {
        let err = decode_telemetry(
            "ROBOT-X",
            telemetry("ROBOT-X", 1.5, RobotStatusEnum::RobotStatusIdle),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_fetch_in_roster_order() {
        let service = WarehouseService::new(vec![
            telemetry("ROBOT-P01-A", 0.87, RobotStatusEnum::RobotStatusPicking),
            telemetry("ROBOT-P01-B", 0.45, RobotStatusEnum::RobotStatusCharging),
        ]);
        let backend = TestBackend::start_grpc(service).await.unwrap();
        let connector = TelemetryConnector::new(
            &config_for(&backend),
            roster("STORE-PARIS-01", &["ROBOT-P01-B", "ROBOT-P01-A"]),
        )
        .unwrap();

        let robots = connector.try_fetch("STORE-PARIS-01").await.unwrap();
        let ids: Vec<&str> = robots.iter().map(|r| r.robot_id.as_str()).collect();
        assert_eq!(ids, vec!["ROBOT-P01-B", "ROBOT-P01-A"]);
        assert_eq!(robots[0].status, RobotStatus::Charging);
        assert_eq!(robots[1].status, RobotStatus::Picking);
    }

    #[tokio::test]
    async fn test_one_failing_robot_fails_the_slot() {
        let service = WarehouseService::new(vec![telemetry(
            "ROBOT-P01-A",
            0.87,
            RobotStatusEnum::RobotStatusPicking,
        )]);
        let backend = TestBackend::start_grpc(service).await.unwrap();
        let connector = TelemetryConnector::new(
            &config_for(&backend),
            roster("STORE-PARIS-01", &["ROBOT-P01-A", "ROBOT-GONE"]),
        )
        .unwrap();

        assert_eq!(
            connector.try_fetch("STORE-PARIS-01").await.unwrap_err().kind(),
            "remote_fault"
        );
        assert!(connector.fetch("STORE-PARIS-01").await.is_empty());
    }

    #[tokio::test]
    async fn test_slow_robot_times_out() {
        let service = WarehouseService::new(vec![telemetry(
            "ROBOT-P01-A",
            0.87,
            RobotStatusEnum::RobotStatusPicking,
        )])
        .with_delay(Duration::from_secs(5));
        let backend = TestBackend::start_grpc(service).await.unwrap();
        let connector = TelemetryConnector::new(
            &TelemetryConnectorConfig {
                request_timeout_ms: 100,
                ..config_for(&backend)
            },
            roster("STORE-PARIS-01", &["ROBOT-P01-A"]),
        )
        .unwrap();

        assert!(connector.try_fetch("STORE-PARIS-01").await.is_err());
        assert!(connector.fetch("STORE-PARIS-01").await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_empty() {
        let backend = TestBackend::start_grpc(WarehouseService::new(Vec::new()))
            .await
            .unwrap();
        let config = config_for(&backend);
        backend.shutdown().await;

        let connector =
            TelemetryConnector::new(&config, roster("STORE-PARIS-01", &["ROBOT-P01-A"])).unwrap();

        assert!(connector.try_fetch("STORE-PARIS-01").await.is_err());
        assert!(connector.fetch("STORE-PARIS-01").await.is_empty());
    }

    #[tokio::test]
    async fn test_store_without_robots_makes_no_calls() {
        // Nothing listens here; an attempted call would fail
        let connector = TelemetryConnector::new(
            &TelemetryConnectorConfig {
                endpoint: "http://127.0.0.1:1".to_string(),
                ..Default::default()
            },
            roster("STORE-PARIS-01", &["ROBOT-P01-A"]),
        )
        .unwrap();

        assert!(connector.try_fetch("STORE-BERLIN-02").await.unwrap().is_empty());
        assert!(connector.robots_for("STORE-BERLIN-02").is_empty());
        assert_eq!(connector.robots_for("STORE-PARIS-01").len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_endpoint() {
        let result = TelemetryConnector::new(
            &TelemetryConnectorConfig {
                endpoint: "not a uri".to_string(),
                ..Default::default()
            },
            HashMap::new(),
        );
        assert_eq!(result.err().map(|e| e.kind()), Some("invalid_request"));
    }
}
