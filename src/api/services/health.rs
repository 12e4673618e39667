use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 存储后端信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageBackend {
    pub storage_type: String,
}

/// 存储健康检查状态
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub links_count: Option<usize>,
    pub backend: HealthStorageBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 健康检查项容器
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

/// 健康检查响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 注意：此 service 直接调用 storage 方法，不经过 LinkService。
/// 基础设施探针需要简单直接，k8s probes 要求快速响应。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend_config = storage.get_backend_config().await;
        let backend = HealthStorageBackend {
            storage_type: backend_config.storage_type,
        };

        // 只查 count，不加载全表
        let storage_status =
            match tokio::time::timeout(Duration::from_secs(5), storage.count_links()).await {
                Ok(Ok(count)) => {
                    trace!("Storage health check passed, {} links found", count);
                    HealthStorageCheck {
                        status: "healthy".to_string(),
                        links_count: Some(count as usize),
                        backend,
                        error: None,
                    }
                }
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        links_count: None,
                        backend,
                        error: Some("database error".to_string()),
                    }
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    HealthStorageCheck {
                        status: "unhealthy".to_string(),
                        links_count: None,
                        backend,
                        error: Some("timeout".to_string()),
                    }
                }
            };

        let healthy = storage_status.status == "healthy";
        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u32;

        let response = HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: now.to_rfc3339(),
            uptime,
            checks: HealthChecks {
                storage: storage_status,
            },
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        if healthy {
            HttpResponse::Ok().json(response)
        } else {
            HttpResponse::ServiceUnavailable().json(response)
        }
    }

    /// Liveness probe：进程活着就返回 200
    pub async fn liveness_check() -> impl Responder {
        HttpResponse::Ok().json(serde_json::json!({ "status": "alive" }))
    }

    /// Readiness probe：存储可达才算 ready
    pub async fn readiness_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        match tokio::time::timeout(Duration::from_secs(2), storage.count_links()).await {
            Ok(Ok(_)) => HttpResponse::Ok().json(serde_json::json!({ "status": "ready" })),
            _ => HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "status": "not ready" })),
        }
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
}
