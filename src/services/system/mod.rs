use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::AppStartTime;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub system_name: String,
    pub version: &'static str,
    pub environment: String,
    pub uptime_seconds: i64,
    pub teacher_papers_policy: crate::storage::integrity::DeletePolicy,
}

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 存活探针
    pub async fn health(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(HealthStatus { status: "ok" }))
    }

    // 系统信息
    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = self.get_config();
        let uptime_seconds = request
            .app_data::<actix_web::web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or_default();

        let info = SystemInfo {
            system_name: config.app.system_name.clone(),
            version: env!("CARGO_PKG_VERSION"),
            environment: config.app.environment.clone(),
            uptime_seconds,
            teacher_papers_policy: config.integrity.teacher_papers,
        };
        Ok(HttpResponse::Ok().json(crate::models::ApiResponse::success(
            info,
            "System information retrieved successfully",
        )))
    }
}
