//! Dashboard API 类型定义

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::Link;

/// 输出目录常量
pub const TS_EXPORT_PATH: &str = "../dashboard/src/services/types.generated.ts";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 创建链接请求体
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PostNewLink {
    pub title: String,
    pub url: String,
}

/// 重排请求体：期望的展示顺序
///
/// 每个元素只要求携带 id，编辑器把整个 link 对象原样传回来
/// 也能解析（多余字段忽略）。
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ReorderRequest {
    pub links: Vec<LinkRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LinkRef {
    pub id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LinkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            order: link.order,
            created_at: link.created_at.to_rfc3339(),
            updated_at: link.updated_at.to_rfc3339(),
        }
    }
}

/// 会话验证响应
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SessionResponse {
    pub identity_id: String,
    pub email: String,
    pub username: String,
}

/// dashboard 预览用的档案响应
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub links: Vec<LinkResponse>,
}

/// 公开主页响应，无需会话即可访问
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PublicProfileResponse {
    pub username: String,
    pub links: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::services::dashboard::error_code::ErrorCode;

    #[test]
    fn export_typescript_types() {
        // 运行此测试会自动生成 TypeScript 类型文件
        // cargo test export_typescript_types -- --nocapture

        let cfg = ts_rs::Config::from_env();
        PostNewLink::export_all(&cfg).expect("Failed to export PostNewLink");
        ReorderRequest::export_all(&cfg).expect("Failed to export ReorderRequest");
        LinkRef::export_all(&cfg).expect("Failed to export LinkRef");
        LinkResponse::export_all(&cfg).expect("Failed to export LinkResponse");
        SessionResponse::export_all(&cfg).expect("Failed to export SessionResponse");
        ProfileResponse::export_all(&cfg).expect("Failed to export ProfileResponse");
        PublicProfileResponse::export_all(&cfg).expect("Failed to export PublicProfileResponse");

        ErrorCode::export_all(&cfg).expect("Failed to export ErrorCode");

        println!("TypeScript types exported to {}", TS_EXPORT_PATH);
    }

    #[test]
    fn test_reorder_request_ignores_extra_fields() {
        // 编辑器把整个 link 对象传回来，只取 id
        let body = r#"{"links":[{"id":3,"title":"Blog","url":"https://a.example","order":0},{"id":1}]}"#;
        let parsed: ReorderRequest = serde_json::from_str(body).unwrap();
        let ids: Vec<i64> = parsed.links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
