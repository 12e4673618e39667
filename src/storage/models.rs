use serde::{Deserialize, Serialize};

/// 一条带标题的链接，归属于唯一的所有者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub url: String,
    /// 同一所有者内 0..N-1 的展示顺序
    pub order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 用户档案，首次认证时创建，本子系统不修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub identity_id: String,
    pub email: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
