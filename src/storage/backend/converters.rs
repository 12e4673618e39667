//! 实体 Model 与领域结构体之间的转换

use crate::storage::models::{Link, UserProfile};

use migration::entities::{link, user};

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        url: model.url,
        order: model.order,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 Sea-ORM Model 转换为 UserProfile
pub fn model_to_profile(model: user::Model) -> UserProfile {
    UserProfile {
        identity_id: model.identity_id,
        email: model.email,
        username: model.username,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
