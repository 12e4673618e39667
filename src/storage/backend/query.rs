//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::converters::{model_to_link, model_to_profile};
use crate::errors::{LinkdeckError, Result};
use crate::storage::models::{Link, UserProfile};

use migration::entities::{link, user};

impl SeaOrmStorage {
    /// 按 order 升序加载一个所有者的全部链接
    ///
    /// id 作为次要排序键，保证 order 出现空洞或重复时结果仍然稳定。
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<Link>> {
        let models = link::Entity::find()
            .filter(link::Column::OwnerId.eq(owner_id))
            .order_by_asc(link::Column::Order)
            .order_by_asc(link::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("加载链接列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 按 id 查找链接，不做所有者过滤
    ///
    /// 调用方负责在返回结果上做所有权检查。
    pub async fn find_link(&self, id: i64) -> Result<Option<Link>> {
        let model = link::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("查询链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    /// 全表链接数（健康检查用）
    pub async fn count_links(&self) -> Result<u64> {
        link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("统计链接数失败: {}", e)))
    }

    pub async fn find_user_by_identity(&self, identity_id: &str) -> Result<Option<UserProfile>> {
        let model = user::Entity::find()
            .filter(user::Column::IdentityId.eq(identity_id))
            .one(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_profile))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_profile))
    }
}
