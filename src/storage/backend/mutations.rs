//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Ownership is
//! re-verified here by filtering every write on `owner_id` — a row never
//! changes owner and a write never touches another owner's rows.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_link;
use crate::errors::{LinkdeckError, Result};
use crate::storage::models::Link;

use migration::entities::{link, user};

impl SeaOrmStorage {
    /// 首次认证时创建用户行
    ///
    /// 已存在时不做任何更新 —— 用户档案由身份提供方维护，本子系统
    /// 只读。重复认证走快路径，插入冲突（并发首次认证，或罕见的
    /// username 撞车）静默忽略。
    pub async fn ensure_user(&self, identity_id: &str, email: &str, username: &str) -> Result<()> {
        if self.find_user_by_identity(identity_id).await?.is_some() {
            return Ok(());
        }

        let now = Utc::now();
        let active_model = user::ActiveModel {
            identity_id: Set(identity_id.to_string()),
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user::Entity::insert(active_model)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("创建用户失败: {}", e)))?;

        info!("User provisioned: {} ({})", identity_id, username);
        Ok(())
    }

    /// 插入新链接，order 追加到该所有者序列末尾
    pub async fn insert_link(&self, owner_id: &str, title: &str, url: &str) -> Result<Link> {
        let next_order = link::Entity::find()
            .filter(link::Column::OwnerId.eq(owner_id))
            .order_by_desc(link::Column::Order)
            .one(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("查询最大顺序失败: {}", e)))?
            .map(|model| model.order + 1)
            .unwrap_or(0);

        let now = Utc::now();
        let active_model = link::ActiveModel {
            owner_id: Set(owner_id.to_string()),
            title: Set(title.to_string()),
            url: Set(url.to_string()),
            order: Set(next_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("插入链接失败: {}", e)))?;

        info!("Link created: {} (owner: {})", model.id, owner_id);
        Ok(model_to_link(model))
    }

    /// 删除链接，同时按 id 和所有者过滤
    ///
    /// 返回受影响的行数：0 表示链接不存在或属于别人。
    pub async fn delete_link(&self, owner_id: &str, id: i64) -> Result<u64> {
        let result = link::Entity::delete_many()
            .filter(link::Column::Id.eq(id))
            .filter(link::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("删除链接失败: {}", e)))?;

        if result.rows_affected > 0 {
            info!("Link deleted: {} (owner: {})", id, owner_id);
        }
        Ok(result.rows_affected)
    }

    /// 在单个事务里把 sequence 中的每条链接的 order 重写为其下标
    ///
    /// 任何一步失败都会让事务整体回滚，不存在部分生效的中间态。
    /// 每条 UPDATE 仍按 owner_id 过滤，跨所有者的 id 不会被改动。
    pub async fn apply_link_order(&self, owner_id: &str, sequence: &[i64]) -> Result<()> {
        if sequence.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("开始事务失败: {}", e)))?;

        let now = Utc::now();
        for (index, id) in sequence.iter().enumerate() {
            link::Entity::update_many()
                .col_expr(link::Column::Order, Expr::value(index as i32))
                .col_expr(link::Column::UpdatedAt, Expr::value(now))
                .filter(link::Column::Id.eq(*id))
                .filter(link::Column::OwnerId.eq(owner_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    LinkdeckError::database_operation(format!("更新链接顺序失败: {}", e))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| LinkdeckError::database_operation(format!("提交事务失败: {}", e)))?;

        info!(
            "Reordered {} links for owner {}",
            sequence.len(),
            owner_id
        );
        Ok(())
    }
}
