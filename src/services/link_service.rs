//! Link management service
//!
//! Provides the business logic for link operations, shared between HTTP
//! handlers and integration tests. The caller identity is always an explicit
//! parameter; nothing here reads ambient session state.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{LinkdeckError, Result};
use crate::storage::{Link, SeaOrmStorage, UserProfile};
use crate::utils::url_validator::validate_url;

/// 所有权守卫
///
/// 区分 Forbidden（存在但属于别人）与上游的 NotFound，两者对外
/// 如何呈现由调用方决定。
pub fn assert_owner(link: &Link, identity: &str) -> Result<()> {
    if link.owner_id == identity {
        Ok(())
    } else {
        Err(LinkdeckError::forbidden(format!(
            "link {} does not belong to caller",
            link.id
        )))
    }
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 创建链接
    ///
    /// 服务端校验 title 非空、url 为合法的 http/https 绝对地址，
    /// 不信任客户端校验。order 追加到序列末尾。
    pub async fn create_link(&self, identity: &str, title: &str, url: &str) -> Result<Link> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LinkdeckError::validation("title cannot be empty"));
        }

        validate_url(url).map_err(|e| LinkdeckError::validation(e.to_string()))?;

        let link = self.storage.insert_link(identity, title, url.trim()).await?;
        info!(
            "Link created: {} \"{}\" (owner: {})",
            link.id, link.title, identity
        );
        Ok(link)
    }

    /// 列出调用者的全部链接，按 order 升序
    pub async fn list_links(&self, identity: &str) -> Result<Vec<Link>> {
        self.storage.list_links(identity).await
    }

    /// 删除链接
    ///
    /// 返回类型化错误：NotFound（id 不存在）或 Forbidden（属于别人）。
    /// HTTP 层把两者都折叠成 204 空操作，见 handler。
    pub async fn delete_link(&self, identity: &str, id: i64) -> Result<()> {
        let link = self
            .storage
            .find_link(id)
            .await?
            .ok_or_else(|| LinkdeckError::not_found(format!("link {} does not exist", id)))?;

        assert_owner(&link, identity)?;

        let affected = self.storage.delete_link(identity, id).await?;
        if affected == 0 {
            // 检查和删除之间被并发删掉了，对调用方仍是成功
            warn!("Link {} vanished between ownership check and delete", id);
        }
        Ok(())
    }

    /// 重排调用者的链接
    ///
    /// 提交序列中的每个 id 必须属于调用者且不重复，否则整个操作
    /// 拒绝，不做部分应用。未提交的链接保持原有相对顺序，追加在
    /// 提交序列之后，维持 0..N-1 的稠密顺序。
    pub async fn reorder_links(&self, identity: &str, submitted: &[i64]) -> Result<()> {
        let owned = self.storage.list_links(identity).await?;
        let sequence = merge_order(&owned, submitted)?;

        self.storage.apply_link_order(identity, &sequence).await
    }

    /// 调用者自己的档案与链接（dashboard 预览）
    pub async fn profile(&self, identity: &str) -> Result<(UserProfile, Vec<Link>)> {
        let profile = self
            .storage
            .find_user_by_identity(identity)
            .await?
            .ok_or_else(|| LinkdeckError::not_found("user profile does not exist"))?;

        let links = self.storage.list_links(identity).await?;
        Ok((profile, links))
    }

    /// 公开主页：按 username 解析，无需会话
    pub async fn public_profile(&self, username: &str) -> Result<(UserProfile, Vec<Link>)> {
        let profile = self
            .storage
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| {
                LinkdeckError::not_found(format!("no profile for handle \"{}\"", username))
            })?;

        let links = self.storage.list_links(&profile.identity_id).await?;
        Ok((profile, links))
    }
}

/// 根据提交序列计算最终的完整顺序
///
/// 校验提交的 id 全部属于 owned 且无重复；owned 中未提交的 id
/// 按原有顺序追加在后面。
fn merge_order(owned: &[Link], submitted: &[i64]) -> Result<Vec<i64>> {
    let owned_ids: HashSet<i64> = owned.iter().map(|link| link.id).collect();

    let mut seen: HashSet<i64> = HashSet::with_capacity(submitted.len());
    for id in submitted {
        if !owned_ids.contains(id) {
            return Err(LinkdeckError::validation(format!(
                "link {} is not owned by caller",
                id
            )));
        }
        if !seen.insert(*id) {
            return Err(LinkdeckError::validation(format!(
                "duplicate link {} in submitted order",
                id
            )));
        }
    }

    let mut sequence: Vec<i64> = submitted.to_vec();
    // owned 已按当前 order 排序，省略的链接保持相对顺序
    sequence.extend(
        owned
            .iter()
            .map(|link| link.id)
            .filter(|id| !seen.contains(id)),
    );

    Ok(sequence)
}
