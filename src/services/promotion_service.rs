use crate::entities::promotion_entity as promotions;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePromotionRequest, PromotionQuery, PromotionResponse, UpdatePromotionRequest,
};
use crate::utils::validate_url;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

fn validate_title(title: &str) -> AppResult<()> {
    let len = title.trim().len();
    if !(3..=100).contains(&len) {
        return Err(AppError::ValidationError(
            "Title must be between 3 and 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> AppResult<()> {
    let len = description.trim().len();
    if !(10..=500).contains(&len) {
        return Err(AppError::ValidationError(
            "Description must be between 10 and 500 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_terms(terms: &str) -> AppResult<()> {
    if terms.trim().len() < 10 {
        return Err(AppError::ValidationError(
            "Terms must be at least 10 characters".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PromotionService {
    pool: DatabaseConnection,
}

impl PromotionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 对外展示的促销活动：启用中且未过期
    pub async fn list_active(&self) -> AppResult<Vec<PromotionResponse>> {
        let models = promotions::Entity::find()
            .filter(promotions::Column::IsActive.eq(true))
            .filter(promotions::Column::EndDate.gt(Utc::now()))
            .order_by_desc(promotions::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    // ==================== 管理后台 ====================

    /// 全部促销活动，过期停用的也列出
    pub async fn admin_list(&self, query: &PromotionQuery) -> AppResult<Vec<PromotionResponse>> {
        let mut find = promotions::Entity::find().order_by_desc(promotions::Column::CreatedAt);

        if let Some(category) = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
        {
            find = find.filter(promotions::Column::Category.eq(category));
        }

        let models = find.all(&self.pool).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, request: CreatePromotionRequest) -> AppResult<PromotionResponse> {
        validate_title(&request.title)?;
        validate_description(&request.description)?;
        validate_url(&request.image_url)?;
        validate_terms(&request.terms)?;

        // 空字符串的活动码按未设置处理
        let code = request
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let promotion = promotions::ActiveModel {
            title: Set(request.title.trim().to_string()),
            description: Set(request.description.trim().to_string()),
            image_url: Set(request.image_url.clone()),
            category: Set(request.category.clone()),
            code: Set(code),
            end_date: Set(request.end_date),
            terms: Set(request.terms.trim().to_string()),
            is_active: Set(request.is_active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Promotion created: {} (id={})",
            promotion.title,
            promotion.id
        );

        Ok(promotion.into())
    }

    pub async fn update(
        &self,
        promotion_id: i64,
        request: UpdatePromotionRequest,
    ) -> AppResult<PromotionResponse> {
        let promotion = promotions::Entity::find_by_id(promotion_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Promotion not found".to_string()))?;

        let mut active = promotion.into_active_model();

        if let Some(title) = request.title.as_deref() {
            validate_title(title)?;
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = request.description.as_deref() {
            validate_description(description)?;
            active.description = Set(description.trim().to_string());
        }
        if let Some(image_url) = request.image_url.as_deref() {
            validate_url(image_url)?;
            active.image_url = Set(image_url.to_string());
        }
        if let Some(category) = request.category.clone() {
            active.category = Set(category);
        }
        if let Some(code) = request.code.as_deref() {
            let code = code.trim();
            active.code = Set(if code.is_empty() {
                None
            } else {
                Some(code.to_string())
            });
        }
        if let Some(end_date) = request.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(terms) = request.terms.as_deref() {
            validate_terms(terms)?;
            active.terms = Set(terms.trim().to_string());
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }

        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&self.pool).await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, promotion_id: i64) -> AppResult<()> {
        let promotion = promotions::Entity::find_by_id(promotion_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Promotion not found".to_string()))?;

        promotions::Entity::delete_by_id(promotion.id)
            .exec(&self.pool)
            .await?;

        log::info!(
            "Promotion deleted: {} (id={})",
            promotion.title,
            promotion.id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("Bono").is_ok());
        assert!(validate_title("ab").is_err());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_description("Duplica tu primer depósito").is_ok());
        assert!(validate_description("corta").is_err());
        assert!(validate_description(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_terms_minimum() {
        assert!(validate_terms("Aplican términos y condiciones").is_ok());
        assert!(validate_terms("corto").is_err());
    }
}
