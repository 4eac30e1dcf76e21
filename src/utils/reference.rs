use crate::entities::deposit_entity as deposits;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// 生成唯一的充值参考号（DEP + 10位数字）
pub async fn generate_unique_deposit_reference(pool: &DatabaseConnection) -> AppResult<String> {
    loop {
        let number = {
            let mut rng = rand::thread_rng();
            rng.gen_range(1000000001_u64..=9999999999_u64)
        };
        let reference = format!("DEP{}", number);

        // 检查是否已存在
        let exists = deposits::Entity::find()
            .filter(deposits::Column::Reference.eq(&reference))
            .one(pool)
            .await?;

        if exists.is_none() {
            return Ok(reference);
        }
    }
}
