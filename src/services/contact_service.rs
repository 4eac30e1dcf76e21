use crate::entities::contact_message_entity as contact_messages;
use crate::error::{AppError, AppResult};
use crate::models::ContactRequest;
use crate::utils::validate_email;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

#[derive(Clone)]
pub struct ContactService {
    pool: DatabaseConnection,
}

impl ContactService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 收取联系表单；只落库，不发通知
    pub async fn submit(&self, request: ContactRequest) -> AppResult<()> {
        let name = request.name.trim();
        if name.len() < 2 {
            return Err(AppError::ValidationError("Name is too short".to_string()));
        }

        let email = request.email.trim();
        validate_email(email)?;

        let subject = request.subject.trim();
        if subject.is_empty() {
            return Err(AppError::ValidationError(
                "Subject is required".to_string(),
            ));
        }

        let message = request.message.trim();
        if message.len() < 10 {
            return Err(AppError::ValidationError(
                "Message must be at least 10 characters".to_string(),
            ));
        }

        contact_messages::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            subject: Set(subject.to_string()),
            message: Set(message.to_string()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Contact message stored from {}", email);

        Ok(())
    }
}
