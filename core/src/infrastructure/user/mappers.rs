use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    user::entities::{Role, User},
};
use crate::entity::users::{ActiveModel as UserActiveModel, Model as UserModel};

impl TryFrom<UserModel> for User {
    type Error = CoreError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(|e| {
            error!("Failed to decode user {}: {}", model.id, e);
            CoreError::InternalServerError
        })?;

        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            role,
            created_at: model.created_at.and_utc(),
        })
    }
}

impl From<User> for UserActiveModel {
    fn from(user: User) -> Self {
        UserActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            role: Set(user.role.as_str().to_string()),
            created_at: Set(user.created_at.naive_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_role_is_stored_lowercase() {
        let model = UserModel {
            id: Uuid::nil(),
            name: "Jane".to_string(),
            email: "jane@gmail.com".to_string(),
            role: "publisher".to_string(),
            created_at: Utc::now().naive_utc(),
        };

        let user = User::try_from(model).unwrap();
        assert_eq!(user.role, Role::Publisher);

        let active = UserActiveModel::from(user);
        assert_eq!(active.role, Set("publisher".to_string()));
    }

    #[test]
    fn test_unknown_role_is_internal_error() {
        let model = UserModel {
            id: Uuid::nil(),
            name: "Root".to_string(),
            email: "root@gmail.com".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now().naive_utc(),
        };

        assert_eq!(User::try_from(model).unwrap_err(), CoreError::InternalServerError);
    }
}
