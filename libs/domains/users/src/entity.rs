use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::User;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub date_of_birth: Date,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            date_of_birth: model.date_of_birth,
            phone_number: model.phone_number,
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            date_of_birth: Set(user.date_of_birth),
            phone_number: Set(user.phone_number),
        }
    }
}

impl ActiveModel {
    /// Overwrite every mutable column from `user`; the key is left alone.
    pub fn apply(&mut self, user: User) {
        self.first_name = Set(user.first_name);
        self.last_name = Set(user.last_name);
        self.email = Set(user.email);
        self.date_of_birth = Set(user.date_of_birth);
        self.phone_number = Set(user.phone_number);
    }
}
