use crate::models::{NewTask, Task, TaskStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// SeaORM entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

// A new task carries no id; the store assigns one on insert
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            status: Set(input.status),
            created_at: Set(input.created_at),
        }
    }
}

impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            status: Set(task.status),
            created_at: Set(task.created_at),
        }
    }
}
