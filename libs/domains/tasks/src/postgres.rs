use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task, TaskStatus},
    repository::TaskRepository,
};

/// PostgreSQL implementation of TaskRepository (SeaORM)
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> TaskError {
    TaskError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Task::from))
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Status.eq(status))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn exists_by_id(&self, id: i64) -> TaskResult<bool> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.is_some())
    }

    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();

        // The row may have been deleted since it was fetched; surface that
        // as NotFound rather than a store failure.
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TaskError::NotFound(id),
            e => db_error(e),
        })?;

        tracing::info!(task_id = id, "Updated task");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        // Single atomic store call; zero rows affected means the task was
        // already gone.
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(task_id = id, "Deleted task");
        }

        Ok(deleted)
    }
}
