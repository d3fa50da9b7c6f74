use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, TaskRequest, TaskResponse, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic.
///
/// Orchestrates repository calls and maps persisted tasks into response DTOs
/// through the single [`TaskResponse::from`] conversion. Request validation
/// happens earlier, at the extractor, so inputs arriving here are well-formed.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All tasks in repository order
    pub async fn find_all(&self) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// A single task by id
    pub async fn find_by_id(&self, id: i64) -> TaskResult<TaskResponse> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        Ok(task.into())
    }

    /// Tasks matching the given status; an empty list is a valid result
    pub async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_by_status(status).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// Create a new task. The status is forced to Pending and the creation
    /// timestamp is stamped at construction, whatever the request contains.
    pub async fn create(&self, request: TaskRequest) -> TaskResult<TaskResponse> {
        let task = self.repository.insert(NewTask::from_request(request)).await?;
        Ok(task.into())
    }

    /// Overwrite title and description of an existing task. Status and
    /// creation timestamp are untouched.
    pub async fn update(&self, id: i64, request: TaskRequest) -> TaskResult<TaskResponse> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        task.apply_request(request);

        let saved = self.repository.save(task).await?;
        Ok(saved.into())
    }

    /// Overwrite only the status of an existing task
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> TaskResult<TaskResponse> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        task.status = status;

        let saved = self.repository.save(task).await?;
        Ok(saved.into())
    }

    /// Delete a task. The repository reports whether a row was actually
    /// removed, so a concurrent delete cannot slip through as a success.
    pub async fn delete(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
