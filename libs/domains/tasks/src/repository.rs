use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskStatus};

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks in insertion order (ascending id)
    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// A single task by id, if present
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// All tasks whose status equals the argument exactly
    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>>;

    /// Presence check by id
    async fn exists_by_id(&self, id: i64) -> TaskResult<bool>;

    /// Persist a new task; the store assigns the id
    async fn insert(&self, input: NewTask) -> TaskResult<Task>;

    /// Persist an updated task; fails with NotFound if the row is gone
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Remove a task, reporting whether a row was actually deleted
    async fn delete_by_id(&self, id: i64) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
///
/// Ids are assigned from a monotonic counter and never reused, matching the
/// identity semantics of the relational store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<BTreeMap<i64, Task>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        // BTreeMap iterates in ascending id order, which is insertion order
        Ok(tasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .values()
            .filter(|task| task.status == status)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> TaskResult<bool> {
        let tasks = self.tasks.read().await;
        Ok(tasks.contains_key(&id))
    }

    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let task = Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            created_at: input.created_at,
        };

        self.tasks.write().await.insert(id, task.clone());

        tracing::info!(task_id = id, "Created task");
        Ok(task)
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        if !tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id));
        }

        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Updated task");
        Ok(task)
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let removed = self.tasks.write().await.remove(&id).is_some();

        if removed {
            tracing::info!(task_id = id, "Deleted task");
        }

        Ok(removed)
    }
}
