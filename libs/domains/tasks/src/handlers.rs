use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    IdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{StatusQuery, TaskRequest, TaskResponse, TaskStatus};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub const TAG: &str = "tasks";

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        get_task,
        list_tasks_by_status,
        create_task,
        update_task,
        update_task_status,
        delete_task,
    ),
    components(
        schemas(TaskRequest, TaskResponse, TaskStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the task router with all HTTP endpoints
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/{id}/status", put(update_task_status))
        .route("/status/{status}", get(list_tasks_by_status))
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of tasks in insertion order", body = Vec<TaskResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.find_all().await?;
    Ok(Json(tasks))
}

/// Get a task by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.find_by_id(id).await?;
    Ok(Json(task))
}

/// List tasks filtered by status
#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = TAG,
    params(
        ("status" = String, Path, description = "Task status (PENDING or COMPLETED)")
    ),
    responses(
        (status = 200, description = "Tasks with the given status", body = Vec<TaskResponse>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks_by_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(status): Path<String>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let status = status
        .parse::<TaskStatus>()
        .map_err(|_| TaskError::InvalidStatus(status))?;

    let tasks = service.find_by_status(status).await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task created with Pending status", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.create(request).await?;
    Ok(Json(task))
}

/// Update title and description of a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.update(id, request).await?;
    Ok(Json(task))
}

/// Update only the status of a task
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task id"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Task status updated", body = TaskResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    Query(query): Query<StatusQuery>,
) -> TaskResult<Json<TaskResponse>> {
    let status = query
        .task_status
        .parse::<TaskStatus>()
        .map_err(|_| TaskError::InvalidStatus(query.task_status))?;

    let task = service.update_status(id, status).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
