use utoipa::OpenApi;

/// Top-level OpenAPI document for the Todo API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "Task management REST API: create, list, update, and delete tasks",
        contact(name = "ABC Entreprise"),
        license(name = "MIT")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
