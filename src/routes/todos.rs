use crate::{
    error::AppError,
    models::{Todo, TodoInput},
    responses::ApiResult,
    store::TodoStore,
};
use actix_web::{delete, get, post, put, web, HttpRequest};

/// Name of the detail route, used to build `Location` headers.
///
/// Must match the `name` given to `get_todo`'s route attribute, which only
/// accepts a literal.
pub const TODO_DETAIL_ROUTE: &str = "todo_detail";

/// Lists every todo.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects ordered by id.
#[get("")]
pub async fn list_todos(store: web::Data<dyn TodoStore>) -> Result<ApiResult<Vec<Todo>>, AppError> {
    Ok(ApiResult::Ok(store.list().await?))
}

/// Creates a todo.
///
/// A missing or `null` description is stored as an empty string.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`, with `Location` pointing at its detail route.
/// - `400 Bad Request`: the body is not valid JSON.
#[post("")]
pub async fn create_todo(
    store: web::Data<dyn TodoStore>,
    input: web::Json<TodoInput>,
    req: HttpRequest,
) -> Result<ApiResult<Todo>, AppError> {
    let todo = store.create(input.into_inner().into_description()).await?;
    log::debug!("Created todo {}", todo.id);

    let location = req.url_for(TODO_DETAIL_ROUTE, [todo.id.to_string()])?;
    Ok(ApiResult::Created(todo, location.path().to_string()))
}

/// Fetches a single todo.
///
/// ## Responses:
/// - `200 OK`: the `Todo`.
/// - `404 Not Found`: no todo has this id (empty body).
#[get("/{id:-?\\d+}", name = "todo_detail")]
pub async fn get_todo(
    store: web::Data<dyn TodoStore>,
    id: web::Path<i32>,
) -> Result<ApiResult<Todo>, AppError> {
    Ok(ApiResult::found(store.get(id.into_inner()).await?))
}

/// Replaces the description of a todo. The id never changes.
///
/// ## Responses:
/// - `200 OK`: the updated `Todo`.
/// - `404 Not Found`: no todo has this id (empty body).
#[put("/{id:-?\\d+}")]
pub async fn update_todo(
    store: web::Data<dyn TodoStore>,
    id: web::Path<i32>,
    input: web::Json<TodoInput>,
) -> Result<ApiResult<Todo>, AppError> {
    let description = input.into_inner().into_description();
    Ok(ApiResult::found(store.update(id.into_inner(), description).await?))
}

/// Deletes a todo.
///
/// ## Responses:
/// - `204 No Content`: the todo was removed.
/// - `404 Not Found`: no todo has this id (empty body).
#[delete("/{id:-?\\d+}")]
pub async fn delete_todo(
    store: web::Data<dyn TodoStore>,
    id: web::Path<i32>,
) -> Result<ApiResult<()>, AppError> {
    if store.delete(id.into_inner()).await? {
        Ok(ApiResult::NoContent)
    } else {
        Ok(ApiResult::NotFound)
    }
}
