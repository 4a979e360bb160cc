//! Users API handlers.
//!
//! ```text
//! GET    /users?from=1980-01-01&to=2000-01-01
//! GET    /users/{id}
//! POST   /users      {"email":"ada@example.com","firstName":"Ada",...}
//! PUT    /users/{id}
//! PATCH  /users/{id} {"phoneNumber":"555-0100"}
//! DELETE /users/{id}
//! ```

use actix_web::{delete, get, patch, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::parse_date;
use crate::domain::{Address, AddressValue, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ErrorBody, configure_extractors};
use crate::inbound::http::state::HttpState;

/// Address supplied in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[schema(example = "Baker Street")]
    pub street: String,
    #[schema(example = 221)]
    pub house_number: i64,
}

impl From<AddressRequest> for AddressValue {
    fn from(value: AddressRequest) -> Self {
        AddressValue::new(value.street, value.house_number)
    }
}

/// Request body for create, update and patch.
///
/// Every field may be omitted at the JSON level. Create and update reject a
/// body missing email, first name, last name or birth date; patch applies
/// whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_birth_date")]
    #[schema(value_type = Option<String>, format = Date, example = "1990-12-10")]
    pub birth_date: Option<NaiveDate>,
    pub address: Option<AddressRequest>,
    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: Option<String>,
}

/// Accept `birthDate` only in zero-padded `YYYY-MM-DD` form.
fn deserialize_birth_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw).map_err(|err| serde::de::Error::custom(err.message())))
        .transpose()
}

impl From<UserRequest> for UserDraft {
    fn from(value: UserRequest) -> Self {
        Self {
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            birth_date: value.birth_date,
            address: value.address.map(AddressValue::from),
            phone_number: value.phone_number,
        }
    }
}

/// Stored address as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: i64,
    pub street: String,
    pub house_number: i64,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.get(),
            street: address.value.street,
            house_number: address.value.house_number,
        }
    }
}

/// Stored user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<AddressResponse>,
    pub phone_number: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            address: user.address.map(AddressResponse::from),
            phone_number: user.phone_number,
        }
    }
}

/// Birth date bounds for `GET /users`. Both bounds are exclusive.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// Lower bound, `YYYY-MM-DD`.
    #[param(example = "1980-01-01")]
    pub from: String,
    /// Upper bound, `YYYY-MM-DD`.
    #[param(example = "2000-01-01")]
    pub to: String,
}

/// List users born strictly between `from` and `to`.
#[utoipa::path(
    get,
    path = "/users",
    params(RangeQuery),
    responses(
        (status = 200, description = "Users ordered by birth date", body = [UserResponse]),
        (status = 400, description = "Malformed or out-of-order dates", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<RangeQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let RangeQuery { from, to } = query.into_inner();
    let users = state.users_query.list_by_birth_date(&from, &to).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Non-numeric identifier", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users_query.get(UserId::new(path.into_inner())).await?;
    Ok(web::Json(user.into()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users_command
        .create(payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Replace every field of a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users_command
        .update(UserId::new(path.into_inner()), payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Apply the fields present in the body to a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Patched user", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users_command
        .patch(UserId::new(path.into_inner()), payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete a user, returning its last stored state.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 503, description = "Database unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users_command
        .delete(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user.into()))
}

/// Register the users handlers and their extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_backend::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_extractors)
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(patch_user)
        .service(delete_user);
}
