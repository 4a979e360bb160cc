//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users endpoint, the health probes and the
//! request/response schemas. It backs Swagger UI in debug builds and the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::{AddressRequest, AddressResponse, UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "CRUD access to user records with optional addresses, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        UserResponse,
        AddressRequest,
        AddressResponse,
        ErrorBody
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_item_path_has_every_method() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users/{id}").expect("item path");

        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("UserResponse", "birthDate")]
    #[case("UserRequest", "phoneNumber")]
    #[case("AddressResponse", "houseNumber")]
    #[case("ErrorBody", "errorMessage")]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }
}
