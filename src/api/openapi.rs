//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{NewUser, UserChanges, UserResponse};
use crate::types::{Envelope, EnvelopeData};

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "CRUD over a single user resource. Requests must send \
                       `Content-Type: application/json` and \
                       `Accept: application/vnd.demo_app.v1+json`."
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::create_user,
        user_handler::show_user,
        user_handler::edit_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            NewUser,
            UserChanges,
            UserResponse,
            Envelope,
            EnvelopeData,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
