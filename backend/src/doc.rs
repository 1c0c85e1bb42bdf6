//! OpenAPI document for the HTTP API.
//!
//! Registers every handler under `/api/v1`, the health probes, the request
//! and response bodies, and the session cookie security scheme. Swagger UI
//! serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{RecipeListing, UserProfile};
use crate::domain::{Error, ErrorCode, Recipe, User};
use crate::inbound::http::recipes::{CreatedRecipe, PhotoPayload, RecipeRequest};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserRef};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Galleta recipe API",
        description = "Recipe sharing with session-authenticated authoring and ownership checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::user_profile,
        crate::inbound::http::recipes::browse_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::recipe_detail,
        crate::inbound::http::recipes::edit_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Recipe,
        RecipeListing,
        UserProfile,
        RegisterRequest,
        LoginRequest,
        UserRef,
        RecipeRequest,
        PhotoPayload,
        CreatedRecipe
    )),
    tags(
        (name = "users", description = "Registration, sessions and profiles"),
        (name = "recipes", description = "Publishing and browsing recipes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
