//! HTTP inbound adapter exposing the JSON API.

pub mod error;
pub mod health;
pub mod recipes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler and the extractor error hooks.
///
/// Mount inside a scope that already carries the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use galleta::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::user_profile)
        .service(recipes::browse_recipes)
        .service(recipes::create_recipe)
        .service(recipes::recipe_detail)
        .service(recipes::edit_recipe)
        .service(recipes::delete_recipe);
}
