//! Recipe handlers.
//!
//! ```text
//! GET    /api/v1/recipes?q=choco
//! POST   /api/v1/recipes {"title":"Cake","ingredients":"flour\ncocoa","steps":"mix\nbake","photo":{"filename":"cake.jpg","content":"<base64>"}}
//! GET    /api/v1/recipes/{id}
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Listing is public; every other route needs a signed-in user.

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RecipeListing;
use crate::domain::{ApiResult, Error, ImageUpload, Recipe, RecipeDraft, RecipeId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Photo attached to a recipe body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPayload {
    /// Original file name; its extension must be PNG, JPG or JPEG.
    #[schema(example = "cake.jpg")]
    pub filename: String,
    /// Base64-encoded image bytes.
    pub content: String,
}

impl PhotoPayload {
    fn decode(self) -> Result<ImageUpload, Error> {
        let bytes = STANDARD.decode(self.content.as_bytes()).map_err(|err| {
            Error::invalid_request(format!("photo content is not valid base64: {err}"))
                .with_details(json!({ "field": "photo", "code": "invalid_photo_encoding" }))
        })?;
        Ok(ImageUpload {
            filename: self.filename,
            bytes,
        })
    }
}

/// Body for creating or replacing a recipe.
///
/// `ingredients` and `steps` are multi-line text; blank lines are dropped.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Chocolate cake")]
    pub title: String,
    #[schema(example = "flour\ncocoa")]
    pub ingredients: String,
    #[schema(example = "mix\nbake")]
    pub steps: String,
    #[serde(default)]
    pub about: Option<String>,
    /// Required on create. On edit, omit to keep the current photo.
    #[serde(default)]
    pub photo: Option<PhotoPayload>,
}

impl RecipeRequest {
    fn into_parts(self) -> Result<(RecipeDraft, Option<ImageUpload>), Error> {
        let photo = self.photo.map(PhotoPayload::decode).transpose()?;
        let draft = RecipeDraft {
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            about: self.about,
        };
        Ok((draft, photo))
    }
}

/// Identifier of a created recipe.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatedRecipe {
    pub id: i32,
}

/// Query string for `GET /api/v1/recipes`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BrowseQuery {
    /// Case-sensitive text matched against titles and descriptions.
    pub q: Option<String>,
}

fn recipe_id(raw: i32) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| {
        Error::not_found("recipe not found").with_details(json!({ "code": "not_found" }))
    })
}

/// List every recipe, or those matching `q`, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Matching recipes", body = RecipeListing),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "browseRecipes",
    security([])
)]
#[get("/recipes")]
pub async fn browse_recipes(
    state: web::Data<HttpState>,
    query: web::Query<BrowseQuery>,
) -> ApiResult<web::Json<RecipeListing>> {
    let listing = state.recipes.browse(query.into_inner().q).await?;
    Ok(web::Json(listing))
}

/// Publish a recipe owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = CreatedRecipe),
        (status = 400, description = "Missing or refused photo, or blank fields", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 409, description = "Title already taken", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (draft, photo) = payload.into_inner().into_parts()?;
    let id = state.recipes.create_recipe(actor, draft, photo).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/recipes/{id}")))
        .json(CreatedRecipe { id: id.get() }))
}

/// Show one recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "recipeDetail"
)]
#[get("/recipes/{id}")]
pub async fn recipe_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Recipe>> {
    let viewer = session.require_user_id()?;
    let id = recipe_id(path.into_inner())?;
    let recipe = state.recipes.recipe_detail(viewer, id).await?;
    Ok(web::Json(recipe))
}

/// Replace a recipe's content. Only the owner and the superuser may edit;
/// anyone else gets the same 404 as for a missing recipe.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Refused photo or blank fields", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown recipe or not the owner", body = Error),
        (status = 409, description = "Title already taken", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "editRecipe"
)]
#[put("/recipes/{id}")]
pub async fn edit_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = recipe_id(path.into_inner())?;
    let (draft, photo) = payload.into_inner().into_parts()?;
    state.recipes.edit_recipe(actor, id, draft, photo).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a recipe, with the same ownership rule as editing.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown recipe or not the owner", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = recipe_id(path.into_inner())?;
    state.recipes.delete_recipe(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
