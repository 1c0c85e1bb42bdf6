//! Account and profile handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.com","password":"secret","passwordAgain":"secret","surname":"Lovelace","name":"Ada","age":36}
//! POST /api/v1/login {"email":"ada@example.com","password":"secret"}
//! POST /api/v1/logout
//! GET  /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::UserProfile;
use crate::domain::{
    ApiResult, Error, LoginCredentials, LoginValidationError, RegistrationDraft, UserId,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_again: String,
    pub surname: String,
    pub name: String,
    pub age: i32,
}

impl From<RegisterRequest> for RegistrationDraft {
    fn from(value: RegisterRequest) -> Self {
        Self {
            email: value.email,
            password: Zeroizing::new(value.password),
            password_again: Zeroizing::new(value.password_again),
            surname: value.surname,
            name: value.name,
            age: value.age,
        }
    }
}

/// Identifier of a registered or signed-in account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserRef {
    pub id: i32,
}

/// Login body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let password = Zeroizing::new(value.password);
        Self::try_from_parts(&value.email, &password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Create an account. The caller still has to log in afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserRef),
        (status = 400, description = "Invalid fields or mismatched passwords", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .accounts
        .register_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserRef { id: id.get() }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.accounts.login(&credentials).await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().json(UserRef { id: user_id.get() }))
}

/// End the session. Anonymous callers get the same response.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// A user's profile and the recipes they own, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/users/{id}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserProfile>> {
    let viewer = session.require_user_id()?;
    let user_id = UserId::new(path.into_inner())
        .map_err(|_| Error::not_found("user not found").with_details(json!({ "code": "user_not_found" })))?;
    let profile = state.recipes.user_profile(viewer, user_id).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{TestBackend, session_cookie, test_session_middleware};

    fn registration(email: &str, password: &str, password_again: &str) -> Value {
        json!({
            "email": email,
            "password": password,
            "passwordAgain": password_again,
            "surname": "Lovelace",
            "name": "Ada",
            "age": 36
        })
    }

    fn users_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(user_profile),
            )
    }

    #[actix_web::test]
    async fn register_login_and_view_profile() {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(registration("ada@example.com", "secret", "secret"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: UserRef = actix_test::read_body_json(res).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": "ada@example.com", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}", created.id))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["recipes"], json!([]));
    }

    #[rstest]
    #[case::mismatch("ada@example.com", "secret", "secrett", "password_mismatch")]
    #[case::blank_email("  ", "secret", "secret", "invalid_registration")]
    #[actix_web::test]
    async fn rejected_registrations_are_bad_requests(
        #[case] email: &str,
        #[case] password: &str,
        #[case] password_again: &str,
        #[case] code: &str,
    ) {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(registration(email, password, password_again))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::InvalidRequest);
        assert_eq!(body.details().and_then(|d| d.get("code")), Some(&json!(code)));
    }

    #[actix_web::test]
    async fn second_registration_with_same_email_conflicts() {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/register")
                    .set_json(registration("ada@example.com", "secret", "secret"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), expected);
        }
    }

    #[rstest]
    #[case::wrong_password("ada@example.com", "guess", StatusCode::UNAUTHORIZED)]
    #[case::unknown_email("bob@example.com", "secret", StatusCode::UNAUTHORIZED)]
    #[case::blank_password("ada@example.com", "", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn failed_logins_set_no_session(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: StatusCode,
    ) {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(registration("ada@example.com", "secret", "secret"))
                .to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
        assert!(
            res.response()
                .cookies()
                .all(|cookie| cookie.name() != "session")
        );
    }

    #[actix_web::test]
    async fn profile_requires_sign_in() {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users/1").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.message(), "please sign in");
    }

    #[actix_web::test]
    async fn logout_is_accepted_without_a_session() {
        let backend = TestBackend::new();
        let app = actix_test::init_service(users_app(backend.state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/api/v1/logout").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
