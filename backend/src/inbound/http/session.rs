//! Session access for handlers.
//!
//! The cookie carries only the signed-in user's numeric id. Handlers go
//! through [`SessionContext`] so the anonymous/authenticated transitions live
//! in one place.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Message returned when a page needs a signed-in user.
pub const SIGN_IN_REQUIRED: &str = "please sign in";

/// Handler-facing wrapper over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Move the session to the authenticated state for `user_id`.
    ///
    /// The session key is renewed so a pre-login cookie cannot be replayed.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Return the session to the anonymous state.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// The signed-in user, if any. Tampered or unparsable ids read as anonymous.
    pub fn user_id(&self) -> Option<UserId> {
        let raw = match self.0.get::<i32>(USER_ID_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return None;
            }
        };
        match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Require a signed-in user or fail with `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    #[actix_web::test]
    async fn login_then_logout_walks_the_state_machine() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::post().to(|session: SessionContext| async move {
                        session.persist_user(UserId::new(7).expect("valid id"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/logout",
                    web::post().to(|session: SessionContext| async move {
                        session.purge();
                        HttpResponse::NoContent()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let login = actix_web::test::call_service(&app, actix_web::test::TestRequest::post().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);

        let who = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(who.status(), StatusCode::OK);
        assert_eq!(actix_web::test::read_body(who).await, "7");

        let logout = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let cleared = session_cookie(&logout);
        assert_eq!(cleared.value(), "");

        let after = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::get()
                .uri("/whoami")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_told_to_sign_in() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/whoami").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_web::test::read_body_json(res).await;
        assert_eq!(body.message(), SIGN_IN_REQUIRED);
    }

    #[actix_web::test]
    async fn tampered_user_id_reads_as_anonymous() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-number")
                            .expect("insert tampered id");
                        HttpResponse::Ok()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let tamper = actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/tamper").to_request()).await;
        let res = actix_web::test::call_service(
            &app,
            actix_web::test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&tamper))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
