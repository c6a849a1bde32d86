use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{domain::models::UserId, domain::User, routes::ApiError};

use super::AuthSession;

/// A custom Axum extractor that extracts the authenticated [`User`] directly
/// from the request. Returns 401 Unauthorized if no user is logged in.
///
/// Every protected handler takes this extractor as its first argument, so
/// the authenticated-session check runs before the handler body and no store
/// operation happens for an unauthenticated request.
///
/// The `id` field is a [`UserId`] constructed at extraction time, shadowing
/// `User.id` through `Deref`.
///
/// Safe to log — `User`'s `Debug` impl redacts the access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    user: User,
}

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthSession: FromRequestParts<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_session = AuthSession::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unauthorized("Not authenticated"))?;

        let user = auth_session
            .user
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        Ok(AuthUser {
            id: user.id,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use axum_login::{tower_sessions::SessionManagerLayer, AuthManagerLayerBuilder};
    use oauth2::{basic::BasicClient, AuthUrl, ClientId, TokenUrl};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions_moka_store::MokaStore;

    use super::AuthUser;
    use crate::auth::AuthBackend;
    use crate::domain::search::{store::InMemorySearchRecordStore, SearchRecordStore};

    async fn record_search(
        user: AuthUser,
        State(store): State<InMemorySearchRecordStore>,
    ) -> StatusCode {
        store.append(user.id, "cats").await.unwrap();
        StatusCode::OK
    }

    // The pool is lazy and the OAuth client points nowhere; neither is
    // touched when there is no session to resolve a user from.
    fn test_backend() -> AuthBackend {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/glimpse")
            .unwrap();
        let client = BasicClient::new(
            ClientId::new("client-id".to_string()),
            None,
            AuthUrl::new("https://example.com/authorize".to_string()).unwrap(),
            Some(TokenUrl::new("https://example.com/token".to_string()).unwrap()),
        );

        AuthBackend::new(pool, client)
    }

    #[tokio::test]
    async fn session_less_request_gets_401_before_any_store_write() {
        let session_layer = SessionManagerLayer::new(MokaStore::new(Some(16)));
        let auth_layer = AuthManagerLayerBuilder::new(test_backend(), session_layer).build();

        let store = InMemorySearchRecordStore::new();
        let app = Router::new()
            .route("/search", post(record_search))
            .layer(auth_layer)
            .with_state(store.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(store.is_empty());
    }
}
