use super::error::*;
use super::handler;
use crate::application_port::{AuthError, AuthService};
use crate::domain_model::{Identity, PostId, UserId};
use crate::server::Server;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Routes below `/api`. Path filters come before method filters so an unknown
/// path reports 404 rather than 405.
pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let token = warp::path("token")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.auth_service.clone()))
        .and_then(handler::issue_token);

    let refresh_token = warp::path("refresh_token")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.auth_service.clone()))
        .and_then(handler::refresh_token);

    let logout = warp::path("logout")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.auth_service.clone()))
        .and_then(handler::logout);

    let list_posts = warp::path("posts")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.post_service.clone()))
        .and_then(handler::list_posts);

    let create_post = warp::path("posts")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_verification(server.auth_service.clone()))
        .and(json_body())
        .and(with(server.post_service.clone()))
        .and_then(handler::create_post);

    let update_post = warp::path("posts")
        .and(warp::path::param::<PostId>())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_verification(server.auth_service.clone()))
        .and(json_body())
        .and(with(server.post_service.clone()))
        .and_then(handler::update_post);

    let delete_post = warp::path("posts")
        .and(warp::path::param::<PostId>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.post_service.clone()))
        .and_then(handler::delete_post);

    let list_users = warp::path("users")
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::list_users);

    let create_user = warp::path("users")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.user_service.clone()))
        .and_then(handler::create_user);

    let update_user = warp::path("users")
        .and(warp::path::param::<UserId>())
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with(server.user_service.clone()))
        .and_then(handler::update_user);

    let delete_user = warp::path("users")
        .and(warp::path::param::<UserId>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with(server.user_service.clone()))
        .and_then(handler::delete_user);

    let auth = token.or(refresh_token).or(logout);
    let posts = list_posts.or(create_post).or(update_post).or(delete_post);
    let users = list_users.or(create_user).or(update_user).or(delete_user);

    auth.or(posts).or(users)
}

/// The whole HTTP surface: `/api` routes, rejection recovery and request tracing.
pub fn service(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    warp::path("api")
        .and(routes(server))
        .recover(recover_error)
        .with(warp::trace::request())
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Resolves the `Authorization` header (the raw token, no scheme) to an
/// identity before the handler runs. Missing or empty means unauthenticated.
fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (Identity,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |token: Option<String>| {
        let auth_service = auth_service.clone();
        async move {
            let token = token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| reject::custom(ApiErrorCode::from(AuthError::Unauthenticated)))?;
            let identity = auth_service
                .verify_access_token(&token)
                .await
                .map_err(ApiErrorCode::from)
                .map_err(reject::custom)?;
            Ok::<_, warp::Rejection>(identity)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::JwtConfig;
    use serde_json::{Value, json};
    use warp::http::StatusCode;

    fn server() -> Arc<Server> {
        Arc::new(Server::in_memory(JwtConfig::for_tests()))
    }

    fn body(resp: &warp::http::Response<impl AsRef<[u8]>>) -> Value {
        serde_json::from_slice(resp.body().as_ref()).unwrap()
    }

    async fn issue(server: &Arc<Server>, user_id: &str) -> Value {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/token")
            .json(&json!({ "userId": user_id }))
            .reply(&service(server.clone()))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        body(&resp)
    }

    async fn create_post(server: &Arc<Server>, access: &str, message: &str) -> Value {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/posts")
            .header("authorization", access)
            .json(&json!({ "message": message }))
            .reply(&service(server.clone()))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body(&resp)
    }

    #[tokio::test]
    async fn token_refresh_logout_flow() {
        let server = server();
        let api = service(server.clone());
        let pair = issue(&server, "u1").await;
        let access1 = pair["accessToken"].as_str().unwrap().to_string();
        let refresh1 = pair["refreshToken"].as_str().unwrap().to_string();

        let resp = warp::test::request()
            .method("POST")
            .path("/api/refresh_token")
            .json(&json!({ "userId": "u1", "refreshToken": refresh1 }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let access2 = body(&resp)["accessToken"].as_str().unwrap().to_string();
        assert_ne!(access1, access2);

        let resp = warp::test::request()
            .method("POST")
            .path("/api/logout")
            .json(&json!({ "userId": "u1" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["message"], "Logged out successfully");

        let resp = warp::test::request()
            .method("POST")
            .path("/api/refresh_token")
            .json(&json!({ "userId": "u1", "refreshToken": refresh1 }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body(&resp)["message"], "Invalid refresh token");
    }

    #[tokio::test]
    async fn refresh_without_a_candidate_token_is_unauthorized() {
        let server = server();
        issue(&server, "u1").await;

        let resp = warp::test::request()
            .method("POST")
            .path("/api/refresh_token")
            .json(&json!({ "userId": "u1" }))
            .reply(&service(server.clone()))
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body(&resp)["message"], "Invalid refresh token");
    }

    #[tokio::test]
    async fn posts_require_an_access_token() {
        let server = server();
        let api = service(server.clone());

        let resp = warp::test::request()
            .method("GET")
            .path("/api/posts")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body(&resp)["message"], "Access denied");

        let resp = warp::test::request()
            .method("GET")
            .path("/api/posts")
            .header("authorization", "garbage")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&resp)["message"], "Invalid token");

        let pair = issue(&server, "u1").await;
        let resp = warp::test::request()
            .method("GET")
            .path("/api/posts")
            .header("authorization", pair["refreshToken"].as_str().unwrap())
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn only_the_creator_may_mutate_a_post() {
        let server = server();
        let api = service(server.clone());
        let alice = issue(&server, "alice").await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();
        let bob = issue(&server, "bob").await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();

        let post = create_post(&server, &alice, "hello").await;
        assert_eq!(post["createdBy"], "alice");
        assert_eq!(post["comments"], json!([]));
        let path = format!("/api/posts/{}", post["_id"].as_str().unwrap());

        let resp = warp::test::request()
            .method("PUT")
            .path(&path)
            .header("authorization", &bob)
            .json(&json!({ "message": "hijacked" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body(&resp)["message"], "Unauthorized to update this post");

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .header("authorization", &bob)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body(&resp)["message"], "Unauthorized to delete this post");

        let resp = warp::test::request()
            .method("PUT")
            .path(&path)
            .header("authorization", &alice)
            .json(&json!({ "message": "edited" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["message"], "edited");

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .header("authorization", &alice)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["message"], "Post deleted successfully");

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .header("authorization", &alice)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&resp)["message"], "Post not found");
    }

    #[tokio::test]
    async fn listing_shows_everyones_posts() {
        let server = server();
        let api = service(server.clone());
        let alice = issue(&server, "alice").await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();
        let bob = issue(&server, "bob").await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();
        create_post(&server, &alice, "one").await;
        create_post(&server, &bob, "two").await;

        let resp = warp::test::request()
            .method("GET")
            .path("/api/posts")
            .header("authorization", &bob)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp).as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn malformed_requests_are_rejected() {
        let server = server();
        let api = service(server.clone());
        let alice = issue(&server, "alice").await["accessToken"]
            .as_str()
            .unwrap()
            .to_string();

        let resp = warp::test::request()
            .method("POST")
            .path("/api/posts")
            .header("authorization", &alice)
            .json(&json!({ "text": "wrong field" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = warp::test::request()
            .method("PUT")
            .path("/api/posts/not-a-uuid")
            .header("authorization", &alice)
            .json(&json!({ "message": "x" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = warp::test::request()
            .method("GET")
            .path("/api/nowhere")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&resp)["message"], "Not found");
    }

    #[tokio::test]
    async fn user_crud() {
        let api = service(server());

        let resp = warp::test::request()
            .method("POST")
            .path("/api/users")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "mobile": "555-0100",
                "password": "secret",
            }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let user = body(&resp);
        assert!(user.get("password").is_none());
        let path = format!("/api/users/{}", user["_id"].as_str().unwrap());

        let resp = warp::test::request()
            .method("POST")
            .path("/api/users")
            .json(&json!({ "name": "Imposter", "email": "ada@example.com" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = warp::test::request()
            .method("PUT")
            .path(&path)
            .json(&json!({ "mobile": "555-0199" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["mobile"], "555-0199");
        assert_eq!(body(&resp)["name"], "Ada");

        let resp = warp::test::request()
            .method("GET")
            .path("/api/users")
            .reply(&api)
            .await;
        assert_eq!(body(&resp).as_array().unwrap().len(), 1);

        let resp = warp::test::request()
            .method("DELETE")
            .path(&path)
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(&resp)["message"], "User deleted successfully");

        let resp = warp::test::request()
            .method("PUT")
            .path(&path)
            .json(&json!({ "name": "ghost" }))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&resp)["message"], "User not found");
    }
}
