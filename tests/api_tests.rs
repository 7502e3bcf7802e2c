use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Statement};
use std::sync::Arc;
use tower::ServiceExt;
use tower_sessions::ExpiredDeletion;
use watchlist::api::AppState;
use watchlist::config::{Config, SecurityConfig};
use watchlist::services::provision;

const USERNAME: &str = "soraoo";
const PASSWORD: &str = "123456";

async fn spawn_app() -> (Arc<AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("watchlist-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = watchlist::api::create_app_state_from_config(config)
        .await
        .expect("failed to create app state");

    provision::provision_admin(state.store(), &state.config().security, USERNAME, PASSWORD)
        .await
        .expect("failed to provision admin");

    let router = watchlist::api::router(state.clone());
    (state, router)
}

/// Minimal browser: replays the last session cookie it was given.
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> Response<Body> {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri), Body::empty()).await
    }

    async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(form.to_string()),
        )
        .await
    }

    async fn get_text(&mut self, uri: &str) -> (StatusCode, String) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_text(response).await)
    }

    async fn login(&mut self) {
        let response = self
            .post_form("/login", &format!("username={USERNAME}&password={PASSWORD}"))
            .await;
        assert_redirect(&response, "/");
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        location
    );
}

#[tokio::test]
async fn anonymous_index_lists_movies_without_owner_controls() {
    let (state, app) = spawn_app().await;
    state.store().create_movie("Leon", "1994").await.unwrap();
    let mut browser = Browser::new(app);

    let (status, body) = browser.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("1 Titles"));
    assert!(body.contains("Leon - 1994"));
    assert!(body.contains("href=\"/login\""));
    assert!(!body.contains("/movie/edit/"));
    assert!(!body.contains("name=\"title\""));
}

#[tokio::test]
async fn login_then_create_shows_movie_in_list() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    browser.login().await;
    let response = browser.post_form("/", "title=Paprika&year=2006").await;
    assert_redirect(&response, "/");

    let (status, body) = browser.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Paprika - 2006"));
    assert!(body.contains("Item created."));
    assert!(body.contains("Admin's Watchlist"));
    assert!(body.contains("href=\"/logout\""));

    let movies = state.store().list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Paprika");

    // Notices are shown once.
    let (_, body) = browser.get_text("/").await;
    assert!(!body.contains("Item created."));
}

#[tokio::test]
async fn create_with_empty_title_is_rejected() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    let response = browser.post_form("/", "title=&year=2020").await;
    assert_redirect(&response, "/");

    assert!(state.store().list_movies().await.unwrap().is_empty());
    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Invalid input."));
}

#[tokio::test]
async fn create_trims_fields() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    browser
        .post_form("/", "title=%20%20Spirited%20Away%20&year=%202001%20")
        .await;

    let movies = state.store().list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Spirited Away");
    assert_eq!(movies[0].year, "2001");
}

#[tokio::test]
async fn wrong_password_stays_anonymous() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser
        .post_form("/login", &format!("username={USERNAME}&password=wrong"))
        .await;
    assert_redirect(&response, "/");

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Invalid username or password."));
    assert!(body.contains("href=\"/login\""));
    assert!(!body.contains("href=\"/logout\""));

    let response = browser.post_form("/", "title=Paprika&year=2006").await;
    assert_redirect(&response, "/");
    assert!(state.store().list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_gets_same_notice_as_wrong_password() {
    let (_, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser.post_form("/login", "username=nobody&password=123456").await;
    assert_redirect(&response, "/");

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn blank_login_fields_are_invalid_input() {
    let (_, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser.post_form("/login", "username=%20&password=").await;
    assert_redirect(&response, "/login");

    let (status, body) = browser.get_text("/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid input."));
}

#[tokio::test]
async fn anonymous_mutations_are_rejected() {
    let (state, app) = spawn_app().await;
    let movie = state.store().create_movie("Leon", "1994").await.unwrap();
    let mut browser = Browser::new(app);

    let response = browser.post_form("/", "title=Paprika&year=2006").await;
    assert_redirect(&response, "/");

    let edit_uri = format!("/movie/edit/{}", movie.id);
    let response = browser.get(&edit_uri).await;
    assert_redirect(&response, "/login");

    let response = browser.post_form(&edit_uri, "title=Changed&year=2000").await;
    assert_redirect(&response, "/login");

    let response = browser
        .post_form(&format!("/movie/delete/{}", movie.id), "")
        .await;
    assert_redirect(&response, "/login");

    let response = browser.post_form("/settings", "name=Intruder").await;
    assert_redirect(&response, "/login");

    let response = browser.get("/logout").await;
    assert_redirect(&response, "/login");

    assert_eq!(state.store().list_movies().await.unwrap(), vec![movie]);
    let admin = state
        .store()
        .find_user_by_username(USERNAME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.name, "Admin");

    let (_, body) = browser.get_text("/login").await;
    assert!(body.contains("Please log in."));
}

#[tokio::test]
async fn edit_flow() {
    let (state, app) = spawn_app().await;
    let movie = state.store().create_movie("Mahjong", "1996").await.unwrap();
    let mut browser = Browser::new(app);
    browser.login().await;

    let edit_uri = format!("/movie/edit/{}", movie.id);
    let (status, body) = browser.get_text(&edit_uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Mahjong\""));
    assert!(body.contains("value=\"1996\""));

    let response = browser.post_form(&edit_uri, "title=&year=1996").await;
    assert_redirect(&response, &edit_uri);
    assert_eq!(
        state.store().get_movie(movie.id).await.unwrap().unwrap().title,
        "Mahjong"
    );

    let response = browser
        .post_form(&edit_uri, "title=King+of+Comedy&year=1999")
        .await;
    assert_redirect(&response, "/");

    let updated = state.store().get_movie(movie.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "King of Comedy");
    assert_eq!(updated.year, "1999");
}

#[tokio::test]
async fn edit_missing_movie_is_404() {
    let (_, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    let (status, body) = browser.get_text("/movie/edit/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));

    let response = browser
        .post_form("/movie/edit/9999", "title=Ghost&year=2000")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = browser.get_text("/movie/edit/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_flow() {
    let (state, app) = spawn_app().await;
    let keep = state.store().create_movie("Leon", "1994").await.unwrap();
    let gone = state.store().create_movie("WALL-E", "2008").await.unwrap();
    let mut browser = Browser::new(app);
    browser.login().await;

    let delete_uri = format!("/movie/delete/{}", gone.id);
    let response = browser.post_form(&delete_uri, "").await;
    assert_redirect(&response, "/");
    assert_eq!(state.store().list_movies().await.unwrap(), vec![keep.clone()]);

    let response = browser.post_form(&delete_uri, "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.store().list_movies().await.unwrap(), vec![keep]);

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Item deleted."));
}

#[tokio::test]
async fn settings_updates_display_name() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    let (status, body) = browser.get_text("/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Admin\""));

    let response = browser
        .post_form("/settings", &format!("name={}", "n".repeat(21)))
        .await;
    assert_redirect(&response, "/settings");

    let response = browser.post_form("/settings", "name=Satoshi").await;
    assert_redirect(&response, "/");

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Satoshi's Watchlist"));
    assert!(body.contains("Settings updated."));

    let user = state
        .store()
        .find_user_by_username(USERNAME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Satoshi");
}

#[tokio::test]
async fn logout_returns_to_anonymous() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    let response = browser.get("/logout").await;
    assert_redirect(&response, "/");

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Goodbye."));
    assert!(body.contains("href=\"/login\""));

    let response = browser.post_form("/", "title=Paprika&year=2006").await;
    assert_redirect(&response, "/");
    assert!(state.store().list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn unmatched_route_is_404() {
    let (_, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let (status, body) = browser.get_text("/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let (_, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser.get("/static/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );

    let response = browser.get("/static/missing.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forged_session_cookie_is_ignored() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.cookie = Some("id=forged-session-value".to_string());

    let response = browser.post_form("/", "title=Paprika&year=2006").await;
    assert_redirect(&response, "/");
    assert!(state.store().list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_create_with_non_form_body_redirects_home() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser
        .send(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json"),
            Body::from("{}"),
        )
        .await;
    assert_redirect(&response, "/");
    assert!(state.store().list_movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_create_body_is_invalid_input() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);
    browser.login().await;

    let response = browser
        .send(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json"),
            Body::from(r#"{"title":"Paprika","year":"2006"}"#),
        )
        .await;
    assert_redirect(&response, "/");
    assert!(state.store().list_movies().await.unwrap().is_empty());

    let (_, body) = browser.get_text("/").await;
    assert!(body.contains("Invalid input."));
}

async fn session_rows(state: &AppState) -> i64 {
    let conn = &state.store().conn;
    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            "SELECT COUNT(*) AS n FROM tower_sessions".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn expired_sessions_are_deleted() {
    let (state, app) = spawn_app().await;
    let mut browser = Browser::new(app);

    let response = browser.get("/settings").await;
    assert_redirect(&response, "/login");
    assert_eq!(session_rows(&state).await, 1);

    state.session_store().delete_expired().await.unwrap();
    assert_eq!(session_rows(&state).await, 1);

    let conn = &state.store().conn;
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "UPDATE tower_sessions SET expiry_date = 0".to_string(),
    ))
    .await
    .unwrap();

    state.session_store().delete_expired().await.unwrap();
    assert_eq!(session_rows(&state).await, 0);
}
