use std::sync::Arc;
use std::time::Duration;

use api::mailer::{MailError, Mailer, OutgoingMail};
use api::{ContactService, Credentials, Dispatcher, NoteRepository, Settings};
use argon2::Params;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use store::MemoryStore;
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;
use web::AppState;

struct StubMailer {
    fail: bool,
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
        if self.fail {
            Err(MailError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn test_app(mail_fails: bool) -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let settings = Settings::default();
    let timeout = Duration::from_secs(5);
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(StubMailer { fail: mail_fails }), &settings.mail);
    let state = AppState::new(
        Credentials::new(Arc::new(store.clone()), timeout).with_params(params),
        NoteRepository::new(Arc::new(store.clone()), timeout),
        ContactService::new(Arc::new(store.clone()), dispatcher, timeout),
        settings,
    );
    let sessions = SessionManagerLayer::new(tower_sessions::MemoryStore::default()).with_secure(false);
    (web::app(state, sessions), store)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("response sets a session cookie");
    set_cookie.split(';').next().unwrap().to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Register and sign in; returns the authenticated session cookie.
async fn sign_in_new_user(app: &Router, name: &str, email: &str) -> String {
    let form = format!("name={name}&email={email}&password=secret1&confirm_password=secret1");
    let response = send(app, post_form("/users/signup", &form, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usuarios/ingreso");

    let form = format!("email={email}&password=secret1");
    let response = send(app, post_form("/users/signin", &form, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notas");
    session_cookie(&response)
}

#[tokio::test]
async fn test_anonymous_requests_redirect_to_signin() {
    let (app, _) = test_app(false);
    for uri in ["/notas", "/notas/agregar", "/faq", "/contacto", "/usuarios/salir"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/usuarios/ingreso", "{uri}");
    }
}

#[tokio::test]
async fn test_public_pages_render_with_security_headers() {
    let (app, _) = test_app(false);
    for uri in ["/", "/privacidad", "/terminos", "/usuarios/registro", "/usuarios/ingreso"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
    }
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let (app, _) = test_app(false);
    let response = send(&app, get("/no-existe", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("La página que buscas no existe"));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (app, _) = test_app(false);
    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_wrong_password_flashes_and_redirects() {
    let (app, _) = test_app(false);
    sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(
        &app,
        post_form("/users/signin", "email=alice@example.com&password=wrong", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usuarios/ingreso");

    let cookie = session_cookie(&response);
    let page = body_text(send(&app, get("/usuarios/ingreso", Some(&cookie))).await).await;
    assert!(page.contains("Correo o contraseña incorrectos"));
}

#[tokio::test]
async fn test_signin_rotates_the_session_id() {
    let (app, _) = test_app(false);
    sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(
        &app,
        post_form("/users/signin", "email=alice@example.com&password=wrong", None),
    )
    .await;
    let before = session_cookie(&response);

    let response = send(
        &app,
        post_form("/users/signin", "email=alice@example.com&password=secret1", Some(&before)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notas");
    let after = session_cookie(&response);
    assert_ne!(before, after);

    let response = send(&app, get("/notas", Some(&after))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/notas", Some(&before))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usuarios/ingreso");
}

#[tokio::test]
async fn test_duplicate_email_rerenders_signup() {
    let (app, _) = test_app(false);
    sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let form = "name=Other&email=ALICE@example.com&password=secret1&confirm_password=secret1";
    let response = send(&app, post_form("/users/signup", form, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("El correo ya está en uso"));
}

#[tokio::test]
async fn test_created_note_is_listed_once() {
    let (app, store) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(
        &app,
        post_form("/notas/nota-nueva", "title=Groceries&body=milk", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notas");

    let page = body_text(send(&app, get("/notas", Some(&cookie))).await).await;
    assert_eq!(page.matches("Groceries").count(), 1);
    assert!(page.contains("Nota agregada exitosamente"));
    assert_eq!(store.all_notes().len(), 1);
}

#[tokio::test]
async fn test_blank_note_rerenders_form() {
    let (app, store) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(
        &app,
        post_form("/notas/nota-nueva", "title=+++&body=milk", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Por favor escribe un título"));
    assert!(store.all_notes().is_empty());
}

#[tokio::test]
async fn test_other_users_cannot_touch_a_note() {
    let (app, store) = test_app(false);
    let alice = sign_in_new_user(&app, "Alice", "alice@example.com").await;
    let bob = sign_in_new_user(&app, "Bob", "bob@example.com").await;

    send(&app, post_form("/notas/nota-nueva", "title=Groceries&body=milk", Some(&alice))).await;
    let id = store.all_notes()[0].id;

    let response = send(&app, get(&format!("/notas/editar/{id}"), Some(&bob))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notas");

    let response = send(
        &app,
        post_form(&format!("/notas/editar/{id}?_method=PUT"), "title=Hacked&body=x", Some(&bob)),
    )
    .await;
    assert_eq!(location(&response), "/notas");

    let response = send(
        &app,
        post_form(&format!("/notas/borrar/{id}?_method=DELETE"), "", Some(&bob)),
    )
    .await;
    assert_eq!(location(&response), "/notas");

    let notes = store.all_notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Groceries");

    let page = body_text(send(&app, get("/notas", Some(&bob))).await).await;
    assert!(!page.contains("Groceries"));
}

#[tokio::test]
async fn test_owner_updates_and_deletes_through_method_override() {
    let (app, store) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;
    send(&app, post_form("/notas/nota-nueva", "title=Groceries&body=milk", Some(&cookie))).await;
    let id = store.all_notes()[0].id;

    let response = send(&app, get(&format!("/notas/editar/{id}"), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Groceries"));

    let response = send(
        &app,
        post_form(&format!("/notas/editar/{id}?_method=PUT"), "title=Groceries&body=eggs", Some(&cookie)),
    )
    .await;
    assert_eq!(location(&response), "/notas");
    assert_eq!(store.all_notes()[0].body, "eggs");

    let response = send(
        &app,
        post_form(&format!("/notas/borrar/{id}?_method=DELETE"), "", Some(&cookie)),
    )
    .await;
    assert_eq!(location(&response), "/notas");
    assert!(store.all_notes().is_empty());
}

#[tokio::test]
async fn test_malformed_note_id_is_not_found() {
    let (app, _) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;
    let response = send(&app, get("/notas/editar/not-a-uuid", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notas");
}

#[tokio::test]
async fn test_empty_contact_message_is_not_stored() {
    let (app, store) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(
        &app,
        post_form("/contacto", "name=Alice&email=alice@example.com&subject=Hola&message=", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/contacto");
    assert!(store.contacts().is_empty());
}

#[tokio::test]
async fn test_contact_is_stored_when_mail_fails() {
    let (app, store) = test_app(true);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let mut request = post_form(
        "/contacto",
        "name=Alice&email=Alice@Example.com&subject=Hola&message=Necesito+ayuda",
        Some(&cookie),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
    let response = send(&app, request).await;
    assert_eq!(location(&response), "/contacto");

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].email, "alice@example.com");
    assert_eq!(contacts[0].ip_address.as_deref(), Some("203.0.113.7"));
    assert!(contacts[0].user_id.is_some());

    let page = body_text(send(&app, get("/contacto", Some(&cookie))).await).await;
    assert!(page.contains("Tu mensaje ha sido guardado"));
}

#[tokio::test]
async fn test_signing_out_twice_is_harmless() {
    let (app, _) = test_app(false);
    let cookie = sign_in_new_user(&app, "Alice", "alice@example.com").await;

    let response = send(&app, get("/usuarios/salir", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usuarios/ingreso");

    let response = send(&app, get("/usuarios/salir", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/usuarios/ingreso");

    let response = send(&app, get("/notas", Some(&cookie))).await;
    assert_eq!(location(&response), "/usuarios/ingreso");
}
