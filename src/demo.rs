//! Demo application: a small site wired onto the dispatcher.
//!
//! The handlers write into a [`DemoResponse`] shared through
//! [`SharedResponse`]. Once a handler calls [`DemoResponse::finish`] every
//! later write is dropped, which is how the admin guard and the API routes
//! end a request early without the router knowing about it.

use crate::context::RequestContext;
use crate::controller::ControllerLoader;
use crate::controllers::UserController;
use crate::dispatcher::Dispatcher;
use crate::error::RouterError;
use crate::handler::Action;
use crate::registry::ControllerRegistry;
use crate::resolver::HandlerResolver;
use crate::runtime_config::RouterConfig;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, PoisonError};

/// Minimum session level that may enter `admin/...` pages.
pub const ADMIN_LEVEL: u8 = 2;

/// Response assembled by the demo handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Set once a handler has ended the request
    pub finished: bool,
}

impl Default for DemoResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
            finished: false,
        }
    }
}

impl DemoResponse {
    pub fn write(&mut self, text: &str) {
        if !self.finished {
            self.body.push_str(text);
        }
    }

    pub fn set_status(&mut self, status: u16) {
        if !self.finished {
            self.status = status;
        }
    }

    /// Add or replace a header (case-insensitive name).
    pub fn set_header(&mut self, name: &str, value: &str) {
        if self.finished {
            return;
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// End the request; later writes are ignored.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

pub type SharedResponse = Arc<Mutex<DemoResponse>>;

/// Run `f` against the shared response.
pub fn with_response<F, R>(response: &SharedResponse, f: F) -> R
where
    F: FnOnce(&mut DemoResponse) -> R,
{
    let mut guard = response.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Everything the demo knows about the incoming request.
#[derive(Debug, Clone)]
pub struct DemoRequest {
    pub context: RequestContext,
    /// Session user level; admin pages need [`ADMIN_LEVEL`]
    pub user_level: u8,
    /// Basic-auth credentials, if any
    pub auth: Option<(String, String)>,
    /// Posted JSON body
    pub body: Option<Value>,
}

impl DemoRequest {
    #[must_use]
    pub fn new(context: RequestContext) -> Self {
        Self {
            context,
            user_level: 0,
            auth: None,
            body: None,
        }
    }
}

/// Build the demo dispatcher for one request.
///
/// # Errors
///
/// Only if one of the demo routes fails to register, which would be a bug.
pub fn build_app(
    request: &DemoRequest,
    response: &SharedResponse,
    config: &RouterConfig,
) -> Result<Dispatcher, RouterError> {
    let mut registry = ControllerRegistry::new();
    let user_response = Arc::clone(response);
    registry.register("user", move || UserController::new(Arc::clone(&user_response)));

    let loader = ControllerLoader::from_config(config, registry);
    let mut app = Dispatcher::new(HandlerResolver::new(loader));

    let out = Arc::clone(response);
    app.add_get("", Action::handler(move |_| {
        with_response(&out, |r| r.write("Homepage!"));
    }))?;

    // /test has two definitions and both run
    let out = Arc::clone(response);
    app.add_get("test", Action::handler(move |_| {
        with_response(&out, |r| r.write("Test, first definition!<br>"));
    }))?;
    let out = Arc::clone(response);
    app.add_get("test", Action::handler(move |_| {
        with_response(&out, |r| r.write("Test, second definition!<br>"));
    }))?;

    let out = Arc::clone(response);
    let level = request.user_level;
    let login_url = request.context.build_url("login");
    app.add_before("GET", "/admin/(.*)", Action::handler(move |_| {
        if level >= ADMIN_LEVEL {
            return;
        }
        with_response(&out, |r| {
            r.set_status(302);
            r.set_header("Location", &login_url);
            r.finish();
        });
    }))?;

    let out = Arc::clone(response);
    app.add_get(r"admin/deleteUser/(\d+)", Action::handler(move |caps| {
        if let [id] = caps {
            with_response(&out, |r| r.write(&format!("Delete user {id}!")));
        }
    }))?;

    let out = Arc::clone(response);
    app.add("GET", r"admin/renameUser/(\d+)/(\w+)=(\w+)", Action::handler(move |caps| {
        if let [id, to, from] = caps {
            with_response(&out, |r| {
                r.write(&format!("Rename user {id} from {from} to {to}!"));
            });
        }
    }))?;

    app.add("GET", "/login", Action::controller("user@login")?)?;
    app.add_get("logout", Action::controller("user@logout")?)?;
    app.add("POST", "/loggedin", Action::controller("user@loggedin")?)?;

    let out = Arc::clone(response);
    app.add_404(move || {
        with_response(&out, |r| {
            r.set_status(404);
            r.write("404!");
            r.finish();
        });
    });

    let out = Arc::clone(response);
    let auth = request.auth.clone();
    app.add("POST", "api/showAllUsers", Action::handler(move |_| {
        with_response(&out, |r| {
            if auth.is_none() {
                r.set_status(403);
                r.finish();
                return;
            }
            json_headers(r);
            let users: Vec<Value> = (1..=10)
                .map(|i| json!({ "id": i, "name": format!("Name{i}") }))
                .collect();
            r.write(&Value::Array(users).to_string());
            r.finish();
        });
    }))?;

    let out = Arc::clone(response);
    let auth = request.auth.clone();
    let data = request.body.clone().unwrap_or(Value::Null);
    app.add("POST", "api/sendback", Action::handler(move |_| {
        let (user, pw) = auth
            .clone()
            .unwrap_or_else(|| ("unknown".to_string(), "unknown".to_string()));
        let payload = json!({
            "response": {
                "send_data": data,
                "auth": { "user": user, "pw": pw }
            }
        });
        with_response(&out, |r| {
            json_headers(r);
            r.write(&payload.to_string());
            r.finish();
        });
    }))?;

    Ok(app)
}

fn json_headers(r: &mut DemoResponse) {
    r.set_header("Access-Control-Allow-Origin", "*");
    r.set_header("Content-Type", "application/json; charset=UTF-8");
}

/// Build the demo app, serve `request` and return the response with the
/// dispatch count.
///
/// # Errors
///
/// See [`build_app`].
pub fn run(
    request: &DemoRequest,
    config: &RouterConfig,
) -> Result<(DemoResponse, usize), RouterError> {
    let response = SharedResponse::default();
    let app = build_app(request, &response, config)?;
    let count = app.serve_request(&request.context);
    let out = with_response(&response, |r| r.clone());
    Ok((out, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn config_with_user_controller() -> (tempfile::TempDir, RouterConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("user.rs"), "// user controller\n").unwrap();
        let config = RouterConfig {
            controller_dir: dir.path().to_path_buf(),
            controller_extension: ".rs".to_string(),
        };
        (dir, config)
    }

    fn get(path: &str) -> DemoRequest {
        DemoRequest::new(RequestContext::from_uri(Method::GET, path))
    }

    #[test]
    fn test_homepage() {
        let (_dir, config) = config_with_user_controller();
        let (resp, count) = run(&get("/"), &config).unwrap();
        assert_eq!(count, 1);
        assert_eq!(resp.body, "Homepage!");
    }

    #[test]
    fn test_duplicate_test_routes() {
        let (_dir, config) = config_with_user_controller();
        let (resp, count) = run(&get("/test"), &config).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            resp.body,
            "Test, first definition!<br>Test, second definition!<br>"
        );
    }

    #[test]
    fn test_admin_guard_redirects_and_suppresses_output() {
        let (_dir, config) = config_with_user_controller();
        let mut request = get("/admin/deleteUser/1673");
        request.context = request.context.with_script_name("/app/index.php");
        let (resp, count) = run(&request, &config).unwrap();
        // the main route still fires; its output is dropped
        assert_eq!(count, 1);
        assert_eq!(resp.status, 302);
        assert_eq!(resp.header("location"), Some("/app/login"));
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_admin_rename_as_admin() {
        let (_dir, config) = config_with_user_controller();
        let mut request = get("/admin/renameUser/7/Swen=Test");
        request.user_level = ADMIN_LEVEL;
        let (resp, count) = run(&request, &config).unwrap();
        assert_eq!(count, 1);
        assert_eq!(resp.body, "Rename user 7 from Test to Swen!");
    }

    #[test]
    fn test_not_found() {
        let (_dir, config) = config_with_user_controller();
        let (resp, count) = run(&get("/nope"), &config).unwrap();
        assert_eq!(count, 1);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, "404!");
    }

    #[test]
    fn test_controller_routes() {
        let (_dir, config) = config_with_user_controller();
        let (resp, count) = run(&get("/login"), &config).unwrap();
        assert_eq!(count, 1);
        assert!(resp.body.contains("Login"));

        let post = DemoRequest::new(RequestContext::from_uri(Method::POST, "/loggedin"));
        let (resp, count) = run(&post, &config).unwrap();
        assert_eq!(count, 1);
        assert!(resp.body.contains("Logged in"));
    }

    #[test]
    fn test_missing_controller_file_falls_through_to_404() {
        let dir = tempfile::tempdir().unwrap();
        let config = RouterConfig {
            controller_dir: dir.path().to_path_buf(),
            controller_extension: ".rs".to_string(),
        };
        let (resp, count) = run(&get("/login"), &config).unwrap();
        assert_eq!(count, 1);
        assert_eq!(resp.body, "404!");
    }

    #[test]
    fn test_show_all_users_requires_auth() {
        let (_dir, config) = config_with_user_controller();
        let anon = DemoRequest::new(RequestContext::from_uri(Method::POST, "/api/showAllUsers"));
        let (resp, _) = run(&anon, &config).unwrap();
        assert_eq!(resp.status, 403);
        assert!(resp.body.is_empty());

        let mut authed = anon.clone();
        authed.auth = Some(("swen".to_string(), "secret".to_string()));
        let (resp, _) = run(&authed, &config).unwrap();
        assert_eq!(resp.status, 200);
        let users: Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(users.as_array().map(Vec::len), Some(10));
        assert_eq!(users[0]["name"], "Name1");
    }

    #[test]
    fn test_sendback_echoes_body() {
        let (_dir, config) = config_with_user_controller();
        let mut request =
            DemoRequest::new(RequestContext::from_uri(Method::POST, "/api/sendback"));
        request.body = Some(json!({ "hello": "world" }));
        let (resp, _) = run(&request, &config).unwrap();
        let body: Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["response"]["send_data"]["hello"], "world");
        assert_eq!(body["response"]["auth"]["user"], "unknown");
        assert_eq!(
            resp.header("content-type"),
            Some("application/json; charset=UTF-8")
        );
    }
}
