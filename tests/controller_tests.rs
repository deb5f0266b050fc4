//! Deferred controller resolution through a full dispatcher
//!
//! Controllers are looked up as `<dir>/<namespace>/<name>.rs`; the file
//! must exist on disk and a factory must be registered under the
//! namespace-qualified name.

mod common;

use common::controllers::{counting_factory, touch, UserController};
use common::recorder::Recorder;
use http::Method;
use multiroute::controller::ControllerLoader;
use multiroute::{Action, ControllerRegistry, Dispatcher, HandlerResolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    dispatcher: Dispatcher,
    recorder: Recorder,
    built: Arc<AtomicUsize>,
}

/// A dispatcher whose loader points at a temp dir containing `user.rs` and
/// `admin/report.rs`, with factories for `user`, `admin/report` and
/// `ghost` (which has no file).
fn fixture(routes: &[(&str, &str)]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "user.rs");
    touch(dir.path(), "admin/report.rs");
    touch(dir.path(), "orphan.rs");

    let recorder = Recorder::new();
    let built = Arc::new(AtomicUsize::new(0));
    let mut registry = ControllerRegistry::new();
    registry.register(
        "user",
        counting_factory(recorder.clone(), "user", Arc::clone(&built)),
    );
    registry.register(
        r"admin\report",
        counting_factory(recorder.clone(), "report", Arc::clone(&built)),
    );
    registry.register(
        "ghost",
        counting_factory(recorder.clone(), "ghost", Arc::clone(&built)),
    );

    let loader = ControllerLoader::new(dir.path(), "rs", registry);
    let mut dispatcher = Dispatcher::new(HandlerResolver::new(loader));
    for (pattern, reference) in routes {
        dispatcher
            .add_get(pattern, Action::controller(reference).unwrap())
            .unwrap();
    }
    dispatcher.add_404(recorder.not_found("404"));

    Fixture {
        _dir: dir,
        dispatcher,
        recorder,
        built,
    }
}

#[test]
fn test_controller_method_invoked() {
    let fx = fixture(&[("login", "user@login")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/login"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.login[]"]);
}

#[test]
fn test_controller_receives_captures() {
    let fx = fixture(&[(r"user/(\d+)", "user@show")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/user/42"), 1);
    assert_eq!(fx.recorder.calls(), vec![r#"user.show["42"]"#]);
}

#[test]
fn test_unknown_method_falls_back_to_index() {
    let fx = fixture(&[("profile", "user@profile")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/profile"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.index"]);
}

#[test]
fn test_reference_without_method_calls_index() {
    let fx = fixture(&[("users", "user")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/users"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.index"]);
}

#[test]
fn test_missing_file_is_not_counted() {
    let fx = fixture(&[("ghost", "ghost@login")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/ghost"), 1);
    assert_eq!(fx.recorder.calls(), vec!["404"]);
    assert_eq!(fx.built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_file_does_not_affect_other_matches() {
    let fx = fixture(&[("login", "ghost@login"), ("login", "user@login")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/login"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.login[]"]);
}

#[test]
fn test_file_without_factory_is_not_counted() {
    let fx = fixture(&[("orphan", "orphan@run")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/orphan"), 1);
    assert_eq!(fx.recorder.calls(), vec!["404"]);
}

#[test]
fn test_namespaced_controller() {
    let fx = fixture(&[("report", r"admin\report@show"), ("report2", "admin/report@show")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/report"), 1);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/report2"), 1);
    assert_eq!(fx.recorder.calls(), vec!["report.show[]", "report.show[]"]);
    assert_eq!(fx.dispatcher.resolver().loader().loaded_count(), 1);
}

#[test]
fn test_fresh_instance_per_invocation() {
    let fx = fixture(&[("login", "user@login"), ("login", "user@login")]);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/login"), 2);
    assert_eq!(fx.dispatcher.serve(&Method::GET, "/login"), 2);
    assert_eq!(fx.built.load(Ordering::SeqCst), 4);
    assert_eq!(fx.dispatcher.resolver().loader().loaded_count(), 1);
}

#[test]
fn test_concurrent_first_load_stores_one_entry() {
    let fx = fixture(&[("login", "user@login")]);
    let dispatcher = &fx.dispatcher;

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(move || {
                for _ in 0..10 {
                    assert_eq!(dispatcher.serve(&Method::GET, "/login"), 1);
                }
            });
        }
    });

    assert_eq!(dispatcher.resolver().loader().loaded_count(), 1);
    assert_eq!(fx.built.load(Ordering::SeqCst), 80);
    assert_eq!(fx.recorder.calls().len(), 80);
}

#[test]
fn test_panicking_controller_is_isolated() {
    struct Exploding;
    impl multiroute::Controller for Exploding {
        fn call(&mut self, _method: &str, _captures: &[String]) -> multiroute::MethodCall {
            panic!("controller failure")
        }
        fn index(&mut self) {}
    }

    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "boom.rs");
    touch(dir.path(), "user.rs");
    let recorder = Recorder::new();
    let mut registry = ControllerRegistry::new();
    registry.register("boom", || Exploding);
    let rec = recorder.clone();
    registry.register("user", move || UserController {
        recorder: rec.clone(),
        name: "user",
    });

    let mut d = Dispatcher::new(HandlerResolver::new(ControllerLoader::new(
        dir.path(),
        ".rs",
        registry,
    )));
    d.add_get("go", Action::controller("boom@run").unwrap()).unwrap();
    d.add_get("go", Action::controller("user@login").unwrap()).unwrap();

    assert_eq!(d.serve(&Method::GET, "/go"), 1);
    assert_eq!(recorder.calls(), vec!["user.login[]"]);
}

#[test]
fn test_controller_before_route_runs_and_is_not_counted() {
    let fx = fixture(&[]);
    let mut d = fx.dispatcher;
    d.add_before_get(r"secure/.*", Action::controller("user@login").unwrap())
        .unwrap();
    d.add_before_get(r"secure/.*", Action::controller("ghost@login").unwrap())
        .unwrap();
    d.add_get(r"secure/(\w+)", Action::controller("user@show").unwrap())
        .unwrap();

    assert_eq!(d.serve(&Method::GET, "/secure/area"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.login[]", r#"user.show["area"]"#]);
}

#[test]
fn test_controller_before_route_alone_still_reaches_not_found() {
    let fx = fixture(&[]);
    let mut d = fx.dispatcher;
    d.add_before_get(".*", Action::controller("user").unwrap())
        .unwrap();
    d.add_before_get(".*", Action::controller("ghost@login").unwrap())
        .unwrap();

    assert_eq!(d.serve(&Method::GET, "/anything"), 1);
    assert_eq!(fx.recorder.calls(), vec!["user.index", "404"]);
    assert_eq!(fx.built.load(Ordering::SeqCst), 1);
}
