#![allow(dead_code)]

pub mod recorder {
    use multiroute::Action;
    use std::sync::{Arc, Mutex};

    /// Collects a line per handler invocation, in call order.
    #[derive(Clone, Default)]
    pub struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn record(&self, line: impl Into<String>) {
            self.calls.lock().unwrap().push(line.into());
        }

        /// An action that records `label` followed by its captures,
        /// e.g. `B1` or `delete[1673]`.
        pub fn action(&self, label: &str) -> Action {
            let recorder = self.clone();
            let label = label.to_string();
            Action::handler(move |caps| {
                if caps.is_empty() {
                    recorder.record(label.clone());
                } else {
                    recorder.record(format!("{}[{}]", label, caps.join(",")));
                }
            })
        }

        /// A not-found handler that records `label`.
        pub fn not_found(&self, label: &str) -> impl Fn() + Send + Sync + 'static {
            let recorder = self.clone();
            let label = label.to_string();
            move || recorder.record(label.clone())
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
    }
}

pub mod controllers {
    use multiroute::{Controller, MethodCall};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::recorder::Recorder;

    /// Test controller with `login` and `show` methods.
    pub struct UserController {
        pub recorder: Recorder,
        pub name: &'static str,
    }

    impl Controller for UserController {
        fn call(&mut self, method: &str, captures: &[String]) -> MethodCall {
            match method {
                "login" | "show" => {
                    self.recorder
                        .record(format!("{}.{}{:?}", self.name, method, captures));
                    MethodCall::Handled
                }
                _ => MethodCall::NoSuchMethod,
            }
        }

        fn index(&mut self) {
            self.recorder.record(format!("{}.index", self.name));
        }
    }

    /// Counts how many instances were constructed.
    pub fn counting_factory(
        recorder: Recorder,
        name: &'static str,
        built: Arc<AtomicUsize>,
    ) -> impl Fn() -> UserController + Send + Sync + 'static {
        move || {
            built.fetch_add(1, Ordering::SeqCst);
            UserController {
                recorder: recorder.clone(),
                name,
            }
        }
    }

    /// Create an (empty) controller source file, including parent dirs.
    pub fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "").unwrap();
    }
}
