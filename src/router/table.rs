use super::pattern::{Captures, Pattern};
use crate::error::RouterError;
use crate::handler::{Action, NotFoundFn};
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Separator between methods in a registration method list (`"GET|POST"`).
pub const METHOD_LIST_SEPARATOR: char = '|';

/// One registered (method, pattern, action) triple.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    method: Method,
    pattern: Pattern,
    action: Action,
}

impl RouteEntry {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.pattern, self.action)
    }
}

/// Which of the two route lists to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteList {
    /// Pre-dispatch routes (guards); never counted.
    Before,
    /// Main routes.
    Main,
}

impl RouteList {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RouteList::Before => "before",
            RouteList::Main => "main",
        }
    }
}

/// A matching entry together with the captures its pattern produced.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub captures: Captures,
}

impl RouteMatch<'_> {
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.entry.action
    }
}

/// Ordered before/main route lists plus the not-found slot.
///
/// Registration order is the evaluation order, and every matching entry
/// fires: two routes with the same method and pattern both run for one
/// request.
#[derive(Clone)]
pub struct RouteTable {
    before_routes: Vec<RouteEntry>,
    main_routes: Vec<RouteEntry>,
    not_found: Arc<NotFoundFn>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// An empty table whose not-found handler does nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            before_routes: Vec::new(),
            main_routes: Vec::new(),
            not_found: Arc::new(|| {}),
        }
    }

    /// Append before-routes, one per method in `methods`.
    ///
    /// # Errors
    ///
    /// [`RouterError::Pattern`] or [`RouterError::Method`]; nothing is
    /// appended on error.
    pub fn register_before(
        &mut self,
        methods: &str,
        pattern: &str,
        action: Action,
    ) -> Result<(), RouterError> {
        let entries = build_entries(methods, pattern, action)?;
        self.before_routes.extend(entries);
        Ok(())
    }

    /// Append main routes, one per method in `methods`.
    ///
    /// # Errors
    ///
    /// [`RouterError::Pattern`] or [`RouterError::Method`]; nothing is
    /// appended on error.
    pub fn register(
        &mut self,
        methods: &str,
        pattern: &str,
        action: Action,
    ) -> Result<(), RouterError> {
        let entries = build_entries(methods, pattern, action)?;
        self.main_routes.extend(entries);
        Ok(())
    }

    /// Replace the not-found handler. The last call wins.
    pub fn set_not_found<F>(&mut self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.not_found = Arc::new(handler);
    }

    #[must_use]
    pub fn not_found(&self) -> &NotFoundFn {
        self.not_found.as_ref()
    }

    #[must_use]
    pub fn list(&self, list: RouteList) -> &[RouteEntry] {
        match list {
            RouteList::Before => &self.before_routes,
            RouteList::Main => &self.main_routes,
        }
    }

    /// Total number of entries in both lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.before_routes.len() + self.main_routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before_routes.is_empty() && self.main_routes.is_empty()
    }

    /// Lazily yield every entry of `list` matching `method` and `path`, in
    /// registration order.
    ///
    /// `path` must already be normalized (no leading separator). Each pattern
    /// is only evaluated when the iterator is advanced, so a caller that
    /// invokes each match before pulling the next one runs handlers strictly
    /// in sequence.
    pub fn matches<'a>(
        &'a self,
        list: RouteList,
        method: &'a Method,
        path: &'a str,
    ) -> impl Iterator<Item = RouteMatch<'a>> + 'a {
        self.list(list)
            .iter()
            .filter(move |entry| entry.method == *method)
            .filter_map(move |entry| {
                entry
                    .pattern
                    .captures(path)
                    .map(|captures| RouteMatch { entry, captures })
            })
    }

    /// Collect every match of `list` for `method` and `path`.
    #[must_use]
    pub fn match_all<'a>(
        &'a self,
        list: RouteList,
        method: &'a Method,
        path: &'a str,
    ) -> Vec<RouteMatch<'a>> {
        self.matches(list, method, path).collect()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("before_routes", &self.before_routes)
            .field("main_routes", &self.main_routes)
            .finish_non_exhaustive()
    }
}

/// Split a method list and build one entry per method sharing one compiled
/// pattern.
fn build_entries(
    methods: &str,
    pattern: &str,
    action: Action,
) -> Result<Vec<RouteEntry>, RouterError> {
    let pattern = Pattern::new(pattern)?;

    let parsed = methods
        .split(METHOD_LIST_SEPARATOR)
        .map(|segment| {
            if segment.is_empty() {
                return Err(method_error(methods, segment));
            }
            Method::from_bytes(segment.as_bytes()).map_err(|_| method_error(methods, segment))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(parsed
        .into_iter()
        .map(|method| RouteEntry {
            method,
            pattern: pattern.clone(),
            action: action.clone(),
        })
        .collect())
}

fn method_error(methods: &str, segment: &str) -> RouterError {
    RouterError::Method {
        methods: methods.to_string(),
        segment: segment.to_string(),
    }
}
