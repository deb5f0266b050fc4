use crate::error::RouterError;
use std::fmt;
use std::str::FromStr;

/// Separator between the controller part and the method name.
pub const METHOD_SEPARATOR: char = '@';

/// Characters accepted as namespace separators in a controller reference.
pub const NAMESPACE_SEPARATORS: [char; 2] = ['\\', '/'];

/// A parsed `namespace\Controller@method` reference.
///
/// The namespace is everything before the last separator, the controller
/// name runs from there up to the first `@`, and the method is whatever
/// follows the `@`. The namespace is kept with `/` separators so it can be
/// joined onto the controller directory directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    namespace_path: String,
    controller_name: String,
    method_name: Option<String>,
}

impl ControllerRef {
    /// Parse a controller reference.
    ///
    /// ```
    /// use multiroute::controller::ControllerRef;
    ///
    /// let r = ControllerRef::parse(r"admin\tools\user@login").unwrap();
    /// assert_eq!(r.namespace_path(), "admin/tools");
    /// assert_eq!(r.controller_name(), "user");
    /// assert_eq!(r.method_name(), Some("login"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ControllerRef`] if the controller name is empty.
    pub fn parse(reference: &str) -> Result<Self, RouterError> {
        let (target, method) = match reference.split_once(METHOD_SEPARATOR) {
            Some((target, method)) => (target, Some(method).filter(|m| !m.is_empty())),
            None => (reference, None),
        };

        let (namespace, name) = match target.rfind(NAMESPACE_SEPARATORS) {
            Some(idx) => (&target[..idx], &target[idx + 1..]),
            None => ("", target),
        };

        if name.is_empty() {
            return Err(RouterError::ControllerRef {
                reference: reference.to_string(),
                reason: "missing controller name",
            });
        }

        Ok(Self {
            namespace_path: normalize_namespace(namespace),
            controller_name: name.to_string(),
            method_name: method.map(str::to_string),
        })
    }

    /// Namespace path relative to the controller directory, `/`-separated.
    /// Empty when the controller lives at the root.
    #[must_use]
    pub fn namespace_path(&self) -> &str {
        &self.namespace_path
    }

    #[must_use]
    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    /// The requested method, or `None` when the reference had no `@method`
    /// segment (the controller's `index` runs instead).
    #[must_use]
    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    /// Namespace and controller name joined with `/`, the key under which the
    /// controller factory is registered.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace_path.is_empty() {
            self.controller_name.clone()
        } else {
            format!("{}/{}", self.namespace_path, self.controller_name)
        }
    }
}

/// Turn `\admin\tools\` or `admin/tools` into `admin/tools`.
pub(crate) fn normalize_namespace(namespace: &str) -> String {
    namespace
        .split(NAMESPACE_SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl FromStr for ControllerRef {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())?;
        if let Some(method) = &self.method_name {
            write!(f, "{METHOD_SEPARATOR}{method}")?;
        }
        Ok(())
    }
}
