//! Controller for the `user@...` routes of the demo application.

use crate::controller::{Controller, MethodCall};
use crate::demo::{with_response, SharedResponse};

pub struct UserController {
    response: SharedResponse,
}

impl UserController {
    #[must_use]
    pub fn new(response: SharedResponse) -> Self {
        Self { response }
    }

    fn login(&mut self, _captures: &[String]) {
        with_response(&self.response, |r| {
            r.write("<h1>Login</h1><form method=\"post\" action=\"loggedin\"></form>");
        });
    }

    fn logout(&mut self, _captures: &[String]) {
        with_response(&self.response, |r| r.write("You have been logged out."));
    }

    fn loggedin(&mut self, _captures: &[String]) {
        with_response(&self.response, |r| r.write("Logged in!"));
    }
}

impl Controller for UserController {
    fn call(&mut self, method: &str, captures: &[String]) -> MethodCall {
        match method {
            "login" => self.login(captures),
            "logout" => self.logout(captures),
            "loggedin" => self.loggedin(captures),
            _ => return MethodCall::NoSuchMethod,
        }
        MethodCall::Handled
    }

    fn index(&mut self) {
        with_response(&self.response, |r| r.write("User overview"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_method_writes_nothing() {
        let response = SharedResponse::default();
        let mut controller = UserController::new(std::sync::Arc::clone(&response));
        assert_eq!(controller.call("delete", &[]), MethodCall::NoSuchMethod);
        assert!(with_response(&response, |r| r.body.is_empty()));
        controller.index();
        assert_eq!(with_response(&response, |r| r.body.clone()), "User overview");
    }
}
