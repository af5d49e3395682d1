//! User accounts resource

use crate::models::{ResourceKind, User};
use crate::payload::{Payload, ValidationErrors, Validator, WriteMode};
use crate::resources::{ResourceDesc, ResourceDraft, Routes};

static ROUTES: Routes = Routes {
    list: "/users/get",
    by_id: "/users",
    create: "/users",
    update: "/users",
    delete: "/users",
    toggle_status: None,
};

/// Descriptor for the user management screen.
pub struct Users;

impl ResourceDesc for Users {
    type Model = User;
    type Draft = UserDraft;

    fn kind() -> ResourceKind {
        ResourceKind::User
    }

    fn routes() -> &'static Routes {
        &ROUTES
    }

    fn collection_keys() -> &'static [&'static str] {
        &["users"]
    }
}

/// Input for creating or updating a user account.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    /// Required on create; ignored on update (password changes go through a
    /// separate flow the console does not own).
    pub password: Option<String>,
    pub is_active: bool,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: "user".to_string(),
            password: None,
            is_active: true,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

/// Same shape the login form uses: something before the `@`, something
/// between `@` and `.`, something after.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !domain.contains(char::is_whitespace)
        && !domain.contains('@')
}

impl ResourceDraft for UserDraft {
    fn validate(&self, mode: WriteMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.require_text("name", &self.name, "Name is required");
        v.require_text("email", &self.email, "Email is required");
        if !self.email.trim().is_empty() {
            v.require(
                "email",
                is_valid_email(self.email.trim()),
                "Email address is invalid",
            );
        }
        if mode == WriteMode::Create {
            v.require(
                "password",
                self.password.as_deref().is_some_and(|p| !p.trim().is_empty()),
                "Password is required",
            );
        }
        v.finish()
    }

    fn into_payload(self) -> Payload {
        let mut payload = Payload::new()
            .text("name", &self.name)
            .text("email", &self.email)
            .text("role", &self.role)
            .flag("isActive", self.is_active);
        if let Some(password) = &self.password {
            payload = payload.text("password", password);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_password() {
        let draft = UserDraft::new("John", "john@example.com");
        let errors = draft.validate(WriteMode::Create).unwrap_err();
        assert!(errors.field("password").is_some());

        assert!(draft.validate(WriteMode::Update).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("john@example.com"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("johnexample.com"));
        assert!(!is_valid_email("jo hn@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_payload_omits_absent_password() {
        let payload = UserDraft::new("John", "john@example.com").into_payload();
        match payload.encode() {
            crate::payload::EncodedBody::Json(value) => {
                assert!(value.get("password").is_none());
                assert_eq!(value["role"], "user");
            }
            _ => panic!("expected JSON"),
        }
    }
}
