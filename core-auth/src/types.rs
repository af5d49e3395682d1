use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-in credentials for the admin console.
///
/// Serializes to the credential envelope the auth endpoint expects: a
/// `type` discriminator (always `"email"` for the console), the address,
/// password, requested role, and an `fcmToken` field the backend requires
/// but the console has no use for (sent empty).
///
/// # Security
///
/// The `Debug` implementation redacts the password.
///
/// # Examples
///
/// ```
/// use core_auth::Credentials;
///
/// let creds = Credentials::email("admin@example.com", "hunter2!");
/// assert_eq!(creds.role, "admin");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Credential type discriminator; the console only signs in by email.
    #[serde(rename = "type")]
    pub kind: String,
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Requested role; the console always asks for `admin`.
    pub role: String,
    /// Push-notification registration token; unused by the console.
    #[serde(rename = "fcmToken")]
    pub fcm_token: String,
}

impl Credentials {
    /// Build email/password credentials with the default `admin` role.
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: "email".to_string(),
            email: email.into(),
            password: password.into(),
            role: "admin".to_string(),
            fcm_token: String::new(),
        }
    }

    /// Override the requested role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("kind", &self.kind)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Snapshot of the signed-in administrator.
///
/// Servers expose the identifier under either `_id` or `id`; the accessor
/// [`AdminUser::user_id`] resolves whichever is present. Unknown fields are
/// ignored so profile payload growth never breaks sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdminUser {
    /// Identifier under the `id` key, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier under the `_id` key, when present.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Granted role (e.g. `admin`).
    #[serde(default)]
    pub role: String,
    /// Avatar image URL, if the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AdminUser {
    /// The user's identifier, preferring `_id` over `id`.
    pub fn user_id(&self) -> &str {
        self.object_id
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

impl fmt::Display for AdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
