/// In-memory login state. There is no backing session; the token is a stub
/// and nothing validates it server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAuth {
    pub access_token: Option<String>,
    pub profile_img: String,
    pub new_notification_available: bool,
}

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";

impl Default for UserAuth {
    fn default() -> Self {
        Self {
            access_token: None,
            profile_img: avatar_url("default"),
            new_notification_available: false,
        }
    }
}

impl UserAuth {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Demo credential check. Anything but the demo pair is rejected with a
    /// hint the login screen shows inline.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), String> {
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            self.access_token = Some("demo-token-12345".to_string());
            self.profile_img = avatar_url("demo");
            self.new_notification_available = true;
            tracing::info!(email, avatar = %self.profile_img, "logged in");
            Ok(())
        } else {
            Err(format!("Invalid credentials. Use {DEMO_EMAIL} / {DEMO_PASSWORD} for demo"))
        }
    }

    /// Signup "succeeds" for any non-empty fields; there is no server to
    /// register with, so it just mints the same stub token.
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<(), String> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err("All fields are required".to_string());
        }
        if !email.contains('@') {
            return Err("Enter a valid email address".to_string());
        }
        self.access_token = Some("demo-token-12345".to_string());
        self.profile_img = avatar_url(name.trim());
        self.new_notification_available = false;
        tracing::info!(email, "signed up");
        Ok(())
    }

    pub fn logout(&mut self) {
        *self = Self::default();
        tracing::info!("logged out");
    }
}

fn avatar_url(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_credentials_log_in() {
        let mut auth = UserAuth::default();
        assert!(!auth.is_logged_in());
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert!(auth.is_logged_in());
        assert!(auth.new_notification_available);
    }

    #[test]
    fn wrong_credentials_are_rejected() {
        let mut auth = UserAuth::default();
        assert!(auth.login("someone@example.com", "hunter2").is_err());
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn logout_restores_default_stub() {
        let mut auth = UserAuth::default();
        auth.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        auth.logout();
        assert_eq!(auth, UserAuth::default());
    }

    #[test]
    fn signup_requires_all_fields() {
        let mut auth = UserAuth::default();
        assert!(auth.signup("", "a@b.c", "pw").is_err());
        assert!(auth.signup("Ana", "not-an-email", "pw").is_err());
        assert!(auth.signup("Ana", "ana@example.com", "pw").is_ok());
        assert!(auth.is_logged_in());
    }
}
