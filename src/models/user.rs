use serde::Deserialize;

/// A PagerDuty user as returned by the users API.
#[derive(Debug, Clone, Deserialize)]
pub struct PdUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl PdUser {
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
