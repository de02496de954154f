use serde::{Deserialize, Serialize};

// ========== USER ==========
// Missing fields decode as empty strings, so an absent item reads back as a
// user with an empty email.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// True when the record carries a key, i.e. it was actually found in the store.
    pub fn exists(&self) -> bool {
        !self.email.is_empty()
    }
}

// ========== ERROR ==========
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_uses_camel_case() {
        let user = User {
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"email":"a@b.com","firstName":"A","lastName":"B"}"#
        );
    }

    #[test]
    fn test_user_missing_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(user.first_name, "");
        assert!(user.exists());

        let empty: User = serde_json::from_str("{}").unwrap();
        assert!(!empty.exists());
    }
}
