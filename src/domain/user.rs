use serde::{Deserialize, Serialize};

/// Role assigned at registration. Fixed for the lifetime of the account;
/// the client never changes it, only reads it to pick which views to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Vendor,
}

/// Represents a registered user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userid")]
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(rename = "usertype")]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_backend_wire_names() {
        let user: User = serde_json::from_value(serde_json::json!({
            "userid": 3,
            "username": "alice",
            "email": "alice@example.com",
            "usertype": "VENDOR",
        }))
        .unwrap();
        assert_eq!(user.role, Role::Vendor);
        assert_eq!(
            serde_json::to_value(Role::Customer).unwrap(),
            serde_json::json!("CUSTOMER")
        );
    }
}
