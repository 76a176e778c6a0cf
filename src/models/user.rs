use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,     // primary key
    pub phone: String,     // not unique across users
    pub password_hash: String,
    #[serde(default)]
    pub verified: bool,
}
