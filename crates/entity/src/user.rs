use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Employee" => Some(Role::Employee),
            "Manager" => Some(Role::Manager),
            "HR" => Some(Role::Hr),
            _ => None,
        }
    }

    /// Manager outranks Employee; HR outranks both.
    pub fn level(self) -> u8 {
        match self {
            Role::Employee => 1,
            Role::Manager => 2,
            Role::Hr => 3,
        }
    }
}
