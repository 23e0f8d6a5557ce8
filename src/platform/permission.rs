//! Per-document permission strings, e.g. `read("user:abc")`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    User(String),
    Team(String),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User(id) => write!(f, "user:{id}"),
            Role::Team(id) => write!(f, "team:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Read(Role),
    Update(Role),
    Delete(Role),
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Read(role) => write!(f, "read(\"{role}\")"),
            Permission::Update(role) => write!(f, "update(\"{role}\")"),
            Permission::Delete(role) => write!(f, "delete(\"{role}\")"),
        }
    }
}

/// One read grant per recipient followed by admin read/update/delete.
///
/// Recipients are not deduplicated: the list always holds exactly
/// `recipients.len() + 3` entries.
pub fn recipient_permissions<S: AsRef<str>>(recipients: &[S], admin_team_id: &str) -> Vec<String> {
    let admin = Role::Team(admin_team_id.to_string());
    recipients
        .iter()
        .map(|id| Permission::Read(Role::User(id.as_ref().to_string())))
        .chain([
            Permission::Read(admin.clone()),
            Permission::Update(admin.clone()),
            Permission::Delete(admin),
        ])
        .map(|p| p.to_string())
        .collect()
}
