//! Explicit authorization context handed to each view at construction.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Risk,
    Commercial,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Commercial => "commercial",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "risk" | "risco" => Ok(Self::Risk),
            "commercial" | "comercial" => Ok(Self::Commercial),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub role: Role,
}

impl AuthContext {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn require(&self, required: Role, view: &'static str) -> Result<()> {
        if self.role == required {
            return Ok(());
        }
        tracing::warn!(view, %required, actual = %self.role, "view rejected for role");
        Err(Error::Forbidden {
            view,
            required,
            actual: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_in_both_languages() {
        assert_eq!("Risco".parse::<Role>(), Ok(Role::Risk));
        assert_eq!("commercial".parse::<Role>(), Ok(Role::Commercial));
        assert!("admin".parse::<Role>().is_err());
    }
}
