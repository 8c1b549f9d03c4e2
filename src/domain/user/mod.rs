//! User identity consumed by the chat as an opaque session seed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// How an account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Local,
    Google,
}

impl Provider {
    /// Value stored in the `proveedor` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Google => "google",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Provider::Local),
            "google" => Ok(Provider::Google),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// A registered user.
///
/// The chat core only consumes `id` and `nombre` as the session seed;
/// everything else stays at the auth boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub nombre: String,
    pub correo: String,
    pub proveedor: Provider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_round_trips_through_str() {
        assert_eq!("local".parse::<Provider>().unwrap(), Provider::Local);
        assert_eq!("google".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!(Provider::Google.as_str(), "google");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!("github".parse::<Provider>().is_err());
    }

    #[test]
    fn user_serializes_with_spanish_field_names() {
        let user = User {
            id: UserId::new(3),
            nombre: "Ana".into(),
            correo: "ana@example.com".into(),
            proveedor: Provider::Local,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["proveedor"], "local");
    }
}
