use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for secrets (account passwords) that masks its value in Debug and Display output.
///
/// Serialization passes the inner value through unchanged, so the persisted
/// record keeps the real value while `tracing::debug!("{:?}", user)` does not.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Masked(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_debug() {
        let secret = Masked::from("hunter22");
        assert_eq!(format!("{:?}", secret), "********");
        assert_eq!(secret.to_string(), "********");
        assert_eq!(secret.expose(), "hunter22");
    }

    #[test]
    fn test_masked_serializes_inner_value() {
        let secret = Masked::from("hunter22");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"hunter22\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }
}
