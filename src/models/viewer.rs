use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Stable identifier the remote API assigns to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is looking at the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated(UserId),
}

impl Viewer {
    /// Builds the viewer from the identifier the client holds, if any
    pub fn from_user_id(user_id: Option<u64>) -> Self {
        match user_id {
            Some(id) => Viewer::Authenticated(UserId(id)),
            None => Viewer::Anonymous,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }
}

impl Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewer::Anonymous => write!(f, "anonymous"),
            Viewer::Authenticated(id) => write!(f, "user:{}", id),
        }
    }
}

/// Result of the remote "has prior interactions" lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InteractionStatus {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub interactions_count: u32,
    #[serde(default)]
    pub has_interactions: bool,
}

impl InteractionStatus {
    /// A returning user is one the interaction store knows and who has interacted at least once
    pub fn is_returning(&self) -> bool {
        self.exists && self.has_interactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_from_user_id() {
        assert_eq!(Viewer::from_user_id(None), Viewer::Anonymous);
        assert_eq!(
            Viewer::from_user_id(Some(42)),
            Viewer::Authenticated(UserId(42))
        );
        assert_eq!(Viewer::from_user_id(Some(42)).user_id(), Some(UserId(42)));
        assert!(!Viewer::Anonymous.is_authenticated());
    }

    #[test]
    fn test_interaction_status_requires_both_flags() {
        let status: InteractionStatus = serde_json::from_str(
            r#"{"user_id": 74, "exists": true, "interactions_count": 0, "has_interactions": false}"#,
        )
        .unwrap();
        assert!(!status.is_returning());

        let status: InteractionStatus =
            serde_json::from_str(r#"{"exists": true, "has_interactions": true}"#).unwrap();
        assert!(status.is_returning());

        let status: InteractionStatus = serde_json::from_str(r#"{"has_interactions": true}"#).unwrap();
        assert!(!status.is_returning());
    }
}
