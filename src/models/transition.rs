use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A workflow edge available from the issue's current status.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    // usually a string, but some servers send numbers
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    pub to: TransitionTarget,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionTarget {
    pub name: String,
}

impl TransitionsResponse {
    /// First transition whose target status matches, ignoring case.
    pub fn find_by_target(&self, status: &str) -> Option<&Transition> {
        let wanted = status.to_lowercase();
        self.transitions
            .iter()
            .find(|t| t.to.name.to_lowercase() == wanted)
    }
}

impl Transition {
    /// Id followed by the transition name when Jira sent one, for messages.
    pub fn label(&self) -> String {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{} ({})", self.id_string(), name),
            None => self.id_string(),
        }
    }

    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
