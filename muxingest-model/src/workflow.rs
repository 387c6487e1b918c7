use chrono::{DateTime, Utc};

/// Last stage/status the workflow monitor recorded for one archive file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkflowState {
    pub component_name: String,
    pub state_name: String,
    pub last_updated: DateTime<Utc>,
    pub subject_id: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

impl WorkflowState {
    pub fn new(
        component_name: impl Into<String>,
        state_name: impl Into<String>,
        last_updated: DateTime<Utc>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            state_name: state_name.into(),
            last_updated,
            subject_id: subject_id.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether this state is the given final component/state pair.
    pub fn is_terminal(&self, component_name: &str, state_name: &str) -> bool {
        self.component_name == component_name && self.state_name == state_name
    }
}
