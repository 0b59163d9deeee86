use serde::{Deserialize, Serialize};

/// Study type recorded in descriptors when none is given.
pub const DEFAULT_PROJECT_TYPE: &str = "Research Programs";

/// Identifier chain for one study: project name → HDP ID → APPL ID.
///
/// `project_name` names the output directory and falls back to the HDP ID.
/// `appl_id` is `None` until resolved (or when the metadata service has none
/// and the caller chose to continue without it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyIdentity {
    pub hdp_id: String,
    pub appl_id: Option<String>,
    pub project_name: String,
    pub project_title: String,
    pub project_type: String,
}

impl StudyIdentity {
    #[must_use]
    pub fn new(hdp_id: impl Into<String>, project: Option<&str>) -> Self {
        let hdp_id = hdp_id.into();
        let project_name = project
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| hdp_id.clone(), str::to_string);

        Self {
            hdp_id,
            appl_id: None,
            project_name,
            project_title: String::new(),
            project_type: DEFAULT_PROJECT_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_appl_id(mut self, appl_id: Option<String>) -> Self {
        self.appl_id = appl_id.filter(|id| !id.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.project_title = title.into();
        self
    }

    #[must_use]
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = project_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn project_name_defaults_to_hdp_id() {
        let identity = StudyIdentity::new("HDP00223", None);
        assert_eq!(identity.project_name, "HDP00223");
        assert_eq!(identity.project_type, DEFAULT_PROJECT_TYPE);
        assert!(identity.appl_id.is_none());
    }

    #[test]
    fn blank_project_falls_back_to_hdp_id() {
        let identity = StudyIdentity::new("HDP00223", Some("  "));
        assert_eq!(identity.project_name, "HDP00223");
    }

    #[test]
    fn explicit_project_names_directory() {
        let identity = StudyIdentity::new("HDP00223", Some("BACPAC"));
        assert_eq!(identity.project_name, "BACPAC");
        assert_eq!(identity.hdp_id, "HDP00223");
    }

    #[test]
    fn empty_appl_id_is_dropped() {
        let identity = StudyIdentity::new("HDP1", None).with_appl_id(Some(String::new()));
        assert!(identity.appl_id.is_none());

        let identity = StudyIdentity::new("HDP1", None).with_appl_id(Some("9877133".into()));
        assert_eq!(identity.appl_id.as_deref(), Some("9877133"));
    }
}
