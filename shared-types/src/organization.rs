use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Canonical organization record. Only `name` is needed to push it to the CRM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Organization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub industry: Option<String>,
    pub estimated_num_employees: Option<u64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
}

impl Organization {
    /// Trimmed name, `None` when missing or blank.
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn has_name(&self) -> bool {
        self.name().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_missing() {
        let org = Organization {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!org.has_name());

        let org = Organization {
            name: Some(" Acme ".to_string()),
            ..Default::default()
        };
        assert_eq!(org.name(), Some("Acme"));
    }
}
