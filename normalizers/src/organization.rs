use serde_json::Value;
use shared_types::Organization;

use crate::value::{count, text};

/// Normalizes one organization-search record. Total, like the contact normalizer.
pub fn normalize_organization(raw: &Value) -> Organization {
    Organization {
        id: text(raw, "id"),
        name: text(raw, "name"),
        website_url: text(raw, "website_url"),
        industry: text(raw, "industry"),
        estimated_num_employees: count(raw, "estimated_num_employees"),
        city: text(raw, "city"),
        state: text(raw, "state"),
        country: text(raw, "country"),
        phone: text(raw, "phone"),
        linkedin_url: text(raw, "linkedin_url"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_organization() {
        let raw = json!({
            "id": "o1",
            "name": "Acme Corp",
            "website_url": "https://www.acme.com",
            "industry": "manufacturing",
            "estimated_num_employees": 420,
            "city": "Springfield",
            "state": "IL",
            "country": "United States",
            "phone": "+1 555 0199",
            "linkedin_url": "https://linkedin.com/company/acme",
            "primary_domain": "acme.com"
        });

        let org = normalize_organization(&raw);
        assert_eq!(org.id.as_deref(), Some("o1"));
        assert_eq!(org.name.as_deref(), Some("Acme Corp"));
        assert_eq!(org.estimated_num_employees, Some(420));
        assert_eq!(org.country.as_deref(), Some("United States"));
        assert_eq!(org.linkedin_url.as_deref(), Some("https://linkedin.com/company/acme"));
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let org = normalize_organization(&json!({"name": "Solo", "estimated_num_employees": null}));
        assert_eq!(org.name.as_deref(), Some("Solo"));
        assert!(org.estimated_num_employees.is_none());
        assert!(org.website_url.is_none());
        assert_eq!(normalize_organization(&json!(42)), Organization::default());
    }
}
