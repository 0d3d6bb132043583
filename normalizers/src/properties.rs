use shared_types::{Contact, Organization};
use std::collections::BTreeMap;

use crate::domain::company_domain;

/// Flat string properties as the CRM object API accepts them.
pub type CrmProperties = BTreeMap<String, String>;

/// Builds contact properties, leaving out anything missing or blank.
pub fn contact_properties(contact: &Contact) -> CrmProperties {
    let mut properties = CrmProperties::new();
    if let Some(email) = contact.email() {
        properties.insert("email".to_string(), email.to_string());
    }

    let fields = [
        ("firstname", &contact.first_name),
        ("lastname", &contact.last_name),
        ("phone", &contact.phone),
        ("jobtitle", &contact.title),
    ];
    for (key, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            properties.insert(key.to_string(), value.to_string());
        }
    }
    properties
}

/// Builds company properties. Values are trimmed, the domain is derived from
/// the website, and the literal placeholders `none`/`null` are treated as
/// missing.
pub fn company_properties(organization: &Organization) -> CrmProperties {
    let mut properties = CrmProperties::new();

    if let Some(name) = organization.name() {
        properties.insert("name".to_string(), name.to_string());
    }

    if let Some(website) = organization
        .website_url
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
    {
        properties.insert("website".to_string(), website.to_string());
        if let Some(domain) = company_domain(website) {
            properties.insert("domain".to_string(), domain);
        }
    }

    let fields = [
        ("phone", &organization.phone),
        ("city", &organization.city),
        ("state", &organization.state),
        ("country", &organization.country),
        ("industry", &organization.industry),
    ];
    for (key, value) in fields {
        if let Some(value) = value.as_deref().and_then(meaningful) {
            properties.insert(key.to_string(), value.to_string());
        }
    }

    if let Some(employees) = organization.estimated_num_employees.filter(|n| *n > 0) {
        properties.insert("numberofemployees".to_string(), employees.to_string());
    }

    properties
}

fn meaningful(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("null")
    {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_properties_skip_missing() {
        let contact = Contact {
            email: Some("ada@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("".to_string()),
            title: Some("CTO".to_string()),
            ..Default::default()
        };

        let properties = contact_properties(&contact);
        assert_eq!(properties.len(), 3);
        assert_eq!(properties["email"], "ada@example.com");
        assert_eq!(properties["firstname"], "Ada");
        assert_eq!(properties["jobtitle"], "CTO");
        assert!(!properties.contains_key("lastname"));
        assert!(!properties.contains_key("phone"));
    }

    #[test]
    fn test_contact_email_is_trimmed() {
        let contact = Contact {
            email: Some("  ada@example.com \n".to_string()),
            ..Default::default()
        };
        assert_eq!(contact_properties(&contact)["email"], "ada@example.com");

        let blank = Contact {
            email: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!contact_properties(&blank).contains_key("email"));
    }

    #[test]
    fn test_company_properties() {
        let organization = Organization {
            name: Some("  Acme Corp ".to_string()),
            website_url: Some("https://www.acme.com/home".to_string()),
            phone: Some("None".to_string()),
            city: Some(" Springfield ".to_string()),
            state: Some("null".to_string()),
            country: Some("".to_string()),
            industry: Some("manufacturing".to_string()),
            estimated_num_employees: Some(0),
            ..Default::default()
        };

        let properties = company_properties(&organization);
        assert_eq!(properties["name"], "Acme Corp");
        assert_eq!(properties["website"], "https://www.acme.com/home");
        assert_eq!(properties["domain"], "acme.com");
        assert_eq!(properties["city"], "Springfield");
        assert_eq!(properties["industry"], "manufacturing");
        assert!(!properties.contains_key("phone"));
        assert!(!properties.contains_key("state"));
        assert!(!properties.contains_key("country"));
        assert!(!properties.contains_key("numberofemployees"));
    }

    #[test]
    fn test_company_employee_count() {
        let organization = Organization {
            name: Some("Globex".to_string()),
            estimated_num_employees: Some(1200),
            ..Default::default()
        };
        assert_eq!(company_properties(&organization)["numberofemployees"], "1200");
    }
}
