use super::error::AppError;
use crate::utils::validation::{optional, require_non_empty};
use serde::{Deserialize, Serialize};

/// A customer of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Client {
    /// Case-insensitive substring match against name, email and phone.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [Some(&self.name), self.email.as_ref(), self.phone.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query))
    }

    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    clients.iter().filter(|c| c.matches(query)).collect()
}

/// Looks up a client's display name, falling back to `fallback`.
pub fn client_name<'a>(clients: &'a [Client], client_id: &str, fallback: &'a str) -> &'a str {
    clients
        .iter()
        .find(|c| c.client_id == client_id)
        .map_or(fallback, |c| c.name.as_str())
}

/// Body of `POST`/`PUT .../clients`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Editor state of the add/edit client modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm {
    pub editing: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl ClientForm {
    pub fn edit(client: &Client) -> Self {
        Self {
            editing: Some(client.client_id.clone()),
            name: client.name.clone(),
            email: client.email.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            notes: client.notes.clone().unwrap_or_default(),
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn validate(&self) -> Result<ClientInput, AppError> {
        Ok(ClientInput {
            name: require_non_empty(&self.name, "Name")?,
            email: optional(&self.email),
            phone: optional(&self.phone),
            notes: optional(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, email: Option<&str>, phone: Option<&str>) -> Client {
        Client {
            client_id: format!("client_{name}"),
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            notes: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let clients = vec![
            client("Ana Silva", Some("ana@example.com"), None),
            client("Bruno", None, Some("+55 11 99999-0000")),
            client("Carla", Some("CARLA@Mail.com"), Some("555-0100")),
        ];

        assert_eq!(filter_clients(&clients, "ANA").len(), 1);
        assert_eq!(filter_clients(&clients, "mail.com")[0].name, "Carla");
        assert_eq!(filter_clients(&clients, "99999")[0].name, "Bruno");
        assert_eq!(filter_clients(&clients, "").len(), 3);
        assert!(filter_clients(&clients, "zzz").is_empty());
    }

    #[test]
    fn test_form_roundtrip_from_record() {
        let record = client("Ana", Some("ana@example.com"), None);
        let form = ClientForm::edit(&record);

        assert!(form.is_editing());
        assert_eq!(form.phone, "");

        let input = form.validate().unwrap();
        assert_eq!(input.email.as_deref(), Some("ana@example.com"));
        assert_eq!(input.phone, None);
    }

    #[test]
    fn test_form_requires_name() {
        let form = ClientForm::default();
        assert!(matches!(form.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_client_name_lookup() {
        let clients = vec![client("Ana", None, None)];
        assert_eq!(client_name(&clients, "client_Ana", "Unknown"), "Ana");
        assert_eq!(client_name(&clients, "nope", "Unknown"), "Unknown");
    }
}
