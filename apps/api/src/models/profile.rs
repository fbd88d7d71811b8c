use serde::{Deserialize, Serialize};

/// The user's contact details. Kept in the settings store and only ever used
/// to build the local contact header; never sent to the model provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub portfolio_url: String,
}

impl UserProfile {
    /// Trimmed full name, if one is configured.
    pub fn name(&self) -> Option<&str> {
        let name = self.full_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Builds the contact block placed above the letter body.
    /// Returns an empty string when every field is blank.
    pub fn contact_header(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for field in [&self.full_name, &self.job_title, &self.email, &self.phone, &self.street] {
            let value = field.trim();
            if !value.is_empty() {
                lines.push(value.to_string());
            }
        }

        if let Some(locality) = self.locality_line() {
            lines.push(locality);
        }

        let portfolio = self.portfolio_url.trim();
        if !portfolio.is_empty() {
            lines.push(portfolio.to_string());
        }

        lines.join("\n")
    }

    /// `City, State Zip`, with missing parts dropped.
    fn locality_line(&self) -> Option<String> {
        let city = self.city.trim();
        let region = [self.state.trim(), self.zip.trim()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match (city.is_empty(), region.is_empty()) {
            (true, true) => None,
            (false, true) => Some(city.to_string()),
            (true, false) => Some(region),
            (false, false) => Some(format!("{city}, {region}")),
        }
    }
}
