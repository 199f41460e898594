use serde::{Deserialize, Serialize};

/// Company-level DATEV settings.
///
/// Every value is optional: an unconfigured value renders as an empty cell
/// in the EXTF header instead of failing the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    /// DATEV consultant number (Beraternummer).
    pub consultant_number: Option<u32>,
    /// DATEV client number (Mandantennummer).
    pub client_number: Option<u32>,
    /// G/L account length (Sachkontenlänge), typically 4.
    pub account_length: Option<u8>,
    /// Company currency (WKZ in the header).
    pub currency_code: String,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            consultant_number: None,
            client_number: None,
            account_length: None,
            currency_code: "EUR".into(),
        }
    }
}

/// Builder for [`CompanySettings`].
///
/// # Example
///
/// ```
/// use datev_export::core::CompanySettingsBuilder;
///
/// let settings = CompanySettingsBuilder::new(29098, 55003)
///     .account_length(4)
///     .build();
/// assert_eq!(settings.currency_code, "EUR");
/// ```
pub struct CompanySettingsBuilder {
    settings: CompanySettings,
}

impl CompanySettingsBuilder {
    /// Create a new builder with consultant and client numbers.
    pub fn new(consultant_number: u32, client_number: u32) -> Self {
        Self {
            settings: CompanySettings {
                consultant_number: Some(consultant_number),
                client_number: Some(client_number),
                ..Default::default()
            },
        }
    }

    /// Set the G/L account length.
    pub fn account_length(mut self, len: u8) -> Self {
        self.settings.account_length = Some(len);
        self
    }

    /// Set the company currency.
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.settings.currency_code = code.into();
        self
    }

    /// Finish building the settings.
    pub fn build(self) -> CompanySettings {
        self.settings
    }
}
