//! API Key configuration.

/// Default header carrying the credential.
pub const DEFAULT_HEADER: &str = "authorization";

/// Default authorization scheme.
pub const DEFAULT_SCHEME: &str = "Bearer";

/// Default request slot the resolved key is assigned to.
pub const DEFAULT_ASSIGN_TO: &str = "api_key";

/// Configuration for API Key authentication.
///
/// The credential is read from `header`, which must hold `<scheme> <key>`.
/// On success the resolved key is assigned to the request under `assign_to`.
///
/// # Example
///
/// ```ignore
/// let config = ApiKeyConfig::new()
///     .header("X-Service-Auth")
///     .scheme("Token")
///     .assign_to("partner_key");
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyConfig {
    header: String,
    scheme: String,
    assign_to: String,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            assign_to: DEFAULT_ASSIGN_TO.to_string(),
        }
    }
}

impl ApiKeyConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header carrying the credential.
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header = name.into();
        self
    }

    /// Sets the authorization scheme expected before the key.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the request slot the resolved key is assigned to.
    pub fn assign_to(mut self, slot: impl Into<String>) -> Self {
        self.assign_to = slot.into();
        self
    }

    /// Returns the header carrying the credential.
    pub fn get_header(&self) -> &str {
        &self.header
    }

    /// Returns the authorization scheme.
    pub fn get_scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the assign slot.
    pub fn get_assign_to(&self) -> &str {
        &self.assign_to
    }
}
