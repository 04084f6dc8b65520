//! Protocol presentation settings

/// How replies are rendered and how the runner behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Printed by GET when the key has no value
    pub null_token: String,
    /// Printed by COMMIT/ROLLBACK when no transaction is open
    pub no_transaction_token: String,
    /// Written before each line read (interactive use)
    pub prompt: Option<String>,
    /// Write `ERROR: ...` lines for unparseable input
    pub report_errors: bool,
}

impl ProtocolConfig {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.null_token.is_empty() {
            return Err("null_token must not be empty".into());
        }
        if self.no_transaction_token.is_empty() {
            return Err("no_transaction_token must not be empty".into());
        }
        if self.null_token.contains('\n') || self.no_transaction_token.contains('\n') {
            return Err("reply tokens must be a single line".into());
        }
        if let Some(prompt) = &self.prompt {
            if prompt.contains('\n') {
                return Err("prompt must be a single line".into());
            }
        }
        Ok(())
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            null_token: "NULL".to_string(),
            no_transaction_token: "NO TRANSACTION".to_string(),
            prompt: None,
            report_errors: true,
        }
    }
}
