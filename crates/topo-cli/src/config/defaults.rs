pub struct DefaultsConfig {
    pub bond_endpoint_check: String,
    pub warn_on_length_overflow: bool,
    pub fail_fast: bool,
    pub delimiter: char,
    pub pretty: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bond_endpoint_check: "as-observed".to_string(),
            warn_on_length_overflow: true,
            fail_fast: false,
            delimiter: ',',
            pretty: false,
        }
    }
}
