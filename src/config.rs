pub const ACCESS_KEY_ID_VAR: &str = "S3_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "S3_SECRET_ACCESS_KEY";
pub const BUCKET_VAR: &str = "S3_BUCKET";
pub const REGION_VAR: &str = "S3_REGION";
pub const ENDPOINT_VAR: &str = "S3_ENDPOINT";

/// Connection settings for the store, read once at startup.
///
/// Nothing is validated or defaulted here. An unset variable stays `None`
/// and the client decides what that means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurgeConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}
impl PurgeConfig {
    pub fn from_env() -> Self {
        let config = PurgeConfig {
            access_key_id: var(ACCESS_KEY_ID_VAR),
            secret_access_key: var(SECRET_ACCESS_KEY_VAR),
            bucket: var(BUCKET_VAR),
            region: var(REGION_VAR),
            endpoint: var(ENDPOINT_VAR),
        };
        log::debug!(
            "Loaded config: bucket={:?}, region={:?}, endpoint={:?}, credentials supplied={}",
            config.bucket,
            config.region,
            config.endpoint,
            config.access_key_id.is_some() && config.secret_access_key.is_some(),
        );
        config
    }

    pub fn bucket_name(&self) -> &str {
        self.bucket.as_deref().unwrap_or_default()
    }

    /// Bucket name for progress output, `<unset>` when `S3_BUCKET` is missing.
    pub fn bucket_label(&self) -> &str {
        self.bucket.as_deref().unwrap_or("<unset>")
    }
}

fn var(name: &str) -> Option<String> {
    if envmnt::exists(name) {
        Some(envmnt::get_or(name, ""))
    } else {
        None
    }
}
