
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use futures::{Future, TryFutureExt};

use super::{ObjectStore, Page};
use crate::config::PurgeConfig;
use crate::error::{PurgeError, PurgeResult};

pub struct S3Store {
    pub bucket: String,
    client: Client,
}
impl S3Store {
    /// Builds a client from the values in `config`. Anything left unset falls
    /// back to the SDK's own resolution (env, profile, instance metadata).
    pub async fn new(config: &PurgeConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "s3purge-env",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        // Custom endpoints are usually S3-compatible stores without
        // virtual-host bucket routing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        S3Store {
            bucket: config.bucket_name().to_string(),
            client: Client::from_conf(s3_config),
        }
    }
}

impl ObjectStore for S3Store {
    async fn list_page(&self, max_keys: i32, start_after: Option<&str>) -> PurgeResult<Page> {
        log::debug!(
            "Listing up to {} objects in {} after {:?}",
            max_keys,
            &self.bucket,
            start_after
        );

        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(max_keys)
            .set_start_after(start_after.map(str::to_string))
            .send()
            .await?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|o| o.key().map(str::to_string))
            .collect();

        Ok(Page {
            keys,
            is_truncated: output.is_truncated().unwrap_or(false),
        })
    }

    fn delete(&self, key: &str) -> impl Future<Output = PurgeResult<()>> {
        let owned_key = key.to_string();

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .map_ok(|_| ())
            .map_err(move |e| PurgeError::deletion(&owned_key, e))
    }
}
