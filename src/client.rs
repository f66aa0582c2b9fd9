//! Client for S3-compatible object storage endpoints.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::acl::{AccessControlPolicy, Acl};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::signing::{self, Credentials};
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::utils::validate_bucket_name;
use crate::xml;

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    concat!("minibucket/", env!("CARGO_PKG_VERSION"), " (rust)");

pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Construct with a custom transport; tests use this to replay canned
    /// responses.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Fetch a bucket's ACL and reduce it to its canonical value.
    pub async fn get_bucket_acl(&self, bucket: &str) -> Result<Acl> {
        let policy = self.get_access_control_policy(bucket).await?;
        let acl = policy.acl();
        debug!(bucket, acl = %acl, grants = policy.grants.len(), "classified bucket ACL");
        Ok(acl)
    }

    /// Fetch a bucket's full access-control policy, owner and grants in
    /// server order.
    pub async fn get_access_control_policy(&self, bucket: &str) -> Result<AccessControlPolicy> {
        validate_bucket_name(bucket)?;

        let url = format!("{}/{}/?acl", self.config.base_url(), bucket);
        let mut request = HttpRequest::get(url);
        request.headers.insert(
            USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        if !self.config.access_key.is_empty() {
            let credentials = Credentials {
                access_key: self.config.access_key.clone(),
                secret_key: self.config.secret_key.clone(),
            };
            signing::sign_request(&mut request, &credentials, &self.config.region, Utc::now())?;
        }

        debug!(bucket, url = %request.url, "requesting bucket ACL");
        let response = self.transport.execute(request).await?;

        if response.status.is_success() {
            return xml::parse_access_control_policy(&response.body);
        }

        warn!(bucket, status = response.status.as_u16(), "bucket ACL request failed");
        match xml::parse_error_response(&response.body) {
            Ok(api_error) => Err(api_error),
            Err(_) => Err(Error::UnexpectedStatus(response.status.as_u16())),
        }
    }
}
