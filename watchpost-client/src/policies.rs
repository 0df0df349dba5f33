//! Agent policy download endpoint

use crate::MonitoringClient;
use crate::error::Result;
use reqwest::Method;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

impl MonitoringClient {
    /// Stream the agent policy bundle into `dest`
    ///
    /// The body is written chunk by chunk as it arrives and `dest` is flushed
    /// at the end. Nothing is retried.
    ///
    /// # Returns
    /// The number of bytes written
    pub async fn download_policies<W>(&self, dest: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self
            .request(Method::GET, "/api/v2/security/cloud_workload/policy/download")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let mut response = Self::check_status(response).await?;

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            dest.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        dest.flush().await?;

        debug!(bytes = written, "downloaded policy bundle");
        Ok(written)
    }
}
