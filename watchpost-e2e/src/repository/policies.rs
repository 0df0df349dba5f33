//! Policy repository

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use watchpost_client::MonitoringClient;

use crate::error::Result;

/// Repository trait for the agent policy bundle
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// Streams the policy bundle into `dest`, returning the bytes written
    async fn download_policies(&self, dest: &mut (dyn AsyncWrite + Unpin + Send)) -> Result<u64>;
}

#[async_trait]
impl PolicyRepository for MonitoringClient {
    async fn download_policies(&self, dest: &mut (dyn AsyncWrite + Unpin + Send)) -> Result<u64> {
        Ok(MonitoringClient::download_policies(self, dest).await?)
    }
}
