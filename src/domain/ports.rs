use crate::core::persist::AssetFailurePolicy;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Retrieves raw bytes for a URL. Non-success statuses are errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    /// Creates `dir` if missing, otherwise removes everything beneath it.
    fn prepare_dir(&self, dir: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn storefront_base(&self) -> &str;
    fn output_path(&self) -> &str;
    fn save(&self) -> bool;
    fn asset_failure_policy(&self) -> AssetFailurePolicy;
}
