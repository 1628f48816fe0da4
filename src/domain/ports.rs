use crate::utils::error::Result;

/// Supplies the raw bytes of a point catalog. File and bundle lookups live
/// behind this trait so catalogs are only ever built from explicit input.
pub trait SourceLoader: Send + Sync {
    fn load_raw_text(
        &self,
        source_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
