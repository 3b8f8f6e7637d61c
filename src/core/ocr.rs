use crate::types::DetectedTextRegion;
use async_trait::async_trait;

/// Optical character recognition over raw image bytes.
///
/// Implementations fail open: any error, including missing credentials,
/// yields an empty list.
#[async_trait]
pub trait TextDetector: Send + Sync {
    async fn detect_text(&self, image: &[u8]) -> Vec<DetectedTextRegion>;

    /// Whether calling `detect_text` can produce anything at all
    fn is_available(&self) -> bool {
        true
    }
}
