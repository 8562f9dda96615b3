//! Built-in fallback content
//!
//! Used when the client is disabled or the API is unreachable and nothing has
//! been cached yet.

use serde_json::json;

use super::ContentRecord;

/// Content type alias of the home page document
pub const HOME_PAGE_TYPE: &str = "homePage";

/// Returns the compile-time default home page record
pub fn default_home_page() -> ContentRecord {
    let value = json!({
        "heading": "Hello World!",
        "description": "Welcome to our multi-platform demo showcasing C# (.NET), Node.js, Python, Java, Go, and Rust implementations.",
        "canvasSectionTitle": "Collaborative Canvas",
        "canvasDescription": "Try our real-time collaborative drawing canvas! Draw together with others across different platforms.",
        "launchCanvasButtonText": "Launch Canvas",
        "showQrCodeSection": true,
        "qrCodeButtonText": "Show QR Codes",
        "platformLinksTitle": "Try Other Platforms",
        "showPlatformNavigation": true,
        "showServerInfo": true,
        "backgroundGradientStart": "#667eea",
        "backgroundGradientEnd": "#764ba2",
        "seoTitle": "Multi-Platform Demo",
        "seoDescription": "A demonstration of the same application built with multiple platforms.",
        "seoKeywords": "multi-platform, demo"
    });

    match value {
        serde_json::Value::Object(map) => map,
        _ => ContentRecord::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_default_home_page_heading() {
        let content = default_home_page();
        assert_eq!(content.get("heading"), Some(&Value::String("Hello World!".to_string())));
    }

    #[test]
    fn test_default_home_page_display_flags_are_on() {
        let content = default_home_page();
        for flag in ["showQrCodeSection", "showPlatformNavigation", "showServerInfo"] {
            assert_eq!(content.get(flag), Some(&Value::Bool(true)), "{} should be true", flag);
        }
    }

    #[test]
    fn test_default_home_page_has_all_fields() {
        assert_eq!(default_home_page().len(), 15);
    }
}
