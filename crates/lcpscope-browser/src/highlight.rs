//! LCP element highlighting and screenshot capture.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use lcpscope_vitals::ElementRect;

use crate::cdp::{CdpError, PageSession};
use crate::error::BrowserError;

const HIGHLIGHT_FN: &str = r#"
((rect) => {
    const shadowDiv = document.createElement("div");
    shadowDiv.style.boxShadow = "0 0 0 99999px rgba(0, 0, 0, 0.5)";
    shadowDiv.style.height = `${rect.height}px`;
    shadowDiv.style.left = `${rect.left}px`;
    shadowDiv.style.position = "absolute";
    shadowDiv.style.top = `${rect.top}px`;
    shadowDiv.style.width = `${rect.width}px`;
    shadowDiv.style.zIndex = "999999";

    const innerShadowDiv = document.createElement("div");
    innerShadowDiv.style.border = "3px solid red";
    innerShadowDiv.style.height = "100%";
    innerShadowDiv.style.width = "100%";

    shadowDiv.appendChild(innerShadowDiv);
    document.body.appendChild(shadowDiv);
    document.body.style.overflow = "hidden";
})
"#;

/// Dim the page and draw a red border around `rect`.
pub async fn highlight_area(session: &PageSession, rect: &ElementRect) -> Result<(), CdpError> {
    let script = format!("({})({})", HIGHLIGHT_FN, serde_json::to_string(rect)?);
    session.evaluate(&script).await?;
    Ok(())
}

/// Write a full-page screenshot to `path`.
pub async fn capture_screenshot(session: &PageSession, path: &Path) -> Result<(), BrowserError> {
    let data = session.screenshot(true).await?;
    let bytes = BASE64
        .decode(data)
        .map_err(|e| BrowserError::Screenshot(e.to_string()))?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
