//! Device emulation presets.

use serde_json::json;

use crate::cdp::{CdpError, PageSession};

/// A device emulation preset.
#[derive(Debug, Clone, Copy)]
pub struct DevicePreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub mobile: bool,
    pub user_agent: &'static str,
}

const DESKTOP: DevicePreset = DevicePreset {
    name: "desktop",
    width: 1280,
    height: 720,
    device_scale_factor: 1.0,
    mobile: false,
    user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
};

const MOBILE: DevicePreset = DevicePreset {
    name: "mobile",
    width: 412,
    height: 915,
    device_scale_factor: 2.625,
    mobile: true,
    user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Mobile Safari/537.36",
};

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<&'static DevicePreset> {
    match name {
        "desktop" => Some(&DESKTOP),
        "mobile" => Some(&MOBILE),
        _ => None,
    }
}

/// Apply viewport and user-agent emulation to a page session.
pub async fn apply_preset(session: &PageSession, preset: &DevicePreset) -> Result<(), CdpError> {
    session
        .call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": preset.width,
                "height": preset.height,
                "deviceScaleFactor": preset.device_scale_factor,
                "mobile": preset.mobile,
            })),
        )
        .await?;
    session
        .call(
            "Emulation.setUserAgentOverride",
            Some(json!({"userAgent": preset.user_agent})),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_presets() {
        assert_eq!(preset("desktop").unwrap().name, "desktop");
        let mobile = preset("mobile").unwrap();
        assert!(mobile.mobile);
        assert!(mobile.user_agent.contains("Mobile"));
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(preset("tablet").is_none());
        assert!(preset("").is_none());
    }
}
