//! Platform detection for key binding selection.

use std::sync::OnceLock;

/// Cached platform detection results.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    pub ios: bool,
    pub mac: bool,
    pub android: bool,
    pub mobile: bool,
}

impl Platform {
    /// Whether shortcuts use Cmd rather than Ctrl.
    pub fn uses_command_key(&self) -> bool {
        self.mac || self.ios
    }

    /// Classify from a lowercased user agent and `navigator.platform`.
    pub fn from_strings(user_agent: &str, platform_str: &str) -> Self {
        let ios = user_agent.contains("iphone")
            || user_agent.contains("ipad")
            || user_agent.contains("ipod");

        // macOS (but not iOS)
        let mac = platform_str.contains("mac") && !ios;

        let android = user_agent.contains("android");
        let mobile = ios || android || user_agent.contains("mobile");

        Self {
            ios,
            mac,
            android,
            mobile,
        }
    }
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default().to_lowercase();
    let platform_str = navigator.platform().unwrap_or_default().to_lowercase();
    Platform::from_strings(&user_agent, &platform_str)
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}
