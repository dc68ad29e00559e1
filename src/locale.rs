//! Locale-aware string comparison support for LC_COLLATE
//!
//! String keys are ordered with the system's strcoll when LC_COLLATE (or
//! LC_ALL / LANG) names a real locale, and by plain code point order under
//! the C/POSIX locale.

use std::cmp::Ordering;
use std::env;
use std::ffi::CString;
use std::sync::OnceLock;

/// Global locale configuration
static LOCALE_CONFIG: OnceLock<LocaleConfig> = OnceLock::new();

/// Locale configuration for string comparison
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Whether locale-aware comparison is enabled
    pub enabled: bool,
    /// The current locale name
    pub locale_name: String,
}

impl LocaleConfig {
    /// Describe a locale by name without touching process state
    pub fn from_name(locale: &str) -> Self {
        let enabled = !locale.is_empty() && locale != "C" && locale != "POSIX";

        Self {
            enabled,
            locale_name: locale.to_string(),
        }
    }

    /// Initialize locale configuration from environment
    pub fn init() -> Self {
        let locale = env::var("LC_COLLATE")
            .or_else(|_| env::var("LC_ALL"))
            .or_else(|_| env::var("LANG"))
            .unwrap_or_else(|_| "C".to_string());

        let mut config = Self::from_name(&locale);

        if config.enabled {
            // An unknown locale leaves collation at "C"; compare bytes then.
            config.enabled = match CString::new(locale.as_str()) {
                Ok(name) => unsafe {
                    !libc::setlocale(libc::LC_COLLATE, name.as_ptr()).is_null()
                },
                Err(_) => false,
            };
        }

        tracing::debug!(
            locale = %config.locale_name,
            enabled = config.enabled,
            "collation locale initialized"
        );
        config
    }

    /// Get the global locale configuration
    pub fn get() -> &'static LocaleConfig {
        LOCALE_CONFIG.get_or_init(Self::init)
    }

    /// Check if locale-aware comparison is enabled
    pub fn is_enabled() -> bool {
        Self::get().enabled
    }
}

/// Locale-aware string comparison using strcoll
pub fn strcoll_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (a_cstr, b_cstr) = match (CString::new(a), CString::new(b)) {
        (Ok(a_cstr), Ok(b_cstr)) => (a_cstr, b_cstr),
        // Interior NUL, strcoll would stop early
        _ => return a.cmp(b),
    };

    let result = unsafe { libc::strcoll(a_cstr.as_ptr(), b_cstr.as_ptr()) };
    match result.cmp(&0) {
        // Distinct strings that collate equal still need a total order
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

/// Compare two string keys the way the active locale orders them
pub fn collate(a: &str, b: &str) -> Ordering {
    if LocaleConfig::is_enabled() {
        strcoll_compare(a, b)
    } else {
        a.cmp(b)
    }
}
