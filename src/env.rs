/// Interpret a string value such as "1" or "no" as a boolean.
///
/// Returns `None` if the value is not recognized.
pub fn str_as_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Return whether a feature flag controlled by an environment variable is
/// enabled.
pub fn env_flag(name: &str, default: bool) -> bool {
    let Ok(value) = std::env::var(name) else {
        return default;
    };
    str_as_bool(&value).unwrap_or_else(|| {
        log::warn!("unrecognized boolean value {:?} for {}", value, name);
        default
    })
}

/// Read a non-negative integer from an environment variable.
pub fn env_usize(name: &str, default: usize) -> usize {
    let Ok(value) = std::env::var(name) else {
        return default;
    };
    value.trim().parse().unwrap_or_else(|_| {
        log::warn!("unrecognized integer value {:?} for {}", value, name);
        default
    })
}
