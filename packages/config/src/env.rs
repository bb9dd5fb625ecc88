// ABOUTME: Environment variable lookup utilities
// ABOUTME: Blank-aware string reads and primary/legacy variable fallback

/// Read a variable, treating blank values as unset
pub fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a string variable, treating blank values as unset
pub fn env_string_or_default(var_name: &str, default: &str) -> String {
    env_string(var_name).unwrap_or_else(|| default.to_string())
}

/// Read the primary variable, falling back to a legacy one
pub fn env_string_with_fallback(primary_var: &str, fallback_var: &str) -> Option<String> {
    env_string(primary_var).or_else(|| {
        let value = env_string(fallback_var)?;
        tracing::debug!("{} not set, using legacy {}", primary_var, fallback_var);
        Some(value)
    })
}
