//! Beta variant naming.

/// Marker inserted by [`variant_name`].
pub const BETA_MARKER: &str = "-beta";

/// Resolve the resource name for the requested variant.
///
/// With `is_beta` the [`BETA_MARKER`] is inserted immediately before the
/// file extension, i.e. before the last `.` of the name:
/// `install-agent.sh` becomes `install-agent-beta.sh`. Names without an
/// extension (or whose only dot is the leading one) get the marker appended.
///
/// This is the fixed-marker form of [`insert_marker`]. `ScriptRouter` calls
/// `insert_marker` with the configured marker, which defaults to
/// [`BETA_MARKER`], so both agree under the default configuration.
pub fn variant_name(resource: &str, is_beta: bool) -> String {
    if is_beta {
        insert_marker(resource, BETA_MARKER)
    } else {
        resource.to_string()
    }
}

/// Insert `marker` before the extension of `resource`.
pub fn insert_marker(resource: &str, marker: &str) -> String {
    match resource.rfind('.') {
        Some(dot) if dot > 0 => {
            let (stem, ext) = resource.split_at(dot);
            format!("{stem}{marker}{ext}")
        }
        _ => format!("{resource}{marker}"),
    }
}

/// Query values that switch on the beta variant.
pub fn is_beta_flag(value: &str) -> bool {
    matches!(value, "1" | "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name("install-agent.sh", true), "install-agent-beta.sh");
        assert_eq!(variant_name("install-agent.ps1", true), "install-agent-beta.ps1");
        assert_eq!(variant_name("install-agent.sh", false), "install-agent.sh");
    }

    #[test]
    fn test_only_last_extension_is_split() {
        assert_eq!(variant_name("agent.tar.gz", true), "agent.tar-beta.gz");
    }

    #[test]
    fn test_names_without_extension() {
        assert_eq!(variant_name("install", true), "install-beta");
        assert_eq!(variant_name(".profile", true), ".profile-beta");
    }

    #[test]
    fn test_custom_marker() {
        assert_eq!(insert_marker("install-hub.sh", "_next"), "install-hub_next.sh");
    }

    #[test]
    fn test_beta_flag() {
        assert!(is_beta_flag("1"));
        assert!(is_beta_flag("true"));
        assert!(!is_beta_flag("TRUE"));
        assert!(!is_beta_flag("0"));
        assert!(!is_beta_flag(""));
    }
}
