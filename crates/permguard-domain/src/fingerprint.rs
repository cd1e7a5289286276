use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a permission finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - manifest_path (project-relative)
/// - permission name
pub fn fingerprint_for_permission(
    check_id: &str,
    code: &str,
    manifest_path: &str,
    permission: &str,
) -> String {
    let canonical = [check_id, code, manifest_path, permission].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex_and_field_sensitive() {
        let a = fingerprint_for_permission(
            "ble.bluetooth",
            "missing_permission",
            "AndroidManifest.xml",
            "android.permission.BLUETOOTH",
        );
        let b = fingerprint_for_permission(
            "ble.bluetooth",
            "missing_permission",
            "AndroidManifest.xml",
            "android.permission.BLUETOOTH",
        );
        let c = fingerprint_for_permission(
            "ble.bluetooth",
            "missing_permission",
            "other/AndroidManifest.xml",
            "android.permission.BLUETOOTH",
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
