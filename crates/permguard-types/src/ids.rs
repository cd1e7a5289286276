//! Stable identifiers for rules and finding codes.
//!
//! A rule id doubles as the finding `check_id`. It is a dotted namespace; `code` is a short
//! snake_case discriminator.

// Rules: built-in Bluetooth catalog
pub const RULE_BLE_BLUETOOTH: &str = "ble.bluetooth";
pub const RULE_BLE_BLUETOOTH_ADMIN: &str = "ble.bluetooth_admin";
pub const RULE_BLE_BLUETOOTH_SCAN: &str = "ble.bluetooth_scan";
pub const RULE_BLE_BLUETOOTH_CONNECT: &str = "ble.bluetooth_connect";

// Codes
pub const CODE_MISSING_PERMISSION: &str = "missing_permission";
pub const CODE_MANIFEST_MISSING: &str = "manifest_missing";

// Verdict reasons
pub const REASON_MANIFEST_MISSING: &str = "manifest_missing";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// "More information" link attached to findings. Opened by the host, never fetched.
pub const URL_BLUETOOTH_PERMISSIONS: &str =
    "https://developer.android.com/develop/connectivity/bluetooth/bt-permissions";
