//! Explain registry for rules and codes.
//!
//! Maps rule IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after manifest examples.
    pub examples: ExamplePair,
}

/// Before and after manifest examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Manifest text that would trigger a finding.
    pub before: &'static str,
    /// Manifest text that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rule IDs
        ids::RULE_BLE_BLUETOOTH => Some(explain_bluetooth()),
        ids::RULE_BLE_BLUETOOTH_ADMIN => Some(explain_bluetooth_admin()),
        ids::RULE_BLE_BLUETOOTH_SCAN => Some(explain_bluetooth_scan()),
        ids::RULE_BLE_BLUETOOTH_CONNECT => Some(explain_bluetooth_connect()),

        // Codes
        ids::CODE_MISSING_PERMISSION => Some(explain_missing_permission()),
        ids::CODE_MANIFEST_MISSING => Some(explain_manifest_missing()),

        _ => None,
    }
}

/// List all built-in rule IDs, in catalog order.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_BLE_BLUETOOTH,
        ids::RULE_BLE_BLUETOOTH_ADMIN,
        ids::RULE_BLE_BLUETOOTH_SCAN,
        ids::RULE_BLE_BLUETOOTH_CONNECT,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_MISSING_PERMISSION, ids::CODE_MANIFEST_MISSING]
}

// --- Rule-level explanations ---

fn explain_bluetooth() -> Explanation {
    Explanation {
        title: "Legacy Bluetooth Permission",
        description: "\
Checks that `android.permission.BLUETOOTH` is declared.

Apps targeting API level 30 or lower need this permission for any Bluetooth
communication: connecting to paired devices, reading the adapter state, and
transferring data. From API 31 onward it is superseded by BLUETOOTH_SCAN and
BLUETOOTH_CONNECT, so the canonical line caps it with `maxSdkVersion=\"30\"`.

This rule has no version gate: the legacy declaration is always expected so
that devices running older Android versions keep working.",
        remediation: "\
Add the canonical line inside the <manifest> element:

    <uses-permission android:name=\"android.permission.BLUETOOTH\" android:maxSdkVersion=\"30\" />",
        examples: ExamplePair {
            before: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
</manifest>"#,
            after: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
</manifest>"#,
        },
    }
}

fn explain_bluetooth_admin() -> Explanation {
    Explanation {
        title: "Legacy Bluetooth Admin Permission",
        description: "\
Checks that `android.permission.BLUETOOTH_ADMIN` is declared.

On API level 30 and lower, discovering devices and changing adapter settings
requires BLUETOOTH_ADMIN in addition to BLUETOOTH. Like the legacy BLUETOOTH
permission it is capped with `maxSdkVersion=\"30\"` and always expected.",
        remediation: "\
Add the canonical line inside the <manifest> element:

    <uses-permission android:name=\"android.permission.BLUETOOTH_ADMIN\" android:maxSdkVersion=\"30\" />",
        examples: ExamplePair {
            before: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
</manifest>"#,
            after: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
    <uses-permission android:name="android.permission.BLUETOOTH_ADMIN" android:maxSdkVersion="30" />
</manifest>"#,
        },
    }
}

fn explain_bluetooth_scan() -> Explanation {
    Explanation {
        title: "Bluetooth Scan Permission",
        description: "\
Checks that `android.permission.BLUETOOTH_SCAN` is declared when targeting API
level 31 or above.

BLUETOOTH_SCAN is a runtime permission introduced in Android 12. Without it,
BLE scans silently return no results. Declaring `neverForLocation` asserts that
scan results are not used to derive physical location, which avoids also
requesting ACCESS_FINE_LOCATION.

Targets below API 31 skip this rule entirely.",
        remediation: "\
Add the canonical line inside the <manifest> element:

    <uses-permission android:name=\"android.permission.BLUETOOTH_SCAN\" android:usesPermissionFlags=\"neverForLocation\" />

If your app does derive location from scan results, drop the flag and request
location permissions as well.",
        examples: ExamplePair {
            before: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
</manifest>"#,
            after: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
    <uses-permission android:name="android.permission.BLUETOOTH_SCAN" android:usesPermissionFlags="neverForLocation" />
</manifest>"#,
        },
    }
}

fn explain_bluetooth_connect() -> Explanation {
    Explanation {
        title: "Bluetooth Connect Permission",
        description: "\
Checks that `android.permission.BLUETOOTH_CONNECT` is declared when targeting
API level 31 or above.

BLUETOOTH_CONNECT is required from Android 12 to connect to devices, read
bonded devices, and query the adapter name. Targets below API 31 skip this
rule entirely.",
        remediation: "\
Add the canonical line inside the <manifest> element:

    <uses-permission android:name=\"android.permission.BLUETOOTH_CONNECT\" />",
        examples: ExamplePair {
            before: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH_SCAN" android:usesPermissionFlags="neverForLocation" />
</manifest>"#,
            after: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH_SCAN" android:usesPermissionFlags="neverForLocation" />
    <uses-permission android:name="android.permission.BLUETOOTH_CONNECT" />
</manifest>"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_missing_permission() -> Explanation {
    Explanation {
        title: "Missing Permission Declaration",
        description: "\
A rule that applies to the configured target version found no matching
<uses-permission> declaration in the manifest.

Matching is textual: the declaration must contain `android:name=\"<permission>\"`
inside a <uses-permission ...> tag. Declarations that are commented out still
match; declarations with a misspelled attribute do not.",
        remediation: "\
Copy the `help` line of the finding into the <manifest> element. Run
`permguard explain <rule-id>` for rule-specific guidance.",
        examples: ExamplePair {
            before: r#"<uses-permission android:name="android.permission.BLUETOOTH_CONECT" />"#,
            after: r#"<uses-permission android:name="android.permission.BLUETOOTH_CONNECT" />"#,
        },
    }
}

fn explain_manifest_missing() -> Explanation {
    Explanation {
        title: "Manifest Missing",
        description: "\
No manifest exists at the configured path, so no rule was evaluated.

This is not a failure: the receipt verdict is `skip`. Creating the manifest from
the packaged template is the remediation.",
        remediation: "\
Run `permguard init` to copy the template manifest into place, then re-run
`permguard check`. The copy never overwrites an existing file.",
        examples: ExamplePair {
            before: "(no Assets/Plugins/Android/AndroidManifest.xml)",
            after: r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />
    ...
</manifest>"#,
        },
    }
}
