//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - evaluation determinism and totality on arbitrary text
//! - catalog order preservation and version gating
//! - presence detection without cross-rule false positives

use crate::catalog::{DeclarationRule, PolicyCatalog};
use crate::engine::{assess, evaluate};
use crate::model::{ManifestDocument, PlatformVersion};
use crate::report::Evaluation;
use crate::test_support::{config, manifest_with};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_target() -> impl Strategy<Value = PlatformVersion> {
    (0u32..64).prop_map(PlatformVersion::new)
}

/// Subset of built-in rule indices to declare in a generated manifest.
fn arb_declared() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 4)
}

/// Text that looks manifest-ish: fragments of tags, names and quotes.
fn arb_manifestish_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("<uses-permission ".to_string()),
        Just("android:name=\"".to_string()),
        Just("android.permission.BLUETOOTH".to_string()),
        Just("_SCAN".to_string()),
        Just("_ADMIN".to_string()),
        Just("\"".to_string()),
        Just(" />".to_string()),
        Just(">".to_string()),
        "[ -~]{0,8}",
        "\\PC{0,4}",
    ];
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

/// Catalog of generated rules with unique ids and optional gates.
fn arb_catalog() -> impl Strategy<Value = PolicyCatalog> {
    prop::collection::vec(prop::option::of(0u32..64), 0..8).prop_map(|gates| {
        PolicyCatalog::new(
            gates
                .into_iter()
                .enumerate()
                .map(|(i, gate)| {
                    DeclarationRule::uses_permission(
                        format!("gen.rule_{i}"),
                        format!("com.example.permission.P{i}X"),
                        format!("generated {i}"),
                    )
                    .with_min_version(gate.map(PlatformVersion::new))
                })
                .collect(),
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(text in arb_manifestish_text(), target in arb_target()) {
        let catalog = PolicyCatalog::bluetooth();
        let doc = ManifestDocument::present(text);
        let a = evaluate(&catalog, &doc, target);
        let b = evaluate(&catalog, &doc, target);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn evaluation_is_total_on_arbitrary_text(text in "\\PC*", target in arb_target()) {
        let cfg = config(target);
        let doc = ManifestDocument::present(text);
        let evaluation = evaluate(&cfg.catalog, &doc, target);
        prop_assert!(evaluation.manifest_exists());
        let report = assess(&evaluation, &cfg);
        prop_assert_eq!(report.data.rules_total, 4);
    }

    #[test]
    fn report_preserves_catalog_order_restricted_to_applicable(
        catalog in arb_catalog(),
        target in arb_target(),
    ) {
        let doc = ManifestDocument::present("");
        let evaluation = evaluate(&catalog, &doc, target);
        let report = evaluation.report().expect("present document yields a report");

        let all: Vec<&str> = report.statuses.iter().map(|s| s.rule.id()).collect();
        let expected_all: Vec<&str> = catalog.rules().iter().map(|r| r.id()).collect();
        prop_assert_eq!(all, expected_all);

        let entries: Vec<&str> = report.entries().map(|s| s.rule.id()).collect();
        let expected: Vec<&str> = catalog
            .rules()
            .iter()
            .filter(|r| r.applies_to(target))
            .map(|r| r.id())
            .collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn version_gate_includes_at_or_above_and_excludes_below(
        gate in 1u32..64,
        target in arb_target(),
    ) {
        let rule = DeclarationRule::uses_permission("g", "p.G", "g")
            .with_min_version(Some(PlatformVersion::new(gate)));
        let ungated = DeclarationRule::uses_permission("u", "p.U", "u");
        let catalog = PolicyCatalog::new(vec![rule, ungated]);

        let evaluation = evaluate(&catalog, &ManifestDocument::present(""), target);
        let report = evaluation.report().expect("report");
        let ids: Vec<&str> = report.entries().map(|s| s.rule.id()).collect();

        if target.get() >= gate {
            prop_assert_eq!(ids, vec!["g", "u"]);
        } else {
            prop_assert_eq!(ids, vec!["u"]);
        }
    }

    #[test]
    fn presence_matches_exactly_the_declared_subset(declared in arb_declared()) {
        let catalog = PolicyCatalog::bluetooth();
        let lines: Vec<&str> = catalog
            .rules()
            .iter()
            .zip(&declared)
            .filter(|(_, keep)| **keep)
            .map(|(r, _)| r.canonical_line())
            .collect();
        let doc = manifest_with(&lines);

        let evaluation = evaluate(&catalog, &doc, PlatformVersion::new(31));
        let report = evaluation.report().expect("report");
        let present: Vec<bool> = report.entries().map(|s| s.present).collect();
        prop_assert_eq!(present, declared);
    }

    #[test]
    fn absent_document_never_reports(target in arb_target(), catalog in arb_catalog()) {
        let evaluation = evaluate(&catalog, &ManifestDocument::Absent, target);
        prop_assert_eq!(evaluation, Evaluation::NoManifest);
    }
}
