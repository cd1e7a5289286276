//! Fuzz target for manifest evaluation.
//!
//! Goal: evaluation is total. Any manifest text and any target version produce a report,
//! never a panic, and every applicable rule appears exactly once.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use permguard_domain::{ManifestDocument, PlatformVersion, PolicyCatalog, evaluate};

#[derive(Arbitrary, Debug)]
struct Input {
    target: u32,
    text: String,
}

fuzz_target!(|input: Input| {
    let catalog = PolicyCatalog::bluetooth();
    let target = PlatformVersion::new(input.target);
    let document = ManifestDocument::present(input.text);

    let evaluation = evaluate(&catalog, &document, target);
    let report = evaluation
        .report()
        .expect("a present document always yields a report");

    let expected = catalog.rules().iter().filter(|r| r.applies_to(target)).count();
    assert_eq!(report.entries().count(), expected);
});
