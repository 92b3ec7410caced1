//! Regenerate expected fixtures by running every case through the converters.
//! Review the diff before committing: whatever the converters produce becomes the new baseline.

use anyhow::Result;
use integration_tests::CaseRunner;
use std::env;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Optional case name filter
    let filter = env::args().nth(1);

    println!("{}", "=".repeat(60));
    println!("Fixture Updater");
    println!("{}", "=".repeat(60));
    println!();

    let runner = CaseRunner::from_manifest_dir()?;
    let mut updated = 0;

    for case in &runner.config().cases {
        if filter.as_deref().is_some_and(|name| name != case.name) {
            continue;
        }
        let Some(fixture_path) = &case.fixture_path else {
            continue;
        };

        println!("Converting {}...", case.name);
        let output = runner.convert(case)?;
        let bytes = runner.fixture_loader().save(fixture_path, &output)?;
        println!("  ✓ Saved {} bytes to {:?}", bytes, fixture_path);
        updated += 1;
    }

    if updated == 0 && let Some(name) = filter {
        anyhow::bail!("No case named '{}' with a fixture", name);
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("✓ Updated {} fixtures", updated);
    println!("{}", "=".repeat(60));

    Ok(())
}
