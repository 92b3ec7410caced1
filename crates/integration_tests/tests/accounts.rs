use integration_tests::{CaseKind, CaseRunner};

#[test]
fn test_account_fixtures() {
    let runner = CaseRunner::from_manifest_dir().expect("Failed to load test config");
    let results = runner.run_all(CaseKind::Account);
    assert!(results.passed > 0, "No account cases configured");
    results.assert_all_passed();
}

#[test]
fn test_account_conversion_is_deterministic() {
    let runner = CaseRunner::from_manifest_dir().expect("Failed to load test config");
    for case in runner.config().cases_of(CaseKind::Account) {
        if case.expect_error.is_some() {
            continue;
        }
        let first = runner.convert(case).unwrap();
        let second = runner.convert(case).unwrap();
        assert_eq!(first, second, "{} differs between runs", case.name);
    }
}
