use integration_tests::{CaseKind, CaseRunner, RegistryKind};

#[test]
fn test_message_body_fixtures() {
    let runner = CaseRunner::from_manifest_dir().expect("Failed to load test config");
    let results = runner.run_all(CaseKind::MessageBody);
    assert!(results.passed > 0, "No message body cases configured");
    results.assert_all_passed();
}

#[test]
fn test_wallet_v5r1_external_actions() {
    let runner = CaseRunner::from_manifest_dir().expect("Failed to load test config");
    let case = runner
        .config()
        .cases
        .iter()
        .find(|case| case.name == "wallet_v5r1_external")
        .expect("wallet_v5r1_external case");
    assert_eq!(case.registry, RegistryKind::ExtIn);

    let output = runner.convert(case).unwrap();
    let value = &output["decodedBody"]["value"];
    assert_eq!(value["wallet_id"], 0x7fffff11u32);
    assert_eq!(value["actions"][0]["type"], "send_msg");
    assert_eq!(value["actions"][0]["mode"], 3);
}
