use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let assert = Command::cargo_bin("libris-cli").unwrap().arg("--help").assert();
    let output = assert.success().get_output().stdout.clone();
    let help = String::from_utf8(output).unwrap();
    assert!(help.contains("serve"));
    assert!(help.contains("check-config"));
}

#[test]
fn check_config_reports_the_default_environment() {
    let assert = Command::cargo_bin("libris-cli")
        .unwrap()
        .arg("check-config")
        .env_remove("LIBRIS_ENV")
        .assert();
    let output = assert.success().get_output().stdout.clone();
    let report = String::from_utf8(output).unwrap();
    assert!(report.contains("environment: Local"));
    assert!(report.contains("seed=true"));
}
