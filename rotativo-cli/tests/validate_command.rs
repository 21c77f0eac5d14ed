//! Integration tests for the `validate` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_validate_tenant() {
    let env = TestEnv::new();

    env.tenant_command("ouroPreto")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_all() {
    let env = TestEnv::new();

    env.command()
        .args(["validate", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validated 3 tenant(s)"));
}

#[test]
fn test_validate_reports_field() {
    let env = TestEnv::new();
    let mut city = env.city_json("demo");
    city["parkingRules"]["1"][1]["time"] = json!(15);
    env.write_city("demo.json", &city.to_string());

    env.tenant_command("demo")
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parkingRules.1[1].time"))
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_validate_all_fails_closed() {
    let env = TestEnv::new();
    let mut city = env.city_json("vicosa");
    city["vehicleTypes"] = json!([]);
    env.write_city("vicosa.json", &city.to_string());

    env.command()
        .args(["validate", "--all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("vehicleTypes"));

    // Other tenants remain usable on their own
    env.tenant_command("demo").arg("validate").assert().success();
}

#[test]
fn test_validate_shared_package() {
    let env = TestEnv::new();
    let mut city = env.city_json("vicosa");
    city["androidPackage"] = json!("com.rotativodigital");
    env.write_city("vicosa.json", &city.to_string());

    env.command()
        .args(["validate", "--all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("vicosa.androidPackage"));
}

#[test]
fn test_validate_duplicate_tenant() {
    let env = TestEnv::new();
    env.write_city("demo.yaml", "city: Demo\n");

    env.command()
        .args(["validate", "--all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("duplicate tenant 'demo'"));
}

#[test]
fn test_validate_unknown_tenant() {
    let env = TestEnv::new();

    env.tenant_command("mariana")
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown tenant: mariana"));
}

#[test]
fn test_validate_without_tenant() {
    let env = TestEnv::new();

    env.command()
        .arg("validate")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("no tenant selected"));
}
