use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAME_STATE_BILL: &str = r#"{
    "billType": "invoice",
    "billNumber": "SR/2025-26/1",
    "billDate": "2025-06-01",
    "businessInfo": { "name": "Shree Traders", "state": "Haryana (06)" },
    "customerInfo": { "name": "Asha Stores", "state": "Haryana (06)" },
    "items": [
        { "name": "Widget", "hsn": "8471", "quantity": 2, "rate": "100", "cgst": 9, "sgst": 9, "igst": 18 }
    ]
}"#;

const INTER_STATE_BILL: &str = r#"{
    "billNumber": "SR/2025-26/2",
    "billDate": "2025-06-01",
    "businessInfo": { "name": "Shree Traders", "state": "Haryana (06)" },
    "customerInfo": { "name": "Delhi Mart", "state": "Delhi (07)" },
    "items": [
        { "name": "Widget", "hsn": "8471", "quantity": 2, "rate": 100, "cgst": 9, "sgst": 9, "igst": 18 }
    ]
}"#;

/// Command with an isolated config directory so user settings never leak in.
fn gstbill(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gstbill").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

fn write_bill(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_words() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args(["words", "290"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Two Hundred Ninety Rupees Only"));
}

#[test]
fn test_words_with_paise_and_grouping() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args(["words", "1,00,053.75"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "One Lakh Fifty Three and Seventy Five Paise Rupees Only",
        ));
}

#[test]
fn test_next_invoice_number() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args(["number", "--date", "2025-06-01", "--existing", "SR/2025-26/1", "SR/2025-26/3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("SR/2025-26/4\n"));
}

#[test]
fn test_next_estimate_number_ignores_invoices() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args([
            "number",
            "--type",
            "estimate",
            "--date",
            "2026-03-31",
            "--existing",
            "SR/2025-26/7",
            "SR/ES/2025-26/2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("SR/ES/2025-26/3\n"));
}

#[test]
fn test_number_scans_store() {
    let home = TempDir::new().unwrap();
    let store = TempDir::new().unwrap();
    let tenant = store.path().join("shop");
    fs::create_dir_all(&tenant).unwrap();
    write_bill(&tenant, "one.json", SAME_STATE_BILL);
    write_bill(&tenant, "two.json", INTER_STATE_BILL);

    gstbill(&home)
        .args(["number", "--date", "2025-12-15", "--tenant", "shop", "--store"])
        .arg(store.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("SR/2025-26/3\n"));
}

fn stored_bill(number: &str, date: &str, total: u32) -> String {
    format!(
        r#"{{"billNumber": "{}", "billDate": "{}", "customerInfo": {{"name": "Asha Stores"}}, "total": {}}}"#,
        number, date, total
    )
}

#[test]
fn test_list_month_sorted_by_sequence() {
    let home = TempDir::new().unwrap();
    let store = TempDir::new().unwrap();
    let tenant = store.path().join("shop");
    fs::create_dir_all(&tenant).unwrap();
    write_bill(&tenant, "a.json", &stored_bill("SR/2025-26/10", "2025-06-20", 100));
    write_bill(&tenant, "b.json", &stored_bill("SR/2025-26/2", "2025-06-01", 236));
    write_bill(&tenant, "c.json", &stored_bill("SR/2025-26/5", "2025-07-03", 50));
    write_bill(&tenant, "d.json", &stored_bill("SR/2025-26/11", "2026-04-02", 7));

    gstbill(&home)
        .args(["list", "--tenant", "shop", "--month", "2025-06", "--store"])
        .arg(store.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)SR/2025-26/2 .*SR/2025-26/10 ").unwrap())
        .stdout(predicate::str::contains("SR/2025-26/5").not())
        .stdout(predicate::str::contains("2 bills, total ₹336.00"));

    gstbill(&home)
        .args(["list", "--tenant", "shop", "--fiscal-year", "2025-26", "--store"])
        .arg(store.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-04-01 to 2026-03-31"))
        .stdout(predicate::str::contains("3 bills, total ₹386.00"));

    gstbill(&home)
        .args(["list", "--month", "June", "--store"])
        .arg(store.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn test_compute_same_state_text() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = write_bill(dir.path(), "bill.json", SAME_STATE_BILL);

    gstbill(&home)
        .args(["compute", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CGST:     ₹18.00"))
        .stdout(predicate::str::contains("SGST:     ₹18.00"))
        .stdout(predicate::str::contains("Total:    ₹236.00"))
        .stdout(predicate::str::contains("Two Hundred Thirty Six Rupees Only"));
}

#[test]
fn test_compute_inter_state_text() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = write_bill(dir.path(), "bill.json", INTER_STATE_BILL);

    gstbill(&home)
        .args(["compute", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IGST:     ₹36.00"))
        .stdout(predicate::str::contains("CGST").not())
        .stdout(predicate::str::contains("Total:    ₹236.00"));
}

#[test]
fn test_compute_writes_json() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = write_bill(dir.path(), "bill.json", SAME_STATE_BILL);
    let output = dir.path().join("out.json");

    gstbill(&home)
        .args(["compute", &input, "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["amountInWords"], "Two Hundred Thirty Six Rupees Only");
    assert_eq!(json["billNumber"], "SR/2025-26/1");
}

#[test]
fn test_compute_validate_rejects_blank_hsn() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = write_bill(
        dir.path(),
        "bill.json",
        &SAME_STATE_BILL.replace(r#""hsn": "8471""#, r#""hsn": "  ""#),
    );

    gstbill(&home)
        .args(["compute", &input, "--validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HSN code is required"));
}

#[test]
fn test_compute_survives_overflowing_quantity() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = write_bill(
        dir.path(),
        "bill.json",
        &INTER_STATE_BILL.replace(r#""quantity": 2"#, r#""quantity": "79228162514264337593543950335""#),
    );

    gstbill(&home)
        .args(["compute", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total:    ₹0.00"))
        .stdout(predicate::str::contains("Zero Rupees Only"));
}

#[test]
fn test_compute_store_renumbers_out_of_series_bill() {
    let home = TempDir::new().unwrap();
    let store = TempDir::new().unwrap();
    let tenant = store.path().join("default");
    fs::create_dir_all(&tenant).unwrap();
    write_bill(&tenant, "one.json", SAME_STATE_BILL);

    let dir = TempDir::new().unwrap();
    let input = write_bill(
        dir.path(),
        "bill.json",
        &INTER_STATE_BILL.replace("SR/2025-26/2", "SR/2024-25/9"),
    );
    let output = dir.path().join("out.json");

    gstbill(&home)
        .args(["compute", &input, "--output"])
        .arg(&output)
        .arg("--store")
        .arg(store.path())
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["billNumber"], "SR/2025-26/2");
}

#[test]
fn test_compute_missing_file() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args(["compute", "/nonexistent/bill.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_with_summary() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    write_bill(dir.path(), "a.json", SAME_STATE_BILL);
    write_bill(dir.path(), "b.json", INTER_STATE_BILL);
    write_bill(dir.path(), "broken.json", "{ not json");
    let out = dir.path().join("out");
    let pattern = format!("{}/*.json", dir.path().display());

    gstbill(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.json,success,SR/2025-26/1,2025-06-01,Asha Stores,"));
    assert!(summary.contains("b.json,success,SR/2025-26/2,2025-06-01,Delhi Mart,"));
    assert!(summary.contains("broken.json,error"));
}

#[test]
fn test_batch_stops_on_error() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    write_bill(dir.path(), "broken.json", "{ not json");
    let pattern = format!("{}/*.json", dir.path().display());

    gstbill(&home).args(["batch", &pattern]).assert().failure();
}

#[test]
fn test_states_lookup() {
    let home = TempDir::new().unwrap();
    gstbill(&home)
        .args(["states", "--code", "07"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Delhi (07)\n"));

    gstbill(&home).args(["states", "--code", "99"]).assert().failure();
}

#[test]
fn test_config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("billing.json");
    let config = config.to_str().unwrap();

    gstbill(&home)
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    gstbill(&home)
        .args(["--config", config, "config", "get", "numbering.prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"SR\""));

    gstbill(&home)
        .args(["--config", config, "config", "set", "numbering.prefix", "INV"])
        .assert()
        .success();

    gstbill(&home)
        .args(["--config", config, "number", "--date", "2025-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::diff("INV/2025-26/1\n"));

    gstbill(&home)
        .args(["--config", config, "config", "get", "numbering.missing"])
        .assert()
        .failure();

    gstbill(&home)
        .args(["--config", config, "config", "set", "numbering.prefix", "A/B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not contain the separator"));
}
