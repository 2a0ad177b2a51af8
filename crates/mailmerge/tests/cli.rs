//! Runs the mailmerge binary against data documents on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_data(dir: &Path, watermark: &Path) -> std::path::PathBuf {
    let path = dir.join("data.xml");
    let xml = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Root>
  <Processing><Watermark>{}</Watermark></Processing>
  <Customer><Name>Ada</Name><Since>2024-03-04</Since></Customer>
  <Orders>
    <Order><Total>12.5</Total></Order>
  </Orders>
</Root>"#,
        watermark.display()
    );
    fs::write(&path, xml).expect("Failed to write data file");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mailmerge"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute mailmerge")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "mailmerge failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_lookup_command() {
    let temp = TempDir::new().unwrap();
    let data = write_data(temp.path(), &temp.path().join("wm.png"));

    let output = run(&[
        "lookup",
        data.to_str().unwrap(),
        "Customer.Name",
        "Orders",
        "Customer.Fax",
    ]);
    assert_eq!(
        stdout(&output),
        "Customer.Name: scalar: \"Ada\"\nOrders: range: Orders (1 elements)\nCustomer.Fax: not found\n"
    );
}

#[test]
fn test_field_command_uses_config() {
    let temp = TempDir::new().unwrap();
    let data = write_data(temp.path(), &temp.path().join("wm.png"));
    let config = temp.path().join("mailmerge.toml");
    fs::write(&config, "culture = \"nl-BE\"\n").unwrap();

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "field",
        data.to_str().unwrap(),
        "Customer.Since",
        "--instruction",
        r#"MERGEFIELD Customer.Since \@ "d MMMM yyyy""#,
    ]);
    assert_eq!(
        stdout(&output),
        "value: scalar: \"2024-03-04\"\nrun: \"4 maart 2024\"\n"
    );

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "field",
        data.to_str().unwrap(),
        "Total",
        "--range",
        "Orders",
        "--instruction",
        r#"MERGEFIELD Total \# "0.00""#,
    ]);
    assert_eq!(stdout(&output), "value: scalar: \"12.5\"\nrun: \"12,50\"\n");
}

#[test]
fn test_watermark_command() {
    let temp = TempDir::new().unwrap();
    let watermark = temp.path().join("draft.png");
    image::RgbImage::new(400, 400).save(&watermark).unwrap();
    let data = write_data(temp.path(), &watermark);

    let output = run(&[
        "watermark",
        data.to_str().unwrap(),
        "--page-width",
        "600",
        "--page-height",
        "842",
    ]);
    assert_eq!(
        stdout(&output),
        format!("watermark: {} (600x600)\n", watermark.display())
    );
}

#[test]
fn test_bad_config_fails() {
    let temp = TempDir::new().unwrap();
    let data = write_data(temp.path(), &temp.path().join("wm.png"));
    let config = temp.path().join("mailmerge.toml");
    fs::write(&config, "culture = \"xx-XX\"\n").unwrap();

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "lookup",
        data.to_str().unwrap(),
        "Customer.Name",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}
