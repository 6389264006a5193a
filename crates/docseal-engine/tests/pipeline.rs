use std::path::Path;

use docseal_config::Config;
use docseal_core::{SkipReason, SkippedReference};
use docseal_engine::{Converter, Publisher};

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, content).unwrap();
}

fn read(root: &Path, path: &str) -> String {
    std::fs::read_to_string(root.join(path)).unwrap()
}

fn docs_tree(root: &Path) {
    write(
        root,
        "index.md",
        "# Platform\n\nDeploy with [the chart](k8s/values.yaml).\nInfra lives in [main](infra/main.tf).\nSee [missing](k8s/gone.yaml) and [env](.env).\n",
    );
    write(
        root,
        "k8s/values.yaml",
        "replicas: 2\ndatabase:\n  password: hunter2\n  host: db.internal\n",
    );
    write(root, "k8s/internal.yaml", "token: abc\n");
    write(
        root,
        "infra/main.tf",
        "variable \"region\" {\n  default = \"eu-west-1\"\n}\n\napi_token = \"s3cr3t-t0k3n\"\n",
    );
    write(root, ".env", "SECRET=1\n");
}

#[test]
fn test_redact_pass() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    docs_tree(input.path());

    let publisher = Publisher::from_config(&Config::default()).unwrap();
    let report = publisher
        .redact_tree(input.path(), output.path(), false)
        .unwrap();

    assert_eq!(report.markdown_files, 1);
    assert_eq!(report.links_found, 4);
    assert_eq!(report.published, vec!["infra/main.tf", "k8s/values.yaml"]);
    assert_eq!(report.secrets_in("k8s/values.yaml"), 1);
    assert_eq!(report.secrets_in("infra/main.tf"), 1);

    // Markdown is copied unchanged
    assert_eq!(read(output.path(), "index.md"), read(input.path(), "index.md"));

    assert_eq!(
        read(output.path(), "k8s/values.yaml"),
        "replicas: 2\ndatabase:\n  password: REDACTED\n  host: db.internal\n"
    );
    assert!(read(output.path(), "infra/main.tf").contains("api_token = REDACTED\n"));
    assert!(read(output.path(), "infra/main.tf").contains("default = \"eu-west-1\""));

    // Unreferenced and denied files never reach the output
    assert!(!output.path().join("k8s/internal.yaml").exists());
    assert!(!output.path().join(".env").exists());

    assert!(
        report
            .skipped
            .iter()
            .any(|s| s.path == "k8s/gone.yaml" && s.reason == SkipReason::Missing)
    );
    assert!(
        report
            .skipped
            .iter()
            .any(|s| s.path == ".env" && matches!(s.reason, SkipReason::Denied { .. }))
    );
}

#[test]
fn test_directory_links_are_skipped() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "index.md", "Browse [k8s](k8s/) or [values](k8s/values.yaml).\n");
    write(input.path(), "k8s/values.yaml", "replicas: 2\n");

    let report = Publisher::from_config(&Config::default())
        .unwrap()
        .redact_tree(input.path(), output.path(), false)
        .unwrap();

    assert_eq!(report.published, vec!["k8s/values.yaml"]);
    assert_eq!(
        report.skipped,
        vec![SkippedReference {
            path: "k8s".to_string(),
            reason: SkipReason::NotAFile,
        }]
    );
    assert!(output.path().join("k8s/values.yaml").is_file());
}

#[test]
fn test_redact_pass_is_idempotent() {
    let input = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    docs_tree(input.path());

    let publisher = Publisher::from_config(&Config::default()).unwrap();
    publisher.redact_tree(input.path(), first.path(), false).unwrap();
    let report = publisher.redact_tree(first.path(), second.path(), false).unwrap();

    assert_eq!(report.secrets_redacted(), 0);
    for path in ["index.md", "k8s/values.yaml", "infra/main.tf"] {
        assert_eq!(read(first.path(), path), read(second.path(), path), "{path}");
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    docs_tree(input.path());

    let publisher = Publisher::from_config(&Config::default()).unwrap();
    let report = publisher.redact_tree(input.path(), output.path(), true).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.secrets_redacted(), 2);
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let publisher = Publisher::from_config(&Config::default()).unwrap();

    assert!(publisher
        .redact_tree(&dir.path().join("nope"), dir.path(), false)
        .is_err());
    assert!(Converter::from_config(&Config::default())
        .convert_tree(&dir.path().join("nope"), dir.path())
        .is_err());
}

#[test]
fn test_convert_pass() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "index.md", "# Platform\nWelcome.\n");
    write(input.path(), "k8s/values.yaml", "replicas: 2\n");
    write(input.path(), "infra/main.tf", "region = \"eu\"\n");

    let converter = Converter::from_config(&Config::default());
    let report = converter.convert_tree(input.path(), output.path()).unwrap();

    assert_eq!(
        report.pages,
        vec!["index.md", "infra/main.tf.md", "k8s/values.yaml.md"]
    );

    let index = read(output.path(), "index.md");
    assert!(index.starts_with("+++\ntitle = "));
    assert!(index.contains("Platform"));
    assert!(index.ends_with("+++\nWelcome.\n"));

    let values = read(output.path(), "k8s/values.yaml.md");
    assert!(values.contains("values.yaml"));
    assert!(values.ends_with("```yaml\nreplicas: 2\n```\n"));

    assert!(read(output.path(), "infra/main.tf.md").ends_with("```tcl\nregion = \"eu\"\n```\n"));
}

#[test]
fn test_convert_uses_configured_languages() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "main.tf", "region = \"eu\"\n");

    let mut config = Config::default();
    config
        .render
        .languages
        .insert("tf".to_string(), "hcl".to_string());

    Converter::from_config(&config)
        .convert_tree(input.path(), output.path())
        .unwrap();

    assert!(read(output.path(), "main.tf.md").contains("```hcl\n"));
}

#[test]
fn test_report_serializes() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    docs_tree(input.path());

    let report = Publisher::from_config(&Config::default())
        .unwrap()
        .redact_tree(input.path(), output.path(), false)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["markdown_files"], 1);
    assert!(json["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["reason"] == "missing" && s["path"] == "k8s/gone.yaml"));
}
