//! Integration tests for emailfinder.
//!
//! These tests verify end-to-end functionality without relying on external
//! network services. The verification API is a local wiremock server and
//! organizations are chosen so no live DNS answer is needed.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::str;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use emailfinder::{
    BatchVerifier, CompanyDirectory, ConfidenceTier, DnsProbe, DomainResolver, EmailFinder,
    EmailFinderError, FindEmailRequest, HttpOracle, ResolutionMethod,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get the path to the compiled binary
fn get_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("emailfinder");
    path
}

fn run_binary(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .env("EMAILFINDER_DNS_TIMEOUT_SECS", "1")
        .output()
        .expect("Failed to execute binary")
}

fn reply(email: &str, reachable: &str, deliverable: bool) -> Value {
    json!({
        "input": email,
        "is_reachable": reachable,
        "smtp": {"is_deliverable": deliverable},
        "syntax": {"is_valid_syntax": true},
        "mx": {"accepts_mail": true}
    })
}

/// Mock verification API: john.doe is safe, jdoe is risky, everything else
/// invalid.
async fn mock_api() -> MockServer {
    let server = MockServer::start().await;
    for (email, reachable) in [("john.doe@google.com", "safe"), ("jdoe@google.com", "risky")] {
        Mock::given(method("POST"))
            .and(path("/v0/check_email"))
            .and(body_json(json!({"to_email": email})))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(email, reachable, true)))
            .with_priority(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/v0/check_email"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"is_reachable": "invalid"}])),
        )
        .with_priority(10)
        .mount(&server)
        .await;
    server
}

struct NoDns;

#[async_trait]
impl DnsProbe for NoDns {
    async fn has_records(&self, _domain: &str) -> bool {
        false
    }
}

#[test]
fn test_health_output() {
    let output = run_binary(&["--health"]);
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap();
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value, json!({"status": "healthy", "service": "emailfinder"}));
}

#[test]
fn test_generate_schema() {
    let output = run_binary(&["--generate-schema"]);
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("found_emails"));
    assert!(stdout.contains("resolution_method"));
}

#[test]
fn test_missing_org_argument() {
    let output = run_binary(&["--first", "John", "--last", "Doe"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("--org"), "stderr: {stderr}");
}

#[test]
fn test_empty_org_is_rejected() {
    let output = run_binary(&["--first", "John", "--last", "Doe", "--org", ""]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("organization"), "stderr: {stderr}");
}

#[test]
fn test_malformed_company_flag() {
    let output = run_binary(&[
        "--first", "John", "--last", "Doe", "--org", "Initech", "--company", "initech",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreachable_api_fails() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}");
    let output = run_binary(&[
        "--first", "John", "--last", "Doe", "--org", "Google", "--api-url", &url,
        "--max-patterns", "3",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("unavailable"), "stderr: {stderr}");
}

#[test]
fn test_help_output() {
    let output = run_binary(&["--help"]);
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("--first"));
    assert!(stdout.contains("--company"));
}

#[tokio::test]
async fn test_json_search_against_mock_api() {
    let server = mock_api().await;
    let url = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        run_binary(&[
            "--first", "John", "--last", "Doe", "--org", "Google", "--api-url", &url, "--json",
            "--verbose", "0",
        ])
    })
    .await
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        str::from_utf8(&output.stderr).unwrap()
    );
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["domain"], "google.com");
    assert_eq!(value["resolution_method"], "company_map");
    assert_eq!(value["total_checked"], 173);
    assert_eq!(value["total_found"], 2);
    assert_eq!(value["found_emails"][0]["email"], "john.doe@google.com");
    assert_eq!(value["found_emails"][0]["confidence_tier"], "high");
    assert_eq!(value["found_emails"][1]["email"], "jdoe@google.com");
    assert_eq!(value["found_emails"][1]["confidence_tier"], "medium");
}

#[tokio::test]
async fn test_plain_search_with_company_flag() {
    let server = mock_api().await;
    let url = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        run_binary(&[
            "--first", "John", "--last", "Doe", "--org", "Alphabet Holdings", "--company",
            "Alphabet Holdings=google.com", "--api-url", &url, "--plain", "--max-patterns", "5",
        ])
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout, "john.doe@google.com\thigh\njdoe@google.com\tmedium\n");
}

#[tokio::test]
async fn test_library_pipeline_with_http_oracle() {
    let server = mock_api().await;
    let oracle = HttpOracle::new(&server.uri(), "/v0/check_email", Duration::from_secs(5)).unwrap();
    let resolver = DomainResolver::new(Arc::new(CompanyDirectory::with_well_known()), Arc::new(NoDns));
    let finder = EmailFinder::new(resolver, Arc::new(oracle), BatchVerifier::new(8), 20);

    let response = finder
        .find_emails(&FindEmailRequest::new("John", "Doe", "Google LLC"))
        .await
        .unwrap();

    assert_eq!(response.resolution_method, ResolutionMethod::CompanyMap);
    assert_eq!(response.total_checked, 20);
    let tiers: Vec<ConfidenceTier> = response.found_emails.iter().map(|r| r.confidence_tier).collect();
    assert_eq!(tiers, vec![ConfidenceTier::High, ConfidenceTier::Medium]);
}

#[tokio::test]
async fn test_library_pipeline_pattern_fallback() {
    let server = mock_api().await;
    let oracle = HttpOracle::new(&server.uri(), "/v0/check_email", Duration::from_secs(5)).unwrap();
    let resolver = DomainResolver::new(Arc::new(CompanyDirectory::new()), Arc::new(NoDns));
    let finder = EmailFinder::new(resolver, Arc::new(oracle), BatchVerifier::default(), 10);

    let response = finder
        .find_emails(&FindEmailRequest::new("John", "Doe", "Obscure Widgets Ltd"))
        .await
        .unwrap();

    assert!(response.domain_resolved);
    assert_eq!(response.resolution_method, ResolutionMethod::Pattern);
    assert_eq!(response.domain, "obscurewidgets.com");
    assert_eq!(response.total_checked, 10);
    assert!(response.found_emails.is_empty());
}

#[tokio::test]
async fn test_library_validation_error() {
    let server = mock_api().await;
    let oracle = HttpOracle::new(&server.uri(), "/v0/check_email", Duration::from_secs(5)).unwrap();
    let resolver = DomainResolver::new(Arc::new(CompanyDirectory::new()), Arc::new(NoDns));
    let finder = EmailFinder::new(resolver, Arc::new(oracle), BatchVerifier::default(), 10);

    let err = finder
        .find_emails(&FindEmailRequest::new("", "Doe", "acme.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, EmailFinderError::MissingField { ref field } if field == "first_name"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
