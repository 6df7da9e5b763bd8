//! Shared fixtures for integration tests

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use launchpad::http::{HttpMethod, HttpRequest, HttpResponse, MockTransport};
use launchpad::LaunchpadConfig;
use serde_json::json;
use std::path::Path;

/// Configuration rooted at `root` with repository credentials and optional extra variables
pub fn config_for(root: &Path, extra: &[(&str, &str)]) -> LaunchpadConfig {
    let mut vars: Vec<(String, String)> = vec![
        ("GROQ_API_KEY".into(), "gsk_test".into()),
        ("GITHUB_TOKEN".into(), "ghp_test".into()),
        ("GITHUB_OWNER".into(), "octo".into()),
        ("PROJECT_NAME".into(), "todo".into()),
        ("PROJECT_SPEC".into(), "todo app".into()),
        ("LAUNCHPAD_WORK_DIR".into(), root.display().to_string()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    LaunchpadConfig::from_lookup(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

/// Repository and deploy APIs answering like a fresh account
///
/// Repository creation succeeds, no file exists yet, uploads succeed, the deploy trigger
/// returns `exs-1` and every status poll reports `deploy_status`.
pub fn fake_services(deploy_status: &'static str) -> MockTransport {
    MockTransport::new(move |req| {
        let url = req.url.as_str();
        Ok(match req.method {
            HttpMethod::Post if url.ends_with("/user/repos") => HttpResponse::json(
                201,
                &json!({"html_url": "https://github.com/octo/todo"}),
            ),
            HttpMethod::Post if url.ends_with("/v1/blueprint-deploys") => {
                HttpResponse::json(201, &json!({"id": "exs-1"}))
            }
            HttpMethod::Get if url.contains("/v1/blueprint-deploys/") => HttpResponse::json(
                200,
                &json!({
                    "status": deploy_status,
                    "services": [{"service": {
                        "dashboardUrl": "https://dashboard.render.com/web/srv-1",
                        "serviceDetails": {"url": "https://todo.onrender.com"}
                    }}]
                }),
            ),
            HttpMethod::Get => HttpResponse::text(404, "Not Found"),
            HttpMethod::Put => HttpResponse::json(201, &json!({"content": {}})),
            HttpMethod::Post => HttpResponse::text(404, "Not Found"),
        })
    })
}

/// Paths of every uploaded file, in upload order
pub fn uploaded_paths(requests: &[HttpRequest]) -> Vec<String> {
    requests
        .iter()
        .filter(|r| r.method == HttpMethod::Put)
        .filter_map(|r| r.url.split("/contents/").nth(1).map(str::to_string))
        .collect()
}

/// Decoded content of the upload for `path`
pub fn uploaded_content(requests: &[HttpRequest], path: &str) -> Option<String> {
    let suffix = format!("/contents/{}", path);
    let body = requests
        .iter()
        .find(|r| r.method == HttpMethod::Put && r.url.ends_with(&suffix))?
        .body
        .as_ref()?;
    let encoded = body["content"].as_str()?;
    let bytes = BASE64.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
