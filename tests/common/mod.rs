use serde_json::json;
use sleuth::config::Config;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-test";

/// Configuration pointing at `server`, with the record file inside `dir`
#[allow(dead_code)]
pub fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.openai.api_key = Some(API_KEY.to_string());
    config.openai.api_base = format!("{}/v1", server.uri());
    config.assistant.record_path = dir.path().join("assistant.json");
    config.polling.interval_ms = 5;
    config.polling.max_polls = 20;
    config
}

/// Mount the thread, message and run creation endpoints
#[allow(dead_code)]
pub async fn mount_conversation(server: &MockServer, thread_id: &str, run_id: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": thread_id,
            "object": "thread"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/threads/{}/messages", thread_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_user",
            "thread_id": thread_id,
            "role": "user",
            "run_id": null,
            "content": [{"type": "text", "text": {"value": "Who is the killer?", "annotations": []}}]
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/threads/{}/runs", thread_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json(
            thread_id, run_id, "queued",
        )))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn run_json(thread_id: &str, run_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": run_id,
        "object": "thread.run",
        "thread_id": thread_id,
        "assistant_id": "asst_remote",
        "status": status
    })
}
