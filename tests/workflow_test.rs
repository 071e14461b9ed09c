//! End-to-end tests: real git repository, mocked chat completion endpoint.

mod common;

use auto_commit_msg::commit::{CommitMessageWorkflow, Destination, Outcome, TRACE_DELIMITER};
use auto_commit_msg::error::{ChatError, ErrorKind, WorkflowError};
use auto_commit_msg::git::{DiffStats, GitCli};
use auto_commit_msg::hook::HookContext;
use auto_commit_msg::llm::ChatClient;
use common::{TestRepo, completion_body, test_config};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_reply(server: &MockServer, model: &str, texts: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": model })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(texts)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_small_change_written_to_file() {
    let server = MockServer::start().await;
    mock_reply(&server, "small-model", &["feat: add greeting", "feat: ignored"]).await;

    let repo = TestRepo::new();
    repo.stage_file("hello.txt", "hello\n");

    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();
    let destination = Destination::File(repo.commit_msg_file());

    let outcome = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(&HookContext::default(), &destination)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Written {
            model: "small-model".to_string(),
            stats: DiffStats {
                files_changed: 1,
                insertions: 1,
                deletions: 0,
            },
            message: "feat: add greeting".to_string(),
        }
    );
    assert_eq!(
        std::fs::read_to_string(repo.commit_msg_file()).unwrap(),
        "feat: add greeting"
    );
}

#[tokio::test]
async fn test_large_change_uses_long_model() {
    let server = MockServer::start().await;
    mock_reply(&server, "large-model", &["refactor: rewrite data layer"]).await;

    let repo = TestRepo::new();
    repo.stage_file("big.txt", &common::lines(200));

    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();

    let outcome = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(
            &HookContext::default(),
            &Destination::File(repo.commit_msg_file()),
        )
        .await
        .unwrap();

    match outcome {
        Outcome::Written { model, stats, .. } => {
            assert_eq!(model, "large-model");
            assert_eq!(stats.total_changes(), 200);
        }
        other => panic!("Expected Written, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_trace_block_appended() {
    let server = MockServer::start().await;
    mock_reply(&server, "small-model", &["fix: handle empty input"]).await;

    let repo = TestRepo::new();
    repo.stage_file("fix.txt", "fixed\n");

    let config = test_config(&server.uri(), true);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();

    CommitMessageWorkflow::new(&config, &git, &chat)
        .run(
            &HookContext::default(),
            &Destination::File(repo.commit_msg_file()),
        )
        .await
        .unwrap();

    let written = std::fs::read_to_string(repo.commit_msg_file()).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "fix: handle empty input");
    assert_eq!(lines[1], TRACE_DELIMITER);

    let trace: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    let block = &trace["auto-commit-msg"];
    assert_eq!(block["model"], "small-model");
    assert!(block["response_time"].as_f64().unwrap() >= 0.0);
    assert!(
        block["execution_time"].as_f64().unwrap() >= block["response_time"].as_f64().unwrap()
    );
}

#[tokio::test]
async fn test_non_200_fails_without_touching_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let repo = TestRepo::new();
    repo.stage_file("x.txt", "x\n");
    std::fs::write(repo.commit_msg_file(), "# git template\n").unwrap();

    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();

    let err = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(
            &HookContext::default(),
            &Destination::File(repo.commit_msg_file()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        WorkflowError::Chat(ChatError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected Status error, got: {:?}", other),
    }
    assert_eq!(
        std::fs::read_to_string(repo.commit_msg_file()).unwrap(),
        "# git template\n"
    );
}

#[tokio::test]
async fn test_zero_choices_fail_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let repo = TestRepo::new();
    repo.stage_file("x.txt", "x\n");

    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();

    let err = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(
            &HookContext::default(),
            &Destination::File(repo.commit_msg_file()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::EmptyResponse));
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(!repo.commit_msg_file().exists());
}

#[tokio::test]
async fn test_nothing_staged_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["x"])))
        .expect(0)
        .mount(&server)
        .await;

    let repo = TestRepo::new();
    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();

    let err = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(
            &HookContext::default(),
            &Destination::File(repo.commit_msg_file()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::NothingStaged));
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

#[tokio::test]
async fn test_hook_commit_source_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["x"])))
        .expect(0)
        .mount(&server)
        .await;

    let repo = TestRepo::new();
    repo.stage_file("x.txt", "x\n");
    std::fs::write(repo.commit_msg_file(), "user wrote this\n").unwrap();

    let config = test_config(&server.uri(), false);
    let git = GitCli::in_dir(repo.path());
    let chat = ChatClient::new(server.uri(), config.provider.secret.expose()).unwrap();
    let hook = HookContext::new(Some("message".to_string()));

    let outcome = CommitMessageWorkflow::new(&config, &git, &chat)
        .run(&hook, &Destination::File(repo.commit_msg_file()))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Skipped { .. }));
    assert_eq!(
        std::fs::read_to_string(repo.commit_msg_file()).unwrap(),
        "user wrote this\n"
    );
}
