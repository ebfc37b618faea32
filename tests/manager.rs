//! Sandbox manager tests against the in-memory engine

mod common;

use common::{printer, registry, FakeEngine};
use dev_sandbox::container::naming::{LABEL_CONTAINER, LABEL_ID, LABEL_TEMPLATE};
use dev_sandbox::container::VsCode;
use dev_sandbox::{RunOptions, SandboxError, SandboxManager};
use regex::Regex;

fn manager(engine: FakeEngine) -> (SandboxManager<FakeEngine>, common::SharedBuffer) {
    let (printer, buffer) = printer();
    (SandboxManager::new(engine, registry(), printer), buffer)
}

const SANDBOX_LABELS: &[(&str, &str)] = &[
    (LABEL_CONTAINER, "true"),
    (LABEL_ID, "abc123"),
    (LABEL_TEMPLATE, "Golang"),
];

#[tokio::test]
async fn test_run_creates_and_starts_container() {
    let (mut manager, output) = manager(FakeEngine::with_images(&["node:20"]));

    let outcome = manager.run("react", RunOptions::default()).await.unwrap();

    let name_re = Regex::new(r"^dev-sandbox-React_App-([0-9a-f]{6})$").unwrap();
    let suffix = name_re
        .captures(&outcome.container_name)
        .expect("generated name")
        .get(1)
        .unwrap()
        .as_str()
        .to_string();

    let state = manager.engine().state();
    assert_eq!(state.pings, 1);
    assert!(state.pulled.is_empty());
    assert_eq!(state.created.len(), 1);

    let spec = &state.created[0];
    assert_eq!(spec.name, outcome.container_name);
    assert_eq!(spec.image, "node:20");
    assert_eq!(spec.command, vec!["npm", "run", "dev"]);
    assert_eq!(spec.env, vec!["NODE_ENV=development"]);
    assert_eq!(spec.labels[LABEL_CONTAINER], "true");
    assert_eq!(spec.labels[LABEL_ID], suffix);
    assert_eq!(spec.labels[LABEL_TEMPLATE], "React App");

    assert_eq!(state.started, vec![outcome.container_id.clone()]);
    assert!(state.removed.is_empty());

    assert_eq!(
        outcome.message,
        format!("Attach with: docker exec -it {} sh", outcome.container_name)
    );
    let printed = output.contents();
    assert!(printed.contains("Docker API Version: 1.45"));
    assert!(printed.contains(&outcome.message));
}

#[tokio::test]
async fn test_run_maps_ports_in_order() {
    let (mut manager, output) = manager(FakeEngine::with_images(&["node:20"]));

    manager.run("react", RunOptions::default()).await.unwrap();

    let state = manager.engine().state();
    let ports = &state.created[0].ports;
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].container_port, "5173/tcp");
    assert_eq!(ports[0].host_port, "5173");
    assert_eq!(ports[1].container_port, "9229/tcp");
    assert_eq!(ports[1].host_port, "19229");
    assert!(output
        .contents()
        .contains("Mapping Container Port 9229/tcp to Host Port 19229."));
}

#[tokio::test]
async fn test_run_disable_ports() {
    let (mut manager, output) = manager(FakeEngine::with_images(&["node:20"]));

    let options = RunOptions {
        disable_ports: true,
        open_editor: false,
    };
    manager.run("react", options).await.unwrap();

    assert!(manager.engine().state().created[0].ports.is_empty());
    assert!(!output.contents().contains("Mapping Container Port"));
}

#[tokio::test]
async fn test_run_open_editor_without_launcher() {
    let (manager, output) = manager(FakeEngine::with_images(&["node:20"]));
    let mut manager = manager.with_editor(VsCode::new("no-such-editor-binary"));

    let options = RunOptions {
        disable_ports: false,
        open_editor: true,
    };
    let outcome = manager.run("react", options).await.unwrap();

    let printed = output.contents();
    assert!(printed.contains("'no-such-editor-binary' was not found on PATH"));
    assert!(printed.contains(&format!(
        "Pick '{}' and open the folder '/app'.",
        outcome.container_name
    )));
    assert_eq!(manager.engine().state().started.len(), 1);
}

#[tokio::test]
async fn test_run_pulls_missing_image() {
    let (mut manager, _) = manager(FakeEngine::new());

    manager.run("golang", RunOptions::default()).await.unwrap();

    assert_eq!(manager.engine().state().pulled, vec!["golang:1.22"]);
}

#[tokio::test]
async fn test_run_unknown_template() {
    let (mut manager, _) = manager(FakeEngine::new());

    let result = manager.run("cobol", RunOptions::default()).await;

    assert!(matches!(result, Err(SandboxError::TemplateNotFound(ref t)) if t == "cobol"));
    assert_eq!(manager.engine().state().pings, 0);
}

#[tokio::test]
async fn test_run_engine_unreachable() {
    let engine = FakeEngine::new();
    engine.state().unreachable = true;
    let (mut manager, _) = manager(engine);

    let result = manager.run("golang", RunOptions::default()).await;

    assert!(matches!(result, Err(SandboxError::EngineUnreachable(_))));
    assert_eq!(manager.engine().mutations(), 0);
}

#[tokio::test]
async fn test_run_start_failure_removes_container() {
    let engine = FakeEngine::with_images(&["golang:1.22"]);
    engine.state().fail_start = true;
    let (mut manager, _) = manager(engine);

    let result = manager.run("golang", RunOptions::default()).await;

    assert!(matches!(result, Err(SandboxError::Engine(_))));
    let state = manager.engine().state();
    assert_eq!(state.removed, vec![("container-1".to_string(), true)]);
    assert!(state.containers.is_empty());
}

#[tokio::test]
async fn test_run_malformed_message() {
    let (mut manager, _) = manager(FakeEngine::with_images(&["alpine"]));

    let result = manager.run("broken-message", RunOptions::default()).await;

    assert!(matches!(result, Err(SandboxError::Render(_))));
}

#[tokio::test]
async fn test_run_twice_gives_unique_names() {
    let (mut manager, _) = manager(FakeEngine::with_images(&["golang:1.22"]));

    let first = manager.run("golang", RunOptions::default()).await.unwrap();
    let second = manager.run("golang", RunOptions::default()).await.unwrap();

    assert_ne!(first.container_name, second.container_name);
}

#[tokio::test]
async fn test_list_only_labelled_containers() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    engine.add_container("b2", "postgres", &[]);
    engine.add_container("c3", "half-labelled", &[(LABEL_CONTAINER, "true")]);
    let (manager, _) = manager(engine);

    let sandboxes = manager.list().await.unwrap();

    assert_eq!(sandboxes.len(), 1);
    assert_eq!(sandboxes[0].name, "dev-sandbox-Golang-abc123");
    assert_eq!(sandboxes[0].template, "Golang");
    assert_eq!(
        manager.engine().state().list_filters[0].labels,
        vec![LABEL_TEMPLATE.to_string()]
    );
}

#[tokio::test]
async fn test_purge_without_sandboxes() {
    let engine = FakeEngine::new();
    engine.add_container("b2", "postgres", &[]);
    let (mut manager, _) = manager(engine);

    let removed = manager.purge().await.unwrap();

    assert_eq!(removed, 0);
    assert!(manager.engine().state().removed.is_empty());
}

#[tokio::test]
async fn test_purge_removes_every_sandbox() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    engine.add_container("a2", "dev-sandbox-Golang-def456", SANDBOX_LABELS);
    engine.add_container("b2", "postgres", &[]);
    let (mut manager, _) = manager(engine);

    let removed = manager.purge().await.unwrap();

    assert_eq!(removed, 2);
    let state = manager.engine().state();
    assert_eq!(
        state.removed,
        vec![("a1".to_string(), true), ("a2".to_string(), true)]
    );
    assert_eq!(state.containers.len(), 1);
}

#[tokio::test]
async fn test_purge_stops_at_first_failure() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    engine.add_container("a2", "dev-sandbox-Golang-def456", SANDBOX_LABELS);
    engine.state().fail_remove = vec!["a1".to_string()];
    let (mut manager, _) = manager(engine);

    let result = manager.purge().await;

    assert!(matches!(result, Err(SandboxError::Engine(_))));
    assert!(manager.engine().state().removed.is_empty());
}

#[tokio::test]
async fn test_delete_empty_name() {
    let (mut manager, _) = manager(FakeEngine::new());

    let result = manager.delete("   ").await;

    assert!(matches!(result, Err(SandboxError::Validation(_))));
    assert!(manager.engine().state().list_filters.is_empty());
}

#[tokio::test]
async fn test_delete_not_found() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    let (mut manager, _) = manager(engine);

    let result = manager.delete("x").await;

    assert!(matches!(result, Err(SandboxError::NotFound(ref n)) if n == "x"));
    assert!(manager.engine().state().removed.is_empty());
}

#[tokio::test]
async fn test_delete_ignores_prefix_matches() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    let (mut manager, _) = manager(engine);

    let result = manager.delete("dev-sandbox-Golang").await;

    assert!(matches!(result, Err(SandboxError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_trims_surrounding_whitespace() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    let (mut manager, _) = manager(engine);

    let removed = manager.delete("  dev-sandbox-Golang-abc123\n").await.unwrap();

    assert_eq!(removed.id, "a1");
    assert_eq!(
        manager.engine().state().list_filters[0].name.as_deref(),
        Some(format!("^/?{}$", regex::escape("dev-sandbox-Golang-abc123")).as_str())
    );
}

#[tokio::test]
async fn test_delete_ambiguous() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "box", SANDBOX_LABELS);
    engine.add_container("a2", "box", SANDBOX_LABELS);
    let (mut manager, _) = manager(engine);

    let result = manager.delete("box").await;

    assert!(matches!(
        result,
        Err(SandboxError::AmbiguousMatch { count: 2, .. })
    ));
    assert!(manager.engine().state().removed.is_empty());
}

#[tokio::test]
async fn test_delete_removes_match() {
    let engine = FakeEngine::new();
    engine.add_container("a1", "dev-sandbox-Golang-abc123", SANDBOX_LABELS);
    engine.add_container("a2", "dev-sandbox-Golang-def456", SANDBOX_LABELS);
    let (mut manager, output) = manager(engine);

    let removed = manager.delete("/dev-sandbox-Golang-abc123").await.unwrap();

    assert_eq!(removed.id, "a1");
    let state = manager.engine().state();
    assert_eq!(state.removed, vec![("a1".to_string(), true)]);
    assert!(state.list_filters[0]
        .labels
        .contains(&LABEL_CONTAINER.to_string()));
    assert!(output
        .contents()
        .contains("Deleting sandbox 'dev-sandbox-Golang-abc123'"));
}
