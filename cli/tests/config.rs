use chainspeak_cli::config::{Backend, Config, Context, load_config};
use chainspeak_cli::{Output, OutputFormat};

fn load(dir: &tempfile::TempDir) -> Config {
    let path = dir.path().join("nested").join("config.yaml");
    load_config("chainspeak", path.to_str()).unwrap()
}

#[test]
fn load_creates_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load(&dir);
    assert!(cfg.path().exists());
    assert!(cfg.contexts.is_empty());
    assert!(cfg.get_current_context().is_none());
    assert_eq!(cfg.app_name, "chainspeak");
}

#[test]
fn contexts_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let mut cfg = load(&dir);
    cfg.add_context(
        "sepolia",
        Context {
            backend: Backend::Rpc,
            rpc_url: "https://sepolia.base.org".into(),
            private_key: "$WALLET_PRIVATE_KEY".into(),
            timeout: 10,
            ..Default::default()
        },
    )
    .unwrap();
    cfg.add_context("local", Context::default()).unwrap();

    let cfg = load(&dir);
    assert_eq!(cfg.list_contexts(), vec!["local", "sepolia"]);
    // First added context becomes current.
    assert_eq!(cfg.current_context, "sepolia");

    let ctx = cfg.resolve_context(None).unwrap();
    assert_eq!(ctx.name, "sepolia");
    assert_eq!(ctx.backend, Backend::Rpc);
    assert_eq!(ctx.private_key, "$WALLET_PRIVATE_KEY");
    assert_eq!(ctx.timeout, 10);

    let local = cfg.resolve_context(Some("local")).unwrap();
    assert_eq!(local.backend, Backend::Mock);
    assert!(cfg.resolve_context(Some("missing")).is_none());

    let raw = std::fs::read_to_string(cfg.path()).unwrap();
    assert!(raw.contains("backend: rpc"));
    assert!(!raw.contains("chain_id"));
}

#[test]
fn use_and_delete_context() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = load(&dir);
    cfg.add_context("a", Context::default()).unwrap();
    cfg.add_context("b", Context::default()).unwrap();

    cfg.use_context("b").unwrap();
    assert_eq!(load(&dir).current_context, "b");

    let err = cfg.use_context("zzz").unwrap_err();
    assert_eq!(err.to_string(), "context 'zzz' not found");

    cfg.delete_context("b").unwrap();
    let cfg = load(&dir);
    assert!(cfg.current_context.is_empty());
    assert_eq!(cfg.list_contexts(), vec!["a"]);
}

#[test]
fn output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let out = Output::new(OutputFormat::Json, Some(path.to_string_lossy().into_owned()));
    out.write(&serde_json::json!({"balance": "1.0"})).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["balance"], "1.0");
}
