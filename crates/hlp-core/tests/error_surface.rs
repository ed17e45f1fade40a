use hlp_core::{ErrorKind, HlpError};

#[test]
fn constructors_set_the_family_and_code() {
    let err = HlpError::graph("vertex-out-of-range", "vertex id exceeds graph size");
    assert_eq!(err.kind(), ErrorKind::Graph);
    assert_eq!(err.code(), "vertex-out-of-range");

    assert_eq!(HlpError::config("max-labels-zero", "x").kind(), ErrorKind::Config);
    assert_eq!(HlpError::io("file-open", "x").kind(), ErrorKind::Io);
    assert_eq!(HlpError::format("bad-magic", "x").kind(), ErrorKind::Format);
    assert_eq!(HlpError::kernel("thread-pool", "x").kind(), ErrorKind::Kernel);
}

#[test]
fn context_preserves_attachment_order() {
    let err = HlpError::graph("out-degree", "degree cap exceeded")
        .with_context("vertex", 12)
        .with_context("cap", 4);

    assert_eq!(err.context("vertex"), Some("12"));
    assert_eq!(err.context("cap"), Some("4"));
    assert_eq!(err.context("missing"), None);

    let rendered = err.to_string();
    assert!(rendered.starts_with("graph error [out-degree]:"));
    assert!(rendered.find("vertex=12").unwrap() < rendered.find("cap=4").unwrap());
}

#[test]
fn hints_render_after_the_context() {
    let err = HlpError::format("truncated", "file ended mid edge")
        .with_context("path", "graph.hgr")
        .with_hint("regenerate the file");

    assert_eq!(err.hint(), Some("regenerate the file"));
    assert!(err.to_string().ends_with("hint: regenerate the file"));
}

#[test]
fn errors_round_trip_json() {
    let err = HlpError::format("truncated", "file ended mid edge")
        .with_context("path", "graph.hgr")
        .with_hint("regenerate the file");

    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: HlpError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
    assert_eq!(decoded.message(), "file ended mid edge");
}
