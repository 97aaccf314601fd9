use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("livemap=trace".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

/// The document most accessor tests read from
#[allow(dead_code)]
pub fn example_bytes() -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "hello": "world",
        "age": 29,
        "year": "2020",
        "weight": 60.3,
        "good": true,
    }))
    .unwrap()
}
