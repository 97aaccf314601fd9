use livemap::{DecodeError, LiveMap};

// Settings as they might arrive from a hand-edited file and an environment
// overlay: ports as strings, flags as numbers.
const BASE: &[u8] = br#"{
    "server": {"host": "0.0.0.0", "port": "8080"},
    "workers": 4,
    "verbose": 0,
    "timeout_secs": "2.5"
}"#;

const OVERLAY: &[u8] = br#"{"verbose": "true", "workers": "0x10"}"#;

fn main() -> Result<(), DecodeError> {
    let mut settings = LiveMap::from_bytes(BASE)?;
    settings.read(OVERLAY)?;

    let server = settings.get_live_map("server").unwrap_or_default();
    let host = server.get_string("host").unwrap_or_else(|| "127.0.0.1".to_string());
    let port = server.get_int("port").unwrap_or(80);
    println!("Listening on {}:{}", host, port);

    // Paths work for strings, so the port can also be read in one go
    if let Some(port) = settings.get_string("server.port") {
        println!("Port as text: {}", port);
    }

    println!("Workers: {}", settings.get_int("workers").unwrap_or(1));
    println!("Verbose: {}", settings.get_bool("verbose").unwrap_or(false));
    println!("Timeout: {}s", settings.get_float("timeout_secs").unwrap_or(30.0));

    // A broken overlay is rejected and the settings stay as they were
    match settings.read(br#"{"workers": "#) {
        Ok(()) => println!("This shouldn't happen - the overlay is truncated"),
        Err(e) => println!("Ignoring bad overlay: {}", e),
    }
    println!("Keys after failed overlay: {}", settings.len());

    Ok(())
}
