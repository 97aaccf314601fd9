use livemap::{LiveMap, MapError};

const RESPONSE: &str = r#"{
    "status": "200",
    "data": {
        "user": {"id": 29, "name": "mirkowang", "premium": 1, "score": "97.5"},
        "tags": ["go", "rust"]
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let response: LiveMap = RESPONSE.parse()?;

    if response.get_int("status") != Some(200) {
        println!("Unexpected status");
        return Ok(());
    }

    println!("Name: {:?}", response.get_string("data.user.name"));

    let user = match response.get_live_map("data.user") {
        Some(user) => user,
        None => {
            println!("Response has no user");
            return Ok(());
        }
    };
    println!("Id: {:?}", user.get_int("id"));
    println!("Premium: {:?}", user.get_bool("premium"));
    println!("Score: {:?}", user.get_float("score"));

    // try_get explains each failure instead of answering None
    for path in ["data.user.email", "data.tags.0", "data.tags"] {
        match response.try_get::<String>(path) {
            Ok(value) => println!("{}: {}", path, value),
            Err(MapError::KeyNotFound(key)) => println!("{}: missing key {:?}", path, key),
            Err(MapError::NotAContainer { key, found }) => {
                println!("{}: {:?} is {}, not an object", path, key, found)
            }
            Err(e) => println!("{}: {}", path, e),
        }
    }

    Ok(())
}
