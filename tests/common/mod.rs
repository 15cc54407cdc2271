// Shared helpers for cacoon integration tests.

use assert_cmd::Command;

/// A hermetic `cacoon` command: no dotenv loading, a dummy API key, and
/// no endpoint or log settings inherited from the host.
pub fn cacoon_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cacoon");
    cmd.env("DOTENV_DISABLED", "1")
        .env("CACOON_API_KEY", "test-key")
        .env_remove("CACOON_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

/// `cacoon_cmd` pointed at a mock server.
#[allow(dead_code)]
pub fn cacoon_cmd_with_endpoint(endpoint: &str) -> Command {
    let mut cmd = cacoon_cmd();
    cmd.env("CACOON_ENDPOINT", endpoint);
    cmd
}

#[allow(dead_code)]
pub fn diagram_json(id: &str, owner: &str) -> serde_json::Value {
    serde_json::json!({
        "url": format!("https://cacoo.com/diagrams/{}", id),
        "imageUrl": format!("https://cacoo.com/diagrams/{}.png", id),
        "diagramId": id,
        "title": format!("Diagram {}", id),
        "security": "url",
        "type": "normal",
        "owner": {"name": owner, "nickname": owner.to_lowercase(), "type": "user", "imageUrl": ""},
        "own": true,
        "shared": false,
        "folderId": null,
        "created": "Mon, 10 Aug 2009 17:00:00 +0900",
        "updated": "Mon, 10 Aug 2009 17:00:00 +0900"
    })
}
