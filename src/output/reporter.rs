//! Structured result emission.

use serde::Serialize;

use super::json_envelope::{EventType, JsonEnvelope};

/// Print `payload` as a single result envelope on stdout.
///
/// Serialization failures are reported on stderr so the stdout stream
/// stays valid JSON.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn emit_json_result<T: Serialize>(payload: &T) {
    match render_json_result(payload) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize JSON result: {e}"),
    }
}

fn render_json_result<T: Serialize>(payload: &T) -> serde_json::Result<String> {
    serde_json::to_string(&JsonEnvelope::new(EventType::Result, payload))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Dummy {
        count: usize,
    }

    #[test]
    fn test_render_wraps_payload_in_result_envelope() {
        let json = render_json_result(&Dummy { count: 2 }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["event"], "result");
        assert_eq!(value["payload"]["count"], 2);
        assert!(value["timestamp"].is_string());
    }
}
