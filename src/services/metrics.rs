use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

lazy_static! {
    pub static ref ACTIONS_COUNTER: CounterVec = register_counter_vec!(
        "broadcast_actions_total",
        "Broadcast actions handled, by action and status",
        &["action", "status"]
    ).unwrap();

    pub static ref PUSH_COUNTER: CounterVec = register_counter_vec!(
        "broadcast_push_total",
        "Broadcast push notifications, by status",
        &["status"]
    ).unwrap();

    pub static ref FILE_ACCESS_COUNTER: CounterVec = register_counter_vec!(
        "broadcast_file_access_records_total",
        "Per-recipient file access records, by status",
        &["status"]
    ).unwrap();
}

pub fn record_action(action: &str, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    ACTIONS_COUNTER.with_label_values(&[action, status]).inc();
}

/// Render every registered metric in the Prometheus text format.
pub fn render() -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_actions() {
        record_action("delete", false);
        let text = render().unwrap();
        assert!(text.contains("broadcast_actions_total"));
        assert!(text.contains(r#"action="delete""#));
    }
}
