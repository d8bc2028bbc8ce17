use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Encoder, Histogram,
    IntCounterVec, IntGauge, TextEncoder,
};

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "memkv_operations_total",
        "Store operations by kind and outcome",
        &["op", "outcome"]
    )
    .expect("register operations_total")
});

pub static KEYS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("memkv_keys", "Number of keys currently stored")
        .expect("register keys")
});

pub static VALUE_BYTES: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "memkv_value_bytes",
        "Size of values written by PUT",
        vec![16.0, 64.0, 256.0, 1024.0, 4096.0, 16384.0, 65536.0, 262144.0, 1048576.0]
    )
    .expect("register value_bytes")
});

pub fn record_op(op: &str, outcome: &str) {
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn set_keys(n: usize) {
    KEYS.set(i64::try_from(n).unwrap_or(i64::MAX));
}

pub fn observe_value_size(n: usize) {
    VALUE_BYTES.observe(n as f64);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_ops_show_up_in_exposition() {
        record_op("get", "miss");
        set_keys(3);
        observe_value_size(10);
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("memkv_operations_total"));
        assert!(body.contains(r#"op="get""#));
        assert!(body.contains("memkv_keys"));
        assert!(body.contains("memkv_value_bytes"));
    }
}
