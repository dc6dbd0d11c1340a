//! End-to-end: endpoint → logging middleware → rendered sink output.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use toku::{
    AppendKeyvals, BoxError, Endpoint, EndpointExt, Keyvals, Logfmt, Logging, Nop, SinkFn, Value,
};

/// A writer whose buffer stays readable after the sink takes ownership.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

struct Order {
    id: u64,
}

impl AppendKeyvals for Order {
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        keyvals.append("order_id", self.id)
    }
}

#[tokio::test]
async fn success_renders_one_logfmt_line() {
    let buf = SharedBuf::default();
    let ep = |_: (), req: Order| async move { (format!("order {}", req.id), None::<BoxError>) };
    let ep = ep.with(Logging::new(Logfmt::new(buf.clone())));

    let (resp, err) = ep.call((), Order { id: 7 }).await;

    assert_eq!(resp, "order 7");
    assert!(err.is_none());

    let line = buf.contents();
    assert!(line.starts_with("transport_error=null took="), "unexpected line: {line}");
    assert!(line.trim_end().ends_with("order_id=7"), "unexpected line: {line}");
}

#[tokio::test]
async fn failure_line_carries_the_quoted_error() {
    let buf = SharedBuf::default();
    let ep = |_: (), _req: Order| async move { ((), Some(BoxError::from("backend timed out"))) };
    let ep = ep.with(Logging::new(Nop).failure(Logfmt::new(buf.clone())));

    let (_, err) = ep.call((), Order { id: 9 }).await;

    assert!(err.is_some());

    let line = buf.contents();
    assert!(
        line.starts_with(r#"transport_error="backend timed out" took="#),
        "unexpected line: {line}"
    );
    assert!(line.trim_end().ends_with("order_id=9"), "unexpected line: {line}");
}

#[tokio::test]
async fn concurrent_calls_each_emit_a_complete_sequence() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        SinkFn::new(move |keyvals| {
            seen.lock().unwrap().push(keyvals);
            Ok(())
        })
    };
    let ep = |_: (), req: Order| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        (req.id.to_string(), None::<BoxError>)
    };
    let ep = Arc::new(ep.with(Logging::new(sink)));

    let mut tasks = tokio::task::JoinSet::new();
    for id in 0..8u64 {
        let ep = Arc::clone(&ep);
        tasks.spawn(async move { ep.call((), Order { id }).await });
    }
    while let Some(result) = tasks.join_next().await {
        let (resp, err) = result.unwrap();
        assert!(err.is_none(), "call {resp} failed");
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 8);
    for keyvals in seen.iter() {
        assert_eq!(keyvals.len(), 6);
        assert_eq!(keyvals.get(4), Some(&Value::Str("order_id".into())));
    }

    // Every call logged its own request, none overwrote another's.
    let mut ids: Vec<u64> = seen
        .iter()
        .map(|keyvals| match keyvals.get(5) {
            Some(Value::Uint(id)) => *id,
            other => panic!("expected the order id, got {other:?}"),
        })
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
}
