//! Minimal toku example — a greeter endpoint with outcome logging.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Expected output: one INFO event for the successful call, one ERROR event
//! for the failed one, each carrying the error slot, the duration, and the
//! fields the request and response types contribute.

use toku::{AppendKeyvals, BoxError, Endpoint, EndpointExt, Keyvals, Logging, Tracing};

struct Greet {
    name: String,
}

// The request opts in: its name shows up in every log line for the call.
impl AppendKeyvals for Greet {
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        keyvals.append("greet.name", self.name.clone())
    }
}

struct Greeting {
    text: String,
}

impl AppendKeyvals for Greeting {
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        keyvals.append("greeting.len", self.text.len())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let greeter = |_cx: (), req: Greet| async move {
        if req.name.is_empty() {
            return (
                Greeting { text: String::new() },
                Some(BoxError::from("empty name")),
            );
        }
        (Greeting { text: format!("hello, {}", req.name) }, None)
    };

    let greeter = greeter.with(Logging::new(Tracing::info()).failure(Tracing::error()));

    let (greeting, _) = greeter.call((), Greet { name: "ada".into() }).await;
    println!("{}", greeting.text);

    // The failure path: routed to the error sink, result still returned.
    let (_, err) = greeter.call((), Greet { name: String::new() }).await;
    if let Some(err) = err {
        println!("call failed as expected: {err}");
    }
}
