#![allow(dead_code)]

use anyhow::Result;
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = CapturedOutput;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local JSON subscriber and return the emitted events.
pub fn capture_json_events<F: FnOnce()>(f: F) -> Result<Vec<Value>> {
    let output = CapturedOutput::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_writer(output.clone())
        .json()
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let text = String::from_utf8(output.0.lock().unwrap().clone())?;
    let mut events = Vec::new();
    for line in text.lines() {
        events.push(serde_json::from_str(line)?);
    }
    Ok(events)
}

/// The structured entry is carried, as JSON text, in the event's message.
pub fn structured_message(event: &Value) -> Result<Value> {
    let text = event["fields"]["message"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("event has no message: {}", event))?;
    Ok(serde_json::from_str(text)?)
}

/// An object nested `levels` deep, e.g. `{"1": {"2": 1}}` for 2.
pub fn nested(levels: usize) -> Value {
    (1..=levels).rev().fold(Value::from(1), |inner, level| {
        let mut map = serde_json::Map::new();
        map.insert(level.to_string(), inner);
        Value::Object(map)
    })
}
