/*!
 * Monitoring
 * Structured tracing setup and the event sinks workers report progress to
 */

mod events;
mod tracer;

pub use events::{EventSink, NullSink, RecordingSink, TracingSink, WorkerEvent};
pub use tracer::{init_tracing, DemoSpan};
