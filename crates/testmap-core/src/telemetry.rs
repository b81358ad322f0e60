//! Process-wide log setup for the `testmap` binary.
//!
//! Library code only emits events (see [`crate::obs`]); installing a
//! subscriber is left to whichever binary links the crate.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `level` when set. `json` switches the output to one
/// JSON object per line. A subscriber that is already installed is left in
/// place.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(output_layer(json))
        .with(filter)
        .try_init()
        .ok();
}

fn output_layer(json: bool) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}
