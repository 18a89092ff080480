//! Shows the precedence between command line, values set before parsing,
//! and annotated defaults.
//!
//! ```text
//! RUST_LOG=flag_bind=trace cargo run --example dynamic -- -dynamic foo -fixed bar
//! ```

use flag_bind::{Annotation, Binder, Flags, TracingLogger};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Options {
    dynamic: String,
    fixed: String,
    shadow: String,
    ratio: f64,
}

impl Flags for Options {
    fn annotations() -> Vec<Annotation> {
        vec![
            Annotation::field("fixed").value("staticdef"),
            Annotation::field("shadow").value("xyz"),
        ]
    }
}

fn main() -> Result<(), flag_bind::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flag_bind=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Values assigned before parsing take precedence over annotations:
    // 1. flag, 2. value already in the struct, 3. annotated default.
    let mut options = Options {
        dynamic: "dynamicdef".into(),
        shadow: "shadowdef".into(),
        ..Options::default()
    };

    let mut binder = Binder::builder().with_logger(TracingLogger).build();
    binder.parse(&mut options, std::env::args())?;

    println!("{}\n{}\n{}", options.dynamic, options.fixed, options.shadow);
    Ok(())
}
