//! ```text
//! cargo run --example fizzbuzz -- -fizzon 3 -buzzon 5
//! ```

use flag_bind::Flags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Options {
    #[serde(rename = "FizzOn")]
    fizz_on: i64,
    #[serde(rename = "BuzzOn")]
    buzz_on: i64,
}

impl Flags for Options {}

fn main() -> Result<(), flag_bind::Error> {
    let mut options = Options::default();
    flag_bind::parse(&mut options)?;

    if options.fizz_on <= 0 || options.buzz_on <= 0 {
        eprintln!("fizzon and buzzon must be set to positive numbers");
        std::process::exit(1);
    }

    for i in 1..=25 {
        let mut line = i.to_string();
        line.push(' ');
        if i % options.fizz_on == 0 {
            line.push_str("fizz");
        }
        if i % options.buzz_on == 0 {
            line.push_str("buzz");
        }
        println!("{line}");
    }

    Ok(())
}
