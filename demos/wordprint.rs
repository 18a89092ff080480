//! Prints a word a number of times.
//!
//! ```text
//! cargo run --example wordprint -- -c 5 -word bar -newlines=false
//! ```

use flag_bind::{Annotation, Flags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Options {
    count: i64,
    word: String,
    #[serde(rename = "NewLines")]
    new_lines: bool,
}

impl Flags for Options {
    fn annotations() -> Vec<Annotation> {
        vec![
            Annotation::field("count")
                .name("c")
                .value("10")
                .usage("the number of times to print the word"),
            Annotation::field("word")
                .value("foo")
                .usage("the word to print"),
            Annotation::field("NewLines")
                .value("true")
                .usage("if we should print each word on its own line"),
        ]
    }
}

fn main() -> Result<(), flag_bind::Error> {
    let mut options = Options::default();
    flag_bind::parse(&mut options)?;

    for _ in 0..options.count {
        if options.new_lines {
            println!("{}", options.word);
        } else {
            print!("{}", options.word);
        }
    }
    if !options.new_lines {
        println!();
    }

    Ok(())
}
