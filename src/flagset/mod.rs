//! Go-style flag registration and command-line parsing.
//!
//! A [`FlagSet`] holds typed flags registered by name. Each registration
//! returns a [`FlagCell`] that later resolves to the flag's value, and the
//! set remembers which flags were actually present on the command line.
//!
//! Accepted syntax:
//!
//! ```text
//! -name value    -name=value    --name value    --name=value
//! -flag          (boolean flags only; sets the flag to true)
//! --             (terminates flag parsing)
//! ```
//!
//! Parsing stops at the first argument that is not a flag; that argument
//! and everything after it is available through [`FlagSet::args`].

mod error;
mod value;

use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};

pub use error::FlagError;
pub use value::{parse_bool, parse_int, FlagValue};

/// Handle to a flag registered in a [`FlagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagCell(usize);

#[derive(Debug, Clone)]
struct Flag {
    name: String,
    usage: String,
    default: FlagValue,
    value: FlagValue,
    observed: bool,
}

impl Flag {
    fn set(&mut self, raw: &str) -> Result<(), FlagError> {
        self.value = self
            .value
            .parse_as(raw)
            .map_err(|reason| FlagError::InvalidValue {
                name: self.name.clone(),
                value: raw.to_string(),
                reason,
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    name: String,
    flags: Vec<Flag>,
    index: HashMap<String, usize>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    /// Creates an empty flag set. `name` is usually the program name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defines an integer flag.
    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> Result<FlagCell, FlagError> {
        self.define(name, FlagValue::Int(default), usage)
    }

    /// Defines a string flag.
    pub fn string(
        &mut self,
        name: &str,
        default: impl Into<String>,
        usage: &str,
    ) -> Result<FlagCell, FlagError> {
        self.define(name, FlagValue::Str(default.into()), usage)
    }

    /// Defines a boolean flag.
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Result<FlagCell, FlagError> {
        self.define(name, FlagValue::Bool(default), usage)
    }

    /// Defines a flag whose type is taken from `default`.
    ///
    /// Names must be unique within the set; a second definition under the
    /// same name is rejected with [`FlagError::Redefined`].
    pub fn define(
        &mut self,
        name: &str,
        default: FlagValue,
        usage: &str,
    ) -> Result<FlagCell, FlagError> {
        if name.is_empty() || name.starts_with('-') || name.contains('=') {
            return Err(FlagError::InvalidName(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(FlagError::Redefined(name.to_string()));
        }

        let position = self.flags.len();
        self.flags.push(Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            value: default.clone(),
            default,
            observed: false,
        });
        self.index.insert(name.to_string(), position);
        Ok(FlagCell(position))
    }

    /// Looks up a previously defined flag by name.
    pub fn lookup(&self, name: &str) -> Option<FlagCell> {
        self.index.get(name).copied().map(FlagCell)
    }

    /// Current value of a flag: the parsed value if it was set, else its default.
    pub fn value(&self, cell: FlagCell) -> Option<&FlagValue> {
        self.flags.get(cell.0).map(|flag| &flag.value)
    }

    /// Whether the flag appeared on the command line.
    ///
    /// Defaults never count as observed, even when the parsed value equals
    /// the default.
    pub fn is_observed(&self, cell: FlagCell) -> bool {
        self.flags.get(cell.0).is_some_and(|flag| flag.observed)
    }

    /// Parses flag tokens. The program name must not be included.
    pub fn parse<I, S>(&mut self, arguments: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed = true;
        let mut remaining: VecDeque<String> = arguments.into_iter().map(Into::into).collect();

        let outcome = loop {
            match self.parse_one(&mut remaining) {
                Ok(true) => continue,
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.args = remaining.into();
        outcome
    }

    /// Consumes one flag from the front of `remaining`.
    ///
    /// Returns `Ok(false)` once flag parsing is finished.
    fn parse_one(&mut self, remaining: &mut VecDeque<String>) -> Result<bool, FlagError> {
        let Some(front) = remaining.front() else {
            return Ok(false);
        };
        if front.len() < 2 || !front.starts_with('-') {
            return Ok(false);
        }
        if front == "--" {
            remaining.pop_front();
            return Ok(false);
        }
        let Some(token) = remaining.pop_front() else {
            return Ok(false);
        };

        let body = token.strip_prefix("--").unwrap_or(&token[1..]);
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(FlagError::BadSyntax(token.clone()));
        }

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let Some(&position) = self.index.get(name) else {
            if name == "help" || name == "h" {
                return Err(FlagError::Help);
            }
            return Err(FlagError::Undefined(name.to_string()));
        };

        let flag = &mut self.flags[position];
        let is_bool = matches!(flag.value, FlagValue::Bool(_));
        match inline {
            Some(raw) => flag.set(raw)?,
            None if is_bool => flag.value = FlagValue::Bool(true),
            None => {
                let raw = remaining
                    .pop_front()
                    .ok_or_else(|| FlagError::MissingValue(name.to_string()))?;
                flag.set(&raw)?;
            }
        }
        flag.observed = true;
        Ok(true)
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// The i'th argument left over after flag parsing.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// Arguments left over after flag parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of arguments left over after flag parsing.
    pub fn narg(&self) -> usize {
        self.args.len()
    }

    /// Number of flags that were set on the command line.
    pub fn nflag(&self) -> usize {
        self.flags.iter().filter(|flag| flag.observed).count()
    }

    /// Writes one line per flag, in definition order:
    /// name, type, usage and the default when it is not the zero value.
    pub fn write_defaults<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for flag in &self.flags {
            write!(out, "  -{} {}", flag.name, flag.default.type_name())?;
            if !flag.usage.is_empty() {
                write!(out, "\t{}", flag.usage)?;
            }
            match &flag.default {
                FlagValue::Str(s) if !s.is_empty() => write!(out, " (default {s:?})")?,
                other if !other.is_zero() => write!(out, " (default {other})")?,
                _ => {}
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
