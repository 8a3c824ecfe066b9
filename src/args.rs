use std::path::PathBuf;
use anyhow::{Result, anyhow};
use log::warn;

use crate::ne::extract::{DumpOptions, FileNaming};

pub const MAX_PREFIX_LEN: usize = 256;

#[derive(Debug)]
pub enum Command {
    Usage,
    List(Invocation),
}

#[derive(Debug)]
pub struct Invocation {
    pub input: PathBuf,
    pub dump: Option<DumpOptions>,
    pub ignored: Vec<String>, // Unknown options, warned about and skipped
}

/// `args[0]` is the program name, as with `std::env::args`.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let input = match args.get(1).map(String::as_str) {
        None | Some("--help") | Some("-h") | Some("help") => return Ok(Command::Usage),
        Some(input) => PathBuf::from(input),
    };

    let mut prefix = None;
    let mut naming = FileNaming::Indexed;
    let mut ignored = Vec::new();

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-usenames" | "--use-names" => naming = FileNaming::ResourceNames,
            "-dump" | "--dump" => {
                let value = rest.next().ok_or_else(|| anyhow!("Missing parameter for: {}", arg))?;
                prefix = Some(value.clone());
            }
            _ => {
                warn!("Unknown parameter: {}", arg);
                ignored.push(arg.clone());
            }
        }
    }

    if prefix.as_ref().map_or(false, |p: &String| p.len() > MAX_PREFIX_LEN) {
        return Err(anyhow!("Output prefix is too long (limit is {} bytes)", MAX_PREFIX_LEN));
    }

    Ok(Command::List(Invocation {
        input,
        dump: prefix.map(|p| DumpOptions::new(p, naming)),
        ignored,
    }))
}
