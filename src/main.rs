use ne_extract::ne::error::Result as NeResult;
use ne_extract::{parse_args, Command, DumpOptions, Dumper, NeFile, ResourceEntry, ResourceKind, ResourceName, ResourceVisitor};
use std::io::{Read, Seek};
use std::path::Path;
use anyhow::{Result, Context};
use log::info;

struct Listing {
    dumper: Option<Dumper>,
}

impl<R: Read + Seek> ResourceVisitor<R> for Listing {
    fn visit_type(&mut self, kind: &ResourceKind, _type_index: usize, count: u16) -> NeResult<()> {
        println!();
        println!("Type: {}  Resource count: {}", kind, count);
        Ok(())
    }

    fn visit_resource(&mut self, reader: &mut R, kind: &ResourceKind, entry: &ResourceEntry) -> NeResult<()> {
        let names = entry.flag_names();
        let flag_text = if names.is_empty() { String::new() } else { format!(" ({})", names.join(" ")) };
        println!(
            "    resource {:05}-{:05}  flags=0x{:04X}{}  length=0x{:08X} ({})  offset=0x{:08X} ({})",
            entry.type_index, entry.index, entry.flags, flag_text,
            entry.byte_length, entry.byte_length, entry.byte_offset, entry.byte_offset
        );
        match &entry.name {
            ResourceName::Name(name) => println!("        id='{}'", name),
            ResourceName::Id(id) => println!("        id={:05}", id),
        }

        if let Some(dumper) = self.dumper.as_mut() {
            dumper.visit_resource(reader, kind, entry)?;
            if let Some(path) = dumper.last_written() {
                println!("        dumped to {}", path.display());
            }
        }
        Ok(())
    }
}

fn program_name(args: &[String]) -> String {
    args.first()
        .and_then(|a| Path::new(a).file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ne-extract".to_string())
}

fn print_usage(program: &str) {
    println!("Usage:\n{} inputFile -dump prefix -usenames\n", program);
    println!("inputFile               a NE file. the only required parameter.");
    println!("-dump prefix            dumps the files out with the specified prefix.");
    println!("                        e.g. -dump output_folder/");
    println!("-usenames               when dumping, use resource names as filenames.");
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    println!("ne-extract: Windows NE (16 bit) resource extractor\n");

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Usage => {
            print_usage(&program_name(&args));
            Ok(())
        }
        Command::List(invocation) => run_list(&invocation.input, invocation.dump),
    }
}

fn run_list(path: &Path, dump: Option<DumpOptions>) -> Result<()> {
    info!("Reading: {:?}", path);
    let mut ne = NeFile::open(path)
        .with_context(|| format!("Failed to open NE file {:?}", path))?;

    let mut listing = Listing {
        dumper: dump.map(Dumper::new),
    };
    let table = ne.walk(&mut listing)
        .context("Failed to walk resource table")?;

    if ne.layout.has_resource_table() {
        println!("\nEnd of type table, {} types", table.types.len());
    } else {
        println!("\nNo resource table");
    }
    if let Some(dumper) = listing.dumper {
        info!("Extracted {} resources", dumper.written().len());
    }
    println!("Done.");
    Ok(())
}
