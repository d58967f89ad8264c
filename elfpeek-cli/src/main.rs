mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use elfpeek_core::{DecodeOptions, ElfFile};
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Simple ELF header and section table dumper
#[derive(Parser)]
#[command(
    name = "elfpeek",
    about = "Inspect ELF32 files (identification, header fields, and section headers)",
    version,
    author
)]
struct Cli {
    /// Path to ELF file; piped stdin is read when omitted
    path: Option<PathBuf>,

    /// Print the decoded structure as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Refuse ELF64 input instead of decoding it with ELF32 field widths
    #[arg(long, global = true)]
    reject_elf64: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Show identification and header fields
    Header,
    /// List all section headers
    Sections,
    /// Show entry point of binary
    Entry,
}

#[derive(Serialize)]
struct EntryPoint {
    entry_point: u64,
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Cannot open path '{}'", path.display()))
        }
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("No input: pass a path or pipe ELF data on stdin");
            }
            let mut buf = Vec::new();
            stdin
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_header(bin: &ElfFile) {
    println!("{}", report::identification_line(&bin.header).bold());
    for line in report::header_lines(&bin.header) {
        println!("{line}");
    }
    if bin.header.program_header_count > 0 {
        println!("\n{}", "Program Headers:".bold());
        println!(
            "  {} entries at offset {} (not decoded)",
            bin.header.program_header_count, bin.header.program_header_offset
        );
    }
}

fn print_sections(bin: &ElfFile) {
    if bin.section_headers.is_empty() {
        println!("No sections found (possibly stripped binary).");
    } else {
        println!("\n{}", "Section Headers:".bold());
        println!("{}", report::section_table(&bin.section_headers));
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data = read_input(cli.path.as_deref())?;
    log::debug!("Read {} bytes of input", data.len());

    let opts = DecodeOptions {
        reject_elf64: cli.reject_elf64,
    };
    let bin = match ElfFile::parse(&data, &opts) {
        Ok(bin) => bin,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    };

    match (cli.command, cli.json) {
        (Some(Command::Header), true) => {
            println!("{}", serde_json::to_string_pretty(&bin.header)?)
        }
        (Some(Command::Sections), true) => {
            println!("{}", serde_json::to_string_pretty(&bin.section_headers)?)
        }
        (Some(Command::Entry), true) => {
            let entry = EntryPoint {
                entry_point: bin.get_entry_offset(),
            };
            println!("{}", serde_json::to_string_pretty(&entry)?)
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&bin)?),

        (Some(Command::Header), false) => print_header(&bin),
        (Some(Command::Sections), false) => print_sections(&bin),
        (Some(Command::Entry), false) => {
            let entry = bin.get_entry_offset();
            println!("Entry point: 0x{entry:x}");
        }
        (None, false) => {
            print_header(&bin);
            print_sections(&bin);
        }
    }

    Ok(())
}
