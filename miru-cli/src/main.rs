use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use miru_core::runtime::{default_runtime_root, load_runtime_files};
use miru_core::{CoreError, EmitOptions, compile, dump_ast, dump_tokens};

/// Compile Miru source into C.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file; reads stdin when omitted
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "PATH", help = "Write output here instead of stdout")]
    output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "c",
        help = "Output format: c, tokens, ast"
    )]
    emit: String,

    #[arg(long, help = "Inline the runtime print functions into the output")]
    standalone: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Path to the runtime support directory (defaults to bundled runtime)"
    )]
    runtime: Option<PathBuf>,

    #[arg(
        long,
        requires = "output",
        help = "Copy the runtime files into a runtime/ directory next to the output"
    )]
    copy_runtime: bool,

    #[arg(short, long, help = "Report each stage on stderr")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmitFormat {
    C,
    Tokens,
    Ast,
}

impl EmitFormat {
    fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "c" => Ok(EmitFormat::C),
            "tokens" => Ok(EmitFormat::Tokens),
            "ast" => Ok(EmitFormat::Ast),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let format = EmitFormat::parse(&cli.emit)?;
    let (source, origin) = read_source(cli.input.as_deref())?;
    if cli.verbose {
        eprintln!("read {} bytes from {origin}", source.len());
    }

    let output = match format {
        EmitFormat::C => {
            let options = if cli.standalone {
                EmitOptions::standalone()
            } else {
                EmitOptions::default()
            };
            let artifact = compile(&source, &options).map_err(|err| located(&origin, err))?;
            if cli.verbose {
                eprintln!(
                    "emitted {} function(s), entry point: {}",
                    artifact.functions.len(),
                    if artifact.has_entry_point { "yes" } else { "no" }
                );
            }
            artifact.c_source
        }
        EmitFormat::Tokens => dump_tokens(&source).map_err(|err| located(&origin, err))?,
        EmitFormat::Ast => dump_ast(&source).map_err(|err| located(&origin, err))?,
    };

    match &cli.output {
        Some(path) => write_output(path, output.as_bytes())?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write to stdout")?,
    }

    if cli.copy_runtime {
        if format != EmitFormat::C || cli.standalone {
            eprintln!("--copy-runtime is ignored unless emitting C that includes the runtime header");
        } else if let Some(output) = &cli.output {
            let root = cli.runtime.clone().unwrap_or_else(default_runtime_root);
            let copied = copy_runtime(&root, output)?;
            if cli.verbose {
                eprintln!("copied {copied} runtime file(s) from {}", root.display());
            }
        }
    }

    Ok(())
}

/// Scan and parse failures carry their own position, so they are reported
/// as a single line prefixed with the input name.
fn located(origin: &str, err: CoreError) -> anyhow::Error {
    anyhow::anyhow!("{origin}: {err}")
}

fn read_source(input: Option<&Path>) -> Result<(String, String)> {
    match input {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}

/// Generated code includes `runtime/miru_print.h` relative to itself, so the
/// files land in a `runtime/` directory beside the output file.
fn copy_runtime(root: &Path, output: &Path) -> Result<usize> {
    let files = load_runtime_files(root)?;
    let target = output
        .parent()
        .map(|parent| parent.join("runtime"))
        .unwrap_or_else(|| PathBuf::from("runtime"));
    for file in &files {
        write_output(&target.join(&file.path), file.contents.as_bytes())?;
    }
    Ok(files.len())
}
