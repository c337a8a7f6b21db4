#![doc = include_str!("../README.md")]
//! tagcheck CLI
//!
//! Examples:
//!   tagcheck page.tsx                     - plain diagnostics
//!   tagcheck page.tsx --pretty            - annotated source excerpts
//!   tagcheck -                            - read from stdin
//!   tagcheck page.tsx --probe 40,120      - tag stack at the end of lines 40 and 120

use std::io::{self, Read, Write};

use facet::Facet;
use figue as args;
use tagcheck::{AuditOptions, Auditor, Diagnostic, Summary, suggest};
use tracing::{debug, warn};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_UNBALANCED: i32 = 1;
const EXIT_USAGE_ERROR: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `tagcheck <file> [options]`
#[derive(Facet, Debug, Default)]
struct Args {
    /// Input file path (or "-" for stdin)
    #[facet(args::positional)]
    input: String,

    /// Annotated source excerpts instead of one line per diagnostic
    #[facet(args::named, default)]
    pretty: bool,

    /// Diagnostics as a JSON array
    #[facet(args::named, default)]
    json: bool,

    /// Propose a fix for each diagnostic
    #[facet(args::named, default)]
    suggest: bool,

    /// Report net brace and paren depth
    #[facet(args::named, default)]
    delimiters: bool,

    /// Comma-separated lines to print the tag stack for
    #[facet(args::named, default)]
    probe: Option<String>,

    /// Comma-separated void element names, replacing the defaults
    #[facet(args::named, default)]
    void: Option<String>,

    /// Comma-separated void element names, added to the defaults
    #[facet(args::named, default)]
    add_void: Option<String>,

    /// Read tags inside `//` and `/* */` comments
    #[facet(args::named, default)]
    keep_comments: bool,

    /// Read tags inside template literals
    #[facet(args::named, default)]
    keep_templates: bool,

    /// No output, exit code only
    #[facet(args::named, args::short = 'q', default)]
    quiet: bool,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    init_tracing();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    if raw_args.is_empty() {
        print_help();
        std::process::exit(EXIT_USAGE_ERROR);
    }

    if raw_args[0] == "--version" || raw_args[0] == "-V" {
        println!("tagcheck {VERSION}");
        std::process::exit(EXIT_SUCCESS);
    }

    if raw_args[0] == "--help" || raw_args[0] == "-h" {
        print_help();
        std::process::exit(EXIT_SUCCESS);
    }

    match run(&raw_args) {
        Ok(true) => std::process::exit(EXIT_SUCCESS),
        Ok(false) => std::process::exit(EXIT_UNBALANCED),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    eprintln!("tagcheck {VERSION} - find unbalanced tags in markup-bearing source files\n");
    eprintln!("USAGE:");
    eprintln!("    tagcheck <file> [options]       Audit a file ('-' for stdin)\n");
    eprintln!("OUTPUT OPTIONS:");
    eprintln!("        --pretty                    Annotated source excerpts");
    eprintln!("        --json                      Diagnostics as a JSON array");
    eprintln!("        --suggest                   Propose a fix for each diagnostic");
    eprintln!("        --delimiters                Report net brace and paren depth");
    eprintln!("        --probe <LINES>             Tag stack at the end of each line (e.g. 10,42)");
    eprintln!("    -q, --quiet                     No output, exit code only\n");
    eprintln!("AUDIT OPTIONS:");
    eprintln!("        --void <NAMES>              Void elements, replacing br,hr,img,input");
    eprintln!("        --add-void <NAMES>          Void elements, added to the defaults");
    eprintln!("        --keep-comments             Read tags inside comments");
    eprintln!("        --keep-templates            Read tags inside template literals\n");
    eprintln!("EXIT CODES:");
    eprintln!("    0 balanced, 1 diagnostics found, 2 usage error, 3 I/O error");
}

/// Returns whether the input was balanced.
fn run(raw_args: &[String]) -> Result<bool, CliError> {
    let args_strs: Vec<&str> = raw_args.iter().map(|s| s.as_str()).collect();
    let opts: Args = figue::from_slice(&args_strs).map_err(|e| CliError::Usage(e.to_string()))?;

    if opts.json && opts.pretty {
        return Err(CliError::Usage("--json and --pretty cannot be combined".into()));
    }

    let probe_lines = opts.probe.as_deref().map(parse_lines).transpose()?;
    let auditor = Auditor::new(audit_options(&opts));

    let source = read_input(&opts.input)?;
    let filename = if opts.input == "-" {
        "<stdin>"
    } else {
        opts.input.as_str()
    };

    let diagnostics = auditor.audit(&source);
    debug!("{}: {}", filename, Summary::of(&diagnostics));
    let balanced = tagcheck::is_balanced(&diagnostics);

    if opts.quiet {
        return Ok(balanced);
    }

    let stdout = io::stdout();
    let written = write_output(
        &mut stdout.lock(),
        &opts,
        &auditor,
        filename,
        &source,
        &diagnostics,
        probe_lines,
    );
    ignore_broken_pipe(written)?;

    if !opts.json && !balanced {
        eprintln!("{filename}: {}", Summary::of(&diagnostics));
    }

    Ok(balanced)
}

fn write_output(
    out: &mut impl Write,
    opts: &Args,
    auditor: &Auditor,
    filename: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    probe_lines: Option<Vec<u32>>,
) -> io::Result<()> {
    if opts.json {
        write_json(out, diagnostics, source, opts.suggest)?;
    } else {
        for diagnostic in diagnostics {
            if opts.pretty {
                diagnostic.write_report(filename, source, &mut *out)?;
            } else {
                writeln!(out, "{diagnostic}")?;
            }
            if opts.suggest {
                writeln!(out, "  fix: {}", suggest(diagnostic, source.len()))?;
            }
        }
    }

    if opts.delimiters {
        writeln!(out, "delimiters: {}", auditor.delimiters(source))?;
    }

    if let Some(lines) = probe_lines {
        for probe in auditor.probe(source, &lines) {
            writeln!(out, "{probe}")?;
        }
    }

    Ok(())
}

/// `tagcheck page.tsx | head` closes stdout before everything is written.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
            Ok(())
        }
        result => result,
    }
}

fn audit_options(opts: &Args) -> AuditOptions {
    let mut options = AuditOptions::new();
    if let Some(names) = &opts.void {
        options = options.void_elements(split_list(names).collect());
    }
    if let Some(names) = &opts.add_void {
        options.void_elements.extend(split_list(names));
    }
    if opts.keep_comments {
        options = options.keep_line_comments().keep_block_comments();
    }
    if opts.keep_templates {
        options = options.keep_templates();
    }
    options
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_lines(list: &str) -> Result<Vec<u32>, CliError> {
    split_list(list)
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| CliError::Usage(format!("invalid line number `{s}` in --probe")))
        })
        .collect()
}

fn write_json(
    out: &mut impl Write,
    diagnostics: &[Diagnostic],
    source: &str,
    with_fixes: bool,
) -> io::Result<()> {
    let items: Vec<serde_json::Value> = diagnostics
        .iter()
        .map(|d| {
            let mut item = serde_json::json!({
                "kind": d.kind.as_str(),
                "line": d.line,
                "column": d.column,
                "found": d.found,
                "expected": d.expected,
                "opened_at": d.opened_at,
                "message": d.message,
            });
            if with_fixes {
                item["fix"] = serde_json::Value::String(suggest(d, source.len()).description);
            }
            item
        })
        .collect();
    let json = serde_json::to_string_pretty(&items)?;
    writeln!(out, "{json}")
}

/// Reads the whole input. Bytes that are not UTF-8 are replaced, so files in
/// legacy encodings still get audited with correct line numbers.
fn read_input(path: &str) -> Result<String, io::Error> {
    let bytes = if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path).map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))?
    };
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("{path}: not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Usage(_) => EXIT_USAGE_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
