//! parenlight - terminal preview editor with bracket highlighting

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process;

use log::{debug, info};

use parenlight::config::Config;
use parenlight::terminal::Terminal;
use parenlight::viewer::Viewer;
use parenlight::{
    current_line_span, match_backward, match_forward, CursorContext, ParenError,
    ParenHighlighter, Result, TextBuffer, TextSource,
};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    read_only: bool,
    overwrite: bool,
    /// Report mode: print matches at this offset and exit
    at: Option<usize>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --help and --version
    match args.first().map(String::as_str) {
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some("--version" | "-V") => {
            print_version();
            return Ok(());
        }
        _ => {}
    }

    let options = parse_args(&args)?;
    init_logging(options.at.is_none())?;
    debug!("options: {:?}", options);

    let mut buffer = match &options.file {
        Some(path) if path.exists() => TextBuffer::from_file(path)?,
        Some(path) => {
            // File doesn't exist - create new buffer with that filename
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unnamed".to_string());
            let mut buf = TextBuffer::new(name);
            buf.set_filename(path.clone());
            buf
        }
        None => TextBuffer::default(),
    };
    buffer.modes_mut().view = options.read_only;
    buffer.modes_mut().overwrite = options.overwrite;

    if let Some(at) = options.at {
        return report(&buffer, at);
    }

    let config = Config::load();
    let mut terminal = Terminal::new()?;
    let mut viewer = Viewer::new(buffer, config)?;
    info!("session started");
    viewer.run(&mut terminal)?;
    info!("session ended");
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--read-only" => options.read_only = true,
            "--overwrite" => options.overwrite = true,
            "--at" => {
                let value = iter
                    .next()
                    .ok_or_else(|| ParenError::Message("--at needs an offset".to_string()))?;
                let offset = value
                    .parse()
                    .map_err(|_| ParenError::Message(format!("invalid offset: {}", value)))?;
                options.at = Some(offset);
            }
            s if s.starts_with('-') => {
                return Err(ParenError::Message(format!("unknown option: {}", s)));
            }
            path => {
                if options.file.is_some() {
                    return Err(ParenError::Message("only one file may be given".to_string()));
                }
                options.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(options)
}

/// Log through `PARENLIGHT_LOG`; interactive sessions log to a file since
/// the terminal belongs to the editor.
fn init_logging(interactive: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("PARENLIGHT_LOG", "warn"),
    );

    if interactive {
        let log_path = env::temp_dir().join("parenlight.log");
        let log_file = OpenOptions::new().create(true).append(true).open(log_path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

/// Print both scans and the resulting spans for one cursor offset
fn report(buffer: &TextBuffer, at: usize) -> Result<()> {
    buffer.check_cursor(at)?;

    let ctx = CursorContext {
        position: at,
        overwrite: buffer.modes().overwrite,
        read_only: buffer.modes().view,
    };

    println!("backward: {}", match_backward(buffer, at)?);
    println!("forward:  {}", match_forward(buffer, at)?);
    println!("{}", current_line_span(buffer, at)?);

    let mut parens = ParenHighlighter::new();
    for span in parens.update(buffer, ctx)? {
        println!("{}", span);
    }
    Ok(())
}

fn print_usage() {
    println!("parenlight {} - bracket highlighting preview editor", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: parenlight [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message");
    println!("  -V, --version    Show version information");
    println!("  --read-only      Open in view mode (no bracket highlighting)");
    println!("  --overwrite      Start in overwrite mode");
    println!("  --at OFFSET      Print bracket matches at OFFSET and exit");
    println!();
    println!("Key bindings:");
    println!("  Arrows, C-f/C-b/C-n/C-p  Move");
    println!("  Home/End, C-a/C-e        Line start/end");
    println!("  C-Home/C-End             Buffer start/end");
    println!("  Insert                   Toggle overwrite mode");
    println!("  C-SPC                    Toggle mark");
    println!("  C-s                      Save");
    println!("  C-q, Esc                 Quit");
    println!();
    println!("Logging: set PARENLIGHT_LOG (e.g. debug); interactive sessions log to");
    println!("{}", env::temp_dir().join("parenlight.log").display());
}

fn print_version() {
    println!("parenlight {}", env!("CARGO_PKG_VERSION"));
}
