use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use console::style;
use droidres::{Density, Filter, Generator, IconProfile, Mode, Source};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generates android drawable and mipmap resources for every screen
/// density from a single image.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input image
    #[clap(short, long)]
    input: PathBuf,
    /// Output resource directory, e.g. app/src/main/res
    #[clap(short, long)]
    output: PathBuf,
    /// DPI of the source image. Only used without a fixed icon mode.
    #[clap(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,
    /// Output filename. Defaults to the input filename, the extension is
    /// always replaced by `.png`.
    #[clap(short, long)]
    filename: Option<String>,
    /// Resampling filter. Can be one of `nearest`, `triangle`,
    /// `catmullrom`, `gaussian` or `lanczos3`.
    #[clap(long, default_value_t = Filter::default())]
    filter: Filter,
    /// Only generate these densities, e.g. `--only xhdpi,mdpi`.
    #[clap(long, value_delimiter = ',')]
    only: Vec<Density>,
    #[clap(flatten)]
    mode: ModeArgs,
}

/// Fixed icon sizes, given at 640 dpi.
#[derive(clap::Args, Debug)]
#[group(multiple = false)]
struct ModeArgs {
    /// Launcher icon (192x192)
    #[clap(short, long)]
    launcher: bool,
    /// Action bar icon (128x128 with a 96x96 content area)
    #[clap(short, long)]
    actionbar: bool,
    /// Notification icon (96x96 with a 88x88 content area)
    #[clap(short, long)]
    notification: bool,
    /// Small contextual icon (64x64)
    #[clap(short, long)]
    smallcontextual: bool,
}

impl ModeArgs {
    fn mode(&self) -> Mode {
        if self.launcher {
            Mode::Launcher
        } else if self.actionbar {
            Mode::ActionBar
        } else if self.notification {
            Mode::Notification
        } else if self.smallcontextual {
            Mode::SmallContextual
        } else {
            Mode::Normal
        }
    }
}

impl Args {
    fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            anyhow::bail!("input file `{}` doesn't exist", self.input.display());
        }
        if !self.output.is_dir() {
            anyhow::bail!("output directory `{}` doesn't exist", self.output.display());
        }
        Ok(())
    }

    fn run(self) -> Result<()> {
        let source = Source::open(&self.input)?;
        let profile = IconProfile::new(
            self.mode.mode(),
            &self.input,
            source.dimensions(),
            self.dpi,
            self.filename.as_deref(),
        )?;
        let (width, height) = profile.size();
        println!();
        println!(
            "Input file: {} ({}x{})",
            self.input.display(),
            width,
            height
        );
        println!("Output dir: {}", self.output.display());
        println!();

        let mut generator = Generator::new(profile, &self.output).filter(self.filter);
        if !self.only.is_empty() {
            generator = generator.only(&self.only);
        }
        let assets = generator
            .generate_with(&source, |asset| println!("{}", asset))
            .with_context(|| format!("failed to generate resources for `{}`", self.input.display()))?;
        tracing::info!("generated {} resources", assets.len());
        Ok(())
    }
}

fn main() -> ExitCode {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("XRES_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();

    ExitCode::from(execute(std::env::args_os()))
}

/// Parses, validates and runs `argv`, returning the process exit status:
/// 0 on success or help, 1 for malformed arguments, 2 for a missing input
/// file or output directory and 3 when generation fails.
fn execute<I, T>(argv: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(err) => {
            err.print().ok();
            // --help and --version
            if !err.use_stderr() {
                return 0;
            }
            eprintln!();
            eprintln!("{}", Args::command().render_help());
            return 1;
        }
    };
    if let Err(err) = args.validate() {
        eprintln!("{} {}", style("[ERROR]").red(), err);
        return 2;
    }
    if let Err(err) = args.run() {
        eprintln!("{} {:?}", style("[ERROR]").red(), err);
        return 3;
    }
    0
}
