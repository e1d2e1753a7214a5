use clap::{Parser, Subcommand};
use release_calendar::commands;
use release_calendar::core::context::RunContext;
use release_calendar::core::error::{CalendarError, CalendarResult, print_error};
use release_calendar::fetch::{HttpFetcher, LoggedFetcher};
use release_calendar::ui::OutputMode;
use std::path::PathBuf;

/// Classify product releases and build the quarterly support calendar
#[derive(Parser)]
#[command(name = "release-calendar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Configuration file (default: release-calendar.toml or .config/release-calendar.toml if present)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Directory receiving the output files (overrides [output] dir)
  #[arg(short, long, global = true)]
  output_dir: Option<PathBuf>,

  /// Only print summaries
  #[arg(short, long, global = true)]
  quiet: bool,

  /// Show a progress bar instead of one line per request
  #[arg(long, global = true)]
  progress: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the whole batch: plugin lookup, release files, quarterly table (default)
  Build,

  /// Fetch, enrich and classify the release feed into releases/*.json
  Releases,

  /// Build the quarterly support-lifecycle table
  Quarterly {
    /// Also print the table as JSON on stdout
    #[arg(long)]
    json: bool,
  },

  /// Look up the latest workspace Gradle plugin version
  Plugin,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> CalendarResult<()> {
  let command = cli.command.unwrap_or(Commands::Build);

  // JSON on stdout must not be interleaved with per-request lines
  let mode = match command {
    Commands::Quarterly { json: true } => OutputMode::Quiet,
    _ => OutputMode::from_flags(cli.quiet, cli.progress),
  };

  let working_dir =
    std::env::current_dir().map_err(|e| CalendarError::message(format!("Failed to get current directory: {}", e)))?;
  let ctx = RunContext::resolve(&working_dir, cli.config.as_deref(), cli.output_dir, mode)?;
  let fetcher = LoggedFetcher::new(HttpFetcher::new(&ctx.config.http)?, ctx.mode);

  match command {
    Commands::Build => commands::run_build(&ctx, &fetcher),
    Commands::Releases => commands::run_releases(&ctx, &fetcher).map(|_| ()),
    Commands::Quarterly { json } => commands::run_quarterly(&ctx, &fetcher, json).map(|_| ()),
    Commands::Plugin => commands::run_plugin(&ctx, &fetcher).map(|_| ()),
  }
}

fn handle_error(err: CalendarError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
