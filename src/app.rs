use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::filter::{normalize_selection, Facet, FilterEvent};
use crate::gallery::{Gallery, HistoryMode};
use crate::loader::DataSource;
use crate::output::{self, OutputFormat};
use crate::runner::{self, Options, Runner};

fn format_kv_line(label: &str, value: &str) {
    println!(
        "{} {:<10}{} {}",
        "::".bold().white(),
        label.bold().white(),
        ":".bold().white(),
        value.cyan()
    );
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "folio=warn",
        1 => "folio=info",
        _ => "folio=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// One line typed in an interactive session.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Event(FilterEvent),
    Facets,
    Url,
    Help,
    Quit,
}

fn parse_facet_name(name: &str) -> Option<Facet> {
    let lower = name.to_lowercase();
    Facet::from_param_key(&lower).or_else(|| match lower.as_str() {
        "project-type" | "projecttype" => Some(Facet::ProjectType),
        "cat" => Some(Facet::Category),
        "collaboration" => Some(Facet::Collaboration),
        "language" => Some(Facet::Language),
        "technology" => Some(Facet::Technology),
        _ => None,
    })
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let command = match head.to_lowercase().as_str() {
        "search" | "s" => Command::Event(FilterEvent::Query(rest.to_string())),
        "reset" => Command::Event(FilterEvent::Reset),
        "facets" => Command::Facets,
        "url" => Command::Url,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            let facet =
                parse_facet_name(other).ok_or_else(|| format!("unknown command '{head}'"))?;
            Command::Event(FilterEvent::Select(facet, normalize_selection(rest)))
        }
    };
    Ok(Some(command))
}

const INTERACTIVE_HELP: &str = "commands: search <text> | <type|category|team|lang|platform|engine|tech> <value|all> | reset | facets | url | quit";

#[derive(Clone, Debug)]
struct RunConfig {
    data: DataSource,
    page_path: String,
    history: HistoryMode,
    query: Option<String>,
    events: Vec<FilterEvent>,
    output: Option<String>,
    output_format: Option<OutputFormat>,
    timeout: u64,
    no_color: bool,
    force_color: bool,
    facets: bool,
    interactive: bool,
}

fn explicit_events(args: &CliArgs) -> Vec<FilterEvent> {
    let mut events = Vec::new();
    if let Some(search) = args.search.as_ref() {
        events.push(FilterEvent::Query(search.clone()));
    }
    let selections = [
        (Facet::ProjectType, &args.project_type),
        (Facet::Category, &args.category),
        (Facet::Collaboration, &args.team),
        (Facet::Language, &args.lang),
        (Facet::Platform, &args.platform),
        (Facet::Engine, &args.engine),
        (Facet::Technology, &args.tech),
    ];
    for (facet, value) in selections {
        if let Some(v) = value {
            events.push(FilterEvent::Select(facet, normalize_selection(v)));
        }
    }
    events
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let data_raw = args
        .data
        .clone()
        .or(cfg.data)
        .unwrap_or_else(|| config::DEFAULT_DATA.to_string());
    let data = match DataSource::parse(&data_raw) {
        DataSource::FilePath(p) => DataSource::FilePath(config::expand_tilde_string(&p)),
        other => other,
    };

    let page_path = args
        .page_path
        .clone()
        .or(cfg.page_path)
        .unwrap_or_else(|| config::DEFAULT_PAGE_PATH.to_string());

    let history_raw = args.history.clone().or(cfg.history);
    let history = match history_raw {
        Some(raw) => HistoryMode::parse(&raw)
            .ok_or_else(|| format!("invalid history mode '{raw}', expected replace or push"))?,
        None => HistoryMode::default(),
    };

    let output = args
        .output
        .clone()
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.clone().or(cfg.output_format) {
        Some(raw) => Some(
            OutputFormat::parse(&raw).ok_or_else(|| format!("invalid output format '{raw}'"))?,
        ),
        None => output.as_deref().and_then(output::infer_format_from_path),
    };

    Ok(RunConfig {
        data,
        page_path,
        history,
        query: args.query_string.clone().or(cfg.query),
        events: explicit_events(&args),
        output,
        output_format,
        timeout: args.timeout.or(cfg.timeout).unwrap_or(config::DEFAULT_TIMEOUT),
        no_color,
        force_color: args.color,
        facets: args.facets,
        interactive: args.interactive,
    })
}

fn print_facets(gallery: &Gallery) {
    let show_game = gallery.view().outcome.show_game_facets;
    for facet in Facet::ALL {
        if facet.is_game_only() && !show_game {
            continue;
        }
        let options = gallery.vocabulary().options(facet);
        let value = if options.is_empty() {
            "-".to_string()
        } else {
            options.join(", ")
        };
        format_kv_line(facet.label(), &value);
    }
    for (facet, value) in gallery.unknown_selections() {
        println!(
            "{} {} {}",
            "::".bold().white(),
            format!("{}={value}", facet.param_key()).yellow(),
            "is not an option in the loaded data".dimmed()
        );
    }
}

fn print_view(gallery: &Gallery) {
    let report = output::build_report(gallery);
    let rendered = output::render_text(&report);
    print!("{}", String::from_utf8_lossy(&rendered));
    format_kv_line("Link", &report.location);
}

async fn run_interactive(mut gallery: Gallery) -> Result<(), String> {
    println!("{}", INTERACTIVE_HELP.dimmed());
    print_view(&gallery);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read stdin: {e}")),
        };
        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{INTERACTIVE_HELP}"),
            Ok(Some(Command::Facets)) => print_facets(&gallery),
            Ok(Some(Command::Url)) => format_kv_line("Link", &gallery.location()),
            Ok(Some(Command::Event(event))) => {
                gallery.dispatch(event);
                println!();
                print_view(&gallery);
            }
            Err(e) => println!("{} {}", "::".bold().white(), e.red()),
        }
    }
    Ok(())
}

fn fetch_spinner(source: &DataSource) -> Result<Option<ProgressBar>, String> {
    if !source.is_remote() {
        return Ok(None);
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {elapsed} :: {msg}")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(format!("fetching {}", source.describe()));
    Ok(Some(pb))
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.force_color {
        colored::control::set_override(true);
    } else if run.no_color {
        colored::control::set_override(false);
    }

    let runner = Runner::new(Options {
        data: run.data.clone(),
        page_path: run.page_path.clone(),
        history: run.history,
        query: run.query.clone(),
        events: run.events.clone(),
        timeout_seconds: run.timeout,
    })
    .map_err(|e| e.to_string())?;

    let spinner = fetch_spinner(&run.data)?;
    let result = runner.run().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = result.map_err(|e| e.to_string())?;

    let format = run.output_format.unwrap_or(OutputFormat::Text);

    if !result.has_data() {
        let rendered = output::render_load_error(format);
        match run.output.as_deref() {
            Some(path) => runner::write_output(path, &rendered)
                .await
                .map_err(|e| e.to_string())?,
            None => eprint!("{}", String::from_utf8_lossy(&rendered).red()),
        }
        return Ok(());
    }

    if run.facets {
        print_facets(&result.gallery);
        return Ok(());
    }

    if run.interactive {
        return run_interactive(result.gallery).await;
    }

    let report = output::build_report(&result.gallery);
    let rendered = output::render(format, &report);
    match run.output.as_deref() {
        Some(path) => {
            runner::write_output(path, &rendered)
                .await
                .map_err(|e| e.to_string())?;
            format_kv_line("Results", &report.count_label);
            format_kv_line("Link", &report.location);
            format_kv_line("Output", path);
        }
        None => {
            print!("{}", String::from_utf8_lossy(&rendered));
            if format == OutputFormat::Text {
                format_kv_line("Link", &report.location);
            }
        }
    }

    tracing::info!(elapsed_ms = result.elapsed.as_millis() as u64, "run completed");
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_tracing(args.verbose);

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        let written = config::ensure_default_config_file(&path)?;
        let status = if written { "written" } else { "already exists" };
        format_kv_line("Config", &format!("{} ({status})", path.display()));
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::parse_from([
            "folio",
            "-d",
            "https://example.com/projects-data.xml",
            "--history",
            "push",
        ]);
        let cfg = ConfigFile {
            data: Some("./local.xml".to_string()),
            history: Some("replace".to_string()),
            page_path: Some("/work.html".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(
            run.data,
            DataSource::Url("https://example.com/projects-data.xml".to_string())
        );
        assert_eq!(run.history, HistoryMode::Push);
        assert_eq!(run.page_path, "/work.html");
    }

    #[test]
    fn defaults_apply_without_config() {
        let args = CliArgs::parse_from(["folio"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.data, DataSource::FilePath(config::DEFAULT_DATA.to_string()));
        assert_eq!(run.history, HistoryMode::Replace);
        assert_eq!(run.timeout, 0);
        assert!(run.events.is_empty());
        assert!(run.output_format.is_none());
    }

    #[test]
    fn timeout_is_opt_in() {
        let args = CliArgs::parse_from(["folio", "-T", "5"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.timeout, 5);
        let cfg = ConfigFile {
            timeout: Some(12),
            ..ConfigFile::default()
        };
        let run = build_run_config(CliArgs::parse_from(["folio"]), cfg).unwrap();
        assert_eq!(run.timeout, 12);
    }

    #[test]
    fn output_format_is_inferred_from_file_name() {
        let args = CliArgs::parse_from(["folio", "-o", "gallery.html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, Some(OutputFormat::Html));
    }

    #[test]
    fn filter_flags_become_events_in_fixed_order() {
        let args = CliArgs::parse_from([
            "folio", "--tech", "Shaders", "--type", "all", "-s", "space",
        ]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(
            run.events,
            vec![
                FilterEvent::Query("space".to_string()),
                FilterEvent::Select(Facet::ProjectType, None),
                FilterEvent::Select(Facet::Technology, Some("Shaders".to_string())),
            ]
        );
    }

    #[test]
    fn interactive_commands_parse() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("search zero g").unwrap(),
            Some(Command::Event(FilterEvent::Query("zero g".to_string())))
        );
        assert_eq!(
            parse_command("platform VR").unwrap(),
            Some(Command::Event(FilterEvent::Select(
                Facet::Platform,
                Some("VR".to_string())
            )))
        );
        assert_eq!(
            parse_command("Language all").unwrap(),
            Some(Command::Event(FilterEvent::Select(Facet::Language, None)))
        );
        assert_eq!(parse_command("reset").unwrap(), Some(Command::Event(FilterEvent::Reset)));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert!(parse_command("colour red").is_err());
    }
}
