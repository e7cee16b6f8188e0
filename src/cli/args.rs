use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "folio",
    version,
    about = "portfolio project gallery filter",
    long_about = "Folio loads a portfolio project data file, derives the filter options from it, and renders the projects matching a search and facet selection.\n\nExamples:\n  folio -d ./projects-data.xml\n  folio -d ./projects-data.xml --type Game --platform VR\n  folio -d https://example.com/projects-data.xml -q 'search=vr&tech=Shaders' -o gallery.html\n\nTip: Use --query-string to reproduce a shared deep link."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'd',
        long = "dt",
        visible_alias = "data",
        value_name = "PATH|URL",
        help_heading = "Input",
        help = "Project data file (local path or http(s) URL)."
    )]
    pub data: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.folio/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'q',
        long = "qs",
        visible_alias = "query-string",
        value_name = "QUERY",
        help_heading = "Filters",
        help = "Deep-link query string or URL (e.g. 'type=Game&platform=VR'); explicit filter flags override it."
    )]
    pub query_string: Option<String>,

    #[arg(
        short = 's',
        long = "srch",
        visible_alias = "search",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Free-text search over title, description, type and tags."
    )]
    pub search: Option<String>,

    #[arg(
        long = "type",
        visible_alias = "project-type",
        value_name = "TYPE",
        help_heading = "Filters",
        help = "Project type (use 'all' for no constraint)."
    )]
    pub project_type: Option<String>,

    #[arg(
        long = "category",
        visible_alias = "cat",
        value_name = "CATEGORY",
        help_heading = "Filters",
        help = "Project category (e.g. Professional, Personal, Academic)."
    )]
    pub category: Option<String>,

    #[arg(
        long = "team",
        visible_alias = "collaboration",
        value_name = "TEAM",
        help_heading = "Filters",
        help = "Collaboration type."
    )]
    pub team: Option<String>,

    #[arg(
        long = "lang",
        visible_alias = "language",
        value_name = "LANGUAGE",
        help_heading = "Filters",
        help = "Programming language."
    )]
    pub lang: Option<String>,

    #[arg(
        long = "platform",
        value_name = "PLATFORM",
        help_heading = "Game Filters",
        help = "Platform (games only; matches any platform containing the value)."
    )]
    pub platform: Option<String>,

    #[arg(
        long = "engine",
        value_name = "ENGINE",
        help_heading = "Game Filters",
        help = "Engine (games only)."
    )]
    pub engine: Option<String>,

    #[arg(
        long = "tech",
        visible_alias = "technology",
        value_name = "TAG",
        help_heading = "Game Filters",
        help = "Technology tag from mechanics, skills or software (games only)."
    )]
    pub tech: Option<String>,

    #[arg(
        long = "pp",
        visible_alias = "page-path",
        value_name = "PATH",
        help_heading = "Deep Links",
        help = "Page path used when printing the deep link (default /projects.html)."
    )]
    pub page_path: Option<String>,

    #[arg(
        long = "hm",
        visible_alias = "history",
        value_name = "MODE",
        help_heading = "Deep Links",
        help = "History mode for interactive sessions (replace or push)."
    )]
    pub history: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write results to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, xml or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "fc",
        visible_alias = "facets",
        help_heading = "Output",
        help = "Print the filter options derived from the data."
    )]
    pub facets: bool,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "Output",
        help = "Read filter commands from stdin and re-render after each one."
    )]
    pub interactive: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Timeout in seconds when fetching a remote data file (default: none)."
    )]
    pub timeout: Option<u64>,
}
