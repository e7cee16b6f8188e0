use crate::cli::args::CliArgs;
use crate::gallery::HistoryMode;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, xml or html"
            ));
        }
    }
    if let Some(raw) = args.history.as_deref() {
        if HistoryMode::parse(raw).is_none() {
            return Err(format!("invalid --history '{raw}', expected replace or push"));
        }
    }
    if let Some(raw) = args.data.as_deref() {
        if raw.trim().is_empty() {
            return Err("invalid --data, expected a path or URL".to_string());
        }
    }
    if let Some(raw) = args.page_path.as_deref() {
        if raw.contains('?') {
            return Err(format!(
                "invalid --page-path '{raw}', pass filters with --query-string instead"
            ));
        }
    }
    if args.interactive && args.output.is_some() {
        return Err("use either --interactive or --output, not both".to_string());
    }
    Ok(())
}
