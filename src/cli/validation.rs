use crate::catalog::OriginStatus;
use crate::cli::args::{CliArgs, Command};
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, or csv"
            ));
        }
    }
    match &args.command {
        Command::Gallery(gallery) => {
            if let Some(raw) = gallery.origin.as_deref() {
                raw.parse::<OriginStatus>()
                    .map_err(|e| format!("invalid --origin '{raw}': {e}"))?;
            }
        }
        Command::Stats(stats) => {
            let query = stats.endpoint.query_args();
            if let Some(raw) = query.from.as_deref() {
                crate::utils::parse_iso_date(raw)
                    .map_err(|e| format!("invalid --from '{raw}': {e}"))?;
            }
            if let Some(raw) = query.to.as_deref() {
                crate::utils::parse_iso_date(raw)
                    .map_err(|e| format!("invalid --to '{raw}': {e}"))?;
            }
            if let Some(block) = query.block {
                if block < 0 {
                    return Err("invalid --block, expected non-negative integer".to_string());
                }
            }
            if let Some(timeout) = stats.timeout {
                if timeout == 0 {
                    return Err("invalid --timeout, expected positive integer".to_string());
                }
            }
        }
    }
    Ok(())
}
