//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Fill a form template from the simulation backend and submit it.
#[derive(Debug, Parser)]
#[command(name = "simweb", version)]
pub struct Args {
    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend root, overrides the config file.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Name of the form template to load.
    #[arg(long, default_value = "simulation.json")]
    pub template: String,

    /// Field value, may be repeated.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// Print the collected form data without posting it.
    #[arg(long)]
    pub dry_run: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("runtime=10"),
            Ok(("runtime".to_string(), "10".to_string()))
        );
        assert_eq!(
            parse_assignment("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("empty="),
            Ok(("empty".to_string(), String::new()))
        );
        assert!(parse_assignment("runtime").is_err());
        assert!(parse_assignment("=10").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "simweb",
            "--set",
            "nservers=3",
            "--set",
            "runtime=10",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.template, "simulation.json");
        assert_eq!(args.values.len(), 2);
        assert!(args.dry_run);
        assert_eq!(args.verbose, 2);
    }
}
