use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tzbridge_core::{
    format_display, format_input_value, normalize_to_utc, BackendUtc, TimezoneSpec, WidgetLocal,
    DISPLAY_FALLBACK,
};

#[derive(Parser, Debug)]
#[command(name = "tzbridge", version, about = "Convert between the backend's naive-UTC timestamps and zone-local values")]
struct Cli {
    /// Emit the result as a JSON report instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a backend UTC timestamp for display in a zone
    Display {
        /// Backend timestamp, e.g. "2025-01-01 17:00:00"
        value: String,

        /// IANA zone name or fixed offset (default: Asia/Jakarta)
        #[arg(long)]
        tz: Option<String>,

        /// Display pattern built from YYYY MM DD HH mm ss tokens
        #[arg(long, default_value = "DD/MM/YYYY HH:mm")]
        pattern: String,
    },

    /// Render a backend UTC timestamp as a datetime-local widget value
    Widget {
        /// Backend timestamp; a bare date skips zone conversion
        value: String,

        /// IANA zone name or fixed offset (default: Asia/Jakarta)
        #[arg(long)]
        tz: Option<String>,

        /// Time-of-day appended to date-only values
        #[arg(long, default_value = "00:00")]
        default_time: String,
    },

    /// Convert a zone-local timestamp back to the backend UTC convention
    Normalize {
        /// Widget-local timestamp, e.g. "2025-06-15T08:00"
        value: String,

        /// Zone the value is wall-clock time in (default: Asia/Jakarta)
        #[arg(long)]
        tz: Option<String>,
    },

    /// Show how a timezone descriptor resolves
    Resolve {
        /// Descriptor: IANA name or ±HH:MM offset
        tz: String,
    },
}

#[derive(Serialize, Debug)]
struct Report<'a> {
    input: &'a str,
    tz: Option<&'a str>,
    output: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Display { value, tz, pattern } => {
            let out = format_display(BackendUtc(&value), tz.as_deref(), &pattern);
            report(cli.json, &value, tz.as_deref(), &out)?;
            if out == DISPLAY_FALLBACK {
                bail!("could not render '{}' for display", value);
            }
        }

        Command::Widget {
            value,
            tz,
            default_time,
        } => {
            let out = format_input_value(BackendUtc(&value), tz.as_deref(), &default_time);
            report(cli.json, &value, tz.as_deref(), &out)?;
            if out.is_empty() {
                bail!("could not render '{}' as a widget value", value);
            }
        }

        Command::Normalize { value, tz } => {
            match normalize_to_utc(WidgetLocal(&value), tz.as_deref()) {
                Some(out) => report(cli.json, &value, tz.as_deref(), &out)?,
                None => bail!("could not normalize '{}' to the backend convention", value),
            }
        }

        Command::Resolve { tz } => match TimezoneSpec::resolve(&tz) {
            Some(spec) => {
                let kind = match &spec {
                    TimezoneSpec::Named(_) => "named",
                    TimezoneSpec::FixedOffset(_) => "fixed-offset",
                };
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&spec)?);
                } else {
                    println!("{} ({})", spec, kind);
                }
            }
            None => bail!("empty descriptor does not resolve; pass a zone or an offset"),
        },
    }

    Ok(())
}

fn report(json: bool, input: &str, tz: Option<&str>, output: &str) -> Result<()> {
    if json {
        let report = Report { input, tz, output };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{output}");
    }
    Ok(())
}
