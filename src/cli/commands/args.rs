//! Argument parsing shared by the record commands.

use std::str::FromStr;

use uuid::Uuid;

use crate::cli::core::CommandError;
use crate::domain::LedgerDate;

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", text))
}

pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<f64, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid {} `{}` (expected a number)",
            field, raw
        ))),
    }
}

/// Checks the `DD/MM/YYYY` shape and returns the trimmed text unchanged.
pub(crate) fn parse_date(field: &str, raw: &str) -> Result<String, CommandError> {
    let trimmed = raw.trim();
    LedgerDate::from_str(trimmed).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "invalid {} `{}` (use DD/MM/YYYY)",
            field, raw
        ))
    })?;
    Ok(trimmed.to_string())
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, CommandError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("invalid id `{}`", raw)))
}

pub(crate) fn parse_bool(field: &str, raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid {} `{}` (expected true or false)",
            field, raw
        ))),
    }
}

/// Splits `field=value` pairs, lowercasing the field names.
pub(crate) fn field_pairs<'a>(args: &[&'a str]) -> Result<Vec<(String, &'a str)>, CommandError> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok((field.trim().to_ascii_lowercase(), value))
            }
            _ => Err(CommandError::InvalidArguments(format!(
                "expected field=value, got `{}`",
                arg
            ))),
        })
        .collect()
}

pub(crate) fn unknown_field(kind: &str, field: &str, known: &[&str]) -> CommandError {
    CommandError::InvalidArguments(format!(
        "unknown {} field `{}` (known: {})",
        kind,
        field,
        known.join(", ")
    ))
}

/// Positional arguments and `--flag [value]` options.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    flags: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
}

impl<'a> ParsedArgs<'a> {
    /// `valued` lists the options that consume the following argument.
    pub fn parse(args: &[&'a str], valued: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            if let Some(name) = arg.strip_prefix("--") {
                if valued.contains(&name) {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("--{} needs a value", name))
                    })?;
                    parsed.options.push((name, value));
                } else {
                    parsed.flags.push(name);
                }
            } else {
                parsed.positional.push(arg);
            }
        }
        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(&name)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Rejects flags outside `allowed`.
    pub fn ensure_known(&self, allowed: &[&str]) -> Result<(), CommandError> {
        match self.flags.iter().find(|flag| !allowed.contains(flag)) {
            Some(flag) => Err(CommandError::InvalidArguments(format!(
                "unknown flag `--{}`",
                flag
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_options_are_separated_from_positionals() {
        let args = ["Rent", "--fixed", "Housing", "--paid-amount", "20", "1200"];
        let parsed = ParsedArgs::parse(&args, &["paid-amount"]).unwrap();
        assert_eq!(parsed.positional, vec!["Rent", "Housing", "1200"]);
        assert!(parsed.flag("fixed"));
        assert!(!parsed.flag("paid"));
        assert_eq!(parsed.option("paid-amount"), Some("20"));
        assert!(parsed.ensure_known(&["fixed"]).is_ok());
        assert!(parsed.ensure_known(&["paid"]).is_err());
    }

    #[test]
    fn valued_option_without_value_is_rejected() {
        assert!(ParsedArgs::parse(&["--paid-amount"], &["paid-amount"]).is_err());
    }

    #[test]
    fn field_pairs_keep_values_verbatim() {
        let pairs = field_pairs(&["Name=Car loan", "due_date=01/02/2024"]).unwrap();
        assert_eq!(pairs[0], ("name".to_string(), "Car loan"));
        assert_eq!(pairs[1], ("due_date".to_string(), "01/02/2024"));
        assert!(field_pairs(&["value"]).is_err());
        assert!(field_pairs(&["=3"]).is_err());
    }

    #[test]
    fn scalar_parsers_reject_garbage() {
        assert_eq!(parse_amount("value", "12.5").unwrap(), 12.5);
        assert!(parse_amount("value", "NaN").is_err());
        assert!(parse_amount("value", "twelve").is_err());
        assert_eq!(parse_date("date", " 31/02/2024 ").unwrap(), "31/02/2024");
        assert!(parse_date("date", "2024-02-01").is_err());
        assert!(parse_bool("is_fixed", "maybe").is_err());
        assert!(parse_id("not-a-uuid").is_err());
    }
}
