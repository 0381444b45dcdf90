//! Shell commands
//!
//! Every input line is parsed into a [`Command`]. Tab indexes are 1-based
//! positions in display order, as printed by `tabs`.

use anyhow::{bail, Context, Result};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a tab and select it; `None` opens the homepage
    Open { url: Option<String> },
    /// Open a private tab and select it
    Private { url: Option<String> },
    /// Load a URL in the selected tab
    Load { url: String },
    Select { index: usize },
    /// Close the tab at `index`, or the selected tab
    Close { index: Option<usize> },
    Back,
    Forward,
    Reload,
    /// Report a find-in-page result for the selected tab
    Find { active: u32, total: u32 },
    Tabs,
    State,
    Help,
    Quit,
}

/// Name, arguments and description of every command
pub const HELP: &[(&str, &str, &str)] = &[
    ("open", "[url]", "Open a tab and select it"),
    ("private", "[url]", "Open a private tab and select it"),
    ("load", "<url>", "Load a URL in the selected tab"),
    ("select", "<index>", "Select a tab"),
    ("close", "[index]", "Close a tab, the selected one by default"),
    ("back", "", "Go back in the selected tab"),
    ("forward", "", "Go forward in the selected tab"),
    ("reload", "", "Reload the selected tab"),
    ("find", "<active> <total>", "Report a find-in-page result"),
    ("tabs", "", "List open tabs"),
    ("state", "", "Print the state as JSON"),
    ("help", "", "Show this help"),
    ("quit", "", "Exit"),
];

impl Command {
    /// Parse an input line; `None` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("open", [] | [_]) => Self::Open {
                url: args.first().map(|url| url.to_string()),
            },
            ("private", [] | [_]) => Self::Private {
                url: args.first().map(|url| url.to_string()),
            },
            ("load", [url]) => Self::Load {
                url: url.to_string(),
            },
            ("select", [index]) => Self::Select {
                index: parse_index(index)?,
            },
            ("close", []) => Self::Close { index: None },
            ("close", [index]) => Self::Close {
                index: Some(parse_index(index)?),
            },
            ("back", []) => Self::Back,
            ("forward", []) => Self::Forward,
            ("reload", []) => Self::Reload,
            ("find", [active, total]) => Self::Find {
                active: active
                    .parse()
                    .with_context(|| format!("Invalid match ordinal: {}", active))?,
                total: total
                    .parse()
                    .with_context(|| format!("Invalid match count: {}", total))?,
            },
            ("tabs", []) => Self::Tabs,
            ("state", []) => Self::State,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => match HELP.iter().find(|(command, _, _)| *command == name) {
                Some((command, usage, _)) => bail!("Usage: {} {}", command, usage),
                None => bail!("Unknown command: {} (try help)", name),
            },
        };
        Ok(Some(command))
    }
}

fn parse_index(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => bail!("Invalid tab index: {} (tabs are numbered from 1)", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("open https://mozilla.org").unwrap(),
            Some(Command::Open {
                url: Some("https://mozilla.org".to_string())
            })
        );
        assert_eq!(
            Command::parse("  private ").unwrap(),
            Some(Command::Private { url: None })
        );
        assert_eq!(
            Command::parse("close").unwrap(),
            Some(Command::Close { index: None })
        );
        assert_eq!(
            Command::parse("close 2").unwrap(),
            Some(Command::Close { index: Some(2) })
        );
        assert_eq!(
            Command::parse("find 1 12").unwrap(),
            Some(Command::Find {
                active: 1,
                total: 12
            })
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_invalid_input() {
        let error = Command::parse("load").unwrap_err();
        assert_eq!(error.to_string(), "Usage: load <url>");

        let error = Command::parse("select 0").unwrap_err();
        assert!(error.to_string().starts_with("Invalid tab index"));

        let error = Command::parse("teleport").unwrap_err();
        assert!(error.to_string().starts_with("Unknown command"));

        assert!(Command::parse("find one 2").is_err());
    }
}
