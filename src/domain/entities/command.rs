use std::fmt;

/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    Help,
    Payer,
    Add,
    Remove,
    Status,
    Solve,
    Clear,
    /// Anything else, including text without a leading command
    Unrecognized(String),
}

impl Keyword {
    /// Every supported keyword, in the order shown by `/help`
    pub const ALL: [Keyword; 7] = [
        Keyword::Help,
        Keyword::Payer,
        Keyword::Add,
        Keyword::Remove,
        Keyword::Status,
        Keyword::Solve,
        Keyword::Clear,
    ];

    /// Match a command token such as `/add`. Case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "/help" => Keyword::Help,
            "/payer" => Keyword::Payer,
            "/add" => Keyword::Add,
            "/remove" => Keyword::Remove,
            "/status" => Keyword::Status,
            "/solve" => Keyword::Solve,
            "/clear" => Keyword::Clear,
            other => Keyword::Unrecognized(other.to_string()),
        }
    }

    /// Command name without the leading slash
    pub fn name(&self) -> &str {
        match self {
            Keyword::Help => "help",
            Keyword::Payer => "payer",
            Keyword::Add => "add",
            Keyword::Remove => "remove",
            Keyword::Status => "status",
            Keyword::Solve => "solve",
            Keyword::Clear => "clear",
            Keyword::Unrecognized(token) => token.trim_start_matches('/'),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Keyword::Help => "show help info",
            Keyword::Payer => "set default payer",
            Keyword::Add => "add a bill item",
            Keyword::Remove => "remove a bill item",
            Keyword::Status => "show list of bill items and default payer",
            Keyword::Solve => "calculate debts",
            Keyword::Clear => "clear list of bill items",
            Keyword::Unrecognized(_) => "unsupported command",
        }
    }

    pub fn example(&self) -> Option<&'static str> {
        match self {
            Keyword::Payer => Some("/payer @carol"),
            Keyword::Add => Some("/add @alice @bob 30.50"),
            Keyword::Remove => Some("/remove 2"),
            _ => None,
        }
    }

    /// Help, status and solve never touch the ledger
    pub fn is_read_only(&self) -> bool {
        matches!(self, Keyword::Help | Keyword::Status | Keyword::Solve | Keyword::Unrecognized(_))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// A message split into its command keyword and the remaining text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub keyword: Keyword,
    /// Text after the command token and an optional `@botname` suffix, untrimmed
    pub raw_args: String,
}

impl ParsedCommand {
    pub fn new(keyword: Keyword, raw_args: impl Into<String>) -> Self {
        Self {
            keyword,
            raw_args: raw_args.into(),
        }
    }
}
