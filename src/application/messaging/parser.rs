//! Command parser - Splits raw chat text into a command and its arguments

use std::str::FromStr;

use regex_lite::Regex;
use rust_decimal::Decimal;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Keyword, ParsedCommand};

const COMMAND_PATTERN: &str = r"^/[a-zA-Z_0-9]+";
const HANDLE_PATTERN: &str = r"@[a-zA-Z_0-9]+";
const AMOUNT_PATTERN: &str = r"[0-9]+[.]?[0-9]{0,2}";
const NUMBER_PATTERN: &str = r"[0-9]+";

/// Arguments of `/add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub members: Vec<String>,
    pub amounts: Vec<Decimal>,
}

/// Holds the compiled patterns. Build one at startup and share it.
#[derive(Debug, Clone)]
pub struct CommandParser {
    command: Regex,
    handle: Regex,
    amount: Regex,
    number: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self, BotError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| BotError::Internal(format!("bad pattern {}: {}", pattern, e)))
        };

        Ok(Self {
            command: compile(COMMAND_PATTERN)?,
            handle: compile(HANDLE_PATTERN)?,
            amount: compile(AMOUNT_PATTERN)?,
            number: compile(NUMBER_PATTERN)?,
        })
    }

    /// Split a message into keyword and raw arguments
    pub fn parse(&self, text: &str) -> ParsedCommand {
        let Some(token) = self.command.find(text) else {
            return ParsedCommand::new(Keyword::Unrecognized(String::new()), text);
        };

        let keyword = Keyword::from_token(token.as_str());
        let mut rest = &text[token.end()..];

        // Group chats address commands as `/add@bot_name args`. A glued
        // handle is kept when it is the only handle `/payer` would get.
        if let Some(mention) = self.handle.find(rest).filter(|m| m.start() == 0) {
            let after = &rest[mention.end()..];
            let ends_token = after.chars().next().map_or(true, char::is_whitespace);
            let payer_follows = keyword != Keyword::Payer || self.handle.is_match(after);
            if ends_token && payer_follows {
                rest = after;
            }
        }

        ParsedCommand::new(keyword, rest)
    }

    /// Members and amounts of `/add @h1 @h2 ... amount`
    pub fn parse_add(&self, args: &str) -> Result<AddArgs, CommandError> {
        let Some((sep, ws)) = args.char_indices().find(|(_, c)| c.is_whitespace()) else {
            tracing::debug!("Message parsing failed: no separator after command");
            return Err(CommandError::MalformedMessage);
        };
        let body = &args[sep + ws.len_utf8()..];

        let members: Vec<String> = self
            .handle
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect();

        // Digits inside handles are not money
        let masked = self.handle.replace_all(body, " ");

        let mut amounts = Vec::new();
        for token in self.amount.find_iter(&masked) {
            let value = token.as_str();
            let amount = Decimal::from_str(value.trim_end_matches('.')).map_err(|_| {
                tracing::debug!("Amount {} parsing failed", value);
                CommandError::InvalidValue(value.to_string())
            })?;
            amounts.push(amount);
        }

        if amounts.is_empty() {
            // Separators like `,` between handles are not a value
            let leftover = masked
                .split_whitespace()
                .filter(|word| word.chars().any(char::is_alphanumeric))
                .collect::<Vec<_>>()
                .join(" ");
            if !leftover.is_empty() {
                tracing::debug!("Amount {} parsing failed", leftover);
                return Err(CommandError::InvalidValue(leftover));
            }
        }

        tracing::debug!("Parsed message: amounts {:?}, usernames {:?}", amounts, members);
        Ok(AddArgs { members, amounts })
    }

    /// 1-based index of `/remove N`
    pub fn parse_remove(&self, args: &str) -> Result<u64, CommandError> {
        let Some(digits) = self.number.find(args) else {
            tracing::debug!("Index parsing failed: no digits in {:?}", args);
            return Err(CommandError::MalformedMessage);
        };

        digits.as_str().parse::<u64>().map_err(|_| {
            tracing::debug!("Index {} parsing failed", digits.as_str());
            CommandError::InvalidValue(digits.as_str().to_string())
        })
    }

    /// Handle of `/payer @handle`
    pub fn parse_payer(&self, args: &str) -> Result<String, CommandError> {
        self.handle
            .find(args)
            .map(|m| m.as_str().to_string())
            .ok_or(CommandError::MalformedMessage)
    }
}
