//! Command dispatcher - Routes parsed commands to ledger operations

use std::fmt::Write;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{format_amount, Keyword, Ledger, ParsedCommand};
use crate::domain::services::SettlementCalculator;
use super::parser::CommandParser;

/// Reply for a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: String,
    /// Whether the ledger was modified and must be saved
    pub changed: bool,
}

impl Outcome {
    fn unchanged(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            changed: false,
        }
    }
}

/// Handler result
pub type HandlerResult = Result<String, CommandError>;

/// Maps a command onto the ledger. Holds no per-chat state: every call is
/// independent of the previous one.
pub struct CommandDispatcher {
    parser: CommandParser,
    calculator: SettlementCalculator,
}

impl CommandDispatcher {
    pub fn new(parser: CommandParser) -> Self {
        Self {
            parser,
            calculator: SettlementCalculator,
        }
    }

    pub fn with_default_parser() -> Result<Self, BotError> {
        Ok(Self::new(CommandParser::new()?))
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Parse and run a raw text message
    pub fn process_text(&self, text: &str, ledger: &mut Ledger) -> Outcome {
        let command = self.parser.parse(text);
        self.dispatch(&command, ledger)
    }

    /// Run a parsed command. Arguments are validated before anything is
    /// written, so a failed command leaves the ledger untouched.
    pub fn dispatch(&self, command: &ParsedCommand, ledger: &mut Ledger) -> Outcome {
        tracing::info!("Processing {} command...", command.keyword);

        let args = command.raw_args.as_str();
        let result = match &command.keyword {
            Keyword::Help => Ok(self.help()),
            Keyword::Payer => self.set_payer(args, ledger),
            Keyword::Add => self.add(args, ledger),
            Keyword::Remove => self.remove(args, ledger),
            Keyword::Status => Ok(self.status(ledger)),
            Keyword::Solve => Ok(self.solve(ledger)),
            Keyword::Clear => Ok(self.clear(ledger)),
            Keyword::Unrecognized(token) => {
                tracing::debug!("Command {:?} is not supported", token);
                Err(CommandError::Unsupported(token.clone()))
            }
        };

        match result {
            Ok(reply) => Outcome {
                reply,
                changed: !command.keyword.is_read_only(),
            },
            Err(e) => Outcome::unchanged(e.to_reply()),
        }
    }

    fn help(&self) -> String {
        let mut help = String::from(
            "Hi, I'm the Party Accountant Bot\n\
             I can help you calculate debts after party\n\n\
             You can use following commands:\n",
        );
        for keyword in &Keyword::ALL {
            let _ = writeln!(help, "{} - {}", keyword, keyword.description());
        }

        help.push_str("\nExamples:\n");
        for example in Keyword::ALL.iter().filter_map(Keyword::example) {
            let _ = writeln!(help, "{}", example);
        }
        help
    }

    fn set_payer(&self, args: &str, ledger: &mut Ledger) -> HandlerResult {
        let handle = self.parser.parse_payer(args)?;
        ledger.set_payer(handle.clone());
        Ok(format!("Set {} as the default payer", handle))
    }

    fn add(&self, args: &str, ledger: &mut Ledger) -> HandlerResult {
        let parsed = self.parser.parse_add(args)?;
        let total = ledger.add_item(&parsed.amounts, parsed.members)?;
        tracing::debug!("Total amount: {}", format_amount(total));
        Ok(format!("Added a payment of *{}*", format_amount(total)))
    }

    fn remove(&self, args: &str, ledger: &mut Ledger) -> HandlerResult {
        let index = self.parser.parse_remove(args)?;
        ledger.remove_item(index).map_err(|e| {
            tracing::debug!("Index {} is out of range", index);
            e
        })?;
        Ok(format!("Bill item {} has been removed", index))
    }

    fn status(&self, ledger: &Ledger) -> String {
        let status = ledger.status();
        let mut response = if status.rows.is_empty() {
            "Bill is empty".to_string()
        } else {
            "Bill items:".to_string()
        };

        for row in &status.rows {
            let _ = write!(response, "\n{}. *{}* by", row.index, format_amount(row.amount));
            for member in row.members {
                response.push(' ');
                response.push_str(member);
            }
        }

        response.push('\n');
        if !status.rows.is_empty() {
            let _ = write!(response, "\nTotal: *{}*", format_amount(status.total));
        }
        let _ = write!(response, "\nDefault payer is {}", status.payer.unwrap_or("unset"));
        response
    }

    fn solve(&self, ledger: &Ledger) -> String {
        let settlement = self.calculator.calculate(ledger);
        let mut response = "Payments:\n".to_string();

        if settlement.is_empty() {
            response.push_str("\nNobody owes anything");
            return response;
        }

        for transfer in &settlement.transfers {
            let _ = write!(
                response,
                "\n*{}* from {} to {}",
                format_amount(transfer.amount),
                transfer.from,
                transfer.to.as_deref().unwrap_or("unset")
            );
        }
        response
    }

    fn clear(&self, ledger: &mut Ledger) -> String {
        ledger.clear();
        "Bill items have been removed".to_string()
    }
}
