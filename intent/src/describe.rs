//! Human-readable rendering of parsed commands.

use crate::types::{Intent, ParsedCommand};

/// Renders a parsed command as a confirmation line.
///
/// Total over every intent and parameter combination; missing parameters
/// render as empty strings.
pub fn describe(cmd: &ParsedCommand) -> String {
    let p = |key: &str| cmd.param(key).unwrap_or_default();

    match cmd.intent() {
        Intent::SendTransaction => {
            let mut s = format!("Send {} {} to {}", p("amount"), p("asset"), p("to"));
            if let Some(from) = cmd.param("from") {
                s.push_str(&format!(" from wallet \"{from}\""));
            }
            s
        }
        Intent::CheckBalance => match cmd.param("wallet") {
            Some(wallet) => format!("Check balance of wallet \"{wallet}\""),
            None => "Check balance of default wallet".to_string(),
        },
        Intent::CreateWallet => match cmd.param("name") {
            Some(name) => format!("Create a new wallet named \"{name}\""),
            None => "Create a new wallet".to_string(),
        },
        Intent::Unknown => format!("Unknown command: \"{}\"", cmd.original_text()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::parse;

    #[test]
    fn test_describe_send() {
        let cmd = parse("send 0.1 eth to 0xabc").unwrap();
        assert_eq!(describe(&cmd), "Send 0.1 ETH to 0xabc");

        let cmd = parse("send 2 eth from savings to 0xabc").unwrap();
        assert_eq!(
            describe(&cmd),
            "Send 2 ETH to 0xabc from wallet \"savings\""
        );
    }

    #[test]
    fn test_describe_balance() {
        let cmd = parse("check balance").unwrap();
        assert_eq!(describe(&cmd), "Check balance of default wallet");

        let cmd = parse("balance of savings").unwrap();
        assert_eq!(describe(&cmd), "Check balance of wallet \"savings\"");
    }

    #[test]
    fn test_describe_create() {
        let cmd = parse("create wallet").unwrap();
        assert_eq!(describe(&cmd), "Create a new wallet");

        let cmd = parse("create wallet named alpha").unwrap();
        assert_eq!(describe(&cmd), "Create a new wallet named \"alpha\"");
    }

    #[test]
    fn test_describe_unknown_echoes_original() {
        let cmd = parse("Hello World").unwrap();
        assert_eq!(describe(&cmd), "Unknown command: \"Hello World\"");
        assert_eq!(cmd.to_string(), describe(&cmd));
    }

    #[test]
    fn test_describe_tolerates_missing_params() {
        let cmd = ParsedCommand::new(Intent::SendTransaction, BTreeMap::new(), "x");
        assert_eq!(describe(&cmd), "Send   to ");
    }
}
