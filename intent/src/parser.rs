//! Command parser: normalize, match, validate.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::pattern::{PatternTable, RuleMatch};
use crate::types::{DEFAULT_ASSET, Intent, ParsedCommand};

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("amount pattern must compile"));

static WALLET_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("wallet name pattern must compile"));

/// Trims surrounding whitespace and lowercases.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Parses `text` against the built-in pattern table.
///
/// An unmatched command is not an error: it comes back as
/// [`Intent::Unknown`] with no parameters. A matched command whose
/// parameters fail validation returns a [`ParseError`].
pub fn parse(text: &str) -> Result<ParsedCommand, ParseError> {
    parse_with(PatternTable::builtin(), text)
}

/// Parses `text` against a caller-supplied table.
pub fn parse_with(table: &PatternTable, text: &str) -> Result<ParsedCommand, ParseError> {
    let normalized = normalize(text);

    let Some(hit) = table.find(&normalized) else {
        tracing::debug!(text, "no rule matched");
        return Ok(ParsedCommand::unknown(text));
    };

    let intent = hit.intent;
    let parameters = match intent {
        Intent::SendTransaction => send_parameters(&hit)?,
        Intent::CheckBalance => balance_parameters(&hit),
        Intent::CreateWallet => create_parameters(&hit)?,
        Intent::Unknown => BTreeMap::new(),
    };

    tracing::debug!(%intent, ?parameters, "parsed command");
    Ok(ParsedCommand::new(intent, parameters, text))
}

fn send_parameters(hit: &RuleMatch<'_>) -> Result<BTreeMap<String, String>, ParseError> {
    let amount = hit
        .get("amount")
        .ok_or(ParseError::MissingParameter("amount"))?;
    let to = hit.get("to").ok_or(ParseError::MissingParameter("to"))?;

    if !is_valid_amount(amount) {
        return Err(ParseError::InvalidAmount(amount.to_string()));
    }

    let to = if to.starts_with("0x") {
        to.to_string()
    } else {
        format!("0x{to}")
    };

    let mut params = BTreeMap::new();
    params.insert("amount".to_string(), amount.to_string());
    params.insert("asset".to_string(), DEFAULT_ASSET.to_string());
    params.insert("to".to_string(), to);
    if let Some(from) = hit.get("from") {
        params.insert("from".to_string(), from.to_string());
    }
    Ok(params)
}

fn balance_parameters(hit: &RuleMatch<'_>) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("asset".to_string(), DEFAULT_ASSET.to_string());
    if let Some(wallet) = hit.get("wallet") {
        params.insert("wallet".to_string(), wallet.to_string());
    }
    params
}

fn create_parameters(hit: &RuleMatch<'_>) -> Result<BTreeMap<String, String>, ParseError> {
    let mut params = BTreeMap::new();
    if let Some(name) = hit.get("name") {
        if !is_valid_wallet_name(name) {
            return Err(ParseError::InvalidWalletName(name.to_string()));
        }
        params.insert("name".to_string(), name.to_string());
    }
    Ok(params)
}

/// A positive ASCII decimal with an optional fractional part.
pub fn is_valid_amount(amount: &str) -> bool {
    if !AMOUNT_RE.is_match(amount) {
        return false;
    }
    amount.bytes().any(|b| (b'1'..=b'9').contains(&b))
}

/// Letters, digits and underscores only.
pub fn is_valid_wallet_name(name: &str) -> bool {
    WALLET_NAME_RE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Send 1 ETH\t"), "send 1 eth");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_amount_validation() {
        assert!(is_valid_amount("1"));
        assert!(is_valid_amount("0.1"));
        assert!(is_valid_amount("10.000"));
        assert!(is_valid_amount("0.000000000000000001"));
        assert!(!is_valid_amount("0"));
        assert!(!is_valid_amount("0.00"));
        assert!(!is_valid_amount("."));
        assert!(!is_valid_amount("1."));
        assert!(!is_valid_amount(".5"));
        assert!(!is_valid_amount("1.2.3"));
        assert!(!is_valid_amount(""));
        assert!(!is_valid_amount("1\u{0661}"));
        assert!(!is_valid_amount("\u{0661}.5"));
    }

    #[test]
    fn test_wallet_name_validation() {
        assert!(is_valid_wallet_name("savings_2"));
        assert!(is_valid_wallet_name("ABC"));
        assert!(!is_valid_wallet_name("foo!"));
        assert!(!is_valid_wallet_name("has-dash"));
        assert!(!is_valid_wallet_name(""));
    }

    #[test]
    fn test_send_prefixes_recipient() {
        let cmd = parse("send 0.1 ETH to abc123").unwrap();
        assert_eq!(cmd.intent(), Intent::SendTransaction);
        assert_eq!(cmd.param("to"), Some("0xabc123"));
        assert_eq!(cmd.param("asset"), Some("ETH"));
    }

    #[test]
    fn test_send_keeps_prefixed_recipient() {
        let cmd = parse("send 0.1 ETH to 0xABC123").unwrap();
        assert_eq!(cmd.param("to"), Some("0xabc123"));
    }

    #[test]
    fn test_send_invalid_amount() {
        let err = parse("send 1.2.3 eth to 0xabc").unwrap_err();
        assert_eq!(err, ParseError::InvalidAmount("1.2.3".into()));

        let err = parse("transfer 0 to 0xabc").unwrap_err();
        assert_eq!(err, ParseError::InvalidAmount("0".into()));
    }

    #[test]
    fn test_send_rejects_non_ascii_digits() {
        let err = parse("send 1\u{0661} eth to 0xabc").unwrap_err();
        assert_eq!(err, ParseError::InvalidAmount("1\u{0661}".into()));

        let err = parse("pay \u{0661}\u{0662} to 0xabc").unwrap_err();
        assert_eq!(err, ParseError::InvalidAmount("\u{0661}\u{0662}".into()));
    }

    #[test]
    fn test_send_rejects_non_hex_recipient() {
        for text in ["send 1 eth to x", "send 1 eth to 0x"] {
            assert_eq!(parse(text).unwrap().intent(), Intent::Unknown, "{text}");
        }
    }

    #[test]
    fn test_send_with_from() {
        let cmd = parse("Transfer 3 ether from Savings to 0x00ff").unwrap();
        assert_eq!(cmd.param("from"), Some("savings"));
        assert_eq!(cmd.param("amount"), Some("3"));
        assert_eq!(cmd.param("to"), Some("0x00ff"));
    }

    #[test]
    fn test_balance_parameters() {
        let cmd = parse("check balance of MyWallet").unwrap();
        assert_eq!(cmd.intent(), Intent::CheckBalance);
        assert_eq!(cmd.param("wallet"), Some("mywallet"));
        assert_eq!(cmd.param("asset"), Some("ETH"));

        let cmd = parse("What's my balance?").unwrap();
        assert_eq!(cmd.param("wallet"), None);
        assert_eq!(cmd.param("asset"), Some("ETH"));
    }

    #[test]
    fn test_create_parameters() {
        let cmd = parse("create a new wallet").unwrap();
        assert_eq!(cmd.intent(), Intent::CreateWallet);
        assert!(cmd.parameters().is_empty());

        let cmd = parse("make a wallet called trading_1").unwrap();
        assert_eq!(cmd.param("name"), Some("trading_1"));

        let err = parse("create a new wallet named foo!").unwrap_err();
        assert!(matches!(err, ParseError::InvalidWalletName(n) if n == "foo!"));
    }

    #[test]
    fn test_unknown_keeps_original() {
        let cmd = parse("  Asdkjfh QWER ").unwrap();
        assert_eq!(cmd.intent(), Intent::Unknown);
        assert!(cmd.parameters().is_empty());
        assert_eq!(cmd.original_text(), "  Asdkjfh QWER ");
    }

    #[test]
    fn test_missing_capture_is_rejected() {
        let table =
            PatternTable::from_rules(&[(Intent::SendTransaction, &[r"\bsend\s+(?P<amount>\d+)"][..])])
                .unwrap();
        let err = parse_with(&table, "send 5").unwrap_err();
        assert_eq!(err, ParseError::MissingParameter("to"));
    }
}
