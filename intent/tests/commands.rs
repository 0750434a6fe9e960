use chainspeak_intent::{Intent, ParseError, describe, parse};

const RECIPIENT: &str = "0xabc0000000000000000000000000000000000def";

#[test]
fn send_phrasings_agree() {
    let phrasings = [
        format!("send 0.1 eth to {RECIPIENT}"),
        format!("transfer 0.1 to {RECIPIENT}"),
        format!("pay 0.1 ether to {RECIPIENT}"),
        format!("  SEND 0.1 ETH TO {}  ", RECIPIENT.to_uppercase().replace("0X", "0x")),
    ];

    for text in &phrasings {
        let cmd = parse(text).unwrap();
        assert_eq!(cmd.intent(), Intent::SendTransaction, "{text}");
        assert_eq!(cmd.param("amount"), Some("0.1"), "{text}");
        assert_eq!(cmd.param("to"), Some(RECIPIENT), "{text}");
        assert_eq!(cmd.param("asset"), Some("ETH"), "{text}");
    }
}

#[test]
fn bare_hex_recipient_gets_prefix() {
    let cmd = parse("send 0.1 ETH to abc123def").unwrap();
    assert_eq!(cmd.param("to"), Some("0xabc123def"));
}

#[test]
fn create_wallet_name_rules() {
    let err = parse("create a new wallet named foo!").unwrap_err();
    assert!(matches!(err, ParseError::InvalidWalletName(_)));

    let cmd = parse("create a new wallet").unwrap();
    assert_eq!(cmd.intent(), Intent::CreateWallet);
    assert!(cmd.parameters().is_empty());
}

#[test]
fn gibberish_is_unknown_not_error() {
    let cmd = parse("asdkjfh qwer").unwrap();
    assert_eq!(cmd.intent(), Intent::Unknown);
    assert!(cmd.parameters().is_empty());
}

#[test]
fn describe_is_deterministic() {
    let inputs = [
        "send 1 eth from a to 0x1",
        "check balance of bob",
        "how much eth",
        "create wallet named w1",
        "nothing to see",
    ];
    for text in inputs {
        let first = describe(&parse(text).unwrap());
        for _ in 0..3 {
            assert_eq!(describe(&parse(text).unwrap()), first);
        }
    }
}

#[test]
fn known_intents_satisfy_required_parameters() {
    let inputs = [
        "send 0.5 eth to 0xaa",
        "transfer 12 to bb",
        "pay 0.0001 ether to 0x0",
        "send 3 from main to 0xff",
        "check balance",
        "balance of 0xabc",
        "what is the eth",
        "create wallet",
        "generate a new wallet for alice",
    ];

    for text in inputs {
        let cmd = parse(text).unwrap();
        match cmd.intent() {
            Intent::SendTransaction => {
                let to = cmd.param("to").unwrap();
                assert!(to.starts_with("0x") && to.len() > 2, "{text}");
                let amount: f64 = cmd.param("amount").unwrap().parse().unwrap();
                assert!(amount > 0.0, "{text}");
                assert_eq!(cmd.param("asset"), Some("ETH"));
            }
            Intent::CheckBalance => assert_eq!(cmd.param("asset"), Some("ETH")),
            Intent::CreateWallet => {
                if let Some(name) = cmd.param("name") {
                    assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
                }
            }
            Intent::Unknown => panic!("expected a known intent for {text}"),
        }
    }
}

#[test]
fn balance_target_is_passed_through_verbatim() {
    let cmd = parse("check balance of 0xAbCdEf").unwrap();
    assert_eq!(cmd.param("wallet"), Some("0xabcdef"));
}
