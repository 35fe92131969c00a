use micropay_sync::domain::codes::{RecallFlag, TradeState};
use micropay_sync::domain::error::TransportError;
use micropay_sync::domain::outcome::{
    CancellationResult, Outcome, classify_cancellation, classify_query, classify_submission,
};
use micropay_sync::domain::response::{GatewayReply, GatewayResponse};
use proptest::prelude::*;

const KEYS: [&str; 5] = ["return_code", "result_code", "err_code", "trade_state", "recall"];

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("SUCCESS".to_string()),
        Just("FAIL".to_string()),
        Just("USERPAYING".to_string()),
        Just("SYSTEMERROR".to_string()),
        Just("ORDERNOTEXIST".to_string()),
        Just("Y".to_string()),
        Just("N".to_string()),
        Just(String::new()),
        "[A-Z]{1,12}",
    ]
}

/// Any subset of the classified fields with any mix of known and unknown
/// codes, or a transport failure.
fn arb_reply() -> impl Strategy<Value = GatewayReply> {
    prop_oneof![
        1 => Just(Err(TransportError::Timeout)),
        9 => prop::collection::vec(prop::option::of(arb_value()), KEYS.len()).prop_map(|values| {
            Ok(KEYS
                .iter()
                .zip(values)
                .filter_map(|(k, v)| v.map(|v| (*k, v)))
                .collect::<GatewayResponse>())
        }),
    ]
}

proptest! {
    /// Same reply, same verdict.
    #[test]
    fn classification_is_deterministic(reply in arb_reply()) {
        let copy = reply.clone();
        prop_assert_eq!(classify_submission(&reply), classify_submission(&copy));
        prop_assert_eq!(classify_query(&reply), classify_query(&copy));
        prop_assert_eq!(classify_cancellation(&reply), classify_cancellation(&copy));
    }

    #[test]
    fn submission_never_resolves(reply in arb_reply()) {
        prop_assert!(!matches!(classify_submission(&reply), Outcome::Resolved(_)));
    }

    /// Query only resolves on a completed trade, and only hands back the reply
    /// it was given.
    #[test]
    fn query_resolves_only_completed_trades(reply in arb_reply()) {
        if let Outcome::Resolved(payload) = classify_query(&reply) {
            prop_assert_eq!(payload.trade_state(), Some(TradeState::Completed));
            prop_assert_eq!(Ok(payload), reply);
        }
    }

    #[test]
    fn query_never_reports_protocol_error(reply in arb_reply()) {
        prop_assert!(!matches!(classify_query(&reply), Outcome::ProtocolError(_)));
    }

    #[test]
    fn cancellation_verdict_follows_recall_flag(reply in arb_reply()) {
        match classify_cancellation(&reply) {
            CancellationResult::Cancelled => {
                prop_assert_eq!(reply.unwrap().recall(), Some(RecallFlag::No));
            }
            CancellationResult::MustRecall => {
                prop_assert_eq!(reply.unwrap().recall(), Some(RecallFlag::Yes));
            }
            CancellationResult::Failed => {}
        }
    }
}
