use {
    super::codes::{BizResult, CommStatus, ErrorCode, RecallFlag, TradeState},
    super::error::TransportError,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// Raw reply of a Submit, Query or Reverse call: the gateway's flat field map.
/// Surfaced unchanged to the caller when a trade resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(BTreeMap<String, String>);

/// What a gateway call produced: a payload, or nothing usable.
pub type GatewayReply = Result<GatewayResponse, TransportError>;

impl GatewayResponse {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn comm_status(&self) -> Option<CommStatus> {
        self.get("return_code").map(CommStatus::from)
    }

    pub fn biz_result(&self) -> Option<BizResult> {
        self.get("result_code").map(BizResult::from)
    }

    pub fn err_code(&self) -> Option<ErrorCode> {
        self.get("err_code").map(ErrorCode::from)
    }

    pub fn trade_state(&self) -> Option<TradeState> {
        self.get("trade_state").map(TradeState::from)
    }

    pub fn recall(&self) -> Option<RecallFlag> {
        self.get("recall").map(RecallFlag::from)
    }

    pub fn is_comm_success(&self) -> bool {
        self.comm_status() == Some(CommStatus::Success)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GatewayResponse {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
