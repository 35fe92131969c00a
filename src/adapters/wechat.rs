pub mod signing;
pub mod xml;

use {
    crate::{
        config::GatewayConfig,
        domain::{
            error::TransportError,
            gateway::{GatewayClient, GatewayFuture},
            id::OrderId,
            response::{GatewayReply, GatewayResponse},
            trade::MicroPayOrder,
        },
    },
    reqwest::header::CONTENT_TYPE,
    std::{collections::BTreeMap, time::Duration},
    uuid::Uuid,
};

const MICROPAY_PATH: &str = "pay/micropay";
const ORDER_QUERY_PATH: &str = "pay/orderquery";
const REVERSE_PATH: &str = "secapi/pay/reverse";

/// HTTPS client for the micro-pay gateway. Signs every request and verifies
/// the signature of every successful reply.
pub struct WechatClient {
    http: reqwest::Client,
    base_url: String,
    appid: String,
    mch_id: String,
    api_key: String,
    timeout: Duration,
}

impl WechatClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            appid: config.appid.clone(),
            mch_id: config.mch_id.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    async fn call(&self, path: &'static str, mut params: BTreeMap<String, String>) -> GatewayReply {
        params.insert("appid".into(), self.appid.clone());
        params.insert("mch_id".into(), self.mch_id.clone());
        params.insert("nonce_str".into(), Uuid::now_v7().simple().to_string());
        params.insert("sign_type".into(), signing::SIGN_TYPE.into());
        let sign = signing::sign(&params, &self.api_key)?;
        params.insert("sign".into(), sign);

        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, out_trade_no = ?params.get("out_trade_no"), "gateway call");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .timeout(self.timeout)
            .body(xml::encode(&params)?)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(from_reqwest)?;
        let resp = GatewayResponse::new(xml::decode(&body)?);

        if resp.is_comm_success() && !signing::verify(resp.fields(), &self.api_key) {
            tracing::warn!(%url, "gateway reply failed signature check");
            return Err(TransportError::Signature);
        }

        Ok(resp)
    }
}

fn from_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(e.to_string())
    }
}

fn micropay_params(order: &MicroPayOrder) -> BTreeMap<String, String> {
    let mut params = BTreeMap::from([
        ("out_trade_no".to_string(), order.out_trade_no.to_string()),
        ("auth_code".to_string(), order.auth_code.to_string()),
        ("body".to_string(), order.body.clone()),
        ("total_fee".to_string(), order.total_fee.to_string()),
        (
            "spbill_create_ip".to_string(),
            order.spbill_create_ip.clone(),
        ),
    ]);
    if let Some(attach) = &order.attach {
        params.insert("attach".into(), attach.clone());
    }
    params
}

fn order_params(out_trade_no: &OrderId) -> BTreeMap<String, String> {
    BTreeMap::from([("out_trade_no".to_string(), out_trade_no.to_string())])
}

impl GatewayClient for WechatClient {
    fn submit<'a>(&'a self, order: &'a MicroPayOrder) -> GatewayFuture<'a> {
        Box::pin(self.call(MICROPAY_PATH, micropay_params(order)))
    }

    fn query<'a>(&'a self, out_trade_no: &'a OrderId) -> GatewayFuture<'a> {
        Box::pin(self.call(ORDER_QUERY_PATH, order_params(out_trade_no)))
    }

    fn reverse<'a>(&'a self, out_trade_no: &'a OrderId) -> GatewayFuture<'a> {
        Box::pin(self.call(REVERSE_PATH, order_params(out_trade_no)))
    }
}
