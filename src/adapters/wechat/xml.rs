//! The gateway's flat `<xml><field>value</field>...</xml>` document.

use {crate::domain::error::TransportError, std::collections::BTreeMap};

pub fn encode(fields: &BTreeMap<String, String>) -> Result<String, TransportError> {
    quick_xml::se::to_string_with_root("xml", fields)
        .map_err(|e| TransportError::Encode(e.to_string()))
}

pub fn decode(body: &str) -> Result<BTreeMap<String, String>, TransportError> {
    quick_xml::de::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}
