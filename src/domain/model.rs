use serde::{Deserialize, Serialize};

/// One commissioning record. Unset fields are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "importRequest", skip_serializing_if = "Option::is_none")]
    pub import_request: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "participantInn", skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tnved_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uit_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uitu_code: Option<String>,
}

/// Wire payload for a single call: `{"document": ..., "signature": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest<'a> {
    pub document: &'a Document,
    pub signature: &'a str,
}

impl<'a> SubmissionRequest<'a> {
    pub fn new(document: &'a Document, signature: &'a str) -> Self {
        Self {
            document,
            signature,
        }
    }

    pub fn to_json_bytes(&self) -> crate::utils::error::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
