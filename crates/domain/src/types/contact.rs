//! Contact list merge payload

use serde::{Deserialize, Serialize};

use crate::constants::{
    FIELD_CUSTOMER_ID, FIELD_DATABASE_ID, FIELD_EMAIL_ADDRESS, HTML_VALUE,
    MATCH_OPERATOR_NONE, OPTIN_VALUE, OPTOUT_VALUE, PERMISSION_OPTIN, TEXT_VALUE,
    UPDATE_ON_MATCH_REPLACE_ALL,
};

/// Contact identified by `(email, customer_id)`, tagged with the configured
/// database id. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub email: String,
    pub customer_id: String,
    pub database_id: String,
}

impl ContactRecord {
    pub fn new(
        email: impl Into<String>,
        customer_id: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            customer_id: customer_id.into(),
            database_id: database_id.into(),
        }
    }

    /// Body for `POST lists/CONTACTS_LIST` targeting `folder`.
    pub fn merge_request(&self, folder: &str) -> ListMergeRequest {
        ListMergeRequest {
            list: ListFolder { folder_name: folder.to_string() },
            record_data: RecordData {
                field_names: vec![
                    FIELD_EMAIL_ADDRESS.to_string(),
                    FIELD_CUSTOMER_ID.to_string(),
                    FIELD_DATABASE_ID.to_string(),
                ],
                records: vec![Record {
                    field_values: vec![
                        self.email.clone(),
                        self.customer_id.clone(),
                        self.database_id.clone(),
                    ],
                }],
            },
            merge_rule: MergeRule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMergeRequest {
    pub list: ListFolder,
    pub record_data: RecordData,
    pub merge_rule: MergeRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFolder {
    pub folder_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    pub field_names: Vec<String>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub field_values: Vec<String>,
}

/// How the contact database reconciles an incoming record.
///
/// Inserts when nothing matches, replaces all fields on a match, and matches
/// on `CUSTOMER_ID_` together with `DATABASE_ID` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRule {
    pub html_value: String,
    pub optin_value: String,
    pub text_value: String,
    pub insert_on_no_match: bool,
    pub update_on_match: String,
    pub match_column_name1: String,
    pub match_column_name2: String,
    pub match_operator: String,
    pub optout_value: i64,
    pub reject_record_if_channel_empty: Option<String>,
    pub default_permission_status: String,
}

impl Default for MergeRule {
    fn default() -> Self {
        Self {
            html_value: HTML_VALUE.to_string(),
            optin_value: OPTIN_VALUE.to_string(),
            text_value: TEXT_VALUE.to_string(),
            insert_on_no_match: true,
            update_on_match: UPDATE_ON_MATCH_REPLACE_ALL.to_string(),
            match_column_name1: FIELD_CUSTOMER_ID.to_string(),
            match_column_name2: FIELD_DATABASE_ID.to_string(),
            match_operator: MATCH_OPERATOR_NONE.to_string(),
            optout_value: OPTOUT_VALUE,
            reject_record_if_channel_empty: None,
            default_permission_status: PERMISSION_OPTIN.to_string(),
        }
    }
}
