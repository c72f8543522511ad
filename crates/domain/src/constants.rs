//! Wire constants
//!
//! Centralized location for the fixed values the Responsys REST API expects.

// Endpoint paths (appended to the configured base URLs)
pub const AUTH_TOKEN_PATH: &str = "rest/api/v1/auth/token";
pub const LISTS_PATH: &str = "rest/api/v1/lists";
pub const EVENTS_PATH: &str = "rest/api/v1/events";
pub const AUTH_TYPE_PASSWORD: &str = "password";
pub const EVENT_PATH_PREFIX: &str = "API_";

// Contacts list
pub const CONTACTS_LIST: &str = "CONTACTS_LIST";
pub const DEFAULT_LIST_FOLDER: &str = "MasterData";
pub const FIELD_EMAIL_ADDRESS: &str = "EMAIL_ADDRESS_";
pub const FIELD_CUSTOMER_ID: &str = "CUSTOMER_ID_";
pub const FIELD_DATABASE_ID: &str = "DATABASE_ID";

// Merge rule codes
pub const HTML_VALUE: &str = "H";
pub const OPTIN_VALUE: &str = "I";
pub const TEXT_VALUE: &str = "T";
pub const OPTOUT_VALUE: i64 = 0;
pub const UPDATE_ON_MATCH_REPLACE_ALL: &str = "REPLACE_ALL";
pub const MATCH_OPERATOR_NONE: &str = "NONE";
pub const PERMISSION_OPTIN: &str = "OPTIN";

// Event recipients
pub const EMAIL_FORMAT_HTML: &str = "HTML_FORMAT";
pub const MAX_EVENT_NAME_LENGTH: usize = 100;

// Response handling
pub const AUTH_TOKEN_FIELD: &str = "authToken";
pub const ERROR_CODE_FIELD: &str = "errorCode";
pub const ERROR_DETAIL_FIELD: &str = "detail";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from Responsys.";
pub const MISSING_TOKEN_MESSAGE: &str = "Unable to fetch authToken.";

// Headers
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_USER_AGENT: &str = "User-Agent";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const DEFAULT_USER_AGENT: &str = concat!("responsys-client/", env!("CARGO_PKG_VERSION"));
