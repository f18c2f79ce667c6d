use axum::http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use tellerdesk_auth::ProfileUpdate;
use tellerdesk_core::Money;
use tellerdesk_ledger::{DepositKind, LedgerError, PageRequest, parse_amount};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTokenQuery {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLimitRequest {
    #[serde(default)]
    pub limit: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub values: Option<ProfileValues>,
}

/// Editable profile fields. Anything else (`id`, `password`, `limit`, ...)
/// fails deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileValues {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "type", default)]
    pub customer_type: Option<String>,
}

impl From<ProfileValues> for ProfileUpdate {
    fn from(v: ProfileValues) -> Self {
        ProfileUpdate {
            name: v.name,
            email: v.email,
            phone: v.phone,
            address: v.address,
            customer_type: v.customer_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionListRequest {
    #[serde(rename = "queryParams", default)]
    pub query_params: Option<QueryParams>,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBalanceRequest {
    #[serde(default)]
    pub values: Option<BalanceValues>,
}

/// Form values of a withdraw or deposit, named as the web client sends them.
#[derive(Debug, Deserialize)]
pub struct BalanceValues {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(rename = "withdrawVal", default)]
    pub withdraw_val: Option<Value>,
    #[serde(rename = "depositType", default)]
    pub deposit_type: Option<String>,
    #[serde(rename = "depositValue", default)]
    pub deposit_value: Option<Value>,
    #[serde(default)]
    pub cheque_amt: Option<Value>,
    #[serde(default)]
    pub cheque_number: Option<String>,
}

/// A validated balance mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceUpdate {
    Withdraw {
        amount: Money,
        remarks: String,
    },
    Deposit {
        amount: Money,
        remarks: String,
        kind: DepositKind,
        cheque_number: Option<String>,
    },
}

// -------------------------
// Mapping helpers
// -------------------------

pub fn to_profile_update(body: UpdateUserRequest) -> Result<ProfileUpdate, axum::response::Response> {
    body.values.map(ProfileUpdate::from).ok_or_else(|| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "values is required")
    })
}

/// Deserialize a JSON body, turning shape errors into a 400.
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, axum::response::Response> {
    serde_json::from_value(body).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
    })
}

/// Coerce a JSON number or numeric string into an amount.
pub fn amount_field(name: &str, value: Option<&Value>) -> Result<Money, LedgerError> {
    match value {
        Some(Value::Number(n)) => parse_amount(&n.to_string()),
        Some(Value::String(s)) => parse_amount(s),
        None | Some(Value::Null) => Err(LedgerError::invalid_amount(format!("{name} is required"))),
        Some(other) => Err(LedgerError::invalid_amount(format!(
            "{name} must be a number, got {other}"
        ))),
    }
}

fn positive_int_field(name: &str, value: Option<&Value>) -> Result<usize, LedgerError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| LedgerError::InvalidPage(format!("{name} must be a positive integer")))
}

pub fn to_page_request(body: TransactionListRequest) -> Result<PageRequest, LedgerError> {
    let params = body
        .query_params
        .ok_or_else(|| LedgerError::InvalidPage("queryParams is required".to_string()))?;

    let page = positive_int_field("page", params.page.as_ref())?;
    let items = positive_int_field("items", params.items.as_ref())?;
    PageRequest::new(page, items)
}

/// Pick the amount source the same way the web client does: cheque deposits
/// read `cheque_amt`, everything else reads `depositValue`.
pub fn to_balance_update(body: UpdateBalanceRequest) -> Result<BalanceUpdate, axum::response::Response> {
    let values = body.values.ok_or_else(|| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "values is required")
    })?;
    let remarks = values.remarks.unwrap_or_default();

    match values.kind.as_deref() {
        Some("withdraw") => {
            let amount = amount_field("withdrawVal", values.withdraw_val.as_ref())
                .map_err(errors::ledger_error)?;
            Ok(BalanceUpdate::Withdraw { amount, remarks })
        }
        Some("deposit") => {
            let kind = match values.deposit_type.as_deref() {
                Some("cheque") => DepositKind::Cheque,
                _ => DepositKind::Cash,
            };
            let amount = match kind {
                DepositKind::Cheque => amount_field("cheque_amt", values.cheque_amt.as_ref()),
                DepositKind::Cash => amount_field("depositValue", values.deposit_value.as_ref()),
            }
            .map_err(errors::ledger_error)?;

            Ok(BalanceUpdate::Deposit {
                amount,
                remarks,
                kind,
                cheque_number: values.cheque_number,
            })
        }
        _ => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "type must be one of: withdraw, deposit",
        )),
    }
}
