use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Amount;
use crate::account::{AccountKind, Payee};
use crate::engine::AccountSummary;
use crate::model::{Operation, Slot, Target};

/// Errors that can occur when reading csv input
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation type '{op_type}'")]
    UnrecognizedType { line: usize, op_type: String },

    #[error("line {line}: {op_type} missing {field}")]
    MissingField {
        line: usize,
        op_type: String,
        field: &'static str,
    },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    user: String,
    secret: String,
    account: Option<String>,
    amount: Option<f64>,
    payee: Option<String>,
    sort_code: Option<String>,
    payee_account: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    user: String,
    account: Slot,
    r#type: String,
    status: String,
    balance: String,
    overdraft: String,
    payees: usize,
}

impl InputRow {
    fn into_operation(self, line: usize) -> Result<Operation, CsvError> {
        let op_type = self.r#type.as_str();

        if op_type == "open" {
            let kind = match self.account.as_deref() {
                None => AccountKind::default(),
                Some(name) => AccountKind::from_name(name).ok_or_else(|| {
                    CsvError::InvalidField {
                        line,
                        field: "account",
                        value: name.to_string(),
                    }
                })?,
            };
            return Ok(Operation::Open {
                user: self.user,
                secret: self.secret,
                kind,
            });
        }

        let missing = |field| CsvError::MissingField {
            line,
            op_type: op_type.to_string(),
            field,
        };

        let slot_field = self.account.as_deref().ok_or_else(|| missing("account"))?;
        let slot = slot_field
            .parse::<Slot>()
            .map_err(|_| CsvError::InvalidField {
                line,
                field: "account",
                value: slot_field.to_string(),
            })?;

        let amount = self
            .amount
            .map(|value| {
                Amount::try_from_float(value).ok_or_else(|| CsvError::InvalidField {
                    line,
                    field: "amount",
                    value: value.to_string(),
                })
            })
            .transpose()?;
        let target = Target::new(self.user.as_str(), self.secret.as_str(), slot);

        match op_type {
            "deposit" => Ok(Operation::Deposit {
                target,
                amount: amount.ok_or_else(|| missing("amount"))?,
            }),
            "withdraw" => Ok(Operation::Withdraw {
                target,
                amount: amount.ok_or_else(|| missing("amount"))?,
            }),
            "payee" => {
                let name = self.payee.ok_or_else(|| missing("payee"))?;
                let sort_code = self.sort_code.ok_or_else(|| missing("sort_code"))?;
                let account_number = self
                    .payee_account
                    .ok_or_else(|| missing("payee_account"))?;
                Ok(Operation::RegisterPayee {
                    target,
                    payee: Payee::new(sort_code, account_number, name),
                })
            }
            "payment" => Ok(Operation::Payment {
                target,
                payee: self.payee.ok_or_else(|| missing("payee"))?,
                amount: amount.ok_or_else(|| missing("amount"))?,
            }),
            "interest" => Ok(Operation::Interest { target }),
            "close" => Ok(Operation::Close { target }),
            "reactivate" => Ok(Operation::Reactivate { target }),
            other => Err(CsvError::UnrecognizedType {
                line,
                op_type: other.to_string(),
            }),
        }
    }
}

/// Read operations from a csv file
///
/// The returned iterator owns the reader and does not borrow `path`.
pub fn read_operations(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Operation, CsvError>> + use<>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_operation(line)
        }))
}

/// Write account summaries in csv format
pub fn write_accounts<W: io::Write>(
    writer: W,
    accounts: impl IntoIterator<Item = AccountSummary>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for summary in accounts {
        let row = OutputRow {
            user: summary.user,
            account: summary.slot,
            r#type: summary.kind.to_string(),
            status: summary.status.to_string(),
            balance: summary.balance.to_string(),
            overdraft: summary.overdraft.to_string(),
            payees: summary.payees,
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
