//! Outcome descriptor for write operations.

use serde::{Deserialize, Serialize};

/// Records whether a write ran, whether the store acknowledged it, and how many
/// records were expected vs. actually affected.
///
/// # Success
/// A result is successful when the write was deliberately skipped, or when it
/// was acknowledged and touched exactly the expected (non-zero) number of
/// records. A skipped no-op update therefore reports success even though
/// nothing changed; callers must not read `success` as "a record was modified".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub transaction_run: bool,
    pub is_acknowledged: bool,
    pub expected_record_count: u64,
    pub actual_record_count: u64,
}

impl TransactionResult {
    /// A write that was skipped without contacting the store.
    pub fn not_run() -> Self {
        Self::default()
    }

    /// An acknowledged write.
    pub fn acknowledged(expected_record_count: u64, actual_record_count: u64) -> Self {
        Self {
            transaction_run: true,
            is_acknowledged: true,
            expected_record_count,
            actual_record_count,
        }
    }

    pub fn success(&self) -> bool {
        !self.transaction_run
            || (self.is_acknowledged
                && self.actual_record_count > 0
                && self.expected_record_count == self.actual_record_count)
    }
}

/// Wire shape of a transaction result, including the derived `success` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResultView {
    #[serde(flatten)]
    pub result: TransactionResult,
    pub success: bool,
}

impl From<TransactionResult> for TransactionResultView {
    fn from(result: TransactionResult) -> Self {
        Self {
            success: result.success(),
            result,
        }
    }
}
