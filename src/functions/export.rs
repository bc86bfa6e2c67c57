use tracing::{error, info, warn};

use crate::{
    errors::RunError,
    functions::{IncompleteRun, TaxSummary},
    parsing::{incomplete_path, write_form_8949},
    structs::Transaction,
};

/* Write the form of a finished run to `path`.
A stopped run writes what it has to the incomplete file instead, and its own error is what is returned:
failing to write that file is only a warning. */
pub fn export_run(
    outcome: Result<Vec<Transaction>, IncompleteRun>,
    path: &str,
) -> Result<TaxSummary, RunError> {
    match outcome {
        Ok(transactions) => {
            write_form_8949(path, &transactions).map_err(RunError::Export)?;
            let summary = TaxSummary::from_transactions(&transactions);
            info!(path, %summary, "form 8949 written");
            Ok(summary)
        }
        Err(run) => {
            error!(error = %run.error, processed = run.processed, "fills processing failed");
            let partial = incomplete_path(path);
            match write_form_8949(&partial, &run.transactions) {
                Ok(()) => warn!(
                    path = %partial,
                    transactions = run.transactions.len(),
                    "incomplete transactions written"
                ),
                Err(e) => warn!(path = %partial, error = %e, "incomplete transactions not written"),
            }
            Err(RunError::Tax(run.error))
        }
    }
}
