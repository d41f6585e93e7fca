// callforward-core/src/input.rs
use crate::operations::OperationError;
use serde::Deserialize;
use std::path::Path;

/// One row of the input list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    #[serde(rename = "Email")]
    pub email: String,
    /// Expected in E.164 but never validated here
    #[serde(rename = "ForwardingNumber", default)]
    pub forwarding_number: String,
}

/// Read `Email,ForwardingNumber` rows in file order. Duplicates are kept.
pub fn read_inputs(path: &Path) -> Result<Vec<UserInput>, OperationError> {
    if !path.is_file() {
        return Err(OperationError::InputMissing {
            path: path.to_path_buf(),
        });
    }

    let read_error = |source| OperationError::InputRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    reader
        .deserialize()
        .collect::<Result<Vec<UserInput>, csv::Error>>()
        .map_err(read_error)
}
