use std::fmt::Display;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::delete_object::DeleteObjectError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;

pub type PurgeResult<T> = Result<T, PurgeError>;

#[derive(Debug)]
pub enum PurgeError {
    /// The page request itself failed
    ListingFailure(String),
    /// A delete in the current page failed, (key, detail)
    DeletionFailure(String, String),
    InfrastructureError(String),
}

impl PurgeError {
    pub fn deletion(key: &str, err: SdkError<DeleteObjectError>) -> Self {
        PurgeError::DeletionFailure(key.to_string(), format!("{}", DisplayErrorContext(err)))
    }
}

impl Display for PurgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListingFailure(ref msg) => write!(f, "Failed to list objects: {}", msg),
            Self::DeletionFailure(ref key, ref msg) => {
                write!(f, "Failed to delete {}: {}", key, msg)
            }
            Self::InfrastructureError(ref msg) => write!(f, "InfrastructureErr: {}", msg),
        }
    }
}

impl std::error::Error for PurgeError {}

impl From<SdkError<ListObjectsV2Error>> for PurgeError {
    fn from(value: SdkError<ListObjectsV2Error>) -> Self {
        PurgeError::ListingFailure(format!("{}", DisplayErrorContext(value)))
    }
}

impl From<std::io::Error> for PurgeError {
    fn from(value: std::io::Error) -> Self {
        PurgeError::InfrastructureError(format!("IO Error: {}", value))
    }
}
