use thiserror::Error;

use crate::traits::NotificationStoreError;

#[derive(Debug, Error)]
pub enum NotificationApiError {
    #[error("Notification store error: {0}")]
    StoreError(#[from] NotificationStoreError),
}
