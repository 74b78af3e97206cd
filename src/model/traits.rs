use crate::error::RetrievalError;
use crate::model::{Agreement, Reading, RetrievalResult};
use async_trait::async_trait;

/// Types that flatten into a [`Reading`].
pub trait IntoReading {
    /// Builds the reading, leaving out absent values.
    fn to_reading(&self) -> Reading;
}

/// Source of portal readings for one account.
///
/// Implementors keep the login session between calls. Calls take `&mut self`,
/// so one source can never run two retrievals at once.
#[async_trait]
pub trait ReadingSource: Send {
    /// Fetches current meter readings and tariffs of an agreement.
    ///
    /// # Returns
    /// - `Ok(RetrievalResult)` with absent sub-sets for products the
    ///   agreement doesn't cover
    /// - `Err` on the first failing step; no partial result is returned
    async fn retrieve(&mut self, agreement_id: i64) -> Result<RetrievalResult, RetrievalError>;

    /// Lists the agreements of the account's preferred customer.
    async fn list_agreements(&mut self) -> Result<Vec<Agreement>, RetrievalError>;
}
