use crate::domain::ComparisonResult;
use crate::error::Result;

/// Presentation seam: computation never formats or prints, reporters do.
pub trait Reporter {
    fn report(&self, result: &ComparisonResult) -> Result<()>;
}
