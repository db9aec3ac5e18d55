use tracing::info;

use crate::error::ClientError;
use crate::ledger::{Registration, VoteLedger};

/// One-shot registration of the ballot program with the execution
/// environment: creates the `seal_ballot` computation definition under
/// the program's fixed identifier. Running it again is a no-op; the
/// resulting address is logged either way.
pub async fn ensure_registered(ledger: &dyn VoteLedger) -> Result<Registration, ClientError> {
    let registration = ledger.register().await?;
    if registration.newly_created {
        info!(program = %registration.program, "ballot program registered");
    } else {
        info!(program = %registration.program, "ballot program already registered, nothing to do");
    }
    Ok(registration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let ledger = InMemoryLedger::new();

        let first = ensure_registered(&ledger).await.unwrap();
        let second = ensure_registered(&ledger).await.unwrap();

        assert!(first.newly_created);
        assert!(!second.newly_created);
        assert_eq!(first.program, second.program);
    }
}
