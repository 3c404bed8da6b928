use crate::banks;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::Vault;
use chrono::{DateTime, Utc};

/// Result of a bank migration pass.
#[derive(Debug, Default)]
pub struct MigrateReport {
    pub banks_touched: usize,
    pub pairs_backfilled: usize,
    pub messages: Vec<CmdMessage>,
}

/// Backfill missing question ids and `last_seen` timestamps across every
/// bank in the vault. Safe to run any number of times: populated fields
/// are never rewritten, and a second run finds nothing to do.
///
/// Unreadable banks are reported and skipped: they are the garbage
/// collector's to remove, not this pass's to destroy.
pub fn run<V: Vault>(vault: &mut V, now: DateTime<Utc>) -> Result<MigrateReport> {
    let mut report = MigrateReport::default();
    for path in banks::bank_paths(vault)? {
        let content = vault.read(&path)?;
        let mut bank = match banks::parse_bank(&path, &content) {
            Ok(bank) => bank,
            Err(err) => {
                report
                    .messages
                    .push(CmdMessage::warning(format!("Skipping {}: {}", path, err)));
                continue;
            }
        };
        let backfilled = banks::migrate_bank(&mut bank, now);
        if backfilled > 0 {
            banks::save_bank(vault, &bank)?;
            report.banks_touched += 1;
            report.pairs_backfilled += backfilled;
        }
    }
    Ok(report)
}
