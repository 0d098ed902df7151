//! Secondary write target for saved app collections.

use crate::store::app_store::AppCollection;
use log::debug;

/// Best-effort copy of each saved collection to a second destination.
///
/// Runs after the primary write succeeded; failures are logged by the caller
/// and never undo the primary write.
pub trait MirrorHook {
    fn mirror(&self, collection: &AppCollection) -> Result<(), String>;
}

/// Placeholder destination that only records the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyMirror;

impl MirrorHook for LogOnlyMirror {
    fn mirror(&self, collection: &AppCollection) -> Result<(), String> {
        debug!(
            "event=app_store_mirror module=store status=skipped reason=no_endpoint apps={}",
            collection.apps.len()
        );
        Ok(())
    }
}
