//! Exhaustive retrieval of one unit's history.
//!
//! Both fetchers drain the session's [`Pages`] to the end, normalize and
//! guard every item, and return the unit's records in ascending creation
//! order. An error anywhere in the stream discards everything collected for
//! the unit so far.

use futures_util::TryStreamExt;
use tracing::debug;

use crate::guard::ensure_serializable;
use crate::normalize;
use crate::record::{Archivable, AuditRecord, MessageRecord, sort_chronologically};
use crate::traits::{Channel, Community, Order, Pages, Session};
use crate::types::AuditAction;
use crate::{Error, Result};

/// Every message of `channel`, oldest first.
pub async fn fetch_messages<S>(session: &S, channel: &Channel) -> Result<Vec<MessageRecord>>
where
    S: Session + ?Sized,
{
    let pages = session.history(channel, Order::OldestFirst);
    let records = collect(pages, |raw| Ok(normalize::message(&raw))).await?;
    debug!(channel = %channel.id, records = records.len(), "Fetched channel history");
    Ok(records)
}

/// Every audit entry of `action`, oldest first.
pub async fn fetch_audit_entries<S>(
    session: &S,
    community: &Community,
    action: AuditAction,
) -> Result<Vec<AuditRecord>>
where
    S: Session + ?Sized,
{
    let pages = session.audit_log(community, action);
    let records = collect(pages, |raw| normalize::audit_entry(&raw).map_err(Error::from)).await?;
    debug!(action = %action, records = records.len(), "Fetched audit entries");
    Ok(records)
}

async fn collect<T, R, F>(mut pages: Pages<'_, T>, normalize: F) -> Result<Vec<R>>
where
    R: Archivable,
    F: Fn(T) -> Result<R>,
{
    let order = pages.order();
    let mut records = Vec::new();

    while let Some(item) = pages.try_next().await? {
        let record = normalize(item)?;
        ensure_serializable(&record)?;
        records.push(record);
    }

    // Reversing newest-first input leaves the sort below with nothing to do.
    if order == Order::NewestFirst {
        records.reverse();
    }
    sort_chronologically(&mut records);

    Ok(records)
}
