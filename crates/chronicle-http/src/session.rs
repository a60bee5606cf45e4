//! Discord REST session.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use chronicle_core::raw::{RawAuditEntry, RawMessage, RawRef};
use chronicle_core::traits::{Channel, Community, Order, Pages, Session};
use chronicle_core::types::{AuditAction, Snowflake};
use chronicle_core::error::{Error, FetchError};
use chronicle_core::Result;

use crate::client::ApiClient;
use crate::convert::{self, GuildCache, TargetResolver};
use crate::endpoints::{
    self, ApiAuditLog, ApiChannel, ApiGuild, ApiMessage, NO_QUERY, PAGE_LIMIT, channel_type,
};

/// Session over the bot REST API.
///
/// Remembers the resolved guild's roles and channels so audit log targets
/// can be named without extra requests.
#[derive(Debug)]
pub struct HttpSession {
    client: ApiClient,
    cache: RwLock<GuildCache>,
}

impl HttpSession {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: RwLock::new(GuildCache::default()),
        }
    }

    fn cache(&self) -> GuildCache {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn update_cache(&self, update: impl FnOnce(&mut GuildCache)) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut cache);
    }
}

/// Text-bearing channels, with category names resolved.
fn text_channels(all: &[ApiChannel]) -> Vec<Channel> {
    let category_name = |id: Snowflake| {
        all.iter()
            .find(|c| c.id == id && c.kind == channel_type::CATEGORY)
            .and_then(|c| c.name.clone())
    };

    let mut channels: Vec<Channel> = all
        .iter()
        .filter(|c| matches!(c.kind, channel_type::TEXT | channel_type::ANNOUNCEMENT))
        .map(|c| Channel {
            id: c.id,
            name: c.name.clone().unwrap_or_default(),
            category: c.parent_id.and_then(category_name),
            position: c.position,
        })
        .collect();
    channels.sort_by_key(|c| (c.position, c.id));
    channels
}

#[async_trait]
impl Session for HttpSession {
    #[instrument(skip(self))]
    async fn resolve_community(&self, id: Snowflake) -> Result<Option<Community>> {
        let lookup: Result<Option<ApiGuild>> = self.client.get_optional(&endpoints::guild(id), NO_QUERY).await;
        let guild = match lookup {
            Ok(guild) => guild,
            Err(Error::Fetch(FetchError::Protocol(ref protocol))) if protocol.is_missing_access() => {
                None
            }
            Err(e) => return Err(e),
        };
        let Some(guild) = guild else {
            warn!("Guild not visible to this token");
            return Ok(None);
        };

        self.update_cache(|cache| {
            cache.guild = Some(RawRef {
                id: guild.id,
                name: guild.name.clone(),
            });
            cache.add_roles(&guild.roles);
        });
        info!(name = %guild.name, roles = guild.roles.len(), "Resolved guild");

        Ok(Some(Community {
            id: guild.id,
            name: guild.name,
        }))
    }

    #[instrument(skip(self, community), fields(guild = %community.id))]
    async fn channels(&self, community: &Community) -> Result<Vec<Channel>> {
        let all: Vec<ApiChannel> = self
            .client
            .get(&endpoints::guild_channels(community.id), NO_QUERY)
            .await?;

        self.update_cache(|cache| all.iter().for_each(|c| cache.add_channel(c)));
        let channels = text_channels(&all);
        debug!(total = all.len(), text = channels.len(), "Listed channels");
        Ok(channels)
    }

    /// Pages forward from the oldest message; the order hint is ignored.
    fn history(&self, channel: &Channel, _order: Order) -> Pages<'_, RawMessage> {
        let channel_ref = RawRef {
            id: channel.id,
            name: channel.name.clone(),
        };
        let guild = self.cache().guild;
        let path = endpoints::channel_messages(channel.id);

        let stream = async_stream::stream! {
            let mut after = Snowflake::new(0);
            loop {
                let query = [("limit", PAGE_LIMIT.to_string()), ("after", after.to_string())];
                let mut page: Vec<ApiMessage> = match self.client.get(&path, &query).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                debug!(channel = %channel_ref.id, %after, count = page.len(), "Fetched message page");

                let full = page.len() >= PAGE_LIMIT;
                page.sort_by_key(|m| m.id);
                if let Some(last) = page.last() {
                    after = last.id;
                }
                for message in page {
                    yield Ok(convert::message(message, channel_ref.clone(), guild.clone()));
                }
                if !full {
                    break;
                }
            }
        };

        Pages::new(Order::OldestFirst, stream)
    }

    /// Pages backward from the newest entry.
    fn audit_log(&self, community: &Community, action: AuditAction) -> Pages<'_, RawAuditEntry> {
        let path = endpoints::audit_logs(community.id);

        let stream = async_stream::stream! {
            let mut before: Option<Snowflake> = None;
            loop {
                let mut query = vec![
                    ("action_type", action.code().to_string()),
                    ("limit", PAGE_LIMIT.to_string()),
                ];
                if let Some(before) = before {
                    query.push(("before", before.to_string()));
                }

                let page: ApiAuditLog = match self.client.get(&path, &query).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                debug!(%action, count = page.audit_log_entries.len(), "Fetched audit log page");

                let full = page.audit_log_entries.len() >= PAGE_LIMIT;
                before = page.audit_log_entries.iter().map(|e| e.id).min();

                let cache = self.cache();
                let resolver = TargetResolver::new(&page, &cache);
                let entries: Vec<RawAuditEntry> = page
                    .audit_log_entries
                    .iter()
                    .filter_map(|entry| resolver.entry(entry))
                    .collect();
                for entry in entries {
                    yield Ok(entry);
                }
                if !full || before.is_none() {
                    break;
                }
            }
        };

        Pages::new(Order::NewestFirst, stream)
    }

    async fn disconnect(&self) -> Result<()> {
        debug!("Closing HTTP session");
        Ok(())
    }
}
