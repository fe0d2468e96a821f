//! Parliament data gateway.
//!
//! Maps each logical resource to its upstream URL, resolves it through the
//! [`NetworkResolver`], and normalizes the payload into the uniform records of
//! [`super::types`].

use std::rc::Rc;

use async_trait::async_trait;
use pv_text::collate_fr;
use serde_json::Value;

use super::adapters::{LegislatorAdapter, NosParlementairesAdapter, OpenDataAdapter};
use super::classify::OutcomeClassifier;
use super::normalize::{list, parliamentary_group, roll_call, vote_record};
use super::types::{Chamber, LegislatorRecord, ParliamentaryGroup, RollCall, VoteRecord};
use crate::cache::ResponseCache;
use crate::config::{Config, UpstreamConfig};
use crate::net::{ApiError, Fetch, FetchPolicy, HttpFetcher, NetworkResolver, ProxyRewriter};

/// Read-only access to parliamentary data.
///
/// Use [`Gateway`] for real upstream access, or
/// [`super::mock::MockParliamentApi`] in tests.
#[async_trait(?Send)]
pub trait ParliamentApi {
    /// All sitting members of `chamber`, sorted by family name (French collation).
    async fn list_legislators(&self, chamber: Chamber)
        -> Result<Vec<LegislatorRecord>, ApiError>;

    /// Full detail for one legislator.
    async fn get_legislator(
        &self,
        chamber: Chamber,
        slug: &str,
    ) -> Result<LegislatorRecord, ApiError>;

    /// A legislator's vote history, in upstream order.
    async fn get_votes(&self, chamber: Chamber, slug: &str) -> Result<Vec<VoteRecord>, ApiError>;

    /// Roll calls of `chamber` in summary form (no group breakdown).
    async fn list_roll_calls(&self, chamber: Chamber) -> Result<Vec<RollCall>, ApiError>;

    /// One roll call with its group breakdown when the source provides it.
    async fn get_roll_call(&self, chamber: Chamber, numero: &str) -> Result<RollCall, ApiError>;

    /// Parliamentary groups of the lower chamber.
    async fn list_groups(&self) -> Result<Vec<ParliamentaryGroup>, ApiError>;

    /// Photo URL for a legislator. Consumers hide the image if it fails to load.
    fn photo_url(&self, chamber: Chamber, slug: &str) -> String;
}

/// Upstream-backed [`ParliamentApi`].
///
/// Owns the [`ResponseCache`] and shares it with its resolver.
pub struct Gateway {
    resolver: NetworkResolver,
    cache: Rc<ResponseCache>,
    upstream: UpstreamConfig,
    outcomes: OutcomeClassifier,
}

impl Gateway {
    /// Gateway over real HTTP.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_fetcher(config, HttpFetcher::new())
    }

    /// Gateway over a custom fetch primitive.
    pub fn with_fetcher(config: &Config, fetcher: impl Fetch + 'static) -> Self {
        let cache = Rc::new(ResponseCache::new(config.cache.ttl()));
        let proxies = config
            .proxies
            .iter()
            .map(ProxyRewriter::from_template)
            .collect();

        Self {
            resolver: NetworkResolver::new(fetcher, proxies, Rc::clone(&cache)),
            cache,
            upstream: config.upstream.clone(),
            outcomes: OutcomeClassifier::new(&config.outcome.adopted_spellings),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn host(&self, chamber: Chamber) -> &str {
        match chamber {
            Chamber::Assemblee => &self.upstream.deputes_base,
            Chamber::Senat => &self.upstream.senateurs_base,
        }
    }

    fn listing_page_url(&self, chamber: Chamber, offset: usize) -> String {
        format!(
            "{}/{}/records?limit={}&offset={}&where=code_type_elu%3D%22{}%22&order_by=nom",
            self.upstream.opendata_base,
            self.upstream.opendata_dataset,
            self.upstream.page_size,
            offset,
            chamber.type_code()
        )
    }

    fn roll_calls_url(&self, chamber: Chamber) -> String {
        match chamber {
            Chamber::Assemblee => format!(
                "{}/{}/scrutins/json",
                self.upstream.deputes_base, self.upstream.legislature
            ),
            Chamber::Senat => format!("{}/scrutins/json", self.upstream.senateurs_base),
        }
    }

    fn roll_call_url(&self, chamber: Chamber, numero: &str) -> String {
        match chamber {
            Chamber::Assemblee => format!(
                "{}/{}/scrutin/{numero}/json",
                self.upstream.deputes_base, self.upstream.legislature
            ),
            Chamber::Senat => format!("{}/scrutin/{numero}/json", self.upstream.senateurs_base),
        }
    }

    /// Raw register records of `chamber`, every page concatenated in arrival
    /// order.
    ///
    /// Pages are requested until one holds fewer than `page_size` records. Any
    /// page failure fails the whole listing.
    pub(crate) async fn fetch_listing(&self, chamber: Chamber) -> Result<Vec<Value>, ApiError> {
        let page_size = self.upstream.page_size;
        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            let url = self.listing_page_url(chamber, offset);
            let page = self
                .resolver
                .resolve_with(&url, FetchPolicy::DirectOnly)
                .await?;
            let results = list(&page, "results");
            records.extend(results.iter().cloned());

            if results.len() < page_size {
                break;
            }
            offset += page_size;
        }

        tracing::debug!(?chamber, records = records.len(), "listing fetched");
        Ok(records)
    }
}

#[async_trait(?Send)]
impl ParliamentApi for Gateway {
    async fn list_legislators(
        &self,
        chamber: Chamber,
    ) -> Result<Vec<LegislatorRecord>, ApiError> {
        let adapter = OpenDataAdapter { chamber };
        let mut legislators: Vec<LegislatorRecord> = self
            .fetch_listing(chamber)
            .await?
            .iter()
            .map(|raw| adapter.to_record(raw))
            .collect();

        legislators.sort_by(|a, b| collate_fr(&a.family_name, &b.family_name));
        Ok(legislators)
    }

    async fn get_legislator(
        &self,
        chamber: Chamber,
        slug: &str,
    ) -> Result<LegislatorRecord, ApiError> {
        let url = format!("{}/{slug}/json", self.host(chamber));
        let payload = self.resolver.resolve(&url).await?;

        let mut record = NosParlementairesAdapter { chamber }.to_record(&payload);
        if record.slug.is_empty() {
            record.slug = slug.to_string();
        }
        Ok(record)
    }

    async fn get_votes(&self, chamber: Chamber, slug: &str) -> Result<Vec<VoteRecord>, ApiError> {
        let url = format!("{}/{slug}/votes/json", self.host(chamber));
        let payload = self.resolver.resolve(&url).await?;
        Ok(list(&payload, "votes").iter().map(vote_record).collect())
    }

    async fn list_roll_calls(&self, chamber: Chamber) -> Result<Vec<RollCall>, ApiError> {
        let payload = self.resolver.resolve(&self.roll_calls_url(chamber)).await?;
        Ok(list(&payload, "scrutins")
            .iter()
            .map(|raw| roll_call(chamber, raw, &self.outcomes, false))
            .collect())
    }

    async fn get_roll_call(&self, chamber: Chamber, numero: &str) -> Result<RollCall, ApiError> {
        let payload = self
            .resolver
            .resolve(&self.roll_call_url(chamber, numero))
            .await?;

        let mut detail = roll_call(chamber, &payload, &self.outcomes, true);
        if detail.numero.is_empty() {
            detail.numero = numero.to_string();
        }
        Ok(detail)
    }

    async fn list_groups(&self) -> Result<Vec<ParliamentaryGroup>, ApiError> {
        let url = format!("{}/organismes/groupe/json", self.upstream.deputes_base);
        let payload = self.resolver.resolve(&url).await?;
        Ok(list(&payload, "organismes")
            .iter()
            .map(parliamentary_group)
            .collect())
    }

    fn photo_url(&self, chamber: Chamber, slug: &str) -> String {
        format!(
            "{}/{}/photo/{slug}/100",
            self.host(chamber),
            chamber.member_key()
        )
    }
}
