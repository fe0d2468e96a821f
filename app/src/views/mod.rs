//! Application views: route registration and page rendering.
//!
//! Each handler shows a loading page synchronously, then loads its data on a
//! local task. The task checks its [`ViewGuard`](crate::router::ViewGuard)
//! before showing the result, so a superseded view never overwrites a newer
//! one. In-flight requests are not cancelled.

mod page;
mod render;

use std::cell::RefCell;
use std::future::Future;
use std::mem;
use std::rc::Rc;

use tokio::task::JoinSet;

use crate::gateway::{Chamber, LegislatorRecord, ParliamentApi, ParliamentaryGroup, VoteStats};
use crate::router::{RouteError, RouteParams, Router, Shell};

pub use page::{Page, ViewSink};
pub use render::{
    counts_line, group_block, legislator_line, profile_header, roll_call_card, roll_call_header,
    roll_call_target, truncate, vote_line, LegislatorFilter, Pager, RollCallFilter, VoteFilter,
};

use render::{found_line, profile_target, stats_line};

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::must_use_candidate)]
pub mod mock;

/// Navigation links of the page chrome.
pub const NAV_LINKS: [&str; 4] = ["#/", "#/deputes", "#/senateurs", "#/scrutins"];

const LEGISLATORS_PER_PAGE: usize = 30;
const ROLL_CALLS_PER_PAGE: usize = 20;
const VOTES_PER_PAGE: usize = 20;
const RECENT_ROLL_CALLS: usize = 5;

type Show = fn(&Views, &RouteParams);

/// Renders pages from [`ParliamentApi`] data into a [`ViewSink`].
///
/// Loads run as `spawn_local` tasks and therefore need a
/// [`tokio::task::LocalSet`].
pub struct Views {
    api: Rc<dyn ParliamentApi>,
    sink: Rc<dyn ViewSink>,
    tasks: RefCell<JoinSet<()>>,
}

/// Register the application's routes on `router`.
///
/// # Errors
/// Returns [`RouteError`] if a route pattern is malformed.
pub fn register<S: Shell>(router: &mut Router<S>, views: &Rc<Views>) -> Result<(), RouteError> {
    let routes: [(&str, Show); 8] = [
        ("/", Views::home),
        ("/deputes", |v, p| v.legislators(Chamber::Assemblee, p)),
        ("/senateurs", |v, p| v.legislators(Chamber::Senat, p)),
        ("/scrutins", Views::roll_calls),
        ("/depute/:slug", |v, p| v.profile(Chamber::Assemblee, p)),
        ("/senateur/:slug", |v, p| v.profile(Chamber::Senat, p)),
        ("/scrutin/:numero", |v, p| v.roll_call(Chamber::Assemblee, p)),
        ("/scrutin-senat/:numero", |v, p| v.roll_call(Chamber::Senat, p)),
    ];

    for (pattern, show) in routes {
        let views = Rc::clone(views);
        router.add_route(pattern, move |params| {
            show(&views, &params);
            None
        })?;
    }
    Ok(())
}

impl Views {
    pub fn new(api: Rc<dyn ParliamentApi>, sink: Rc<dyn ViewSink>) -> Self {
        Self {
            api,
            sink,
            tasks: RefCell::new(JoinSet::new()),
        }
    }

    /// Wait until every pending load has finished.
    pub async fn settle(&self) {
        loop {
            let mut pending = mem::take(&mut *self.tasks.borrow_mut());
            if pending.is_empty() {
                return;
            }
            while let Some(joined) = pending.join_next().await {
                if let Err(error) = joined {
                    tracing::error!(%error, "view task failed");
                }
            }
        }
    }

    fn mount<F>(&self, params: &RouteParams, loading: &str, load: F)
    where
        F: Future<Output = Page> + 'static,
    {
        self.sink.show(Page::loading(loading));

        let guard = params.guard();
        let sink = Rc::clone(&self.sink);
        let mut tasks = self.tasks.borrow_mut();
        while tasks.try_join_next().is_some() {}
        tasks.spawn_local(async move {
            let page = load.await;
            if guard.is_current() {
                sink.show(page);
            } else {
                tracing::debug!(title = %page.title, "discarding result of superseded view");
            }
        });
    }

    fn home(&self, params: &RouteParams) {
        let api = Rc::clone(&self.api);
        self.mount(params, "Chargement des données...", async move {
            home_page(api.as_ref()).await
        });
    }

    fn legislators(&self, chamber: Chamber, params: &RouteParams) {
        let api = Rc::clone(&self.api);
        let filter = LegislatorFilter::new(params.query("q"), params.query("groupe"));
        let pager = Pager::from_query(params.query("page"), LEGISLATORS_PER_PAGE);
        let loading = match chamber {
            Chamber::Assemblee => "Chargement des députés...",
            Chamber::Senat => "Chargement des sénateurs...",
        };
        self.mount(params, loading, async move {
            legislators_page(api.as_ref(), chamber, &filter, pager).await
        });
    }

    fn roll_calls(&self, params: &RouteParams) {
        let api = Rc::clone(&self.api);
        let chamber = match params.query("chambre") {
            Some("senat") => Chamber::Senat,
            _ => Chamber::Assemblee,
        };
        let filter = RollCallFilter::new(params.query("q"), params.query("sort"));
        let pager = Pager::from_query(params.query("page"), ROLL_CALLS_PER_PAGE);
        self.mount(params, "Chargement des scrutins...", async move {
            roll_calls_page(api.as_ref(), chamber, &filter, pager).await
        });
    }

    fn profile(&self, chamber: Chamber, params: &RouteParams) {
        let api = Rc::clone(&self.api);
        let slug = params.get("slug").unwrap_or_default().to_string();
        let filter = VoteFilter::new(params.query("q"), params.query("position"));
        let pager = Pager::from_query(params.query("page"), VOTES_PER_PAGE);
        self.mount(params, "Chargement du profil...", async move {
            profile_page(api.as_ref(), chamber, &slug, &filter, pager).await
        });
    }

    fn roll_call(&self, chamber: Chamber, params: &RouteParams) {
        let api = Rc::clone(&self.api);
        let numero = params.get("numero").unwrap_or_default().to_string();
        self.mount(params, "Chargement du scrutin...", async move {
            roll_call_page(api.as_ref(), chamber, &numero).await
        });
    }
}

const fn nouns(chamber: Chamber) -> (&'static str, &'static str, &'static str) {
    match chamber {
        Chamber::Assemblee => ("Députés en exercice", "député", "#/deputes"),
        Chamber::Senat => ("Sénateurs en exercice", "sénateur", "#/senateurs"),
    }
}

const fn listing_target(chamber: Chamber) -> &'static str {
    match chamber {
        Chamber::Assemblee => "#/scrutins",
        Chamber::Senat => "#/scrutins?chambre=senat",
    }
}

async fn home_page(api: &dyn ParliamentApi) -> Page {
    let (members, roll_calls) = futures::join!(
        async {
            futures::try_join!(
                api.list_legislators(Chamber::Assemblee),
                api.list_legislators(Chamber::Senat)
            )
        },
        api.list_roll_calls(Chamber::Assemblee)
    );

    let mut page = Page::new("Suivez les votes de vos représentants");
    match members {
        Ok((deputes, senateurs)) => {
            page.line(format!("Députés en exercice : {}", deputes.len()))
                .line(format!("Sénateurs en exercice : {}", senateurs.len()));
        }
        Err(error) => {
            tracing::warn!(%error, "member counts unavailable");
            page.line("Députés en exercice : --")
                .line("Sénateurs en exercice : --");
        }
    }

    match roll_calls {
        Ok(roll_calls) => {
            page.line(format!("Scrutins publics : {}", roll_calls.len()))
                .blank()
                .line("Derniers scrutins à l'Assemblée nationale");
            for rc in roll_calls.iter().take(RECENT_ROLL_CALLS) {
                page.lines(roll_call_card(rc));
            }
        }
        Err(error) => {
            tracing::warn!(%error, "recent roll calls unavailable");
            page.line("Scrutins publics : --")
                .blank()
                .line("Impossible de charger les scrutins récents.");
        }
    }

    page.blank().lines([
        "Assemblée nationale : #/deputes",
        "Sénat : #/senateurs",
        "Derniers scrutins : #/scrutins",
    ]);
    page
}

/// Group legend of a listing: the upstream group list when available,
/// otherwise the distinct abbreviations of the listed members.
fn group_legend(records: &[LegislatorRecord], groups: &[ParliamentaryGroup]) -> String {
    let mut names: Vec<String> = if groups.is_empty() {
        records
            .iter()
            .map(|r| r.group_abbreviation.clone())
            .filter(|g| !g.is_empty())
            .collect()
    } else {
        groups
            .iter()
            .map(|g| match (g.acronym.is_empty(), g.name.is_empty()) {
                (false, false) => format!("{} ({})", g.acronym, g.name),
                (false, true) => g.acronym.clone(),
                _ => g.name.clone(),
            })
            .collect()
    };
    names.sort_by(|a, b| pv_text::collate_fr(a, b));
    names.dedup();
    names.join(", ")
}

async fn legislators_page(
    api: &dyn ParliamentApi,
    chamber: Chamber,
    filter: &LegislatorFilter,
    pager: Pager,
) -> Page {
    let (records, groups) = match chamber {
        Chamber::Assemblee => futures::join!(api.list_legislators(chamber), api.list_groups()),
        Chamber::Senat => (api.list_legislators(chamber).await, Ok(Vec::new())),
    };
    let (title, noun, _) = nouns(chamber);

    let records = match records {
        Ok(records) => records,
        Err(error) => {
            return Page::error(
                &format!("Impossible de charger la liste des {noun}s."),
                &error,
            )
        }
    };
    let groups = groups.unwrap_or_else(|error| {
        tracing::warn!(%error, "group list unavailable");
        Vec::new()
    });

    let mut page = Page::new(title);
    let legend = group_legend(&records, &groups);
    if !legend.is_empty() {
        page.line(format!("Groupes : {legend}"));
    }

    let matching: Vec<&LegislatorRecord> = records.iter().filter(|r| filter.accepts(r)).collect();
    page.line(found_line(matching.len(), noun)).blank();

    let (shown, _) = pager.slice(&matching);
    if shown.is_empty() {
        page.line(format!("Aucun {noun} trouvé."));
    } else {
        page.lines(shown.iter().map(|record| legislator_line(record)));
    }
    page.blank().line(pager.footer(matching.len()));
    page
}

async fn roll_calls_page(
    api: &dyn ParliamentApi,
    chamber: Chamber,
    filter: &RollCallFilter,
    pager: Pager,
) -> Page {
    let roll_calls = match api.list_roll_calls(chamber).await {
        Ok(roll_calls) => roll_calls,
        Err(error) => return Page::error("Impossible de charger les scrutins.", &error),
    };

    let mut page = Page::new("Scrutins publics");
    page.line(match chamber {
        Chamber::Assemblee => "[Assemblée nationale] · Sénat : #/scrutins?chambre=senat",
        Chamber::Senat => "Assemblée nationale : #/scrutins · [Sénat]",
    });

    let matching: Vec<_> = roll_calls.iter().filter(|rc| filter.accepts(rc)).collect();
    let plural = if matching.len() > 1 { "s" } else { "" };
    page.line(format!("{} scrutin{plural}", matching.len())).blank();

    let (shown, _) = pager.slice(&matching);
    if shown.is_empty() {
        page.line("Aucun scrutin trouvé.");
    }
    for rc in shown {
        page.lines(roll_call_card(rc));
    }
    page.blank().line(pager.footer(matching.len()));
    page
}

async fn profile_page(
    api: &dyn ParliamentApi,
    chamber: Chamber,
    slug: &str,
    filter: &VoteFilter,
    pager: Pager,
) -> Page {
    let (record, votes) = match futures::try_join!(
        api.get_legislator(chamber, slug),
        api.get_votes(chamber, slug)
    ) {
        Ok(loaded) => loaded,
        Err(error) => return Page::error("Impossible de charger le profil.", &error),
    };
    let (_, noun, back) = nouns(chamber);

    let mut page = Page::new(record.full_name.clone());
    page.line(format!("← Retour aux {noun}s : {back}"))
        .lines(profile_header(&record, &api.photo_url(chamber, slug)))
        .blank()
        .line(stats_line(votes.len(), VoteStats::tally(&votes)))
        .blank()
        .line("Historique des votes");

    let matching: Vec<_> = votes.iter().filter(|v| filter.accepts(v)).collect();
    let (shown, _) = pager.slice(&matching);
    if shown.is_empty() {
        page.line("Aucun vote trouvé.");
    }
    for vote in shown {
        page.line(vote_line(chamber, vote));
    }
    page.blank().line(pager.footer(matching.len()));
    page.line(format!("Lien : {}", profile_target(chamber, slug)));
    page
}

async fn roll_call_page(api: &dyn ParliamentApi, chamber: Chamber, numero: &str) -> Page {
    let rc = match api.get_roll_call(chamber, numero).await {
        Ok(rc) => rc,
        Err(error) => return Page::error("Impossible de charger le scrutin.", &error),
    };

    let mut page = Page::new(format!("Scrutin n°{}", rc.numero));
    page.line(format!(
        "← Retour aux scrutins : {}",
        listing_target(chamber)
    ))
    .lines(roll_call_header(&rc))
    .blank()
    .line("Détail par groupe parlementaire");

    if rc.group_breakdown.is_empty() {
        page.line("Détail par groupe non disponible pour ce scrutin.");
    }
    for block in &rc.group_breakdown {
        page.lines(group_block(chamber, block));
    }
    page
}
