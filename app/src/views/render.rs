//! Text fragments shared by the views, plus list filtering and paging.

use pv_text::{fold, format_date_fr};

use crate::gateway::{
    Chamber, GroupVoteBlock, LegislatorRecord, Outcome, Position, RollCall, VoteCounts,
    VoteRecord, VoteStats,
};

pub const ROLL_CALL_TITLE_MAX: usize = 200;
pub const VOTE_TITLE_MAX: usize = 150;

/// At most `max` characters of `text`, with `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Navigation target of a roll-call detail.
#[must_use]
pub fn roll_call_target(chamber: Chamber, numero: &str) -> String {
    match chamber {
        Chamber::Assemblee => format!("#/scrutin/{numero}"),
        Chamber::Senat => format!("#/scrutin-senat/{numero}"),
    }
}

#[must_use]
pub fn profile_target(chamber: Chamber, slug: &str) -> String {
    format!("#/{}/{slug}", chamber.member_key())
}

fn roll_call_title(titre: &str, numero: &str) -> String {
    if titre.is_empty() {
        format!("Scrutin n°{numero}")
    } else {
        titre.to_string()
    }
}

/// `Pour : 300 (71.4 %) · Contre : 100 (23.8 %) · Abstentions : 20 (4.8 %)`
#[must_use]
pub fn counts_line(counts: VoteCounts) -> String {
    let shares = counts.shares();
    format!(
        "Pour : {} ({:.1} %) · Contre : {} ({:.1} %) · Abstentions : {} ({:.1} %)",
        counts.pour,
        shares.pour,
        counts.contre,
        shares.contre,
        counts.abstention,
        shares.abstention
    )
}

/// Summary card of one roll call in a listing.
#[must_use]
pub fn roll_call_card(rc: &RollCall) -> Vec<String> {
    vec![
        truncate(&roll_call_title(&rc.titre, &rc.numero), ROLL_CALL_TITLE_MAX),
        format!(
            "  {} · {} · {}",
            format_date_fr(&rc.date),
            rc.sort.label(),
            roll_call_target(rc.chamber, &rc.numero)
        ),
        format!("  {}", counts_line(rc.counts)),
    ]
}

/// Header of a roll-call detail page.
#[must_use]
pub fn roll_call_header(rc: &RollCall) -> Vec<String> {
    vec![
        roll_call_title(&rc.titre, &rc.numero),
        format!(
            "Date : {} · Scrutin n°{} · {}",
            format_date_fr(&rc.date),
            rc.numero,
            rc.sort.label()
        ),
        counts_line(rc.counts),
    ]
}

/// One group's split, followed by its members.
#[must_use]
pub fn group_block(chamber: Chamber, block: &GroupVoteBlock) -> Vec<String> {
    let name = if block.group_name.is_empty() {
        "Groupe inconnu"
    } else {
        &block.group_name
    };
    let counts = block.counts();
    let mut lines = vec![format!(
        "{name} : {} pour, {} contre, {} abstention(s)",
        counts.pour, counts.contre, counts.abstention
    )];

    let positions = [
        (&block.for_list, Position::For),
        (&block.against_list, Position::Against),
        (&block.abstain_list, Position::Abstain),
    ];
    for (members, position) in positions {
        for member in members {
            let display = if member.display_name.is_empty() {
                "Inconnu"
            } else {
                &member.display_name
            };
            lines.push(format!(
                "  - {display} ({}) {}",
                position.label(),
                profile_target(chamber, &member.slug)
            ));
        }
    }
    lines
}

/// Listing line of one legislator.
#[must_use]
pub fn legislator_line(record: &LegislatorRecord) -> String {
    let mut line = record.full_name.clone();
    if !record.group_abbreviation.is_empty() {
        line.push_str(&format!(" ({})", record.group_abbreviation));
    }
    if !record.district.is_empty() {
        line.push_str(&format!(" · {}", record.district));
    }
    line.push_str(&format!(
        " · {}",
        profile_target(record.chamber, &record.slug)
    ));
    line
}

/// Identity block of a profile page, below the name.
#[must_use]
pub fn profile_header(record: &LegislatorRecord, photo_url: &str) -> Vec<String> {
    let group = if record.group_abbreviation.is_empty() {
        "Groupe non renseigné"
    } else {
        &record.group_abbreviation
    };

    let mut lines = vec![group.to_string()];
    let mut district = record.district.clone();
    if !record.district_number.is_empty() {
        district.push_str(&format!(" ({}e circ.)", record.district_number));
    }
    if !district.is_empty() {
        lines.push(district);
    }
    if !record.profession.is_empty() {
        lines.push(record.profession.clone());
    }
    if !record.birth_date.is_empty() {
        lines.push(format!("Né(e) le {}", format_date_fr(&record.birth_date)));
    }
    lines.push(format!("Photo : {photo_url}"));
    lines
}

#[must_use]
pub fn stats_line(total: usize, stats: VoteStats) -> String {
    format!(
        "Votes enregistrés : {total} · Pour : {} · Contre : {} · Abstentions : {} · Absent : {}",
        stats.for_count, stats.against, stats.abstain, stats.absent
    )
}

/// One entry of a vote history.
#[must_use]
pub fn vote_line(chamber: Chamber, vote: &VoteRecord) -> String {
    format!(
        "{} · {} · {} · {}",
        truncate(
            &roll_call_title(&vote.title, &vote.scrutin_number),
            VOTE_TITLE_MAX
        ),
        format_date_fr(&vote.date),
        vote.position.label(),
        roll_call_target(chamber, &vote.scrutin_number)
    )
}

/// `"1 député trouvé"` / `"12 députés trouvés"`.
#[must_use]
pub fn found_line(count: usize, noun: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {noun}{plural} trouvé{plural}")
}

fn matches_query(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.iter().any(|field| fold(field).contains(query))
}

/// Name and group filter of the legislator listings (`?q=` and `?groupe=`).
#[derive(Debug, Clone, Default)]
pub struct LegislatorFilter {
    query: String,
    group: String,
}

impl LegislatorFilter {
    #[must_use]
    pub fn new(query: Option<&str>, group: Option<&str>) -> Self {
        Self {
            query: fold(query.unwrap_or_default().trim()),
            group: group.unwrap_or_default().trim().to_string(),
        }
    }

    #[must_use]
    pub fn accepts(&self, record: &LegislatorRecord) -> bool {
        matches_query(
            &self.query,
            &[
                record.full_name.as_str(),
                record.family_name.as_str(),
                record.given_name.as_str(),
            ],
        ) && (self.group.is_empty() || record.group_abbreviation == self.group)
    }
}

/// Title and outcome filter of the roll-call listing (`?q=` and `?sort=`).
#[derive(Debug, Clone, Default)]
pub struct RollCallFilter {
    query: String,
    outcome: Option<Outcome>,
}

impl RollCallFilter {
    #[must_use]
    pub fn new(query: Option<&str>, outcome: Option<&str>) -> Self {
        let outcome = match outcome.map(fold).as_deref() {
            Some("adopte") => Some(Outcome::Adopted),
            Some("rejete") => Some(Outcome::Rejected),
            _ => None,
        };
        Self {
            query: fold(query.unwrap_or_default().trim()),
            outcome,
        }
    }

    #[must_use]
    pub fn accepts(&self, rc: &RollCall) -> bool {
        matches_query(&self.query, &[rc.titre.as_str()])
            && self.outcome.is_none_or(|o| rc.sort == o)
    }
}

/// Title and position filter of a vote history (`?q=` and `?position=`).
#[derive(Debug, Clone, Default)]
pub struct VoteFilter {
    query: String,
    position: Option<Position>,
}

impl VoteFilter {
    #[must_use]
    pub fn new(query: Option<&str>, position: Option<&str>) -> Self {
        let position = position
            .filter(|p| !p.trim().is_empty())
            .map(Position::classify);
        Self {
            query: fold(query.unwrap_or_default().trim()),
            position,
        }
    }

    #[must_use]
    pub fn accepts(&self, vote: &VoteRecord) -> bool {
        matches_query(&self.query, &[vote.title.as_str()])
            && self.position.is_none_or(|p| vote.position == p)
    }
}

/// One page of a list; `page` is 1-based and clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub per_page: usize,
}

impl Pager {
    /// Pager from a `?page=` value; anything unparseable is page 1.
    #[must_use]
    pub fn from_query(page: Option<&str>, per_page: usize) -> Self {
        Self {
            page: page.and_then(|p| p.trim().parse().ok()).unwrap_or(1),
            per_page: per_page.max(1),
        }
    }

    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page).max(1)
    }

    /// The requested slice and the 1-based page actually shown.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> (&'a [T], usize) {
        let page = self.page.clamp(1, self.total_pages(items.len()));
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(items.len());
        (&items[start.min(end)..end], page)
    }

    #[must_use]
    pub fn footer(&self, len: usize) -> String {
        let page = self.page.clamp(1, self.total_pages(len));
        format!("Page {page} / {}", self.total_pages(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MemberRef, SourceTag};

    fn legislator(given: &str, family: &str, group: &str) -> LegislatorRecord {
        LegislatorRecord {
            chamber: Chamber::Assemblee,
            full_name: format!("{given} {family}"),
            family_name: family.into(),
            given_name: given.into(),
            slug: pv_text::slugify(&format!("{given} {family}")),
            group_abbreviation: group.into(),
            district: "Paris".into(),
            district_number: "3".into(),
            sex: String::new(),
            birth_date: String::new(),
            profession: String::new(),
            source: SourceTag::OpenData,
        }
    }

    fn roll_call(titre: &str, sort: Outcome) -> RollCall {
        RollCall {
            chamber: Chamber::Assemblee,
            numero: "42".into(),
            titre: titre.into(),
            date: "2024-03-05".into(),
            sort,
            raw_sort: String::new(),
            counts: VoteCounts {
                pour: 300,
                contre: 100,
                abstention: 20,
            },
            group_breakdown: Vec::new(),
        }
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("éèàù", 2), "éè...");
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_roll_call_card() {
        let card = roll_call_card(&roll_call("la motion", Outcome::Adopted));
        assert_eq!(card[0], "la motion");
        assert_eq!(card[1], "  5 mars 2024 · Adopté · #/scrutin/42");
        assert_eq!(
            card[2],
            "  Pour : 300 (71.4 %) · Contre : 100 (23.8 %) · Abstentions : 20 (4.8 %)"
        );
    }

    #[test]
    fn test_untitled_roll_call_uses_number() {
        let mut rc = roll_call("", Outcome::Rejected);
        rc.chamber = Chamber::Senat;
        let card = roll_call_card(&rc);
        assert_eq!(card[0], "Scrutin n°42");
        assert!(card[1].ends_with("#/scrutin-senat/42"));
    }

    #[test]
    fn test_zero_counts_render_zero_shares() {
        assert_eq!(
            counts_line(VoteCounts::default()),
            "Pour : 0 (0.0 %) · Contre : 0 (0.0 %) · Abstentions : 0 (0.0 %)"
        );
    }

    #[test]
    fn test_group_block_lists_members() {
        let block = GroupVoteBlock {
            group_name: String::new(),
            for_list: vec![MemberRef {
                slug: "a-one".into(),
                display_name: "A One".into(),
            }],
            against_list: vec![MemberRef {
                slug: String::new(),
                display_name: String::new(),
            }],
            abstain_list: Vec::new(),
        };
        let lines = group_block(Chamber::Assemblee, &block);
        assert_eq!(lines[0], "Groupe inconnu : 1 pour, 1 contre, 0 abstention(s)");
        assert_eq!(lines[1], "  - A One (Pour) #/depute/a-one");
        assert_eq!(lines[2], "  - Inconnu (Contre) #/depute/");
    }

    #[test]
    fn test_legislator_line() {
        let record = legislator("Marie", "Dupont", "RE");
        assert_eq!(
            legislator_line(&record),
            "Marie Dupont (RE) · Paris · #/depute/marie-dupont"
        );
    }

    #[test]
    fn test_legislator_filter_folds_accents() {
        let record = legislator("Hélène", "Müller", "LR");
        assert!(LegislatorFilter::new(Some("helene"), None).accepts(&record));
        assert!(LegislatorFilter::new(Some(" MULLER "), Some("LR")).accepts(&record));
        assert!(!LegislatorFilter::new(None, Some("RE")).accepts(&record));
        assert!(LegislatorFilter::default().accepts(&record));
    }

    #[test]
    fn test_roll_call_filter() {
        let adopted = roll_call("l'ensemble du projet de loi", Outcome::Adopted);
        assert!(RollCallFilter::new(Some("projet"), Some("adopté")).accepts(&adopted));
        assert!(!RollCallFilter::new(None, Some("rejete")).accepts(&adopted));
        assert!(RollCallFilter::new(None, Some("autre")).accepts(&adopted));
    }

    #[test]
    fn test_vote_filter() {
        let vote = VoteRecord {
            scrutin_number: "7".into(),
            title: "l'amendement n° 12".into(),
            date: String::new(),
            position: Position::Against,
        };
        assert!(VoteFilter::new(Some("amendement"), Some("contre")).accepts(&vote));
        assert!(!VoteFilter::new(None, Some("pour")).accepts(&vote));
        assert!(VoteFilter::new(None, Some("")).accepts(&vote));
    }

    #[test]
    fn test_pager_clamps() {
        let items: Vec<u32> = (0..65).collect();
        let pager = Pager::from_query(Some("3"), 30);
        let (slice, page) = pager.slice(&items);
        assert_eq!(page, 3);
        assert_eq!(slice, &items[60..65]);
        assert_eq!(pager.footer(items.len()), "Page 3 / 3");

        let (slice, page) = Pager::from_query(Some("99"), 30).slice(&items);
        assert_eq!(page, 3);
        assert_eq!(slice.len(), 5);

        let (slice, page) = Pager::from_query(Some("zero"), 30).slice(&items);
        assert_eq!(page, 1);
        assert_eq!(slice.len(), 30);

        let empty: Vec<u32> = Vec::new();
        let (slice, page) = Pager::from_query(None, 30).slice(&empty);
        assert!(slice.is_empty());
        assert_eq!(page, 1);
    }

    #[test]
    fn test_found_line() {
        assert_eq!(found_line(0, "député"), "0 député trouvé");
        assert_eq!(found_line(1, "député"), "1 député trouvé");
        assert_eq!(found_line(12, "sénateur"), "12 sénateurs trouvés");
    }
}
