//! Uniform records produced by the gateway, whatever the upstream source.

use serde::{Deserialize, Serialize};

/// Legislative chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    /// Assemblée nationale (deputies).
    Assemblee,
    /// Sénat (senators).
    Senat,
}

impl Chamber {
    /// Elected-official type code in the open-data register.
    #[must_use]
    pub const fn type_code(self) -> &'static str {
        match self {
            Self::Assemblee => "D",
            Self::Senat => "S",
        }
    }

    /// Singular member noun, also the envelope key and photo path segment.
    #[must_use]
    pub const fn member_key(self) -> &'static str {
        match self {
            Self::Assemblee => "depute",
            Self::Senat => "senateur",
        }
    }

    #[must_use]
    pub const fn source(self) -> SourceTag {
        match self {
            Self::Assemblee => SourceTag::NosDeputes,
            Self::Senat => SourceTag::NosSenateurs,
        }
    }
}

/// Which upstream provider a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    OpenData,
    NosDeputes,
    NosSenateurs,
}

/// A deputy or senator.
///
/// Absent upstream fields are empty strings. `slug` is always populated when
/// the source supplies a slug or a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislatorRecord {
    pub chamber: Chamber,
    pub full_name: String,
    pub family_name: String,
    pub given_name: String,
    pub slug: String,
    pub group_abbreviation: String,
    pub district: String,
    pub district_number: String,
    pub sex: String,
    pub birth_date: String,
    pub profession: String,
    pub source: SourceTag,
}

/// How a legislator voted on one roll call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    For,
    Against,
    Abstain,
    /// Absent, non-voting, or a position string we do not recognise.
    Absent,
}

/// One entry of a legislator's vote history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub scrutin_number: String,
    pub title: String,
    pub date: String,
    pub position: Position,
}

/// Tally of a legislator's positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteStats {
    pub for_count: usize,
    pub against: usize,
    pub abstain: usize,
    pub absent: usize,
}

impl VoteStats {
    #[must_use]
    pub fn tally(votes: &[VoteRecord]) -> Self {
        votes.iter().fold(Self::default(), |mut stats, vote| {
            match vote.position {
                Position::For => stats.for_count += 1,
                Position::Against => stats.against += 1,
                Position::Abstain => stats.abstain += 1,
                Position::Absent => stats.absent += 1,
            }
            stats
        })
    }
}

/// Roll-call outcome. There is no third category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Adopted,
    Rejected,
}

/// Expressed votes on a roll call. Absences are not counted, so the total is
/// usually below the chamber's membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub pour: u32,
    pub contre: u32,
    pub abstention: u32,
}

/// Percentages of a [`VoteCounts`], for display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoteShares {
    pub pour: f64,
    pub contre: f64,
    pub abstention: f64,
}

impl VoteCounts {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.pour.saturating_add(self.contre).saturating_add(self.abstention)
    }

    /// Share of each position in percent. A zero total is replaced by 1.
    #[must_use]
    pub fn shares(&self) -> VoteShares {
        let denominator = f64::from(self.total().max(1));
        VoteShares {
            pour: f64::from(self.pour) / denominator * 100.0,
            contre: f64::from(self.contre) / denominator * 100.0,
            abstention: f64::from(self.abstention) / denominator * 100.0,
        }
    }
}

/// A member named in a group breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub slug: String,
    pub display_name: String,
}

/// How one parliamentary group split on a roll call.
///
/// A member appears in at most one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVoteBlock {
    pub group_name: String,
    pub for_list: Vec<MemberRef>,
    pub against_list: Vec<MemberRef>,
    pub abstain_list: Vec<MemberRef>,
}

impl GroupVoteBlock {
    #[must_use]
    pub fn counts(&self) -> VoteCounts {
        let len = |list: &[MemberRef]| u32::try_from(list.len()).unwrap_or(u32::MAX);
        VoteCounts {
            pour: len(&self.for_list),
            contre: len(&self.against_list),
            abstention: len(&self.abstain_list),
        }
    }
}

/// A recorded vote event (scrutin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCall {
    pub chamber: Chamber,
    pub numero: String,
    pub titre: String,
    pub date: String,
    pub sort: Outcome,
    /// Outcome text as published upstream.
    pub raw_sort: String,
    pub counts: VoteCounts,
    /// Empty in summary listings and for sources without a breakdown.
    pub group_breakdown: Vec<GroupVoteBlock>,
}

/// A parliamentary group (organisme).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParliamentaryGroup {
    pub slug: String,
    pub name: String,
    pub acronym: String,
    pub color: String,
}
