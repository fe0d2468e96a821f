//! Source adapters: raw upstream legislator JSON to [`LegislatorRecord`].

use pv_text::slugify;
use serde_json::Value;

use super::normalize::{first_text, text, unwrap_envelope};
use super::types::{Chamber, LegislatorRecord, SourceTag};

/// Maps one raw upstream record onto the uniform legislator shape.
///
/// Implementations never fail; absent fields become empty strings.
pub trait LegislatorAdapter {
    fn source(&self) -> SourceTag;

    fn to_record(&self, raw: &Value) -> LegislatorRecord;
}

fn join_name(given: &str, family: &str) -> String {
    format!("{given} {family}").trim().to_string()
}

/// Flat per-person records from the open-data register of elected officials.
#[derive(Debug, Clone, Copy)]
pub struct OpenDataAdapter {
    pub chamber: Chamber,
}

impl LegislatorAdapter for OpenDataAdapter {
    fn source(&self) -> SourceTag {
        SourceTag::OpenData
    }

    fn to_record(&self, raw: &Value) -> LegislatorRecord {
        let given_name = text(raw, "prenom_elu");
        let family_name = text(raw, "nom_elu");
        let full_name = join_name(&given_name, &family_name);

        LegislatorRecord {
            chamber: self.chamber,
            slug: slugify(&full_name),
            full_name,
            family_name,
            given_name,
            group_abbreviation: text(raw, "nom_parti"),
            district: first_text(raw, &["nom_departement", "nom_region"]),
            district_number: String::new(),
            sex: text(raw, "code_sexe"),
            birth_date: text(raw, "date_naissance"),
            profession: String::new(),
            source: self.source(),
        }
    }
}

/// Per-legislator documents from the chamber hosts, either flat or wrapped in
/// `{depute: {...}}` / `{senateur: {...}}`.
#[derive(Debug, Clone, Copy)]
pub struct NosParlementairesAdapter {
    pub chamber: Chamber,
}

impl LegislatorAdapter for NosParlementairesAdapter {
    fn source(&self) -> SourceTag {
        self.chamber.source()
    }

    fn to_record(&self, raw: &Value) -> LegislatorRecord {
        let person = unwrap_envelope(raw, self.chamber.member_key());

        let given_name = text(person, "prenom");
        let family_name = text(person, "nom_de_famille");
        let mut full_name = text(person, "nom");
        if full_name.is_empty() {
            full_name = join_name(&given_name, &family_name);
        }

        let mut slug = text(person, "slug");
        if slug.is_empty() {
            slug = slugify(&full_name);
        }

        let group_abbreviation = match text(person, "groupe_sigle") {
            sigle if !sigle.is_empty() => sigle,
            _ => person
                .get("groupe")
                .map(|g| text(g, "organisme"))
                .unwrap_or_default(),
        };

        LegislatorRecord {
            chamber: self.chamber,
            full_name,
            family_name,
            given_name,
            slug,
            group_abbreviation,
            district: text(person, "nom_circo"),
            district_number: text(person, "num_circo"),
            sex: text(person, "sexe"),
            birth_date: text(person, "date_naissance"),
            profession: text(person, "profession"),
            source: self.source(),
        }
    }
}
