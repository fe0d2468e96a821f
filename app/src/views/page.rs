//! Plain-text pages and the sink that displays them.

use std::fmt;

use crate::net::ApiError;

/// A rendered view: a title and its body lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub lines: Vec<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Placeholder shown while a view loads.
    pub fn loading(message: &str) -> Self {
        let mut page = Self::new("Chargement");
        page.line(message);
        page
    }

    /// Failure state with a path back home.
    pub fn error(message: &str, error: &ApiError) -> Self {
        let mut page = Self::new("Erreur");
        page.line(format!("{message} {error}"))
            .blank()
            .line("Retour à l'accueil : #/");
        page
    }

    pub fn not_found(path: &str) -> Self {
        let mut page = Self::new("Page introuvable");
        page.line(format!("La page demandée n'existe pas : {path}"))
            .blank()
            .line("Retour à l'accueil : #/");
        page
    }

    /// Whether any line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Where views put their pages.
///
/// Takes `&self` because views share one sink with their async completions.
pub trait ViewSink {
    fn show(&self, page: Page);
}
