//! CORS relay rewriters.

/// Turns a target URL into a relay URL that fetches it on our behalf.
///
/// Built from a template such as `https://corsproxy.io/?{url}`; `{url}` is
/// replaced by the percent-encoded target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRewriter {
    name: String,
    template: String,
}

impl ProxyRewriter {
    #[must_use]
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        let name = relay_host(&template).to_string();
        Self { name, template }
    }

    /// Host of the relay, used in logs and failure reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rewrite(&self, url: &str) -> String {
        self.template.replace("{url}", &urlencoding::encode(url))
    }
}

fn relay_host(template: &str) -> &str {
    let rest = template.split_once("://").map_or(template, |(_, rest)| rest);
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    &rest[..end]
}
