use serde::Deserialize;
use twelvedays_core::{Catalog, SpoilerLevel};

const SITE_TOML: &str = include_str!("../catalog.toml");

/// Navigation entry; spoiler links ask before leaving the page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct NavLink {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub spoiler: Option<SpoilerLevel>,
    #[serde(default)]
    pub confirm_title: Option<String>,
    #[serde(default)]
    pub confirm_message: Option<String>,
}

impl NavLink {
    pub(crate) fn confirm_title(&self) -> &str {
        self.confirm_title.as_deref().unwrap_or("Confirm Navigation")
    }

    pub(crate) fn confirm_message(&self) -> &str {
        self.confirm_message
            .as_deref()
            .unwrap_or("Are you sure you want to visit this page?")
    }
}

#[derive(Debug, Default, Deserialize)]
struct LinksFile {
    #[serde(default, rename = "link")]
    links: Vec<NavLink>,
}

/// Everything the page renders that is content rather than code.
#[derive(Debug)]
pub(crate) struct SiteData {
    pub catalog: Catalog,
    pub links: Vec<NavLink>,
}

impl SiteData {
    pub(crate) fn parse(source: &str) -> Result<Self, toml::de::Error> {
        let catalog: Catalog = toml::from_str(source)?;
        let LinksFile { links } = toml::from_str(source)?;
        Ok(Self { catalog, links })
    }

    pub(crate) fn embedded() -> Result<Self, toml::de::Error> {
        Self::parse(SITE_TOML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twelvedays_core::CardId;

    #[test]
    fn embedded_catalog_has_twelve_days() {
        let site = SiteData::embedded().unwrap();
        let days: Vec<u8> = site.catalog.bottles().iter().map(|b| b.day).collect();

        assert_eq!(days, (1..=12).collect::<Vec<_>>());
        assert!(site.catalog.get(&CardId::from(12u8)).is_some());
    }

    #[test]
    fn embedded_links_carry_spoiler_levels() {
        let site = SiteData::embedded().unwrap();

        assert!(site
            .links
            .iter()
            .any(|link| link.spoiler == Some(SpoilerLevel::Major)));
        assert!(site.links.iter().any(|link| link.spoiler.is_none()));
    }

    #[test]
    fn confirm_text_falls_back() {
        let site = SiteData::parse(
            r#"
            [[bottle]]
            day = 1
            name = "A"

            [[link]]
            title = "Lineup"
            href = "lineup.html"
            spoiler = "semi"
            "#,
        )
        .unwrap();

        let link = &site.links[0];
        assert_eq!(link.spoiler, Some(SpoilerLevel::Semi));
        assert_eq!(link.confirm_title(), "Confirm Navigation");
        assert_eq!(
            link.confirm_message(),
            "Are you sure you want to visit this page?"
        );
    }

    #[test]
    fn duplicate_days_fail_to_load() {
        let broken = SiteData::parse(
            r#"
            [[bottle]]
            day = 3
            name = "A"

            [[bottle]]
            day = 3
            name = "B"
            "#,
        );

        assert!(broken.is_err());
    }
}
