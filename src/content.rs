//! Site copy, authored in `assets/content.json` and compiled into the binary.

use log::error;
use serde::Deserialize;
use thiserror::Error;

const EMBEDDED: &str = include_str!("../assets/content.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content.json is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("navigation needs at least {needed} items for the bar, found {found}")]
    TooFewNavItems { needed: usize, found: usize },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Brand {
    pub name: String,
    pub description: String,
    pub logo: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub photo: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavItem {
    pub name: String,
    pub short_name: String,
    pub image: String,
    pub href: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FooterGroup {
    pub title: String,
    pub links: Vec<Link>,
    #[serde(default)]
    pub button: Option<Link>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Content {
    pub brands: Vec<Brand>,
    pub team: Vec<TeamMember>,
    pub nav: Vec<NavItem>,
    pub footer: Vec<FooterGroup>,
}

/// How many navigation items the collapsed bar shows on wide screens.
pub const NAV_BAR_ITEMS: usize = 4;

impl Content {
    pub fn parse(json: &str) -> Result<Content, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        if content.nav.len() < NAV_BAR_ITEMS {
            return Err(ContentError::TooFewNavItems {
                needed: NAV_BAR_ITEMS,
                found: content.nav.len(),
            });
        }
        Ok(content)
    }

    /// The embedded copy, or empty lists if it cannot be read.
    pub fn embedded() -> Content {
        Content::parse(EMBEDDED).unwrap_or_else(|e| {
            error!("{}", e);
            Content::default()
        })
    }
}
