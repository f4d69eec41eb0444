use std::fmt;

use thirtyfour::By;

/// A strategy + value pair identifying a UI element. Pure value, no lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    Class(String),
    Tag(String),
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn class(value: impl Into<String>) -> Self {
        Self::Class(value.into())
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::Tag(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    /// XPath for a `tag` element whose visible text contains `needle`.
    pub fn text_contains(tag: &str, needle: &str) -> Self {
        Self::XPath(format!("//{tag}[contains(text(), '{needle}')]"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(v) => write!(f, "id={v}"),
            Self::Class(v) => write!(f, "class={v}"),
            Self::Tag(v) => write!(f, "tag={v}"),
            Self::Css(v) => write!(f, "css={v}"),
            Self::XPath(v) => write!(f, "xpath={v}"),
        }
    }
}

impl From<&Locator> for By {
    fn from(locator: &Locator) -> Self {
        match locator {
            Locator::Id(v) => By::Id(v.clone()),
            Locator::Class(v) => By::ClassName(v.clone()),
            Locator::Tag(v) => By::Tag(v.clone()),
            Locator::Css(v) => By::Css(v.clone()),
            Locator::XPath(v) => By::XPath(v.clone()),
        }
    }
}
