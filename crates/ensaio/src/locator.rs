//! Locators: descriptions of how to find elements in the rendered UI.
//!
//! A locator is an opaque strategy + selector pair. It is resolved against the
//! live DOM at use time, every time — nothing here holds an element handle, so
//! a locator never goes stale across waits.

use serde::{Deserialize, Serialize};

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "selector", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector (e.g., "//button[contains(., 'Salvar')]")
    XPath(String),
}

impl Selector {
    /// Get the raw selector string
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }

    /// Convert to a JavaScript expression resolving the first matching element
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
        }
    }

    /// Convert to a JavaScript expression counting matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
            ),
        }
    }
}

/// A locator for finding elements at interaction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
        }
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::XPath(selector.into()),
        }
    }

    /// Locate an element by its `id` attribute
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self::xpath(format!("//*[@id='{id}']"))
    }

    /// Locate a button by its visible text (substring match)
    #[must_use]
    pub fn button_text(text: &str) -> Self {
        Self::xpath(format!("//button[contains(., '{text}')]"))
    }

    /// Locate the first input following a label with the given text.
    ///
    /// Matches the form markup the target application renders: a `<label>`
    /// followed in document order by its input.
    #[must_use]
    pub fn label_input(label: &str) -> Self {
        Self::xpath(format!(
            "//label[contains(., '{label}')]/following::input[1]"
        ))
    }

    /// Locate an input by its placeholder text
    #[must_use]
    pub fn placeholder(placeholder: &str) -> Self {
        Self::xpath(format!("//input[@placeholder='{placeholder}']"))
    }

    /// Locate any element containing the given text
    #[must_use]
    pub fn containing_text(text: &str) -> Self {
        Self::xpath(format!("//*[contains(., '{text}')]"))
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the raw selector string
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.selector.as_str()
    }

    /// JavaScript expression resolving the first matching element
    #[must_use]
    pub fn to_query(&self) -> String {
        self.selector.to_query()
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.selector {
            Selector::Css(s) => write!(f, "css={s}"),
            Selector::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}
