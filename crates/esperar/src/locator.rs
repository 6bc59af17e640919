//! Locator abstraction for describing how to find elements.
//!
//! A [`Locator`] is an immutable, comparable descriptor: a kind plus the
//! expression string for that kind. The resolver evaluates locators against
//! the remote document; nothing here touches the network.
//!
//! The one transform that lives with the locator itself is
//! [`Locator::for_scope`]: XPath expressions anchored at the document root
//! (`//button`) silently search the whole document even when evaluated
//! against a parent node, so scoped queries rewrite them to `.//button`
//! first. Everything else passes through untouched.

use std::fmt;

/// How to find one or more elements in the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// XPath expression (e.g. `//table//tr`)
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
    /// CSS selector (e.g. `button.primary`)
    Css(String),
    /// Class name
    ClassName(String),
    /// Tag name (e.g. `table`)
    TagName(String),
    /// Exact anchor text
    LinkText(String),
    /// Substring of anchor text
    PartialLinkText(String),
}

impl Locator {
    /// Create an XPath locator
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Create an id locator
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a name locator
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Create a CSS selector locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a class-name locator
    #[must_use]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Create a tag-name locator
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Create a link-text locator
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Create a partial link-text locator
    #[must_use]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// The raw expression string, whatever the kind.
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::XPath(e)
            | Self::Id(e)
            | Self::Name(e)
            | Self::Css(e)
            | Self::ClassName(e)
            | Self::TagName(e)
            | Self::LinkText(e)
            | Self::PartialLinkText(e) => e,
        }
    }

    /// Short label for the locator kind, used in `Display` and log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Css(_) => "css",
            Self::ClassName(_) => "class name",
            Self::TagName(_) => "tag name",
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
        }
    }

    /// Rewrite this locator for evaluation relative to a parent element.
    ///
    /// XPath expressions are usually written starting with `//` even when
    /// the author means "somewhere under this parent". Evaluated against a
    /// context node, `//x` still searches from the document root, so scoped
    /// queries rewrite it to `.//x`. Idempotent: a `.//x` input comes back
    /// unchanged, as does every non-XPath kind and any XPath that is not
    /// root-anchored.
    ///
    /// ```
    /// use esperar::Locator;
    ///
    /// assert_eq!(Locator::xpath("//td").for_scope(), Locator::xpath(".//td"));
    /// assert_eq!(Locator::xpath(".//td").for_scope(), Locator::xpath(".//td"));
    /// assert_eq!(Locator::css("td.total").for_scope(), Locator::css("td.total"));
    /// ```
    #[must_use]
    pub fn for_scope(&self) -> Self {
        match self {
            Self::XPath(expression) if expression.starts_with("//") => {
                Self::XPath(format!(".{expression}"))
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.expression())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod constructor_tests {
        use super::*;

        #[test]
        fn test_xpath_constructor() {
            let locator = Locator::xpath("//table//tr");
            assert!(matches!(locator, Locator::XPath(_)));
            assert_eq!(locator.expression(), "//table//tr");
        }

        #[test]
        fn test_css_constructor() {
            let locator = Locator::css("button.primary");
            assert_eq!(locator.expression(), "button.primary");
            assert_eq!(locator.kind(), "css");
        }

        #[test]
        fn test_id_constructor() {
            let locator = Locator::id("submit");
            assert_eq!(locator.expression(), "submit");
            assert_eq!(locator.kind(), "id");
        }

        #[test]
        fn test_locators_are_comparable() {
            assert_eq!(Locator::id("a"), Locator::id("a"));
            assert_ne!(Locator::id("a"), Locator::name("a"));
            assert_ne!(Locator::id("a"), Locator::id("b"));
        }
    }

    mod scope_rewrite_tests {
        use super::*;

        #[test]
        fn test_root_anchored_xpath_is_rewritten() {
            let locator = Locator::xpath("//td");
            assert_eq!(locator.for_scope(), Locator::xpath(".//td"));
        }

        #[test]
        fn test_rewrite_is_idempotent() {
            let once = Locator::xpath("//div[@id='x']").for_scope();
            let twice = once.for_scope();
            assert_eq!(once, twice);
        }

        #[test]
        fn test_already_relative_xpath_unchanged() {
            let locator = Locator::xpath(".//td");
            assert_eq!(locator.for_scope(), locator);
        }

        #[test]
        fn test_absolute_non_root_xpath_unchanged() {
            // "/html/body" is absolute but not the "anywhere" prefix
            let locator = Locator::xpath("/html/body");
            assert_eq!(locator.for_scope(), locator);
        }

        #[test]
        fn test_non_xpath_kinds_unchanged() {
            for locator in [
                Locator::id("x"),
                Locator::name("x"),
                Locator::css("//weird-but-css"),
                Locator::class_name("x"),
                Locator::tag_name("td"),
                Locator::link_text("Next"),
                Locator::partial_link_text("Nex"),
            ] {
                assert_eq!(locator.for_scope(), locator);
            }
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_includes_kind_and_expression() {
            assert_eq!(Locator::xpath("//tr").to_string(), "xpath: //tr");
            assert_eq!(Locator::link_text("Next").to_string(), "link text: Next");
        }
    }
}
